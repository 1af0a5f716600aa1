//! Permutation groups.
//!
//! [`PermGroup`] is the interface shared by all group representations. Implementors provide
//! insertion, membership, order and enumeration of elements; everything else is derived from these
//! and provided by the trait.
use ahash::{AHashMap, AHashSet};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

use crate::action::LeftAction;
use crate::error::{Error, Result};
use crate::perm::Perm;
use crate::El;

/// How fixed points count when testing for transitivity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Transitivity {
    /// The points must form a single orbit.
    #[default]
    Strict,
    /// There must be exactly one orbit of length greater than one, fixed points are ignored.
    IgnoreFixedPoints,
}

/// A finite group of permutations.
///
/// A group starts out trivial (containing only the identity) and only ever grows: inserting a
/// permutation replaces the group by the group generated by it and the previous elements.
pub trait PermGroup: Default + Clone {
    /// Iterator over all elements of a group.
    type Perms<'a>: Iterator<Item = Perm>
    where
        Self: 'a;

    /// Extend the group to the group generated by its elements and `perm`.
    ///
    /// Does nothing when `perm` already is an element.
    fn insert(&mut self, perm: Perm);

    /// The number of elements.
    fn order(&self) -> BigUint;

    /// Whether `perm` is an element of the group.
    fn contains(&self, perm: &Perm) -> bool;

    /// Iterate over all elements of the group.
    ///
    /// The order of elements is unspecified. Every call returns a new, independent iterator.
    fn perms(&self) -> Self::Perms<'_>;

    /// A set of permutations generating the group.
    fn generators(&self) -> &[Perm];

    /// The group generated by the given permutations.
    fn from_generators<I>(generators: I) -> Self
    where
        I: IntoIterator<Item = Perm>,
    {
        let mut group = Self::default();
        for perm in generators {
            group.insert(perm);
        }
        group
    }

    /// Whether the group only contains the identity.
    fn is_trivial(&self) -> bool {
        self.order().is_one()
    }

    /// Partition the orbits of the given points.
    ///
    /// Each orbit starts with the first of `points` it contains, followed by the remaining
    /// elements in the order they are reached. Orbits can contain elements outside of `points`.
    fn orbits(&self, points: &[El]) -> Vec<Vec<El>> {
        let mut used = AHashSet::new();
        let mut orbits = vec![];

        for &start in points {
            if !used.insert(start) {
                continue;
            }
            let mut orbit = vec![start];
            let mut pos = 0;
            while pos < orbit.len() {
                let el = orbit[pos];
                for generator in self.generators() {
                    let image = generator.left_apply(el);
                    if used.insert(image) {
                        orbit.push(image);
                    }
                }
                pos += 1;
            }
            orbits.push(orbit);
        }

        orbits
    }

    /// Whether the group acts transitively on the given points.
    fn is_transitive(&self, points: &[El], transitivity: Transitivity) -> bool {
        let orbits = self.orbits(points);
        match transitivity {
            Transitivity::Strict => orbits.len() == 1,
            Transitivity::IgnoreFixedPoints => {
                orbits.iter().filter(|orbit| orbit.len() > 1).count() == 1
            }
        }
    }

    /// The subgroup generated by all elements satisfying a predicate.
    ///
    /// This is the subgroup of all elements satisfying the predicate when those elements are
    /// closed under multiplication.
    fn subgroup_search<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Perm) -> bool,
    {
        let mut group = Self::default();
        for perm in self.perms() {
            if predicate(&perm) {
                group.insert(perm);
            }
        }
        group
    }

    /// The subgroup of elements fixing `point`.
    fn stabilizer(&self, point: El) -> Self {
        self.subgroup_search(|perm| perm.image(point) == point)
    }

    /// The subgroup of elements commuting with every element of `other`.
    fn centralizer<H>(&self, other: &H) -> Self
    where
        H: PermGroup,
    {
        if other.is_trivial() || self.is_trivial() {
            return self.clone();
        }
        self.subgroup_search(|perm| {
            other
                .generators()
                .iter()
                .all(|generator| perm.commutes_with(generator))
        })
    }

    /// The subgroup of elements commuting with every element.
    fn center(&self) -> Self {
        self.centralizer(self)
    }

    /// The subgroup of elements `g` with `g * other * g⁻¹ == other`.
    fn normalizer<H>(&self, other: &H) -> Self
    where
        H: PermGroup,
    {
        self.subgroup_search(|perm| {
            other
                .generators()
                .iter()
                .all(|generator| other.contains(&generator.conjugate_by(perm)))
        })
    }

    /// Whether all elements commute.
    fn is_abelian(&self) -> bool {
        let generators = self.generators();
        generators.iter().enumerate().all(|(i, a)| {
            generators[i + 1..]
                .iter()
                .all(|b| a.commutes_with(b))
        })
    }

    /// Whether every element of this group is an element of `other`.
    fn is_subgroup<G>(&self, other: &G) -> bool
    where
        G: PermGroup,
    {
        if !other.order().is_multiple_of(&self.order()) {
            return false;
        }
        self.generators().iter().all(|perm| other.contains(perm))
    }

    /// Whether this group is closed under conjugation by elements of `other`.
    fn is_normal<G>(&self, other: &G) -> bool
    where
        G: PermGroup,
    {
        self.generators().iter().all(|perm| {
            other
                .generators()
                .iter()
                .all(|by| self.contains(&perm.conjugate_by(by)))
        })
    }

    /// The smallest subgroup containing `other` that is closed under conjugation by elements of
    /// this group.
    fn normal_closure<H>(&self, other: &H) -> Self
    where
        H: PermGroup,
    {
        let mut group = Self::default();
        for by in self.perms() {
            for perm in other.generators() {
                group.insert(perm.conjugate_by(&by));
            }
        }
        group
    }

    /// The subgroup generated by all commutators of elements of `first` and `second`.
    fn commutator_subgroup<A, B>(first: &A, second: &B) -> Self
    where
        A: PermGroup,
        B: PermGroup,
    {
        let mut group = Self::default();
        for a in first.perms() {
            for b in second.perms() {
                group.insert(a.commutator(&b));
            }
        }
        group
    }

    /// The subgroup generated by all commutators of elements of this group.
    fn derived_subgroup(&self) -> Self {
        Self::commutator_subgroup(self, self)
    }

    /// The group induced by the action on `points`.
    ///
    /// Point `points[i]` is relabeled as `i`. Fails with [`Error::NotTransitive`] unless `points`
    /// form a single orbit.
    fn action(&self, points: &[El]) -> Result<Self> {
        let index: AHashMap<El, El> = points
            .iter()
            .enumerate()
            .map(|(i, &point)| (point, i as El))
            .collect();

        let orbits = self.orbits(points);
        if index.len() != points.len()
            || orbits.len() != 1
            || orbits[0].iter().any(|point| !index.contains_key(point))
        {
            return Err(Error::NotTransitive);
        }

        let mut group = Self::default();
        for generator in self.generators() {
            let images = points
                .iter()
                .map(|&point| index[&generator.image(point)])
                .collect();
            group.insert(Perm::from_images(images));
        }
        Ok(group)
    }
}

//! Groups stored as the set of all their elements.
use std::collections::hash_set;
use std::iter::Cloned;

use ahash::AHashSet;
use log::debug;
use num_bigint::BigUint;

use crate::group::PermGroup;
use crate::perm::Perm;

/// A permutation group storing every element explicitly.
///
/// Membership tests are hash set lookups and iteration visits the stored elements. Memory and
/// insertion time grow linearly with the group order, so this is only suitable for groups with
/// up to a few hundred thousand elements. Use [`StabChain`](crate::StabChain) for larger groups.
#[derive(Clone, Debug)]
pub struct ClosureGroup {
    elements: AHashSet<Perm>,
    generators: Vec<Perm>,
}

impl Default for ClosureGroup {
    fn default() -> ClosureGroup {
        let mut elements = AHashSet::new();
        elements.insert(Perm::new());
        ClosureGroup {
            elements,
            generators: vec![],
        }
    }
}

impl ClosureGroup {
    /// The trivial group.
    pub fn new() -> ClosureGroup {
        ClosureGroup::default()
    }

    /// Multiply every element of `frontier` on the right by every element of `factors`, keep the
    /// products that are new and return them.
    fn saturate_step(&mut self, frontier: &[Perm], factors: &[Perm]) -> Vec<Perm> {
        let mut added = vec![];
        for perm in frontier {
            for factor in factors {
                let product = perm * factor;
                if !self.elements.contains(&product) {
                    self.elements.insert(product.clone());
                    added.push(product);
                }
            }
        }
        added
    }
}

impl PermGroup for ClosureGroup {
    type Perms<'a> = Cloned<hash_set::Iter<'a, Perm>>;

    /// Saturates the element set breadth first.
    ///
    /// A finite set containing the identity that is closed under multiplication on the right by
    /// each generator is the generated group. The previous elements are already closed under the
    /// previous generators, so the first pass multiplies all of them by `perm` and every further
    /// pass multiplies only the elements found in the pass before by all generators. This stops
    /// once a pass finds nothing new.
    fn insert(&mut self, perm: Perm) {
        if self.elements.contains(&perm) {
            return;
        }
        let old_order = self.elements.len();

        self.generators.push(perm.clone());

        let existing: Vec<Perm> = self.elements.iter().cloned().collect();
        let mut frontier = self.saturate_step(&existing, &[perm]);
        let mut passes = 1;

        while !frontier.is_empty() {
            let generators = self.generators.clone();
            frontier = self.saturate_step(&frontier, &generators);
            passes += 1;
        }

        debug!(
            "closure group grew from {} to {} elements in {} passes",
            old_order,
            self.elements.len(),
            passes
        );
    }

    fn order(&self) -> BigUint {
        BigUint::from(self.elements.len())
    }

    fn contains(&self, perm: &Perm) -> bool {
        self.elements.contains(perm)
    }

    fn perms(&self) -> Self::Perms<'_> {
        self.elements.iter().cloned()
    }

    fn generators(&self) -> &[Perm] {
        &self.generators
    }
}

impl Extend<Perm> for ClosureGroup {
    fn extend<I>(&mut self, perms: I)
    where
        I: IntoIterator<Item = Perm>,
    {
        for perm in perms {
            self.insert(perm);
        }
    }
}

impl FromIterator<Perm> for ClosureGroup {
    fn from_iter<I>(perms: I) -> ClosureGroup
    where
        I: IntoIterator<Item = Perm>,
    {
        ClosureGroup::from_generators(perms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::perm::tests::random_perm;
    use crate::El;

    fn cycle(points: &[El]) -> Perm {
        Perm::new().cycle(points)
    }

    #[test]
    fn trivial_group() {
        let group = ClosureGroup::new();
        assert_eq!(group.order(), BigUint::from(1u32));
        assert!(group.is_trivial());
        assert!(group.contains(&Perm::new()));
        assert_eq!(group.perms().collect::<Vec<_>>(), vec![Perm::new()]);
        assert!(group.generators().is_empty());
    }

    #[test]
    fn alternating_group_on_five_points() {
        let mut group = ClosureGroup::new();
        group.insert(cycle(&[0, 1, 2]));
        group.insert(cycle(&[1, 2, 3]));
        group.insert(cycle(&[2, 3, 4]));
        assert_eq!(group.order(), BigUint::from(60u32));
        assert!(group.perms().all(|perm| perm.is_even()));
        assert!(!group.contains(&cycle(&[0, 1])));
    }

    #[test]
    fn klein_four_group() {
        let group: ClosureGroup = vec![
            cycle(&[0, 1]).cycle(&[2, 3]),
            cycle(&[0, 2]).cycle(&[1, 3]),
        ]
        .into_iter()
        .collect();
        assert_eq!(group.order(), BigUint::from(4u32));
        assert!(group.contains(&cycle(&[0, 3]).cycle(&[1, 2])));
        assert!(!group.contains(&cycle(&[0, 1])));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut group = ClosureGroup::new();
        group.insert(cycle(&[0, 1, 2, 3]));
        group.insert(cycle(&[0, 1, 2, 3]));
        assert_eq!(group.order(), BigUint::from(4u32));
        assert_eq!(group.generators().len(), 1);

        // Already an element, so nothing changes
        group.insert(cycle(&[0, 2]).cycle(&[1, 3]));
        assert_eq!(group.order(), BigUint::from(4u32));
        assert_eq!(group.generators().len(), 1);

        group.extend(vec![cycle(&[0, 1])]);
        assert_eq!(group.order(), BigUint::from(24u32));
    }

    #[test]
    fn padded_perms_are_the_same_element() {
        let mut group = ClosureGroup::new();
        group.insert(Perm::from_vec(vec![1, 0, 2, 3]).unwrap());
        assert_eq!(group.order(), BigUint::from(2u32));
        assert!(group.contains(&cycle(&[0, 1])));
    }

    #[test]
    #[ignore = "enumerates 3674160 elements"]
    fn corner_cube() {
        let r = cycle(&[2, 13, 19, 4]).cycle(&[3, 11, 0, 6]).cycle(&[7, 8, 10, 9]);
        let d = cycle(&[5, 9, 13, 16]).cycle(&[6, 10, 14, 17]).cycle(&[18, 19, 0, 20]);
        let b = cycle(&[1, 16, 0, 8]).cycle(&[2, 15, 20, 10]).cycle(&[11, 12, 14, 13]);
        let group = ClosureGroup::from_generators(vec![r, d, b]);
        assert_eq!(group.order(), BigUint::from(3674160u32));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn closed_under_products(
            a in random_perm(0..7u32),
            b in random_perm(0..7u32),
        ) {
            let group = ClosureGroup::from_generators(vec![a.clone(), b.clone()]);
            prop_assert!(group.contains(&a));
            prop_assert!(group.contains(&b));
            let elements: Vec<Perm> = group.perms().collect();
            for x in elements.iter() {
                prop_assert!(group.contains(&x.inverse()));
                for y in elements.iter().take(10) {
                    prop_assert!(group.contains(&(x * y)));
                }
            }
        }
    }
}

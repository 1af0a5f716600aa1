//! Groups stored as a stabilizer chain.
//!
//! For a group G acting on {0, ..., n - 1} let G<sub>k</sub> be the subgroup of elements fixing
//! every point above k, so that G = G<sub>n-1</sub> ⊇ ... ⊇ G<sub>0</sub> = {1}. Level k of the
//! chain stores one representative of each coset of G<sub>k-1</sub> in G<sub>k</sub>, indexed by
//! the image of k. Every element of G then factors uniquely as a product of one representative
//! per level, which gives membership testing by sifting and the group order as the product of the
//! level sizes.
//!
//! The chain is kept complete while inserting with Knuth's variant of the Schreier-Sims algorithm:
//! `extend_generator` and `extend_transversal` call each other until
//! every product of a strong generator and a coset representative sifts through the chain.
use std::fmt;

use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::One;

use crate::group::PermGroup;
use crate::perm::Perm;
use crate::El;

/// A permutation group represented by a stabilizer chain.
///
/// The base is the sequence of points in descending order. Memory use is quadratic in the number
/// of points and independent of the group order.
#[derive(Clone, Debug)]
pub struct StabChain {
    size: usize,
    /// `transversals[k][j]` maps `k` to `j` and fixes every point above `k`.
    transversals: Vec<Vec<Option<Perm>>>,
    /// Every entry of `transversals`, in the order they were added.
    transversal_elements: Vec<Perm>,
    strong_generators: Vec<Perm>,
}

impl Default for StabChain {
    fn default() -> StabChain {
        StabChain {
            size: 1,
            transversals: vec![vec![Some(Perm::new())]],
            transversal_elements: vec![Perm::new()],
            strong_generators: vec![],
        }
    }
}

/// The chain level a permutation belongs to, its largest moved point.
fn level_of(perm: &Perm) -> usize {
    perm.max_moved().map_or(0, |max| max as usize)
}

impl StabChain {
    /// The trivial group.
    pub fn new() -> StabChain {
        StabChain::default()
    }

    /// Number of points the chain currently covers.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The strong generating set.
    pub fn strong_generators(&self) -> &[Perm] {
        &self.strong_generators
    }

    /// Coset representatives of level `level`, indexed by the image of `level`.
    ///
    /// Panics when `level` is not smaller than [`size`](StabChain::size).
    pub fn transversal(&self, level: usize) -> &[Option<Perm>] {
        &self.transversals[level]
    }

    /// Add levels until the chain covers {0, ..., size - 1}.
    ///
    /// New levels start out with the identity as their only representative. Existing levels are
    /// kept as they are.
    fn widen(&mut self, size: usize) {
        if size <= self.size {
            return;
        }
        debug!("widening stabilizer chain from {} to {} points", self.size, size);
        for level in self.size..size {
            let mut transversal = vec![None; level + 1];
            transversal[level] = Some(Perm::new());
            self.transversals.push(transversal);
        }
        self.size = size;
    }

    /// Remove the level `level` coset of `perm` if the chain has a representative for it.
    ///
    /// Returns `t⁻¹ * perm` for the representative `t` with the same image of `level`, which fixes
    /// `level` and every point above it.
    fn reduce(&self, level: usize, perm: &Perm) -> Option<Perm> {
        let image = perm.image(level as El) as usize;
        self.transversals[level]
            .get(image)
            .and_then(Option::as_ref)
            .map(|representative| &representative.inverse() * perm)
    }

    /// Make `perm`, which fixes every point above `level`, an element of the group.
    ///
    /// When its coset at `level` is already represented, the remainder is handled at a lower
    /// level. Otherwise it becomes a new strong generator and its products with all coset
    /// representatives are added.
    fn extend_generator(&mut self, level: usize, perm: Perm) {
        if self.contains(&perm) {
            return;
        }
        if let Some(reduced) = self.reduce(level, &perm) {
            self.extend_generator(level_of(&reduced), reduced);
            return;
        }

        trace!("new strong generator {} at level {}", perm, level);
        self.strong_generators.push(perm.clone());

        // Representatives added while iterating are visited as well
        let mut i = 0;
        while i < self.transversal_elements.len() {
            let product = &perm * &self.transversal_elements[i];
            self.extend_transversal(level_of(&product), product);
            i += 1;
        }
    }

    /// Make `perm`, which fixes every point above `level`, an element of the group.
    ///
    /// When its coset at `level` is not represented yet, `perm` becomes the representative and
    /// its products with all strong generators are added. Otherwise the remainder is handled as a
    /// generator at a lower level.
    fn extend_transversal(&mut self, level: usize, perm: Perm) {
        if self.contains(&perm) {
            return;
        }
        if let Some(reduced) = self.reduce(level, &perm) {
            self.extend_generator(level_of(&reduced), reduced);
            return;
        }

        let image = perm.image(level as El) as usize;
        trace!("new representative {} for {} -> {}", perm, level, image);
        self.transversals[level][image] = Some(perm.clone());
        self.transversal_elements.push(perm.clone());

        // Generators added while iterating are visited as well
        let mut i = 0;
        while i < self.strong_generators.len() {
            let product = &self.strong_generators[i] * &perm;
            let product_level = level_of(&product);
            if product_level == level {
                self.extend_transversal(product_level, product);
            } else {
                self.extend_generator(product_level, product);
            }
            i += 1;
        }
    }
}

impl PermGroup for StabChain {
    type Perms<'a> = ChainPerms<'a>;

    fn insert(&mut self, perm: Perm) {
        self.widen(perm.degree());
        self.extend_generator(level_of(&perm), perm);
    }

    fn order(&self) -> BigUint {
        self.transversals
            .iter()
            .map(|transversal| transversal.iter().filter(|entry| entry.is_some()).count())
            .fold(BigUint::one(), |acc, count| acc * BigUint::from(count))
    }

    /// Sifts `perm` through the chain, from the top level down.
    ///
    /// Permutations moving points the chain doesn't cover are never elements. The chain is not
    /// widened by this.
    fn contains(&self, perm: &Perm) -> bool {
        if perm.degree() > self.size {
            return false;
        }

        let mut perm = perm.clone();
        for level in (1..self.size).rev() {
            match self.reduce(level, &perm) {
                Some(reduced) => perm = reduced,
                None => return false,
            }
        }
        true
    }

    fn perms(&self) -> ChainPerms<'_> {
        let columns: Vec<Vec<usize>> = self
            .transversals
            .iter()
            .map(|transversal| {
                transversal
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.is_some())
                    .map(|(image, _)| image)
                    .collect()
            })
            .collect();
        ChainPerms {
            chain: self,
            counter: vec![0; columns.len()],
            columns,
            done: false,
        }
    }

    fn generators(&self) -> &[Perm] {
        &self.strong_generators
    }
}

impl Extend<Perm> for StabChain {
    fn extend<I>(&mut self, perms: I)
    where
        I: IntoIterator<Item = Perm>,
    {
        for perm in perms {
            self.insert(perm);
        }
    }
}

impl FromIterator<Perm> for StabChain {
    fn from_iter<I>(perms: I) -> StabChain
    where
        I: IntoIterator<Item = Perm>,
    {
        StabChain::from_generators(perms)
    }
}

impl fmt::Display for StabChain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "StabChain with {} strong generators",
            self.strong_generators.len()
        )
    }
}

/// Iterator over all elements of a [`StabChain`].
///
/// Visits every choice of one coset representative per level, counting like an odometer with the
/// top level as the fastest digit.
#[derive(Clone)]
pub struct ChainPerms<'a> {
    chain: &'a StabChain,
    /// Images with a representative, per level.
    columns: Vec<Vec<usize>>,
    /// Current index into `columns`, per level.
    counter: Vec<usize>,
    done: bool,
}

impl<'a> Iterator for ChainPerms<'a> {
    type Item = Perm;

    fn next(&mut self) -> Option<Perm> {
        if self.done {
            return None;
        }

        let mut perm = Perm::new();
        for (level, (columns, &index)) in self.columns.iter().zip(self.counter.iter()).enumerate()
        {
            if let Some(representative) = &self.chain.transversals[level][columns[index]] {
                perm = representative * &perm;
            }
        }

        let mut level = self.counter.len();
        loop {
            if level == 0 {
                self.done = true;
                break;
            }
            level -= 1;
            if self.counter[level] + 1 < self.columns[level].len() {
                self.counter[level] += 1;
                break;
            }
            self.counter[level] = 0;
        }

        Some(perm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ahash::AHashSet;
    use proptest::prelude::*;

    use crate::closure::ClosureGroup;
    use crate::perm::tests::random_perm;

    fn cycle(points: &[El]) -> Perm {
        Perm::new().cycle(points)
    }

    fn corner_cube_turns() -> (Perm, Perm, Perm) {
        let r = cycle(&[2, 13, 19, 4]).cycle(&[3, 11, 0, 6]).cycle(&[7, 8, 10, 9]);
        let d = cycle(&[5, 9, 13, 16]).cycle(&[6, 10, 14, 17]).cycle(&[18, 19, 0, 20]);
        let b = cycle(&[1, 16, 0, 8]).cycle(&[2, 15, 20, 10]).cycle(&[11, 12, 14, 13]);
        (r, d, b)
    }

    fn corner_cube_order() -> BigUint {
        BigUint::from(6u32 * 9 * 12 * 15 * 18 * 21)
    }

    /// Every representative maps its level to its column and fixes everything above its level.
    fn assert_valid_chain(chain: &StabChain) {
        assert_eq!(chain.transversals.len(), chain.size());
        for level in 0..chain.size() {
            let transversal = chain.transversal(level);
            assert_eq!(transversal.len(), level + 1);
            assert_eq!(transversal[level], Some(Perm::new()));
            for (image, entry) in transversal.iter().enumerate() {
                if let Some(representative) = entry {
                    assert_eq!(representative.image(level as El), image as El);
                    assert!(level_of(representative) <= level);
                    assert!(chain.contains(representative));
                }
            }
        }
    }

    #[test]
    fn trivial_group() {
        let group = StabChain::new();
        assert_eq!(group.size(), 1);
        assert_eq!(group.order(), BigUint::one());
        assert!(group.contains(&Perm::new()));
        assert_eq!(group.perms().collect::<Vec<_>>(), vec![Perm::new()]);
        assert_eq!(group.to_string(), "StabChain with 0 strong generators");
    }

    #[test]
    fn klein_four_group() {
        let mut group = StabChain::new();
        let a = cycle(&[0, 1]).cycle(&[2, 3]);
        let b = cycle(&[0, 2]).cycle(&[1, 3]);
        group.insert(a.clone());
        group.insert(b.clone());

        assert_eq!(group.order(), BigUint::from(4u32));
        assert!(group.contains(&Perm::new()));
        assert!(group.contains(&a));
        assert!(group.contains(&b));
        assert!(!group.contains(&cycle(&[0, 1])));

        let elements: AHashSet<Perm> = group.perms().collect();
        let expected: AHashSet<Perm> = vec![
            Perm::new(),
            a,
            b,
            cycle(&[0, 3]).cycle(&[1, 2]),
        ]
        .into_iter()
        .collect();
        assert_eq!(elements, expected);
        assert_valid_chain(&group);
    }

    #[test]
    fn alternating_group_on_five_points() {
        let group: StabChain = vec![cycle(&[0, 1, 2]), cycle(&[1, 2, 3]), cycle(&[2, 3, 4])]
            .into_iter()
            .collect();
        assert_eq!(group.order(), BigUint::from(60u32));
        assert_eq!(group.perms().count(), 60);
        assert!(group.perms().all(|perm| perm.is_even()));
        assert_valid_chain(&group);
    }

    #[test]
    fn contains_does_not_widen() {
        let group = StabChain::from_generators(vec![cycle(&[0, 1, 2])]);
        assert_eq!(group.size(), 3);
        assert!(!group.contains(&cycle(&[0, 50])));
        assert_eq!(group.size(), 3);
        assert!(group.contains(&cycle(&[0, 2, 1])));
    }

    #[test]
    fn widening_keeps_levels() {
        let mut group = StabChain::new();
        group.insert(cycle(&[0, 1]));
        assert_eq!(group.order(), BigUint::from(2u32));
        group.insert(cycle(&[5, 6]));
        assert_eq!(group.size(), 7);
        assert_eq!(group.order(), BigUint::from(4u32));
        assert!(group.contains(&cycle(&[0, 1]).cycle(&[5, 6])));
        assert!(!group.contains(&cycle(&[1, 5])));
        assert_valid_chain(&group);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut group = StabChain::new();
        let perm = cycle(&[0, 1, 2, 3, 4]);
        group.insert(perm.clone());
        let generators = group.strong_generators().len();
        group.insert(perm.clone());
        group.insert(perm.pow(2));
        assert_eq!(group.order(), BigUint::from(5u32));
        assert_eq!(group.strong_generators().len(), generators);
    }

    #[test]
    fn iteration_is_restartable() {
        let group = StabChain::from_generators(vec![cycle(&[0, 1]), cycle(&[0, 1, 2, 3])]);
        let mut first = group.perms();
        let second: Vec<Perm> = group.perms().collect();
        assert_eq!(first.next(), second.first().cloned());
        assert_eq!(second.len(), 24);
        assert_eq!(first.count(), 23);
        assert_eq!(
            second.iter().cloned().collect::<AHashSet<_>>().len(),
            24
        );
    }

    #[test]
    fn growing_order() {
        let mut group = StabChain::new();
        let steps: [(&[&[El]], u32); 7] = [
            (&[&[0, 1, 2], &[3, 5, 4]], 3),
            (&[&[0, 3], &[1, 4], &[2, 5]], 6),
            (&[&[0, 6], &[1, 7], &[2, 8]], 6 * 9),
            (&[&[0, 9], &[1, 10], &[2, 11]], 6 * 9 * 12),
            (&[&[0, 12], &[1, 13], &[2, 14]], 6 * 9 * 12 * 15),
            (&[&[0, 15], &[1, 16], &[2, 17]], 6 * 9 * 12 * 15 * 18),
            (&[&[0, 18], &[1, 19], &[2, 20]], 6 * 9 * 12 * 15 * 18 * 21),
        ];
        for (cycles, order) in steps.iter() {
            let mut perm = Perm::new();
            for points in cycles.iter() {
                perm.apply_cycle(points);
            }
            group.insert(perm);
            assert_eq!(group.order(), BigUint::from(*order));
        }
        assert_valid_chain(&group);
    }

    #[test]
    fn corner_cube_generators() {
        let (r, d, b) = corner_cube_turns();
        let group = StabChain::from_generators(vec![r.clone(), d.clone(), b.clone()]);
        assert_eq!(group.order(), corner_cube_order());
        assert!(group.contains(&(&(&r * &d) * &b.inverse())));
        assert!(!group.contains(&cycle(&[0, 1])));
        assert_valid_chain(&group);
    }

    #[test]
    fn corner_cube_face_turns() {
        let (r, d, b) = corner_cube_turns();
        let mut group = StabChain::new();
        for turn in [r, d, b].iter() {
            for power in 1..4 {
                group.insert(turn.pow(power));
            }
        }
        assert_eq!(group.order(), corner_cube_order());
    }

    #[test]
    fn corner_cube_quarter_turns() {
        let (r, d, b) = corner_cube_turns();
        let mut group = StabChain::new();
        for turn in [r, d, b].iter() {
            group.insert(turn.clone());
            group.insert(turn.inverse());
        }
        assert_eq!(group.order(), corner_cube_order());
    }

    #[test]
    fn large_symmetric_group() {
        let n = 20;
        let group = StabChain::from_generators(vec![
            cycle(&[0, 1]),
            cycle(&(0..n).collect::<Vec<El>>()),
        ]);
        let factorial = (2..=n).fold(BigUint::one(), |acc, k| acc * BigUint::from(k));
        assert_eq!(group.order(), factorial);
        assert!(group.contains(&cycle(&[3, 17, 19]).cycle(&[0, 10])));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn agrees_with_closure(
            a in random_perm(0..7u32),
            b in random_perm(0..7u32),
        ) {
            let chain = StabChain::from_generators(vec![a.clone(), b.clone()]);
            let closure = ClosureGroup::from_generators(vec![a, b]);

            prop_assert_eq!(chain.order(), closure.order());
            let elements: AHashSet<Perm> = chain.perms().collect();
            prop_assert_eq!(BigUint::from(elements.len()), chain.order());
            for perm in elements.iter() {
                prop_assert!(closure.contains(perm));
            }
            assert_valid_chain(&chain);
        }

        #[test]
        fn non_members_are_rejected(
            a in random_perm(0..8u32),
            candidate in random_perm(0..8u32),
        ) {
            let chain = StabChain::from_generators(vec![a.clone()]);
            let closure = ClosureGroup::from_generators(vec![a]);
            prop_assert_eq!(chain.contains(&candidate), closure.contains(&candidate));
        }
    }
}

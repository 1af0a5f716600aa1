//! Permutations of finite sets.
use std::fmt;
use std::ops::Mul;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::action::{LeftAction, RightAction};
use crate::error::{Error, Result};
use crate::parity::Parity;
use crate::El;

/// Symbols used by [`Perm::label`], one per image.
const LABEL_ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_-";

/// A permutation of a finite set.
///
/// A permutation rearranges the elements of a finite set. It is a bijection from a set to the same
/// set.
///
/// Here these sets are always {0, ..., n-1} for some n of the integer type [`El`]. Every
/// permutation is implicitly extended to all of [`El`] by fixing every point it doesn't mention,
/// so any permutation can be applied to any [`El`] and any two permutations can be composed.
///
/// Internally a permutation is stored as the images of {0, ..., n - 1} where n - 1 is the largest
/// moved point. Trailing fixed points are never stored, which makes equality and hashing agree
/// with equality of the underlying bijections: `Perm::new()` equals a permutation built from
/// `[0, 1, 2]`.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<El>", into = "Vec<El>")
)]
pub struct Perm {
    images: Vec<El>,
}

impl Perm {
    /// The identity permutation.
    pub fn new() -> Perm {
        Perm::default()
    }

    /// Create a permutation from a vector containing the images of 0..n.
    ///
    /// Returns [`Error::NotAPermutation`] if the vector does not correspond to a permutation.
    pub fn from_vec(images: Vec<El>) -> Result<Perm> {
        let mut seen = vec![false; images.len()];

        for &image in images.iter() {
            let image = image as usize;
            if image >= images.len() || seen[image] {
                return Err(Error::NotAPermutation);
            }
            seen[image] = true;
        }

        Ok(Perm::from_images(images))
    }

    /// A uniformly random permutation of {0, ..., size - 1}.
    pub fn random<R>(size: usize, rng: &mut R) -> Perm
    where
        R: Rng + ?Sized,
    {
        let mut images: Vec<El> = (0..size as El).collect();
        images.shuffle(rng);
        Perm::from_images(images)
    }

    /// Wrap images that are already known to form a bijection.
    pub(crate) fn from_images(images: Vec<El>) -> Perm {
        let mut result = Perm { images };
        result.shrink();
        result
    }

    fn extend_to(&mut self, length: usize) {
        while self.images.len() < length {
            self.images.push(self.images.len() as El);
        }
    }

    fn shrink(&mut self) {
        while let Some(&last) = self.images.last() {
            if last as usize != self.images.len() - 1 {
                break;
            }
            self.images.pop();
        }
    }

    /// The image of an element.
    ///
    /// Elements outside of the stored domain are fixed. This never modifies the permutation.
    pub fn image(&self, el: El) -> El {
        self.images.get(el as usize).copied().unwrap_or(el)
    }

    /// The images of {0, ..., degree - 1}.
    pub fn images(&self) -> &[El] {
        &self.images
    }

    /// Size of the effective domain, one more than the largest moved element.
    ///
    /// This is zero for the identity.
    pub fn degree(&self) -> usize {
        self.images.len()
    }

    /// The largest element moved by this permutation.
    pub fn max_moved(&self) -> Option<El> {
        self.images.len().checked_sub(1).map(|max| max as El)
    }

    /// The smallest element moved by this permutation.
    pub fn min_moved(&self) -> Option<El> {
        self.support().next()
    }

    /// Iterator over all elements moved by this permutation, in ascending order.
    pub fn support(&self) -> impl Iterator<Item = El> + '_ {
        self.images
            .iter()
            .enumerate()
            .filter(|&(i, &image)| i as El != image)
            .map(|(i, _)| i as El)
    }

    /// Whether this is the identity permutation.
    pub fn is_identity(&self) -> bool {
        self.images.is_empty()
    }

    /// Apply a transposition of two elements on the right.
    pub fn right_transpose(&mut self, a: El, b: El) {
        self.extend_to(a.max(b) as usize + 1);
        self.images.swap(a as usize, b as usize);
        self.shrink();
    }

    /// Apply a cycle on the right.
    ///
    /// Afterwards `self` is the product of its previous value and the cycle `(a b c ...)`, which
    /// maps `a` to `b`, `b` to `c` and so on. Returns `self` so that calls can be chained.
    ///
    /// Panics when the cycle contains an element more than once.
    pub fn apply_cycle(&mut self, cycle: &[El]) -> &mut Perm {
        let max = match cycle.iter().max() {
            Some(&max) => max,
            None => return self,
        };

        let mut seen = vec![false; max as usize + 1];
        for &el in cycle {
            assert!(!seen[el as usize], "element {} repeated in cycle", el);
            seen[el as usize] = true;
        }

        self.extend_to(max as usize + 1);
        let first = self.images[cycle[0] as usize];
        for pair in cycle.windows(2) {
            self.images[pair[0] as usize] = self.images[pair[1] as usize];
        }
        self.images[cycle[cycle.len() - 1] as usize] = first;
        self.shrink();
        self
    }

    /// Consume this permutation and return it with a cycle applied on the right.
    ///
    /// This is convenient for building permutations from cycle notation:
    ///
    /// ```
    /// use permgroups::Perm;
    ///
    /// let perm = Perm::new().cycle(&[0, 1, 2]).cycle(&[3, 4]);
    /// assert_eq!(perm.to_string(), "(0 1 2)(3 4)");
    /// ```
    pub fn cycle(mut self, cycle: &[El]) -> Perm {
        self.apply_cycle(cycle);
        self
    }

    /// The inverse of this permutation.
    pub fn inverse(&self) -> Perm {
        let mut images = vec![0; self.images.len()];
        for (i, &image) in self.images.iter().enumerate() {
            images[image as usize] = i as El;
        }
        // The support of the inverse is the same, so there is nothing to shrink
        Perm { images }
    }

    /// The square of this permutation.
    pub fn square(&self) -> Perm {
        self * self
    }

    /// A power of this permutation.
    ///
    /// This implementation performs efficient exponentiation by squaring. Negative exponents are
    /// powers of the inverse.
    pub fn pow(&self, exponent: i64) -> Perm {
        let mut base = if exponent < 0 {
            self.inverse()
        } else {
            self.clone()
        };
        let mut exp = exponent.unsigned_abs();
        let mut result = Perm::new();

        while exp > 0 {
            if exp.is_odd() {
                result = &result * &base;
            }
            exp /= 2;
            if exp > 0 {
                base = base.square();
            }
        }

        result
    }

    /// The order of this permutation, the least common multiple of its cycle lengths.
    pub fn order(&self) -> BigUint {
        self.cycles()
            .fold(BigUint::one(), |acc, cycle| acc.lcm(&BigUint::from(cycle.count())))
    }

    /// Return the cycle starting at an element.
    ///
    /// Returns a 1-cycle when the element is not in the support of this permutation.
    pub fn cycle_at(&self, el: El) -> Cycle {
        Cycle {
            perm: self,
            pos: Some(el),
            start: el,
        }
    }

    /// Returns an iterator over all proper cycles of a permutation.
    ///
    /// The returned iterator does not produce any 1-cycles. Each cycle starts at its smallest
    /// element and cycles are produced in ascending order of their smallest element.
    pub fn cycles(&self) -> Cycles {
        Cycles {
            perm: self,
            seen: vec![false; self.images.len()],
            pos: 0,
        }
    }

    /// Number of cycles on the effective domain, counting fixed points as 1-cycles.
    pub fn cycle_count(&self) -> usize {
        let proper: Vec<usize> = self.cycles().map(|cycle| cycle.count()).collect();
        let moved: usize = proper.iter().sum();
        proper.len() + (self.degree() - moved)
    }

    /// The parity of this permutation.
    pub fn parity(&self) -> Parity {
        Parity::from_number(self.degree() - self.cycle_count())
    }

    /// The sign of this permutation, `+1` if even and `-1` if odd.
    pub fn sign(&self) -> i8 {
        self.parity().sign()
    }

    /// Whether this permutation is even.
    pub fn is_even(&self) -> bool {
        self.parity() == Parity::Even
    }

    /// Whether this permutation is odd.
    pub fn is_odd(&self) -> bool {
        self.parity() == Parity::Odd
    }

    /// Whether this permutation commutes with another one.
    pub fn commutes_with(&self, other: &Perm) -> bool {
        self * other == other * self
    }

    /// The commutator `self * other * self⁻¹ * other⁻¹`.
    pub fn commutator(&self, other: &Perm) -> Perm {
        &(&(self * other) * &self.inverse()) * &other.inverse()
    }

    /// The conjugate `by * self * by⁻¹`.
    pub fn conjugate_by(&self, by: &Perm) -> Perm {
        &(by * self) * &by.inverse()
    }

    /// The images of {0, ..., size - 1}.
    ///
    /// Fails with [`Error::SizeTooSmall`] when `size` is smaller than the degree.
    pub fn to_vec(&self, size: usize) -> Result<Vec<El>> {
        if size < self.degree() {
            return Err(Error::SizeTooSmall {
                size,
                degree: self.degree(),
            });
        }
        Ok((0..size as El).map(|el| self.image(el)).collect())
    }

    /// A fixed width string encoding the images of {0, ..., size - 1}, one symbol per image.
    ///
    /// Permutations that differ only in trailing fixed points have equal labels only when they
    /// are labeled with the same `size`, so callers keying on labels must use one size
    /// consistently.
    pub fn label(&self, size: usize) -> Result<String> {
        self.to_vec(size)?
            .into_iter()
            .map(|image| {
                LABEL_ALPHABET
                    .get(image as usize)
                    .map(|&symbol| symbol as char)
                    .ok_or(Error::LabelOverflow { image })
            })
            .collect()
    }

    fn compose(&self, other: &Perm) -> Perm {
        let length = self.degree().max(other.degree());
        Perm::from_images(
            (0..length as El)
                .map(|el| self.image(other.image(el)))
                .collect(),
        )
    }
}

impl TryFrom<Vec<El>> for Perm {
    type Error = Error;

    fn try_from(images: Vec<El>) -> Result<Perm> {
        Perm::from_vec(images)
    }
}

impl From<Perm> for Vec<El> {
    /// The images of the effective domain.
    fn from(perm: Perm) -> Vec<El> {
        perm.images
    }
}

/// Application of a permutation to an element.
impl LeftAction<El> for Perm {
    fn left_apply(&self, el: El) -> El {
        self.image(el)
    }
}

/// Composition of a permutation on the left, `p.left_apply(q) == p * q`.
impl LeftAction<Perm> for Perm {
    fn left_apply(&self, perm: Perm) -> Perm {
        self.compose(&perm)
    }
}

/// Composition of a permutation on the right, `p.right_apply(q) == q * p`.
impl RightAction<Perm> for Perm {
    fn right_apply(&self, perm: Perm) -> Perm {
        perm.compose(self)
    }
}

/// Composition, `(p * q)(x) == p(q(x))`.
impl<'a, 'b> Mul<&'b Perm> for &'a Perm {
    type Output = Perm;

    fn mul(self, rhs: &'b Perm) -> Perm {
        self.compose(rhs)
    }
}

impl<'a> Mul<Perm> for &'a Perm {
    type Output = Perm;

    fn mul(self, rhs: Perm) -> Perm {
        self.compose(&rhs)
    }
}

impl<'b> Mul<&'b Perm> for Perm {
    type Output = Perm;

    fn mul(self, rhs: &'b Perm) -> Perm {
        self.compose(rhs)
    }
}

impl Mul for Perm {
    type Output = Perm;

    fn mul(self, rhs: Perm) -> Perm {
        self.compose(&rhs)
    }
}

impl fmt::Display for Perm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut empty = true;

        for cycle in self.cycles() {
            empty = false;
            fmt::Display::fmt(&cycle, f)?;
        }

        if empty {
            f.write_str("()")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Perm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Iterator over the elements of a permutation's cycle.
#[derive(Clone)]
pub struct Cycle<'a> {
    perm: &'a Perm,
    pos: Option<El>,
    start: El,
}

impl<'a> Iterator for Cycle<'a> {
    type Item = El;

    fn next(&mut self) -> Option<El> {
        self.pos.map(|pos| {
            let next = self.perm.image(pos);
            self.pos = if next == self.start { None } else { Some(next) };

            pos
        })
    }
}

impl<'a> fmt::Display for Cycle<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for el in self.clone() {
            f.write_str(if first { "(" } else { " " })?;
            first = false;
            fmt::Display::fmt(&el, f)?;
        }
        f.write_str(if first { "()" } else { ")" })
    }
}

impl<'a> fmt::Debug for Cycle<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Iterator over the cycles of a permutation.
#[derive(Clone)]
pub struct Cycles<'a> {
    perm: &'a Perm,
    seen: Vec<bool>,
    pos: El,
}

impl<'a> Iterator for Cycles<'a> {
    type Item = Cycle<'a>;

    fn next(&mut self) -> Option<Cycle<'a>> {
        loop {
            if self.pos as usize >= self.perm.degree() {
                return None;
            } else if self.seen[self.pos as usize] || self.perm.image(self.pos) == self.pos {
                self.pos += 1;
            } else {
                let cycle = self.perm.cycle_at(self.pos);
                for el in cycle.clone() {
                    self.seen[el as usize] = true;
                }
                return Some(cycle);
            }
        }
    }
}

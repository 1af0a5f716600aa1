//! Parity of permutations.
use std::ops::Mul;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parity of a [`Perm`](crate::Perm).
///
/// A permutation is even when it is a product of an even number of transpositions and odd
/// otherwise. Parity is a homomorphism, so the parity of a product is the [product](Parity::mul)
/// of the parities.
#[repr(u8)]
#[derive(Eq, PartialEq, Hash, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    /// An even number of transpositions. The parity of the identity.
    Even = 0,
    /// An odd number of transpositions.
    Odd = 1,
}

impl Parity {
    /// Returns the `Parity` of a given number.
    pub fn from_number(v: usize) -> Parity {
        if v % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    /// `0` for even and `1` for odd.
    pub fn zero_or_one(self) -> u8 {
        self as u8
    }

    /// The sign, `+1` for even and `-1` for odd.
    pub fn sign(self) -> i8 {
        match self {
            Parity::Even => 1,
            Parity::Odd => -1,
        }
    }
}

impl Mul for Parity {
    type Output = Parity;

    fn mul(self, rhs: Parity) -> Parity {
        Parity::from_number(self as usize + rhs as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn products() {
        assert_eq!(Parity::Even * Parity::Even, Parity::Even);
        assert_eq!(Parity::Even * Parity::Odd, Parity::Odd);
        assert_eq!(Parity::Odd * Parity::Even, Parity::Odd);
        assert_eq!(Parity::Odd * Parity::Odd, Parity::Even);
    }

    #[test]
    fn signs() {
        assert_eq!(Parity::Even.sign(), 1);
        assert_eq!(Parity::Odd.sign(), -1);
        assert_eq!(Parity::from_number(7).zero_or_one(), 1);
        assert_eq!(Parity::from_number(0), Parity::Even);
    }
}

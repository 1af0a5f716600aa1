//! Ranking and unranking of permutations.
//!
//! Two bijections between the permutations of {0, ..., size - 1} and the integers `0..size!` are
//! provided: the lexicographic order, computed via the Lehmer code, and the linear time ordering
//! of Myrvold and Ruskey.
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{Error, Result};
use crate::perm::Perm;
use crate::El;

fn factorial(size: usize) -> BigUint {
    (2..=size).fold(BigUint::one(), |acc, n| acc * BigUint::from(n))
}

/// Divide `rank` by `n` in place, returning the remainder.
fn take_digit(rank: &mut BigUint, n: usize) -> usize {
    let (quotient, remainder) = rank.div_rem(&BigUint::from(n));
    *rank = quotient;
    remainder
        .to_usize()
        .expect("remainder is smaller than the divisor")
}

impl Perm {
    /// The Lehmer code of this permutation as a permutation of {0, ..., size - 1}.
    ///
    /// Entry `i` counts the positions `j > i` whose image is smaller than the image of `i`.
    pub fn inversion_vector(&self, size: usize) -> Result<Vec<usize>> {
        let images = self.to_vec(size)?;
        Ok((0..size)
            .map(|i| images[i + 1..].iter().filter(|&&image| image < images[i]).count())
            .collect())
    }

    /// The position of this permutation in the lexicographic order of all permutations of
    /// {0, ..., size - 1}.
    pub fn rank_lex(&self, size: usize) -> Result<BigUint> {
        let lehmer = self.inversion_vector(size)?;
        // Horner evaluation in the factorial number system
        Ok(lehmer
            .into_iter()
            .enumerate()
            .fold(BigUint::zero(), |acc, (i, digit)| {
                acc * BigUint::from(size - i) + BigUint::from(digit)
            }))
    }

    /// The permutation of {0, ..., size - 1} at position `rank` in lexicographic order.
    ///
    /// Fails with [`Error::RankOutOfRange`] unless `rank < size!`.
    pub fn unrank_lex(size: usize, rank: &BigUint) -> Result<Perm> {
        let mut rest = rank.clone();
        let mut lehmer = vec![0; size];
        for n in 2..=size {
            lehmer[size - n] = take_digit(&mut rest, n);
        }
        if !rest.is_zero() {
            return Err(Error::RankOutOfRange {
                size,
                rank: rank.clone(),
            });
        }

        let mut unused: Vec<El> = (0..size as El).collect();
        let images = lehmer.into_iter().map(|digit| unused.remove(digit)).collect();
        Ok(Perm::from_images(images))
    }

    /// The Myrvold-Ruskey rank of this permutation as a permutation of {0, ..., size - 1}.
    pub fn rank_mr(&self, size: usize) -> Result<BigUint> {
        let mut images = self.to_vec(size)?;
        let mut inverse = self.inverse().to_vec(size)?;

        let mut rank = BigUint::zero();
        let mut scale = BigUint::one();
        for n in (2..=size).rev() {
            let s = images[n - 1] as usize;
            images.swap(n - 1, inverse[n - 1] as usize);
            inverse.swap(s, n - 1);
            rank += &scale * BigUint::from(s);
            scale *= BigUint::from(n);
        }

        Ok(rank)
    }

    /// The permutation of {0, ..., size - 1} with Myrvold-Ruskey rank `rank`.
    ///
    /// Fails with [`Error::RankOutOfRange`] unless `rank < size!`.
    pub fn unrank_mr(size: usize, rank: &BigUint) -> Result<Perm> {
        if *rank >= factorial(size) {
            return Err(Error::RankOutOfRange {
                size,
                rank: rank.clone(),
            });
        }

        let mut rest = rank.clone();
        let mut images: Vec<El> = (0..size as El).collect();
        for n in (1..=size).rev() {
            let digit = take_digit(&mut rest, n);
            images.swap(n - 1, digit);
        }

        Ok(Perm::from_images(images))
    }
}

//! Errors reported by permutation and group operations.
//!
//! All of these are deterministic consequences of the arguments passed in. Nothing is retried
//! internally, callers are expected to fix their input.
use num_bigint::BigUint;
use thiserror::Error;

use crate::El;

/// Error type for fallible permgroups operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An array form, label or rank was requested at a width narrower than the permutation's
    /// effective domain.
    #[error("size {size} is too small for a permutation of degree {degree}")]
    SizeTooSmall { size: usize, degree: usize },
    /// Unranking was asked for a rank outside of `0..size!`.
    #[error("rank {rank} is out of range for permutations of size {size}")]
    RankOutOfRange { size: usize, rank: BigUint },
    /// The given images do not form a bijection on `0..n`.
    #[error("images do not form a permutation")]
    NotAPermutation,
    /// An image is too large to be written with the label alphabet.
    #[error("image {image} cannot be encoded in a label")]
    LabelOverflow { image: El },
    /// An induced action was requested on points that do not form a single orbit.
    #[error("the group is not transitive on the given points")]
    NotTransitive,
}

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

//! A permutation group library
//!
//! This crate provides permutations of finite sets and two representations of the groups they
//! generate:
//!
//! * [`ClosureGroup`] stores every element explicitly. It is simple and fast for small groups.
//! * [`StabChain`] stores a stabilizer chain. Membership testing and order computation never
//!   enumerate the group, so it scales to groups with millions of elements.
//!
//! Both implement [`PermGroup`], which also provides the usual structural queries (orbits,
//! stabilizers, centralizers, normal closures, ...).
//!
//! ```
//! use num_bigint::BigUint;
//! use permgroups::{Perm, PermGroup, StabChain};
//!
//! let mut group = StabChain::new();
//! group.insert(Perm::new().cycle(&[0, 1, 2]));
//! group.insert(Perm::new().cycle(&[1, 2, 3]));
//! group.insert(Perm::new().cycle(&[2, 3, 4]));
//!
//! assert_eq!(group.order(), BigUint::from(60u32));
//! assert!(group.perms().all(|perm| perm.is_even()));
//! ```
pub mod action;
pub mod chain;
pub mod closure;
pub mod error;
pub mod group;
pub mod parity;
pub mod perm;
pub mod rank;

pub use chain::StabChain;
pub use closure::ClosureGroup;
pub use error::{Error, Result};
pub use group::{PermGroup, Transitivity};
pub use parity::Parity;
pub use perm::Perm;

/// Set element.
///
/// Set elements are represented by non-negative integers (`u32`).
pub type El = u32;

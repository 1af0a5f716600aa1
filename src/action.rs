//! Group actions.
//!
//! Permutations act on points (by mapping them to their image) and on other permutations (by
//! composition). Composition is not commutative, so both sides are provided.

/// Left action on `T`.
///
/// Elements of implementing types act on `T` values on the left.
pub trait LeftAction<T> {
    /// Act on a value on the left.
    fn left_apply(&self, value: T) -> T;
}

/// Right action on `T`.
///
/// Elements of implementing types act on `T` values on the right.
pub trait RightAction<T> {
    /// Act on a value on the right.
    fn right_apply(&self, value: T) -> T;
}

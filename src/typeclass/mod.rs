//! Algebraic vocabulary for homomorphic images.
//!
//! - [`Semigroup`]: Associative binary operations
//! - [`Monoid`]: Semigroup with identity element
//! - [`Sum`], [`Product`], [`Max`], [`Min`]: Numeric wrappers selecting a monoid
//!
//! Any [`Monoid`] can serve as the aggregate of a
//! [`FoldMap`](crate::persistent::FoldMap), which turns a plain mapping
//! function into a [`MonoidMap`](crate::persistent::MonoidMap).
//!
//! # Examples
//!
//! ```rust
//! use catenable::typeclass::{Monoid, Semigroup, Sum};
//!
//! let total = Sum::combine_all((1..=4).map(Sum));
//! assert_eq!(total, Sum(10));
//! assert_eq!(total.combine(Sum::empty()), Sum(10));
//! ```

mod monoid;
mod semigroup;
mod wrappers;

pub use monoid::Monoid;
pub use semigroup::Semigroup;
pub use wrappers::{Max, Min, Product, Sum};

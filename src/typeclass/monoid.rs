//! Aggregates with a neutral value.
//!
//! The empty sequence has an image too, and it must be the value that
//! changes nothing when catenated on either side. [`Monoid::empty`] provides
//! it; for the numeric wrappers it comes from `num-traits`.
//!
//! ```rust
//! use catenable::typeclass::{Min, Monoid, Semigroup};
//!
//! let lowest = Min::combine_all([Min(12_u16), Min(3), Min(40)]);
//! assert_eq!(lowest, Min(3));
//! assert_eq!(Min::<u16>::empty().combine(lowest), lowest);
//! ```

use std::ops::{Add, Mul};

use num_traits::{Bounded, One, Zero};

use super::semigroup::Semigroup;
use super::wrappers::{Max, Min, Product, Sum};

/// A [`Semigroup`] with a two-sided identity.
pub trait Monoid: Semigroup {
    /// The value with `empty().combine(x) == x == x.combine(empty())`.
    fn empty() -> Self;

    /// Folds any number of values, yielding [`Monoid::empty`] for none.
    fn combine_all<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        Self::reduce_all(values).unwrap_or_else(Self::empty)
    }
}

impl Monoid for String {
    fn empty() -> Self {
        Self::new()
    }
}

impl<T: Clone> Monoid for Vec<T> {
    fn empty() -> Self {
        Self::new()
    }
}

impl<T: Semigroup> Monoid for Option<T> {
    fn empty() -> Self {
        None
    }
}

impl<A: Add<Output = A> + Zero> Monoid for Sum<A> {
    fn empty() -> Self {
        Self(A::zero())
    }
}

impl<A: Mul<Output = A> + One> Monoid for Product<A> {
    fn empty() -> Self {
        Self(A::one())
    }
}

impl<A: Ord + Bounded> Monoid for Max<A> {
    fn empty() -> Self {
        Self(A::min_value())
    }
}

impl<A: Ord + Bounded> Monoid for Min<A> {
    fn empty() -> Self {
        Self(A::max_value())
    }
}

//! Associative combination of aggregates.
//!
//! An image tree caches, at each branch, the aggregate of everything below
//! it. Rebalancing regroups subtrees freely, so the only thing the cached
//! values may rely on is that regrouping does not change the result:
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! Order is preserved, so non-commutative aggregates such as `String`
//! concatenation are fine.
//!
//! ```rust
//! use catenable::typeclass::{Max, Semigroup};
//!
//! let grouped_left = Max(2).combine(Max(7)).combine(Max(4));
//! let grouped_right = Max(2).combine(Max(7).combine(Max(4)));
//! assert_eq!(grouped_left, grouped_right);
//! ```

use std::ops::{Add, Mul};

use super::wrappers::{Max, Min, Product, Sum};

/// Values with an associative, order-preserving `combine`.
pub trait Semigroup {
    /// Merges `self` (on the left) with `other` (on the right).
    #[must_use]
    fn combine(self, other: Self) -> Self;

    /// Merges two borrowed aggregates.
    ///
    /// Branch summaries are computed from children that stay shared, so the
    /// engine always goes through this method. The fallback clones both
    /// sides; collections override it to allocate once.
    ///
    /// ```rust
    /// use catenable::typeclass::Semigroup;
    ///
    /// let head = String::from("cat");
    /// assert_eq!(head.combine_ref(&String::from("enable")), "catenable");
    /// assert_eq!(head, "cat");
    /// ```
    #[must_use]
    fn combine_ref(&self, other: &Self) -> Self
    where
        Self: Clone,
    {
        Self::combine(self.clone(), other.clone())
    }

    /// Folds a run of values left to right. An empty run has no aggregate.
    fn reduce_all<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        let mut values = values.into_iter();
        let first = values.next()?;
        Some(values.fold(first, Self::combine))
    }
}

impl Semigroup for String {
    fn combine(mut self, other: Self) -> Self {
        self += &other;
        self
    }

    fn combine_ref(&self, other: &Self) -> Self {
        [self.as_str(), other.as_str()].concat()
    }
}

impl<T: Clone> Semigroup for Vec<T> {
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }

    fn combine_ref(&self, other: &Self) -> Self {
        [self.as_slice(), other.as_slice()].concat()
    }
}

/// Lifts a semigroup by treating `None` as "nothing seen yet".
impl<T: Semigroup> Semigroup for Option<T> {
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(left), Some(right)) => Some(left.combine(right)),
            (only, None) | (None, only) => only,
        }
    }
}

impl<A: Add<Output = A>> Semigroup for Sum<A> {
    fn combine(self, Self(right): Self) -> Self {
        let Self(left) = self;
        Self(left + right)
    }
}

impl<A: Mul<Output = A>> Semigroup for Product<A> {
    fn combine(self, Self(right): Self) -> Self {
        let Self(left) = self;
        Self(left * right)
    }
}

/// Ties keep the left operand.
impl<A: Ord> Semigroup for Max<A> {
    fn combine(self, other: Self) -> Self {
        if self.0 >= other.0 { self } else { other }
    }
}

/// Ties keep the left operand.
impl<A: Ord> Semigroup for Min<A> {
    fn combine(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[4, -1, 9], Some(12))]
    #[case(&[5], Some(5))]
    #[case(&[], None)]
    fn test_reduce_all_sums_runs(#[case] run: &[i32], #[case] expected: Option<i32>) {
        let reduced = Sum::reduce_all(run.iter().copied().map(Sum));
        assert_eq!(reduced, expected.map(Sum));
    }

    #[rstest]
    fn test_string_combination_keeps_order() {
        let words = ["per", "sis", "tent"].map(String::from);
        assert_eq!(String::reduce_all(words), Some("persistent".to_string()));
        assert_eq!("ab".to_string().combine_ref(&"cd".to_string()), "abcd");
    }

    #[rstest]
    fn test_vec_combine_ref_leaves_operands_intact() {
        let left = vec!['x'];
        let right = vec!['y', 'z'];
        assert_eq!(left.combine_ref(&right), vec!['x', 'y', 'z']);
        assert_eq!((left.len(), right.len()), (1, 2));
    }

    #[rstest]
    #[case(None, None, None)]
    #[case(Some(3), None, Some(3))]
    #[case(None, Some(8), Some(8))]
    #[case(Some(3), Some(8), Some(11))]
    fn test_option_skips_missing_sides(
        #[case] left: Option<i32>,
        #[case] right: Option<i32>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(left.map(Sum).combine(right.map(Sum)), expected.map(Sum));
    }

    #[rstest]
    fn test_extremes_pick_by_ordering() {
        assert_eq!(Max((5, 'a')).combine(Max((5, 'l'))), Max((5, 'l')));
        assert_eq!(Min((1, 'l')).combine(Min((1, 'z'))), Min((1, 'l')));
        assert_eq!(Min(9).combine(Min(2)), Min(2));
    }

    proptest! {
        #[test]
        fn prop_regrouping_strings_is_invisible(
            a in "[a-c]{0,4}",
            b in "[a-c]{0,4}",
            c in "[a-c]{0,4}",
        ) {
            let grouped_left = a.combine_ref(&b).combine(c.clone());
            let grouped_right = a.combine_ref(&b.combine_ref(&c));
            prop_assert_eq!(grouped_left, grouped_right);
        }

        #[test]
        fn prop_regrouping_products_is_invisible(a in -50_i64..50, b in -50_i64..50, c in -50_i64..50) {
            let grouped_left = Product(a).combine(Product(b)).combine(Product(c));
            let grouped_right = Product(a).combine(Product(b).combine(Product(c)));
            prop_assert_eq!(grouped_left, grouped_right);
        }
    }
}

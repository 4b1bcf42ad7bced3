//! Persistent sorted multiset.
//!
//! [`SortedMultiset`] is the [`SortedSet`](super::SortedSet) policy with
//! copies allowed: adding an element equal to stored ones places it after
//! them, so equal elements keep the order they were added in, and two
//! multisets may be catenated when their boundary elements are equal.
//!
//! # Examples
//!
//! ```rust
//! use catenable::persistent::SortedMultiset;
//!
//! let bag = SortedMultiset::new().add(2).add(1).add(2);
//! assert_eq!(bag.to_string(), "{1, 2, 2}");
//! assert_eq!(bag.occurrences(&2), 2_u32.into());
//!
//! let more = SortedMultiset::new().add(2).add(3);
//! assert_eq!(bag.catenate(&more).unwrap().len(), 5);
//! ```
//!
//! A [`SortedSet`](super::SortedSet) widens into a multiset (and either into
//! a [`CatenableList`](super::CatenableList)) in O(1) with `From`, keeping
//! the tree and every registered image:
//!
//! ```rust
//! use catenable::persistent::{CatenableList, SortedMultiset, SortedSet};
//!
//! let set = SortedSet::new().add(1).add(2);
//! let bag = SortedMultiset::from(set.clone()).add(2);
//! assert_eq!(bag.to_string(), "{1, 2, 2}");
//! assert_eq!(CatenableList::from(bag).add(0).to_string(), "[1, 2, 2, 0]");
//! ```

use num_bigint::BigUint;

use super::compare::Comparator;
use super::error::CollectionError;
use super::order::InsertBehavior;
use super::position::IntoPosition;
use super::sorted::sorted_collection;
use super::sorted_set::SortedSet;

sorted_collection! {
    /// A persistent multiset kept in comparator order.
    ///
    /// # Time Complexity
    ///
    /// Same as [`SortedSet`](super::SortedSet); `occurrences` is O(log n).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catenable::persistent::SortedMultiset;
    ///
    /// let by_key = |left: &(u8, char), right: &(u8, char)| left.0.cmp(&right.0);
    /// let bag = SortedMultiset::with_comparator(by_key)
    ///     .add((2, 'a'))
    ///     .add((1, 'b'))
    ///     .add((2, 'c'));
    /// assert_eq!(bag.find(&(2, '?')), Some(&(2, 'a')));
    /// ```
    SortedMultiset, "multiset"
}

impl<E, C: Comparator<E>> SortedMultiset<E, C> {
    /// Returns the number of stored elements equal to `element`.
    pub fn occurrences(&self, element: &E) -> BigUint {
        self.sequence.rank(&*self.comparator, element, true)
            - self.sequence.rank(&*self.comparator, element, false)
    }
}

impl<E: Clone, C: Comparator<E>> SortedMultiset<E, C> {
    /// Returns a multiset with `element` added after any equal elements.
    #[must_use]
    pub fn add(&self, element: E) -> Self {
        self.derive(self.sequence.insert_ordered(
            &*self.comparator,
            element,
            InsertBehavior::AllowCopies,
        ))
    }

    /// Returns a multiset with one element equal to `element` removed.
    ///
    /// Of several equal elements, the most recently added one goes. Returns
    /// a multiset sharing this one's root when there is no such element.
    #[must_use]
    pub fn remove(&self, element: &E) -> Self {
        self.sequence
            .remove_ordered(&*self.comparator, element)
            .map_or_else(|| self.clone(), |sequence| self.derive(sequence))
    }

    /// Returns a multiset with `element` inserted at `position`.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::IndexOutOfBounds`] if `position > len`.
    /// - [`CollectionError::OrderViolation`] if `element` is ordered before
    ///   its new predecessor or after its new successor.
    pub fn insert_at(&self, position: impl IntoPosition, element: E) -> Result<Self, CollectionError> {
        self.sequence
            .insert_sorted_at(&*self.comparator, &position.into_position(), element, false)
            .map(|sequence| self.derive(sequence))
    }

    /// Returns a multiset with the element at `position` replaced.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::IndexOutOfBounds`] if `position >= len`.
    /// - [`CollectionError::OrderViolation`] if `element` falls outside the
    ///   neighbours of `position`.
    pub fn replace_at(&self, position: impl IntoPosition, element: E) -> Result<Self, CollectionError> {
        self.sequence
            .replace_sorted_at(&*self.comparator, &position.into_position(), element, false)
            .map(|sequence| self.derive(sequence))
    }

    /// Returns the elements of `self` followed by those of `other`, using
    /// this multiset's comparator.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IncompatibleBoundary`] if the last element of
    /// `self` is greater than the first element of `other`.
    pub fn catenate(&self, other: &Self) -> Result<Self, CollectionError> {
        self.sequence
            .catenate_sorted(&other.sequence, &*self.comparator, false)
            .map(|sequence| self.derive(sequence))
    }

    /// Returns the elements of `self` followed by those of the set `other`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IncompatibleBoundary`] if the last element of
    /// `self` is greater than the first element of `other`.
    pub fn catenate_set(&self, other: &SortedSet<E, C>) -> Result<Self, CollectionError> {
        self.sequence
            .catenate_sorted(other.sequence(), &*self.comparator, false)
            .map(|sequence| self.derive(sequence))
    }
}

/// Every set is a multiset: O(1), keeping the tree, the comparator and the
/// registered images.
impl<E, C> From<SortedSet<E, C>> for SortedMultiset<E, C> {
    fn from(set: SortedSet<E, C>) -> Self {
        let (sequence, comparator) = set.into_parts();
        Self::from_parts(sequence, comparator)
    }
}

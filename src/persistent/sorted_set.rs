//! Persistent sorted set.
//!
//! [`SortedSet`] keeps unique elements ordered by a [`Comparator`]. It is a
//! [`CatenableList`](super::CatenableList) whose `add` finds its own place,
//! so it also slices, indexes and catenates in logarithmic time; catenation
//! just requires the operands not to overlap.
//!
//! # Examples
//!
//! ```rust
//! use catenable::persistent::SortedSet;
//!
//! let low = SortedSet::new().add(3).add(1).add(2);
//! let high = SortedSet::new().add(10).add(20);
//!
//! let all = low.catenate(&high).unwrap();
//! assert_eq!(all.to_string(), "{1, 2, 3, 10, 20}");
//! assert!(high.catenate(&low).is_err());
//! ```

use super::compare::Comparator;
use super::error::CollectionError;
use super::order::InsertBehavior;
use super::position::IntoPosition;
use super::sorted::sorted_collection;
use super::sorted_multiset::SortedMultiset;
use super::ReferenceCounter;

sorted_collection! {
    /// A persistent set of unique elements kept in comparator order.
    ///
    /// Two elements are the same element when the comparator says `Equal`;
    /// adding such an element replaces the stored one.
    ///
    /// # Time Complexity
    ///
    /// | Operation     | Complexity |
    /// |---------------|------------|
    /// | `add`         | O(log n)   |
    /// | `remove`      | O(log n)   |
    /// | `contains`    | O(log n)   |
    /// | `get`         | O(log n)   |
    /// | `rank`        | O(log n)   |
    /// | `catenate`    | O(log n)   |
    /// | `sub_array`   | O(log² n)  |
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catenable::persistent::{ReverseOrder, SortedSet};
    ///
    /// let set = SortedSet::with_comparator(ReverseOrder).add(1).add(3).add(2);
    /// assert_eq!(set.first(), Ok(&3));
    /// assert_eq!(set.rank(&2), 1_u32.into());
    ///
    /// let by_key = |left: &(u8, char), right: &(u8, char)| left.0.cmp(&right.0);
    /// let keyed = SortedSet::with_comparator(by_key).add((1, 'a')).add((2, 'b'));
    /// assert_eq!(keyed.find(&(2, '?')), Some(&(2, 'b')));
    /// ```
    SortedSet, "set"
}

impl<E: Clone, C: Comparator<E>> SortedSet<E, C> {
    /// Returns a set containing `element`, replacing an equal element.
    #[must_use]
    pub fn add(&self, element: E) -> Self {
        self.derive(self.sequence.insert_ordered(
            &*self.comparator,
            element,
            InsertBehavior::ReplaceEqual,
        ))
    }

    /// Returns a set without the element equal to `element`.
    ///
    /// Returns a set sharing this one's root when there is no such element.
    #[must_use]
    pub fn remove(&self, element: &E) -> Self {
        self.sequence
            .remove_ordered(&*self.comparator, element)
            .map_or_else(|| self.clone(), |sequence| self.derive(sequence))
    }

    /// Returns a set with `element` inserted at `position`.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::IndexOutOfBounds`] if `position > len`.
    /// - [`CollectionError::OrderViolation`] unless `element` is strictly
    ///   between its new neighbours.
    pub fn insert_at(&self, position: impl IntoPosition, element: E) -> Result<Self, CollectionError> {
        self.sequence
            .insert_sorted_at(&*self.comparator, &position.into_position(), element, true)
            .map(|sequence| self.derive(sequence))
    }

    /// Returns a set with the element at `position` replaced.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::IndexOutOfBounds`] if `position >= len`.
    /// - [`CollectionError::OrderViolation`] unless `element` is strictly
    ///   between the neighbours of `position`.
    pub fn replace_at(&self, position: impl IntoPosition, element: E) -> Result<Self, CollectionError> {
        self.sequence
            .replace_sorted_at(&*self.comparator, &position.into_position(), element, true)
            .map(|sequence| self.derive(sequence))
    }

    /// Returns the elements of `self` followed by those of `other`, using
    /// this set's comparator.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IncompatibleBoundary`] unless the last element of
    /// `self` is strictly smaller than the first element of `other`.
    pub fn catenate(&self, other: &Self) -> Result<Self, CollectionError> {
        self.sequence
            .catenate_sorted(&other.sequence, &*self.comparator, true)
            .map(|sequence| self.derive(sequence))
    }

    /// Returns the elements of `self` followed by those of `other` as a
    /// multiset ordered by this set's comparator.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IncompatibleBoundary`] if the last element of
    /// `self` is greater than the first element of `other`.
    pub fn catenate_multiset(&self, other: &SortedMultiset<E, C>) -> Result<SortedMultiset<E, C>, CollectionError> {
        self.sequence
            .catenate_sorted(other.sequence(), &*self.comparator, false)
            .map(|sequence| SortedMultiset::from_parts(sequence, ReferenceCounter::clone(&self.comparator)))
    }
}

// =============================================================================
// Tests
// =============================================================================

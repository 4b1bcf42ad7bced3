//! Persistent catenable list.
//!
//! This module provides [`CatenableList`], an immutable sequence stored in a
//! height-balanced tree that supports catenation and slicing in logarithmic
//! time, next to the usual indexed access.
//!
//! # Overview
//!
//! - O(log n) `add`, `get`, `insert_at`, `replace_at`, `remove_at`
//! - O(log n) `catenate` (proportional to the height difference)
//! - O(log² n) `sub_array`
//! - O(1) `first`, `len`, and `get_image` for registered homomorphisms
//!
//! # Examples
//!
//! ```rust
//! use catenable::persistent::CatenableList;
//!
//! let list = CatenableList::new().add(1).add(2).add(3);
//! let both = list.catenate(&list);
//!
//! assert_eq!(both.len(), 6);
//! assert_eq!(both.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 1, 2, 3]);
//! assert_eq!(list.len(), 3); // Original unchanged
//! ```
//!
//! # Sharing and Length
//!
//! Catenating a list with itself shares every node, so twenty doublings of a
//! three-element list hold twenty-five nodes but over three million elements.
//! Lengths and positions are therefore [`BigUint`]s internally;
//! [`element_count`](CatenableList::element_count) gives the exact length and
//! every position argument accepts machine integers and [`BigUint`] alike.

use std::fmt;
use std::hash::{Hash, Hasher};

use num_bigint::BigUint;

use super::error::CollectionError;
use super::image::{Homomorphism, MonoidMap};
use super::position::IntoPosition;
use super::sequence::TreeSequence;
use super::traversal::Iter;
use super::Shareable;

/// A persistent (immutable) list with logarithmic catenation.
///
/// # Time Complexity
///
/// | Operation    | Complexity          |
/// |--------------|---------------------|
/// | `add`        | O(log n)            |
/// | `get`        | O(log n)            |
/// | `insert_at`  | O(log n)            |
/// | `remove_at`  | O(log n)            |
/// | `catenate`   | O(log n)            |
/// | `sub_array`  | O(log² n)           |
/// | `first_of`   | O(n)                |
/// | `get_image`  | O(1)                |
///
/// Every write also updates each registered homomorphic image, which adds
/// O(log n) per image.
///
/// # Examples
///
/// ```rust
/// use catenable::persistent::CatenableList;
///
/// let list: CatenableList<char> = "hello".chars().collect();
/// assert_eq!(list.get(1_usize), Ok(&'e'));
/// assert_eq!(list.sub_array(1_usize, 4_usize).unwrap().to_string(), "[e, l, l]");
/// ```
pub struct CatenableList<E> {
    sequence: TreeSequence<E>,
}

impl<E> CatenableList<E> {
    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catenable::persistent::CatenableList;
    ///
    /// let list: CatenableList<i32> = CatenableList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            sequence: TreeSequence::default(),
        }
    }

    pub(crate) const fn from_sequence(sequence: TreeSequence<E>) -> Self {
        Self { sequence }
    }

    pub(crate) const fn sequence(&self) -> &TreeSequence<E> {
        &self.sequence
    }

    /// Returns the number of elements, saturating at `usize::MAX`.
    ///
    /// Use [`element_count`](Self::element_count) for lists that sharing
    /// made longer than that.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns the exact number of elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catenable::persistent::{BigUint, CatenableList};
    ///
    /// let mut list = CatenableList::new().add(0_u8);
    /// for _ in 0..100 {
    ///     list = list.catenate(&list);
    /// }
    /// assert_eq!(*list.element_count(), BigUint::from(1_u32) << 100_usize);
    /// ```
    #[inline]
    #[must_use]
    pub fn element_count(&self) -> &BigUint {
        self.sequence.element_count()
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns the element at `position`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfBounds`] if `position >= len`.
    pub fn get(&self, position: impl IntoPosition) -> Result<&E, CollectionError> {
        self.sequence.get(&position.into_position())
    }

    /// Returns the first element in O(1).
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyCollection`] if the list is empty.
    pub fn first(&self) -> Result<&E, CollectionError> {
        self.sequence.first()
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyCollection`] if the list is empty.
    pub fn last(&self) -> Result<&E, CollectionError> {
        self.sequence.last()
    }

    /// Returns an iterator over the elements, front to back.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, E> {
        self.sequence.iter()
    }

    /// Returns an iterator starting at `position`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfBounds`] if `position >= len`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catenable::persistent::CatenableList;
    ///
    /// let list: CatenableList<i32> = (0..10).collect();
    /// let tail: Vec<i32> = list.iter_from(7_usize).unwrap().copied().collect();
    /// assert_eq!(tail, vec![7, 8, 9]);
    /// ```
    pub fn iter_from(&self, position: impl IntoPosition) -> Result<Iter<'_, E>, CollectionError> {
        self.sequence.iter_from(&position.into_position())
    }

    /// Returns the position of the first element satisfying `predicate`.
    ///
    /// Subtrees shared several times within the list are searched once.
    pub fn first_of<P>(&self, predicate: P) -> Option<BigUint>
    where
        P: Fn(&E) -> bool,
    {
        self.sequence.first_of(predicate)
    }

    /// Returns the position of the last element satisfying `predicate`.
    pub fn last_of<P>(&self, predicate: P) -> Option<BigUint>
    where
        P: Fn(&E) -> bool,
    {
        self.sequence.last_of(predicate)
    }

    /// Returns the position of the first element equal to `element`.
    pub fn position_of(&self, element: &E) -> Option<BigUint>
    where
        E: PartialEq,
    {
        self.first_of(|candidate| candidate == element)
    }

    /// Returns the position of the last element equal to `element`.
    pub fn last_position_of(&self, element: &E) -> Option<BigUint>
    where
        E: PartialEq,
    {
        self.last_of(|candidate| candidate == element)
    }

    /// Returns `true` if some element equals `element`.
    pub fn contains(&self, element: &E) -> bool
    where
        E: PartialEq,
    {
        self.position_of(element).is_some()
    }

    /// Returns the number of registered homomorphisms.
    #[must_use]
    pub fn map_count(&self) -> usize {
        self.sequence.map_count()
    }

    /// Returns `true` if `map` is registered with this list.
    #[must_use]
    pub fn has_map<M>(&self, map: &Homomorphism<M>) -> bool {
        self.sequence.has_map(map)
    }

    /// Returns a list without the image of `map`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::UnregisteredMap`] if `map` is not registered.
    pub fn remove_map<M>(&self, map: &Homomorphism<M>) -> Result<Self, CollectionError> {
        self.sequence.remove_map(map).map(Self::from_sequence)
    }

    /// Returns `true` if both lists share the same root, which implies
    /// equal contents.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.sequence.ptr_eq(&other.sequence)
    }
}

impl<E: 'static> CatenableList<E> {
    /// Returns a list that maintains the image of `map`.
    ///
    /// The image is computed once, in time proportional to the number of
    /// distinct tree nodes, and kept current by every later operation.
    /// Registering a map twice is a no-op.
    #[must_use]
    pub fn add_map<M>(&self, map: &Homomorphism<M>) -> Self
    where
        M: MonoidMap<E> + Shareable + 'static,
        M::Image: Shareable + 'static,
    {
        Self::from_sequence(self.sequence.add_map(map))
    }

    /// Returns the maintained image of `map`, or `None` if it is not
    /// registered.
    #[must_use]
    pub fn get_image<M>(&self, map: &Homomorphism<M>) -> Option<M::Image>
    where
        M: MonoidMap<E> + Shareable + 'static,
        M::Image: Shareable + 'static,
    {
        self.sequence.get_image(map)
    }

    /// Returns the image of `map`, computing it if it is not registered.
    #[must_use]
    pub fn compute_image<M>(&self, map: &Homomorphism<M>) -> M::Image
    where
        M: MonoidMap<E> + Shareable + 'static,
        M::Image: Shareable + 'static,
    {
        self.sequence.compute_image(map)
    }
}

impl<E: Clone> CatenableList<E> {
    /// Creates a list holding one element.
    #[must_use]
    pub fn singleton(element: E) -> Self {
        Self::new().add(element)
    }

    /// Returns a list with `element` appended.
    #[must_use]
    pub fn add(&self, element: E) -> Self {
        Self::from_sequence(self.sequence.push_back(element))
    }

    /// Returns a list with `element` inserted so that it sits at `position`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfBounds`] if `position > len`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catenable::persistent::CatenableList;
    ///
    /// let list: CatenableList<i32> = vec![1, 3].into_iter().collect();
    /// let list = list.insert_at(1_usize, 2).unwrap();
    /// assert_eq!(list.to_string(), "[1, 2, 3]");
    /// ```
    pub fn insert_at(&self, position: impl IntoPosition, element: E) -> Result<Self, CollectionError> {
        self.sequence
            .insert_at(&position.into_position(), element)
            .map(Self::from_sequence)
    }

    /// Returns a list with the element at `position` replaced.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfBounds`] if `position >= len`.
    pub fn replace_at(&self, position: impl IntoPosition, element: E) -> Result<Self, CollectionError> {
        self.sequence
            .replace_at(&position.into_position(), element)
            .map(Self::from_sequence)
    }

    /// Returns a list without the element at `position`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfBounds`] if `position >= len`.
    pub fn remove_at(&self, position: impl IntoPosition) -> Result<Self, CollectionError> {
        self.sequence
            .remove_at(&position.into_position())
            .map(Self::from_sequence)
    }

    /// Returns the elements of `self` followed by those of `other`.
    ///
    /// Homomorphisms registered on either list are registered on the result.
    /// A sorted collection converts into a list in O(1) with `From` and can
    /// then follow on either side.
    #[must_use]
    pub fn catenate(&self, other: &Self) -> Self {
        Self::from_sequence(self.sequence.catenate(&other.sequence))
    }

    /// Returns the elements at positions `start..end`.
    ///
    /// A range covering the whole list returns a list sharing its root.
    ///
    /// # Errors
    ///
    /// [`CollectionError::InvalidRange`] if `start > end` or `end > len`.
    pub fn sub_array(&self, start: impl IntoPosition, end: impl IntoPosition) -> Result<Self, CollectionError> {
        self.sequence
            .slice(&start.into_position(), &end.into_position())
            .map(Self::from_sequence)
    }

    /// Returns an empty list that keeps the registered homomorphisms.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::from_sequence(self.sequence.clear())
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<E> Clone for CatenableList<E> {
    fn clone(&self) -> Self {
        Self::from_sequence(self.sequence.clone())
    }
}

impl<E> Default for CatenableList<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> FromIterator<E> for CatenableList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_sequence(iter.into_iter().collect())
    }
}

impl<'a, E> IntoIterator for &'a CatenableList<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: PartialEq> PartialEq for CatenableList<E> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.element_count() == other.element_count() && self.iter().eq(other.iter())
    }
}

impl<E: Eq> Eq for CatenableList<E> {}

impl<E: Hash> Hash for CatenableList<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.element_count().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for CatenableList<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<E: fmt::Display> fmt::Display for CatenableList<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<E: serde::Serialize> serde::Serialize for CatenableList<E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(usize::try_from(self.element_count()).ok())?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct CatenableListVisitor<E> {
    marker: std::marker::PhantomData<E>,
}

#[cfg(feature = "serde")]
impl<'de, E> serde::de::Visitor<'de> for CatenableListVisitor<E>
where
    E: serde::Deserialize<'de> + Clone,
{
    type Value = CatenableList<E>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(elements.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
impl<'de, E> serde::Deserialize<'de> for CatenableList<E>
where
    E: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(CatenableListVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

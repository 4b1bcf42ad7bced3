//! Shared surface of the sorted collections.
//!
//! [`SortedSet`](super::SortedSet) and [`SortedMultiset`](super::SortedMultiset)
//! differ only in what `add` does with an equal element and in whether
//! catenation and positional writes accept equal neighbours. Everything
//! else (lookups, iteration, images, conversions and the standard traits)
//! is generated here by `sorted_collection!`; each collection writes its own
//! order-preserving updates by hand.

/// Declares a sorted collection struct and its policy-independent methods.
///
/// The invoking module implements `add`, `remove`, `insert_at`,
/// `replace_at` and `catenate`.
macro_rules! sorted_collection {
    ($(#[$meta:meta])* $name:ident, $noun:literal) => {
        $(#[$meta])*
        pub struct $name<E, C = $crate::persistent::NaturalOrder> {
            sequence: $crate::persistent::sequence::TreeSequence<E>,
            comparator: $crate::persistent::ReferenceCounter<C>,
        }

        impl<E: Ord> $name<E> {
            #[doc = concat!("Creates an empty ", $noun, " in natural order.")]
            #[must_use]
            pub fn new() -> Self {
                Self::with_comparator($crate::persistent::NaturalOrder)
            }
        }

        impl<E, C> $name<E, C> {
            pub(crate) const fn from_parts(
                sequence: $crate::persistent::sequence::TreeSequence<E>,
                comparator: $crate::persistent::ReferenceCounter<C>,
            ) -> Self {
                Self {
                    sequence,
                    comparator,
                }
            }

            pub(crate) fn into_parts(
                self,
            ) -> (
                $crate::persistent::sequence::TreeSequence<E>,
                $crate::persistent::ReferenceCounter<C>,
            ) {
                (self.sequence, self.comparator)
            }

            pub(crate) const fn sequence(&self) -> &$crate::persistent::sequence::TreeSequence<E> {
                &self.sequence
            }

            fn derive(&self, sequence: $crate::persistent::sequence::TreeSequence<E>) -> Self {
                Self::from_parts(sequence, $crate::persistent::ReferenceCounter::clone(&self.comparator))
            }
        }

        impl<E, C: $crate::persistent::Comparator<E>> $name<E, C> {
            #[doc = concat!("Creates an empty ", $noun, " ordered by `comparator`.")]
            #[must_use]
            pub fn with_comparator(comparator: C) -> Self {
                Self::from_parts(
                    $crate::persistent::sequence::TreeSequence::default(),
                    $crate::persistent::ReferenceCounter::new(comparator),
                )
            }

            /// Returns the comparator.
            #[must_use]
            pub fn comparator(&self) -> &C {
                &self.comparator
            }

            /// Returns the number of elements, saturating at `usize::MAX`.
            #[must_use]
            pub fn len(&self) -> usize {
                self.sequence.len()
            }

            /// Returns the exact number of elements.
            #[must_use]
            pub fn element_count(&self) -> &$crate::persistent::BigUint {
                self.sequence.element_count()
            }

            #[doc = concat!("Returns `true` if the ", $noun, " holds no elements.")]
            #[must_use]
            pub const fn is_empty(&self) -> bool {
                self.sequence.is_empty()
            }

            /// Returns the leftmost stored element equal to `element`.
            pub fn find(&self, element: &E) -> Option<&E> {
                self.sequence
                    .find_first(&*self.comparator, element)
                    .map(|(_, found)| found)
            }

            /// Returns `true` if an element equal to `element` is stored.
            pub fn contains(&self, element: &E) -> bool {
                self.find(element).is_some()
            }

            /// Returns the position of the leftmost element equal to `element`.
            pub fn position_of(&self, element: &E) -> Option<$crate::persistent::BigUint> {
                self.sequence
                    .find_first(&*self.comparator, element)
                    .map(|(position, _)| position)
            }

            /// Returns the number of stored elements ordered before `element`.
            pub fn rank(&self, element: &E) -> $crate::persistent::BigUint {
                self.sequence.rank(&*self.comparator, element, false)
            }

            /// Returns the element at `position` in comparator order.
            ///
            /// # Errors
            ///
            /// [`CollectionError::IndexOutOfBounds`](crate::persistent::CollectionError::IndexOutOfBounds)
            /// if `position >= len`.
            pub fn get(
                &self,
                position: impl $crate::persistent::IntoPosition,
            ) -> Result<&E, $crate::persistent::CollectionError> {
                self.sequence.get(&position.into_position())
            }

            /// Returns the smallest element in O(1).
            ///
            /// # Errors
            ///
            #[doc = concat!(
                "[`CollectionError::EmptyCollection`](crate::persistent::CollectionError::EmptyCollection) if the ",
                $noun,
                " is empty."
            )]
            pub fn first(&self) -> Result<&E, $crate::persistent::CollectionError> {
                self.sequence.first()
            }

            /// Returns the largest element.
            ///
            /// # Errors
            ///
            #[doc = concat!(
                "[`CollectionError::EmptyCollection`](crate::persistent::CollectionError::EmptyCollection) if the ",
                $noun,
                " is empty."
            )]
            pub fn last(&self) -> Result<&E, $crate::persistent::CollectionError> {
                self.sequence.last()
            }

            /// Returns an iterator in comparator order.
            #[must_use]
            pub fn iter(&self) -> $crate::persistent::Iter<'_, E> {
                self.sequence.iter()
            }

            /// Returns an iterator starting at `position`.
            ///
            /// # Errors
            ///
            /// [`CollectionError::IndexOutOfBounds`](crate::persistent::CollectionError::IndexOutOfBounds)
            /// if `position >= len`.
            pub fn iter_from(
                &self,
                position: impl $crate::persistent::IntoPosition,
            ) -> Result<$crate::persistent::Iter<'_, E>, $crate::persistent::CollectionError> {
                self.sequence.iter_from(&position.into_position())
            }

            /// Returns the position of the first element satisfying `predicate`.
            pub fn first_of<P>(&self, predicate: P) -> Option<$crate::persistent::BigUint>
            where
                P: Fn(&E) -> bool,
            {
                self.sequence.first_of(predicate)
            }

            /// Returns the position of the last element satisfying `predicate`.
            pub fn last_of<P>(&self, predicate: P) -> Option<$crate::persistent::BigUint>
            where
                P: Fn(&E) -> bool,
            {
                self.sequence.last_of(predicate)
            }

            /// Returns the number of registered homomorphisms.
            #[must_use]
            pub fn map_count(&self) -> usize {
                self.sequence.map_count()
            }

            #[doc = concat!("Returns `true` if `map` is registered with this ", $noun, ".")]
            #[must_use]
            pub fn has_map<M>(&self, map: &$crate::persistent::Homomorphism<M>) -> bool {
                self.sequence.has_map(map)
            }

            #[doc = concat!("Returns a ", $noun, " without the image of `map`.")]
            ///
            /// # Errors
            ///
            /// [`CollectionError::UnregisteredMap`](crate::persistent::CollectionError::UnregisteredMap)
            /// if `map` is not registered.
            pub fn remove_map<M>(
                &self,
                map: &$crate::persistent::Homomorphism<M>,
            ) -> Result<Self, $crate::persistent::CollectionError> {
                self.sequence.remove_map(map).map(|sequence| self.derive(sequence))
            }

            /// Returns `true` if both share the same root.
            #[must_use]
            pub fn ptr_eq(&self, other: &Self) -> bool {
                self.sequence.ptr_eq(&other.sequence)
            }
        }

        impl<E: 'static, C: $crate::persistent::Comparator<E>> $name<E, C> {
            #[doc = concat!("Returns a ", $noun, " that maintains the image of `map`.")]
            #[must_use]
            pub fn add_map<M>(&self, map: &$crate::persistent::Homomorphism<M>) -> Self
            where
                M: $crate::persistent::MonoidMap<E> + $crate::persistent::Shareable + 'static,
                M::Image: $crate::persistent::Shareable + 'static,
            {
                self.derive(self.sequence.add_map(map))
            }

            /// Returns the maintained image of `map`, or `None` if it is not
            /// registered.
            #[must_use]
            pub fn get_image<M>(&self, map: &$crate::persistent::Homomorphism<M>) -> Option<M::Image>
            where
                M: $crate::persistent::MonoidMap<E> + $crate::persistent::Shareable + 'static,
                M::Image: $crate::persistent::Shareable + 'static,
            {
                self.sequence.get_image(map)
            }

            /// Returns the image of `map`, computing it if it is not registered.
            #[must_use]
            pub fn compute_image<M>(&self, map: &$crate::persistent::Homomorphism<M>) -> M::Image
            where
                M: $crate::persistent::MonoidMap<E> + $crate::persistent::Shareable + 'static,
                M::Image: $crate::persistent::Shareable + 'static,
            {
                self.sequence.compute_image(map)
            }
        }

        impl<E: Clone, C: $crate::persistent::Comparator<E>> $name<E, C> {
            #[doc = concat!("Returns a ", $noun, " without the element at `position`.")]
            ///
            /// # Errors
            ///
            /// [`CollectionError::IndexOutOfBounds`](crate::persistent::CollectionError::IndexOutOfBounds)
            /// if `position >= len`.
            pub fn remove_at(
                &self,
                position: impl $crate::persistent::IntoPosition,
            ) -> Result<Self, $crate::persistent::CollectionError> {
                self.sequence
                    .remove_at(&position.into_position())
                    .map(|sequence| self.derive(sequence))
            }

            /// Returns the elements at positions `start..end`.
            ///
            /// # Errors
            ///
            /// [`CollectionError::InvalidRange`](crate::persistent::CollectionError::InvalidRange)
            /// if `start > end` or `end > len`.
            pub fn sub_array(
                &self,
                start: impl $crate::persistent::IntoPosition,
                end: impl $crate::persistent::IntoPosition,
            ) -> Result<Self, $crate::persistent::CollectionError> {
                self.sequence
                    .slice(&start.into_position(), &end.into_position())
                    .map(|sequence| self.derive(sequence))
            }

            /// Returns the elements of `self` followed by those of `other` as
            /// an unordered list.
            ///
            /// Any list may follow, so this never fails. Homomorphisms
            /// registered on either side are registered on the result.
            #[must_use]
            pub fn catenate_list(
                &self,
                other: &$crate::persistent::CatenableList<E>,
            ) -> $crate::persistent::CatenableList<E> {
                $crate::persistent::CatenableList::from_sequence(self.sequence.catenate(other.sequence()))
            }

            #[doc = concat!("Returns an empty ", $noun, " that keeps the comparator and registered maps.")]
            #[must_use]
            pub fn clear(&self) -> Self {
                self.derive(self.sequence.clear())
            }
        }

        /// Forgets the order in O(1); elements, sharing and registered images
        /// carry over.
        impl<E, C> From<$name<E, C>> for $crate::persistent::CatenableList<E> {
            fn from(collection: $name<E, C>) -> Self {
                let (sequence, _) = collection.into_parts();
                Self::from_sequence(sequence)
            }
        }

        impl<E, C> Clone for $name<E, C> {
            fn clone(&self) -> Self {
                Self::from_parts(
                    self.sequence.clone(),
                    $crate::persistent::ReferenceCounter::clone(&self.comparator),
                )
            }
        }

        impl<E, C: $crate::persistent::Comparator<E> + Default> Default for $name<E, C> {
            fn default() -> Self {
                Self::with_comparator(C::default())
            }
        }

        impl<E: Clone, C: $crate::persistent::Comparator<E> + Default> FromIterator<E> for $name<E, C> {
            fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
                iter.into_iter()
                    .fold(Self::default(), |collection, element| collection.add(element))
            }
        }

        impl<'a, E, C> IntoIterator for &'a $name<E, C>
        where
            C: $crate::persistent::Comparator<E>,
        {
            type Item = &'a E;
            type IntoIter = $crate::persistent::Iter<'a, E>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        impl<E: PartialEq, C: $crate::persistent::Comparator<E>> PartialEq for $name<E, C> {
            fn eq(&self, other: &Self) -> bool {
                self.ptr_eq(other)
                    || (self.element_count() == other.element_count() && self.iter().eq(other.iter()))
            }
        }

        impl<E: Eq, C: $crate::persistent::Comparator<E>> Eq for $name<E, C> {}

        impl<E: std::hash::Hash, C: $crate::persistent::Comparator<E>> std::hash::Hash for $name<E, C> {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(self.element_count(), state);
                for element in self {
                    element.hash(state);
                }
            }
        }

        impl<E: std::fmt::Debug, C> std::fmt::Debug for $name<E, C> {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter
                    .debug_struct(stringify!($name))
                    .field("elements", &self.sequence)
                    .field("comparator", &$crate::persistent::compare::ComparatorName::<C>::new())
                    .finish()
            }
        }

        impl<E: std::fmt::Display, C: $crate::persistent::Comparator<E>> std::fmt::Display for $name<E, C> {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("{")?;
                for (index, element) in self.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{element}")?;
                }
                formatter.write_str("}")
            }
        }

        #[cfg(feature = "serde")]
        impl<E: serde::Serialize, C: $crate::persistent::Comparator<E>> serde::Serialize for $name<E, C> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_seq(self)
            }
        }

        /// Rebuilds the collection by adding the elements in input order.
        #[cfg(feature = "serde")]
        impl<'de, E> serde::Deserialize<'de> for $name<E>
        where
            E: serde::Deserialize<'de> + Ord + Clone,
        {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let elements: Vec<E> = serde::Deserialize::deserialize(deserializer)?;
                Ok(elements.into_iter().collect())
            }
        }
    };
}

pub(crate) use sorted_collection;

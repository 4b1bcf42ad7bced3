//! Persistent (immutable) catenable sequences on height-balanced trees.
//!
//! All collections in this module share one AVL engine whose internal nodes
//! cache an arbitrary-precision element count, a height and a representative
//! value (the leftmost element below the node):
//!
//! - [`CatenableList`]: Unordered list with logarithmic catenation and slicing
//! - [`SortedSet`]: Unique elements ordered by a [`Comparator`]
//! - [`SortedMultiset`]: Comparator-ordered elements, duplicates allowed
//!
//! The three differ only in how `add` places an element and which
//! catenations they accept; indexing, slicing, iteration, search and
//! homomorphic images are the same code. A set converts into a multiset,
//! and either into a list, in O(1) through `From`, and the sorted
//! collections catenate with the wider kinds (`catenate_multiset`,
//! `catenate_set`, `catenate_list`).
//!
//! # Structural Sharing
//!
//! Every operation returns a new version and leaves the receiver untouched.
//! Only the nodes on the path to a change are rebuilt, so versions share
//! almost all of their structure. Sharing can make the logical length grow
//! exponentially in the number of distinct nodes (catenating a list with
//! itself doubles it), which is why lengths and positions are [`BigUint`]s.
//!
//! # Homomorphic Images
//!
//! A [`MonoidMap`] registered with `add_map` is kept up to date by every
//! later operation, and `get_image` reads the aggregate of the whole
//! sequence in O(1).
//!
//! # Examples
//!
//! ```rust
//! use catenable::persistent::{CatenableList, FoldMap, Homomorphism};
//! use catenable::typeclass::Sum;
//!
//! let sum = Homomorphism::new(FoldMap::new(|element: &i64| Sum(*element)));
//!
//! let list: CatenableList<i64> = (1..=3).collect();
//! let list = list.add_map(&sum);
//! let doubled = list.catenate(&list);
//!
//! assert_eq!(doubled.len(), 6);
//! assert_eq!(doubled.get_image(&sum), Some(Sum(12)));
//! assert_eq!(list.len(), 3); // Original unchanged
//! ```
//!
//! ```rust
//! use catenable::persistent::SortedSet;
//!
//! let set = SortedSet::new().add(5).add(2).add(8).add(2);
//! assert_eq!(set.len(), 3);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![2, 5, 8]);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

/// Marker for values that may live inside a shared tree.
///
/// Without the `arc` feature every type qualifies. With `arc` it means
/// `Send + Sync`, so that collections holding registered homomorphisms stay
/// `Send + Sync` themselves.
#[cfg(feature = "arc")]
pub trait Shareable: Send + Sync {}

#[cfg(feature = "arc")]
impl<T: Send + Sync + ?Sized> Shareable for T {}

/// Marker for values that may live inside a shared tree.
///
/// Without the `arc` feature every type qualifies. With `arc` it means
/// `Send + Sync`, so that collections holding registered homomorphisms stay
/// `Send + Sync` themselves.
#[cfg(not(feature = "arc"))]
pub trait Shareable {}

#[cfg(not(feature = "arc"))]
impl<T: ?Sized> Shareable for T {}

mod catenation;
mod compare;
mod error;
mod image;
mod list;
mod node;
mod order;
mod position;
mod positional;
mod sequence;
mod sorted;
mod sorted_multiset;
mod sorted_set;
mod traversal;

pub use compare::{Comparator, NaturalOrder, ReverseOrder};
pub use error::CollectionError;
pub use image::{FoldMap, Homomorphism, MonoidMap};
pub use list::CatenableList;
pub use num_bigint::BigUint;
pub use position::IntoPosition;
pub use sorted_multiset::SortedMultiset;
pub use sorted_set::SortedSet;
pub use traversal::Iter;

// =============================================================================
// Tests
// =============================================================================

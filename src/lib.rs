//! # catenable
//!
//! Persistent sequences on height-balanced trees with logarithmic
//! catenation and slicing, and incrementally maintained monoid-homomorphism
//! images.
//!
//! ## Overview
//!
//! - **Catenable List**: Unordered persistent list; `catenate`, `sub_array`
//!   and indexed writes in logarithmic time
//! - **Sorted Set / Sorted Multiset**: Comparator-ordered variants on the
//!   same engine, with order-checked catenation
//! - **Homomorphic Images**: Register a [`MonoidMap`](persistent::MonoidMap)
//!   once and read the aggregate of the whole sequence in O(1) after every
//!   operation
//! - **Type Classes**: `Semigroup`, `Monoid` and the `Sum`, `Product`, `Max`,
//!   `Min` wrappers used to build images
//!
//! ## Feature Flags
//!
//! - `typeclass`: `Semigroup`, `Monoid` and numeric wrappers
//! - `persistent`: The persistent collections (implies `typeclass`)
//! - `arc`: Thread-safe reference counting; collections become `Send + Sync`
//! - `serde`: Serialization of the collections
//! - `full`: Enable all features except `arc`
//!
//! ## Example
//!
//! ```rust
//! use catenable::prelude::*;
//!
//! let length = Homomorphism::new(FoldMap::new(|word: &&str| Sum(word.len())));
//! let words: CatenableList<&str> = ["persistent", "catenable"].into_iter().collect();
//! let words = words.add_map(&length);
//!
//! let repeated = words.catenate(&words);
//! assert_eq!(repeated.get_image(&length), Some(Sum(38)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use catenable::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "persistent")]
pub mod persistent;

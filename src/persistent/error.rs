//! Usage errors reported by the persistent collections.
//!
//! Every fallible operation returns a new version on success and leaves the
//! receiver untouched on failure, so there is never partial state to clean
//! up.

use num_bigint::BigUint;

/// Errors returned by fallible collection operations.
///
/// # Examples
///
/// ```rust
/// use catenable::persistent::{CatenableList, CollectionError};
///
/// let list: CatenableList<i32> = (0..3).collect();
/// let error = list.get(5_usize).unwrap_err();
/// assert!(matches!(error, CollectionError::IndexOutOfBounds { .. }));
/// assert_eq!(error.to_string(), "position 5 out of bounds for length 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// A position is not smaller than the length (or larger than it, for
    /// insertion).
    #[error("position {position} out of bounds for length {length}")]
    IndexOutOfBounds {
        /// The rejected position.
        position: BigUint,
        /// The length of the collection.
        length: BigUint,
    },

    /// A range is reversed or reaches past the end.
    #[error("invalid range {start}..{end} for length {length}")]
    InvalidRange {
        /// Inclusive start of the range.
        start: BigUint,
        /// Exclusive end of the range.
        end: BigUint,
        /// The length of the collection.
        length: BigUint,
    },

    /// The operation needs at least one element.
    #[error("{operation} called on an empty collection")]
    EmptyCollection {
        /// The name of the operation.
        operation: &'static str,
    },

    /// The last element of the first sorted operand is not ordered before
    /// the first element of the second one.
    #[error("catenation would break the sort order at the boundary")]
    IncompatibleBoundary,

    /// A positional write into a sorted collection would break its order.
    #[error("element at position {position} would break the sort order")]
    OrderViolation {
        /// The position written to.
        position: BigUint,
    },

    /// The homomorphism was never registered with this collection.
    #[error("homomorphism is not registered")]
    UnregisteredMap,
}

impl CollectionError {
    pub(crate) fn out_of_bounds(position: &BigUint, length: &BigUint) -> Self {
        Self::IndexOutOfBounds {
            position: position.clone(),
            length: length.clone(),
        }
    }
}

//! Total orders used by the sorted collections.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// A total order over `E`.
///
/// Implemented by [`NaturalOrder`], [`ReverseOrder`] and every closure
/// `Fn(&E, &E) -> Ordering`.
///
/// # Examples
///
/// ```rust
/// use catenable::persistent::SortedSet;
///
/// let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
/// let set = SortedSet::with_comparator(by_length)
///     .add("three")
///     .add("a")
///     .add("to");
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["a", "to", "three"]);
/// ```
pub trait Comparator<E: ?Sized> {
    /// Compares two elements.
    fn compare(&self, left: &E, right: &E) -> Ordering;
}

/// The order given by `E: Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<E: Ord + ?Sized> Comparator<E> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &E, right: &E) -> Ordering {
        left.cmp(right)
    }
}

/// The reverse of the order given by `E: Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder;

impl<E: Ord + ?Sized> Comparator<E> for ReverseOrder {
    #[inline]
    fn compare(&self, left: &E, right: &E) -> Ordering {
        right.cmp(left)
    }
}

impl<E: ?Sized, F> Comparator<E> for F
where
    F: Fn(&E, &E) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &E, right: &E) -> Ordering {
        self(left, right)
    }
}

/// Debug-prints the type of a comparator, which may not implement `Debug`
/// (closures).
pub(crate) struct ComparatorName<C>(PhantomData<fn() -> C>);

impl<C> ComparatorName<C> {
    pub(crate) const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<C> fmt::Debug for ComparatorName<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(std::any::type_name::<C>())
    }
}

//! Homomorphic images: cached monoid aggregates over a sequence.
//!
//! A [`MonoidMap`] sends every element to a monoid; its *image* over a
//! sequence is the monoid sum of the mapped elements, in order. A sequence
//! that registers a map keeps an image tree next to its element tree: same
//! elements in the same positions, but every leaf holds `map(element)` and
//! every branch caches `add(left, right)`. The root of the image tree is
//! the image of the whole sequence.
//!
//! Image trees are built once per registration by [`compute_image_tree`],
//! which memoizes by node identity and so costs time proportional to the
//! number of distinct nodes, even when sharing makes the logical length
//! astronomically larger. After that, every structural operation on the
//! sequence is replayed positionally on each image tree, so catenating two
//! sequences catenates their image trees and the new root is
//! `add(left_root, right_root)`.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use num_bigint::BigUint;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::catenation::{concat, slice};
use super::node::{Link, Node, Summarize, Tree, combine};
use super::positional;
use super::{ReferenceCounter, Shareable};
use crate::typeclass::Monoid;

/// A monoid homomorphism from elements of type `E`.
///
/// `add` must be associative with `zero` as its identity; the image of a
/// sequence does not depend on how the sequence happens to be balanced
/// only if this holds.
///
/// # Examples
///
/// ```rust
/// use catenable::persistent::{CatenableList, Homomorphism, MonoidMap};
///
/// struct Longest;
///
/// impl MonoidMap<String> for Longest {
///     type Image = usize;
///
///     fn zero(&self) -> usize {
///         0
///     }
///
///     fn map(&self, element: &String) -> usize {
///         element.len()
///     }
///
///     fn add(&self, left: &usize, right: &usize) -> usize {
///         *left.max(right)
///     }
/// }
///
/// let longest = Homomorphism::new(Longest);
/// let words: CatenableList<String> = ["a", "abc", "ab"].iter().map(|word| word.to_string()).collect();
/// assert_eq!(words.add_map(&longest).get_image(&longest), Some(3));
/// ```
pub trait MonoidMap<E: ?Sized> {
    /// The monoid the elements are mapped into.
    type Image: Clone;

    /// The identity of [`add`](Self::add): the image of an empty sequence.
    fn zero(&self) -> Self::Image;

    /// Maps a single element.
    fn map(&self, element: &E) -> Self::Image;

    /// Combines the images of two adjacent runs, left run first.
    fn add(&self, left: &Self::Image, right: &Self::Image) -> Self::Image;
}

/// A [`MonoidMap`] built from a function into a [`Monoid`].
///
/// # Examples
///
/// ```rust
/// use catenable::persistent::{CatenableList, FoldMap, Homomorphism};
/// use catenable::typeclass::Max;
///
/// let highest = Homomorphism::new(FoldMap::new(|element: &i32| Max(*element)));
/// let list: CatenableList<i32> = vec![3, 9, 4].into_iter().collect();
/// assert_eq!(list.compute_image(&highest), Max(9));
/// ```
pub struct FoldMap<F, A> {
    function: F,
    monoid: PhantomData<fn() -> A>,
}

impl<F, A> FoldMap<F, A> {
    /// Wraps a function mapping each element into the monoid `A`.
    pub const fn new(function: F) -> Self {
        Self {
            function,
            monoid: PhantomData,
        }
    }
}

impl<E, F, A> MonoidMap<E> for FoldMap<F, A>
where
    E: ?Sized,
    F: Fn(&E) -> A,
    A: Monoid + Clone,
{
    type Image = A;

    fn zero(&self) -> A {
        A::empty()
    }

    fn map(&self, element: &E) -> A {
        (self.function)(element)
    }

    fn add(&self, left: &A, right: &A) -> A {
        left.combine_ref(right)
    }
}

impl<F, A> fmt::Debug for FoldMap<F, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FoldMap")
            .field("monoid", &std::any::type_name::<A>())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Homomorphism handle
// =============================================================================

/// Identity of a registered homomorphism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct MapId(usize);

/// A shared handle to a [`MonoidMap`], used to register it and to look its
/// image up.
///
/// Two handles are equal when they are clones of one another, never by
/// comparing the maps themselves: registering `Homomorphism::new(map)` twice
/// with equal maps keeps two separate images.
pub struct Homomorphism<M> {
    map: ReferenceCounter<M>,
}

impl<M> Homomorphism<M> {
    /// Wraps a monoid map in a new handle.
    pub fn new(map: M) -> Self {
        Self {
            map: ReferenceCounter::new(map),
        }
    }

    pub(crate) fn id(&self) -> MapId {
        MapId(ReferenceCounter::as_ptr(&self.map).addr())
    }
}

impl<M> Clone for Homomorphism<M> {
    fn clone(&self) -> Self {
        Self {
            map: ReferenceCounter::clone(&self.map),
        }
    }
}

impl<M> PartialEq for Homomorphism<M> {
    fn eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.map, &other.map)
    }
}

impl<M> Eq for Homomorphism<M> {}

impl<M> Deref for Homomorphism<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.map
    }
}

impl<M> fmt::Debug for Homomorphism<M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Homomorphism")
            .field(&std::any::type_name::<M>())
            .finish()
    }
}

// =============================================================================
// Image trees
// =============================================================================

/// Branch summary of image trees: the monoid sum of both children.
pub(crate) struct Aggregate<'a, E: ?Sized, M> {
    map: &'a M,
    element: PhantomData<fn(&E)>,
}

impl<'a, E: ?Sized, M> Aggregate<'a, E, M> {
    pub(crate) const fn new(map: &'a M) -> Self {
        Self {
            map,
            element: PhantomData,
        }
    }
}

impl<E: ?Sized, M: MonoidMap<E>> Summarize<M::Image> for Aggregate<'_, E, M> {
    #[inline]
    fn summarize(&self, left: &M::Image, right: &M::Image) -> M::Image {
        self.map.add(left, right)
    }
}

/// Builds the image tree of `tree` under `map`.
///
/// Runs an explicit post-order work-list and memoizes by node address, so
/// each distinct node is mapped or added exactly once and shared element
/// subtrees produce shared image subtrees.
pub(crate) fn compute_image_tree<E, M>(map: &M, tree: &Tree<E>) -> Tree<M::Image>
where
    M: MonoidMap<E>,
{
    let root = tree.as_ref()?;
    let aggregate = Aggregate::<E, M>::new(map);
    let mut memo: FxHashMap<*const Node<E>, Link<M::Image>> = FxHashMap::default();
    let mut pending: Vec<&Link<E>> = vec![root];

    while let Some(&link) = pending.last() {
        let key = ReferenceCounter::as_ptr(link);
        if memo.contains_key(&key) {
            pending.pop();
            continue;
        }
        match &**link {
            Node::Leaf(element) => {
                memo.insert(key, Node::leaf(map.map(element)));
                pending.pop();
            }
            Node::Branch(branch) => {
                let left = memo.get(&ReferenceCounter::as_ptr(&branch.left)).cloned();
                let right = memo.get(&ReferenceCounter::as_ptr(&branch.right)).cloned();
                if let (Some(left), Some(right)) = (&left, &right) {
                    memo.insert(key, combine(&aggregate, left.clone(), right.clone()));
                    pending.pop();
                } else {
                    if right.is_none() {
                        pending.push(&branch.right);
                    }
                    if left.is_none() {
                        pending.push(&branch.left);
                    }
                }
            }
        }
    }

    debug!(
        distinct_nodes = memo.len(),
        elements = %root.count(),
        "computed homomorphic image"
    );
    memo.remove(&ReferenceCounter::as_ptr(root))
}

/// The aggregate of a whole image tree.
pub(crate) fn image_value<E, M>(map: &M, tree: &Tree<M::Image>) -> M::Image
where
    M: MonoidMap<E>,
{
    tree.as_ref()
        .map_or_else(|| map.zero(), |link| link.value().clone())
}

pub(crate) type ErasedHandle<E> = ReferenceCounter<dyn ErasedImage<E>>;

/// An image tree with its map's types erased, so that one sequence can
/// carry images into different monoids.
///
/// Every method returns the updated image for the corresponding update of
/// the element sequence.
pub(crate) trait ErasedImage<E>: Shareable {
    fn map_id(&self) -> MapId;

    fn as_any(&self) -> &dyn Any;

    /// Rebuilds the image from scratch for `elements`.
    fn recompute(&self, elements: &Tree<E>) -> ErasedHandle<E>;

    /// Appends the image of `right_elements`, reusing `right` when it is an
    /// image of the same map.
    fn catenate(&self, right: Option<&dyn ErasedImage<E>>, right_elements: &Tree<E>) -> ErasedHandle<E>;

    /// Prepends the image of `left_elements`, whose sequence had no image of
    /// this map.
    fn catenate_after(&self, left_elements: &Tree<E>) -> ErasedHandle<E>;

    fn insert_at(&self, position: &BigUint, element: &E) -> ErasedHandle<E>;

    fn replace_at(&self, position: &BigUint, element: &E) -> ErasedHandle<E>;

    fn remove_at(&self, position: &BigUint) -> ErasedHandle<E>;

    fn slice(&self, start: &BigUint, end: &BigUint) -> ErasedHandle<E>;
}

pub(crate) struct ImageTree<E, M: MonoidMap<E>> {
    map: Homomorphism<M>,
    root: Tree<M::Image>,
    element: PhantomData<fn(&E)>,
}

impl<E, M> ImageTree<E, M>
where
    E: 'static,
    M: MonoidMap<E> + Shareable + 'static,
    M::Image: Shareable + 'static,
{
    pub(crate) fn build(map: &Homomorphism<M>, elements: &Tree<E>) -> Self {
        Self::with_root(map.clone(), compute_image_tree(&**map, elements))
    }

    const fn with_root(map: Homomorphism<M>, root: Tree<M::Image>) -> Self {
        Self {
            map,
            root,
            element: PhantomData,
        }
    }

    fn derive(&self, root: Tree<M::Image>) -> ErasedHandle<E> {
        ReferenceCounter::new(Self::with_root(self.map.clone(), root))
    }

    fn aggregate(&self) -> Aggregate<'_, E, M> {
        Aggregate::new(&*self.map)
    }

    pub(crate) fn value(&self) -> M::Image {
        image_value::<E, M>(&self.map, &self.root)
    }
}

impl<E, M> ErasedImage<E> for ImageTree<E, M>
where
    E: 'static,
    M: MonoidMap<E> + Shareable + 'static,
    M::Image: Shareable + 'static,
{
    fn map_id(&self) -> MapId {
        self.map.id()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn recompute(&self, elements: &Tree<E>) -> ErasedHandle<E> {
        self.derive(compute_image_tree(&*self.map, elements))
    }

    fn catenate(&self, right: Option<&dyn ErasedImage<E>>, right_elements: &Tree<E>) -> ErasedHandle<E> {
        let computed;
        let right_root = match right.and_then(|image| image.as_any().downcast_ref::<Self>()) {
            Some(image) => &image.root,
            None => {
                computed = compute_image_tree(&*self.map, right_elements);
                &computed
            }
        };
        self.derive(concat(&self.aggregate(), &self.root, right_root))
    }

    fn catenate_after(&self, left_elements: &Tree<E>) -> ErasedHandle<E> {
        let left_root = compute_image_tree(&*self.map, left_elements);
        self.derive(concat(&self.aggregate(), &left_root, &self.root))
    }

    fn insert_at(&self, position: &BigUint, element: &E) -> ErasedHandle<E> {
        let leaf = Node::leaf(self.map.map(element));
        self.derive(Some(positional::insert_at(
            &self.aggregate(),
            &self.root,
            position,
            leaf,
        )))
    }

    fn replace_at(&self, position: &BigUint, element: &E) -> ErasedHandle<E> {
        let leaf = Node::leaf(self.map.map(element));
        let root = self
            .root
            .as_ref()
            .map(|link| positional::replace(&self.aggregate(), link, position, leaf));
        self.derive(root)
    }

    fn remove_at(&self, position: &BigUint) -> ErasedHandle<E> {
        let root = self
            .root
            .as_ref()
            .and_then(|link| positional::remove_at(&self.aggregate(), link, position));
        self.derive(root)
    }

    fn slice(&self, start: &BigUint, end: &BigUint) -> ErasedHandle<E> {
        self.derive(slice(&self.aggregate(), &self.root, start, end))
    }
}

// =============================================================================
// Registry
// =============================================================================

/// The image trees carried by one sequence value, sorted by map identity.
///
/// Updates copy the (short) vector and share every untouched image.
pub(crate) struct ImageRegistry<E> {
    images: ReferenceCounter<Vec<ErasedHandle<E>>>,
}

impl<E> Clone for ImageRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            images: ReferenceCounter::clone(&self.images),
        }
    }
}

impl<E> Default for ImageRegistry<E> {
    fn default() -> Self {
        Self {
            images: ReferenceCounter::new(Vec::new()),
        }
    }
}

impl<E> ImageRegistry<E> {
    pub(crate) fn len(&self) -> usize {
        self.images.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn search(&self, id: MapId) -> Result<usize, usize> {
        self.images.binary_search_by_key(&id, |image| image.map_id())
    }

    pub(crate) fn contains(&self, id: MapId) -> bool {
        self.search(id).is_ok()
    }

    pub(crate) fn find(&self, id: MapId) -> Option<&dyn ErasedImage<E>> {
        self.search(id).ok().map(|index| &*self.images[index])
    }

    /// Adds an image, or replaces the image of the same map.
    pub(crate) fn with(&self, image: ErasedHandle<E>) -> Self {
        let mut images = self.images.as_ref().clone();
        match self.search(image.map_id()) {
            Ok(index) => images[index] = image,
            Err(index) => images.insert(index, image),
        }
        trace!(registered = images.len(), "image registry updated");
        Self {
            images: ReferenceCounter::new(images),
        }
    }

    pub(crate) fn without(&self, id: MapId) -> Option<Self> {
        let index = self.search(id).ok()?;
        let mut images = self.images.as_ref().clone();
        images.remove(index);
        trace!(registered = images.len(), "image registry updated");
        Some(Self {
            images: ReferenceCounter::new(images),
        })
    }

    /// Applies the same update to every image.
    pub(crate) fn map_images<F>(&self, update: F) -> Self
    where
        F: Fn(&dyn ErasedImage<E>) -> ErasedHandle<E>,
    {
        if self.is_empty() {
            return self.clone();
        }
        Self {
            images: ReferenceCounter::new(self.images.iter().map(|image| update(&**image)).collect()),
        }
    }

    /// Images of the catenation of `left_elements` (carrying `self`) and
    /// `right_elements` (carrying `right`). Maps registered on one side only
    /// are computed for the other side first, so the result carries both.
    pub(crate) fn catenate(&self, left_elements: &Tree<E>, right: &Self, right_elements: &Tree<E>) -> Self {
        if self.is_empty() && right.is_empty() {
            return self.clone();
        }
        let mut images = Vec::with_capacity(self.len().max(right.len()));
        let mut lefts = self.images.iter().peekable();
        let mut rights = right.images.iter().peekable();
        loop {
            let order = match (lefts.peek(), rights.peek()) {
                (None, None) => break,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(left), Some(right)) => left.map_id().cmp(&right.map_id()),
            };
            let image = match order {
                Ordering::Equal => {
                    let (Some(left), Some(right)) = (lefts.next(), rights.next()) else {
                        break;
                    };
                    left.catenate(Some(&**right), right_elements)
                }
                Ordering::Less => {
                    let Some(left) = lefts.next() else {
                        break;
                    };
                    debug!("computing missing image for right catenation operand");
                    left.catenate(None, right_elements)
                }
                Ordering::Greater => {
                    let Some(right) = rights.next() else {
                        break;
                    };
                    debug!("computing missing image for left catenation operand");
                    right.catenate_after(left_elements)
                }
            };
            images.push(image);
        }
        Self {
            images: ReferenceCounter::new(images),
        }
    }
}

impl<E> fmt::Debug for ImageRegistry<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_list()
            .entries(self.images.iter().map(|image| image.map_id()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::catenation::concat;
    use crate::persistent::node::{Leftmost, pair, render};
    use crate::typeclass::Sum;
    use rstest::rstest;
    use std::cell::Cell;

    fn leaf(value: i64) -> Link<i64> {
        Node::leaf(value)
    }

    type SumMap = FoldMap<fn(&i64) -> Sum<i64>, Sum<i64>>;

    fn as_sum(element: &i64) -> Sum<i64> {
        Sum(*element)
    }

    fn sum() -> Homomorphism<SumMap> {
        Homomorphism::new(FoldMap::new(as_sum as fn(&i64) -> Sum<i64>))
    }

    fn image_of(registry: &ImageRegistry<i64>, map: &Homomorphism<SumMap>) -> Option<Sum<i64>> {
        registry
            .find(map.id())?
            .as_any()
            .downcast_ref::<ImageTree<i64, SumMap>>()
            .map(ImageTree::value)
    }

    /// Sum map that counts how often it maps or adds.
    struct CountingSum {
        calls: Cell<usize>,
    }

    impl MonoidMap<i64> for CountingSum {
        type Image = i64;

        fn zero(&self) -> i64 {
            0
        }

        fn map(&self, element: &i64) -> i64 {
            self.calls.set(self.calls.get() + 1);
            *element
        }

        fn add(&self, left: &i64, right: &i64) -> i64 {
            self.calls.set(self.calls.get() + 1);
            left + right
        }
    }

    fn eight() -> Tree<i64> {
        Some(pair(
            pair(pair(leaf(0), leaf(1)), pair(leaf(2), leaf(3))),
            pair(pair(leaf(4), leaf(5)), pair(leaf(6), leaf(7))),
        ))
    }

    #[rstest]
    fn test_compute_image_tree_mirrors_shape() {
        let map = CountingSum {
            calls: Cell::new(0),
        };
        let tree = Some(pair(pair(leaf(1), leaf(2)), leaf(3)));
        let image = compute_image_tree(&map, &tree);
        assert_eq!(render(&image), "((1 3 2) 6 3)");
        assert_eq!(map.calls.get(), 5);
    }

    #[rstest]
    fn test_compute_image_tree_of_empty_is_empty() {
        let map = CountingSum {
            calls: Cell::new(0),
        };
        assert!(compute_image_tree(&map, &None).is_none());
        assert_eq!(image_value::<i64, _>(&map, &None), 0);
    }

    #[rstest]
    fn test_compute_image_tree_visits_distinct_nodes_once() {
        let mut tree = Some(pair(pair(leaf(2), leaf(3)), leaf(5)));
        for _ in 0..24 {
            tree = concat(&Leftmost, &tree, &tree);
        }
        assert_eq!(*tree.as_ref().unwrap().count(), BigUint::from(3_u32 << 24));

        let map = CountingSum {
            calls: Cell::new(0),
        };
        let image = compute_image_tree(&map, &tree);
        assert_eq!(image_value::<i64, _>(&map, &image), 10 << 24);
        assert_eq!(map.calls.get(), 5 + 24);
    }

    #[rstest]
    fn test_sum_of_slice_matches_original_example() {
        let map = CountingSum {
            calls: Cell::new(0),
        };
        let tree = slice(
            &Leftmost,
            &eight(),
            &BigUint::from(2_u32),
            &BigUint::from(7_u32),
        );
        let image = compute_image_tree(&map, &tree);
        assert_eq!(image_value::<i64, _>(&map, &image), 2 + 3 + 4 + 5 + 6);
    }

    #[rstest]
    fn test_homomorphism_identity() {
        let first = sum();
        let second = sum();
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
        assert_eq!(first.id(), first.clone().id());
        assert_ne!(first.id(), second.id());
    }

    #[rstest]
    fn test_fold_map_uses_monoid() {
        let map = sum();
        assert_eq!(map.zero(), Sum(0));
        assert_eq!(map.add(&map.map(&4), &map.map(&5)), Sum(9));
    }

    #[rstest]
    fn test_registry_keeps_sorted_unique_ids() {
        let first = sum();
        let second = sum();
        let elements = eight();
        let registry = ImageRegistry::default()
            .with(ReferenceCounter::new(ImageTree::build(&first, &elements)))
            .with(ReferenceCounter::new(ImageTree::build(&second, &elements)))
            .with(ReferenceCounter::new(ImageTree::build(&first, &elements)));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(first.id()));
        assert!(registry.contains(second.id()));

        let without = registry.without(first.id()).unwrap();
        assert_eq!(without.len(), 1);
        assert!(!without.contains(first.id()));
        assert!(without.without(first.id()).is_none());
        assert_eq!(registry.len(), 2);
    }

    #[rstest]
    fn test_registry_catenate_takes_union() {
        let first = sum();
        let second = sum();
        let left_elements = Some(pair(leaf(1), leaf(2)));
        let right_elements = Some(pair(leaf(10), leaf(20)));
        let left = ImageRegistry::default()
            .with(ReferenceCounter::new(ImageTree::build(&first, &left_elements)));
        let right = ImageRegistry::default()
            .with(ReferenceCounter::new(ImageTree::build(&second, &right_elements)));

        let joined = left.catenate(&left_elements, &right, &right_elements);
        assert_eq!(joined.len(), 2);
        assert_eq!(image_of(&joined, &first), Some(Sum(33)));
        assert_eq!(image_of(&joined, &second), Some(Sum(33)));
        assert_eq!(image_of(&left, &first), Some(Sum(3)));
    }
}

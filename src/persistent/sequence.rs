//! The sequence value shared by all collection façades.
//!
//! [`TreeSequence`] pairs an element tree with the images registered on it,
//! validates positions and ranges, and replays every structural change on
//! each image. The façades decide only how elements are placed and which
//! catenations they accept.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::debug;

use super::catenation::{concat, slice};
use super::compare::Comparator;
use super::error::CollectionError;
use super::image::{Homomorphism, ImageRegistry, ImageTree, MonoidMap, compute_image_tree, image_value};
use super::node::{Leftmost, Node, Tree, count_of};
use super::order::{self, InsertBehavior, Placement};
use super::positional;
use super::traversal::{self, Iter};
use super::{ReferenceCounter, Shareable};

pub(crate) struct TreeSequence<E> {
    root: Tree<E>,
    images: ImageRegistry<E>,
}

impl<E> Clone for TreeSequence<E> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            images: self.images.clone(),
        }
    }
}

impl<E> Default for TreeSequence<E> {
    fn default() -> Self {
        Self {
            root: None,
            images: ImageRegistry::default(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for TreeSequence<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<E> TreeSequence<E> {
    const fn with_parts(root: Tree<E>, images: ImageRegistry<E>) -> Self {
        Self { root, images }
    }

    #[cfg(test)]
    pub(crate) const fn root(&self) -> &Tree<E> {
        &self.root
    }

    pub(crate) fn element_count(&self) -> &BigUint {
        count_of(&self.root)
    }

    /// The length as a `usize`, saturating for sequences longer than that.
    pub(crate) fn len(&self) -> usize {
        usize::try_from(self.element_count()).unwrap_or(usize::MAX)
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }

    fn check_index(&self, position: &BigUint) -> Result<(), CollectionError> {
        if position < self.element_count() {
            Ok(())
        } else {
            Err(CollectionError::out_of_bounds(position, self.element_count()))
        }
    }

    fn check_range(&self, start: &BigUint, end: &BigUint) -> Result<(), CollectionError> {
        let length = self.element_count();
        if start <= end && end <= length {
            Ok(())
        } else {
            Err(CollectionError::InvalidRange {
                start: start.clone(),
                end: end.clone(),
                length: length.clone(),
            })
        }
    }

    pub(crate) fn get(&self, position: &BigUint) -> Result<&E, CollectionError> {
        match &self.root {
            Some(link) if position < link.count() => Ok(positional::get(link, position)),
            _ => Err(CollectionError::out_of_bounds(position, self.element_count())),
        }
    }

    pub(crate) fn first(&self) -> Result<&E, CollectionError> {
        self.root
            .as_ref()
            .map(|link| link.value())
            .ok_or(CollectionError::EmptyCollection { operation: "first" })
    }

    pub(crate) fn last(&self) -> Result<&E, CollectionError> {
        self.root
            .as_ref()
            .map(|link| positional::last(link))
            .ok_or(CollectionError::EmptyCollection { operation: "last" })
    }

    pub(crate) fn iter(&self) -> Iter<'_, E> {
        Iter::new(&self.root)
    }

    pub(crate) fn iter_from(&self, position: &BigUint) -> Result<Iter<'_, E>, CollectionError> {
        match &self.root {
            Some(link) if position < link.count() => Ok(Iter::starting_at(link, position)),
            _ => Err(CollectionError::out_of_bounds(position, self.element_count())),
        }
    }

    pub(crate) fn first_of<P>(&self, predicate: P) -> Option<BigUint>
    where
        P: Fn(&E) -> bool,
    {
        traversal::first_of(&self.root, predicate)
    }

    pub(crate) fn last_of<P>(&self, predicate: P) -> Option<BigUint>
    where
        P: Fn(&E) -> bool,
    {
        traversal::last_of(&self.root, predicate)
    }

    pub(crate) fn find_first<C>(&self, comparator: &C, element: &E) -> Option<(BigUint, &E)>
    where
        C: Comparator<E> + ?Sized,
    {
        order::find_first(&self.root, comparator, element)
    }

    pub(crate) fn rank<C>(&self, comparator: &C, element: &E, inclusive: bool) -> BigUint
    where
        C: Comparator<E> + ?Sized,
    {
        order::rank(&self.root, comparator, element, inclusive)
    }

    pub(crate) fn map_count(&self) -> usize {
        self.images.len()
    }

    pub(crate) fn has_map<M>(&self, map: &Homomorphism<M>) -> bool {
        self.images.contains(map.id())
    }

    pub(crate) fn remove_map<M>(&self, map: &Homomorphism<M>) -> Result<Self, CollectionError> {
        let images = self
            .images
            .without(map.id())
            .ok_or(CollectionError::UnregisteredMap)?;
        debug!(remaining = images.len(), "dropped homomorphic image");
        Ok(Self::with_parts(self.root.clone(), images))
    }

    /// Whether `element` may sit after the element at `before` and ahead of
    /// the one at `after`.
    fn fits_between<C>(
        &self,
        comparator: &C,
        element: &E,
        before: Option<&BigUint>,
        after: &BigUint,
        strict: bool,
    ) -> bool
    where
        C: Comparator<E> + ?Sized,
    {
        let ordered = |left: &E, right: &E| match comparator.compare(left, right) {
            Ordering::Less => true,
            Ordering::Equal => !strict,
            Ordering::Greater => false,
        };
        let after_ok = self
            .get(after)
            .map_or(true, |following| ordered(element, following));
        let before_ok = before.is_none_or(|position| {
            self.get(position)
                .map_or(true, |preceding| ordered(preceding, element))
        });
        before_ok && after_ok
    }
}

impl<E> TreeSequence<E>
where
    E: 'static,
{
    pub(crate) fn get_image<M>(&self, map: &Homomorphism<M>) -> Option<M::Image>
    where
        M: MonoidMap<E> + Shareable + 'static,
        M::Image: Shareable + 'static,
    {
        self.images
            .find(map.id())?
            .as_any()
            .downcast_ref::<ImageTree<E, M>>()
            .map(ImageTree::value)
    }

    pub(crate) fn compute_image<M>(&self, map: &Homomorphism<M>) -> M::Image
    where
        M: MonoidMap<E> + Shareable + 'static,
        M::Image: Shareable + 'static,
    {
        self.get_image(map).unwrap_or_else(|| {
            let image = compute_image_tree(&**map, &self.root);
            image_value::<E, M>(map, &image)
        })
    }

    pub(crate) fn add_map<M>(&self, map: &Homomorphism<M>) -> Self
    where
        M: MonoidMap<E> + Shareable + 'static,
        M::Image: Shareable + 'static,
    {
        if self.has_map(map) {
            return self.clone();
        }
        let images = self
            .images
            .with(ReferenceCounter::new(ImageTree::build(map, &self.root)));
        debug!(registered = images.len(), "registered homomorphic image");
        Self::with_parts(self.root.clone(), images)
    }
}

impl<E: Clone> TreeSequence<E> {
    pub(crate) fn push_back(&self, element: E) -> Self {
        let length = self.element_count();
        let images = self
            .images
            .map_images(|image| image.insert_at(length, &element));
        let root = concat(&Leftmost, &self.root, &Some(Node::leaf(element)));
        Self::with_parts(root, images)
    }

    pub(crate) fn insert_at(&self, position: &BigUint, element: E) -> Result<Self, CollectionError> {
        if position > self.element_count() {
            return Err(CollectionError::out_of_bounds(position, self.element_count()));
        }
        let images = self
            .images
            .map_images(|image| image.insert_at(position, &element));
        let root = positional::insert_at(&Leftmost, &self.root, position, Node::leaf(element));
        Ok(Self::with_parts(Some(root), images))
    }

    pub(crate) fn replace_at(&self, position: &BigUint, element: E) -> Result<Self, CollectionError> {
        let Some(link) = self.root.as_ref().filter(|link| position < link.count()) else {
            return Err(CollectionError::out_of_bounds(position, self.element_count()));
        };
        let images = self
            .images
            .map_images(|image| image.replace_at(position, &element));
        let root = positional::replace(&Leftmost, link, position, Node::leaf(element));
        Ok(Self::with_parts(Some(root), images))
    }

    pub(crate) fn remove_at(&self, position: &BigUint) -> Result<Self, CollectionError> {
        let Some(link) = self.root.as_ref().filter(|link| position < link.count()) else {
            return Err(CollectionError::out_of_bounds(position, self.element_count()));
        };
        let images = self.images.map_images(|image| image.remove_at(position));
        let root = positional::remove_at(&Leftmost, link, position);
        Ok(Self::with_parts(root, images))
    }

    pub(crate) fn slice(&self, start: &BigUint, end: &BigUint) -> Result<Self, CollectionError> {
        self.check_range(start, end)?;
        let images = self.images.map_images(|image| image.slice(start, end));
        let root = slice(&Leftmost, &self.root, start, end);
        Ok(Self::with_parts(root, images))
    }

    pub(crate) fn catenate(&self, other: &Self) -> Self {
        let images = self
            .images
            .catenate(&self.root, &other.images, &other.root);
        let root = concat(&Leftmost, &self.root, &other.root);
        Self::with_parts(root, images)
    }

    /// Empties the sequence; registered maps stay, their images become zero.
    pub(crate) fn clear(&self) -> Self {
        let images = self.images.map_images(|image| image.recompute(&None));
        Self::with_parts(None, images)
    }

    pub(crate) fn insert_ordered<C>(&self, comparator: &C, element: E, behavior: InsertBehavior) -> Self
    where
        C: Comparator<E> + ?Sized,
    {
        let (root, placement) = order::insert(&self.root, comparator, element, behavior);
        let stored = positional::get(&root, placement.position());
        let images = match &placement {
            Placement::Inserted(position) => self
                .images
                .map_images(|image| image.insert_at(position, stored)),
            Placement::Replaced(position) => self
                .images
                .map_images(|image| image.replace_at(position, stored)),
        };
        Self::with_parts(Some(root), images)
    }

    /// Removes one element equal to `element`, or returns `None` when there
    /// is none.
    pub(crate) fn remove_ordered<C>(&self, comparator: &C, element: &E) -> Option<Self>
    where
        C: Comparator<E> + ?Sized,
    {
        let (root, position) = order::remove(&self.root, comparator, element)?;
        let images = self.images.map_images(|image| image.remove_at(&position));
        Some(Self::with_parts(root, images))
    }

    /// Positional insert that keeps the sequence sorted.
    pub(crate) fn insert_sorted_at<C>(
        &self,
        comparator: &C,
        position: &BigUint,
        element: E,
        strict: bool,
    ) -> Result<Self, CollectionError>
    where
        C: Comparator<E> + ?Sized,
    {
        if position > self.element_count() {
            return Err(CollectionError::out_of_bounds(position, self.element_count()));
        }
        let before = (!position.is_zero()).then(|| position - 1_u32);
        if !self.fits_between(comparator, &element, before.as_ref(), position, strict) {
            return Err(CollectionError::OrderViolation {
                position: position.clone(),
            });
        }
        self.insert_at(position, element)
    }

    /// Positional replace that keeps the sequence sorted.
    pub(crate) fn replace_sorted_at<C>(
        &self,
        comparator: &C,
        position: &BigUint,
        element: E,
        strict: bool,
    ) -> Result<Self, CollectionError>
    where
        C: Comparator<E> + ?Sized,
    {
        self.check_index(position)?;
        let before = (!position.is_zero()).then(|| position - 1_u32);
        let after = position + BigUint::one();
        if !self.fits_between(comparator, &element, before.as_ref(), &after, strict) {
            return Err(CollectionError::OrderViolation {
                position: position.clone(),
            });
        }
        self.replace_at(position, element)
    }

    /// Catenation of two sorted sequences; `strict` demands that the
    /// boundary elements differ.
    pub(crate) fn catenate_sorted<C>(&self, other: &Self, comparator: &C, strict: bool) -> Result<Self, CollectionError>
    where
        C: Comparator<E> + ?Sized,
    {
        if let (Ok(last), Ok(first)) = (self.last(), other.first()) {
            let ordering = comparator.compare(last, first);
            let compatible = ordering == Ordering::Less || (!strict && ordering == Ordering::Equal);
            if !compatible {
                debug!(?ordering, strict, "rejected sorted catenation");
                return Err(CollectionError::IncompatibleBoundary);
            }
        }
        Ok(self.catenate(other))
    }
}

impl<E: Clone> FromIterator<E> for TreeSequence<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iterator: I) -> Self {
        let leaves: Vec<Tree<E>> = iterator
            .into_iter()
            .map(|element| Some(Node::leaf(element)))
            .collect();
        Self::with_parts(build_balanced(&leaves), ImageRegistry::default())
    }
}

/// Catenates leaves pairwise, halving the level each round.
fn build_balanced<E: Clone>(leaves: &[Tree<E>]) -> Tree<E> {
    match leaves {
        [] => None,
        [single] => single.clone(),
        _ => {
            let (left, right) = leaves.split_at(leaves.len() / 2);
            concat(&Leftmost, &build_balanced(left), &build_balanced(right))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::compare::NaturalOrder;
    use crate::persistent::image::FoldMap;
    use crate::persistent::node::is_well_formed;
    use crate::typeclass::Sum;
    use proptest::prelude::*;
    use rstest::rstest;

    fn at(position: u32) -> BigUint {
        BigUint::from(position)
    }

    fn collect(sequence: &TreeSequence<i64>) -> Vec<i64> {
        sequence.iter().copied().collect()
    }

    type SumMap = FoldMap<fn(&i64) -> Sum<i64>, Sum<i64>>;

    fn as_sum(element: &i64) -> Sum<i64> {
        Sum(*element)
    }

    fn sum() -> Homomorphism<SumMap> {
        Homomorphism::new(FoldMap::new(as_sum as fn(&i64) -> Sum<i64>))
    }

    fn image_matches(sequence: &TreeSequence<i64>, map: &Homomorphism<SumMap>) -> bool {
        sequence.get_image(map) == Some(Sum(collect(sequence).iter().sum()))
    }

    #[rstest]
    fn test_from_iterator_is_balanced() {
        let sequence: TreeSequence<i64> = (0..1000).collect();
        assert!(is_well_formed(sequence.root()));
        assert_eq!(sequence.len(), 1000);
        assert_eq!(collect(&sequence), (0..1000).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_bounds_are_checked() {
        let sequence: TreeSequence<i64> = (0..3).collect();
        assert_eq!(
            sequence.get(&at(3)),
            Err(CollectionError::out_of_bounds(&at(3), &at(3)))
        );
        assert!(sequence.insert_at(&at(3), 9).is_ok());
        assert!(sequence.insert_at(&at(4), 9).is_err());
        assert!(sequence.replace_at(&at(3), 9).is_err());
        assert!(sequence.remove_at(&at(3)).is_err());
        assert!(sequence.iter_from(&at(3)).is_err());
        assert!(TreeSequence::<i64>::default().remove_at(&at(0)).is_err());
        assert!(matches!(
            sequence.slice(&at(2), &at(1)),
            Err(CollectionError::InvalidRange { .. })
        ));
        assert!(sequence.slice(&at(0), &at(4)).is_err());
    }

    #[rstest]
    fn test_first_and_last_of_empty() {
        let sequence = TreeSequence::<i64>::default();
        assert_eq!(
            sequence.first(),
            Err(CollectionError::EmptyCollection { operation: "first" })
        );
        assert_eq!(
            sequence.last(),
            Err(CollectionError::EmptyCollection { operation: "last" })
        );
    }

    #[rstest]
    fn test_images_follow_every_operation() {
        let map = sum();
        let sequence: TreeSequence<i64> = (1..=10).collect();
        let sequence = sequence.add_map(&map);
        assert_eq!(sequence.get_image(&map), Some(Sum(55)));

        let steps = [
            sequence.push_back(100),
            sequence.insert_at(&at(4), 7).unwrap(),
            sequence.replace_at(&at(0), -5).unwrap(),
            sequence.remove_at(&at(9)).unwrap(),
            sequence.slice(&at(2), &at(6)).unwrap(),
            sequence.catenate(&sequence),
            sequence.insert_ordered(&NaturalOrder, 4, InsertBehavior::AllowCopies),
            sequence.insert_ordered(&NaturalOrder, 4, InsertBehavior::ReplaceEqual),
            sequence.remove_ordered(&NaturalOrder, &6).unwrap(),
        ];
        for step in &steps {
            assert!(image_matches(step, &map), "{:?}", collect(step));
        }
        let cleared = sequence.clear();
        assert!(cleared.has_map(&map));
        assert_eq!(cleared.get_image(&map), Some(Sum(0)));
    }

    #[rstest]
    fn test_catenate_unions_maps() {
        let first = sum();
        let second = sum();
        let left = (1..=3).collect::<TreeSequence<i64>>().add_map(&first);
        let right = (10..=12).collect::<TreeSequence<i64>>().add_map(&second);
        let joined = left.catenate(&right);
        assert_eq!(joined.map_count(), 2);
        assert_eq!(joined.get_image(&first), Some(Sum(39)));
        assert_eq!(joined.get_image(&second), Some(Sum(39)));
    }

    #[rstest]
    fn test_add_map_twice_is_noop() {
        let map = sum();
        let sequence = (1..=3).collect::<TreeSequence<i64>>().add_map(&map);
        let again = sequence.add_map(&map);
        assert_eq!(again.map_count(), 1);
    }

    #[rstest]
    fn test_remove_map() {
        let map = sum();
        let sequence = (1..=3).collect::<TreeSequence<i64>>().add_map(&map);
        let removed = sequence.remove_map(&map).unwrap();
        assert!(!removed.has_map(&map));
        assert_eq!(removed.get_image(&map), None);
        assert_eq!(removed.compute_image(&map), Sum(6));
        assert_eq!(
            removed.remove_map(&map).unwrap_err(),
            CollectionError::UnregisteredMap
        );
    }

    #[rstest]
    #[case(0, 1, true)]
    #[case(1, 3, true)]
    #[case(1, 1, false)]
    #[case(3, 9, true)]
    #[case(3, 3, false)]
    #[case(0, 5, false)]
    fn test_insert_sorted_at_strict(#[case] position: u32, #[case] element: i64, #[case] accepted: bool) {
        let sequence: TreeSequence<i64> = vec![2, 4, 6].into_iter().collect();
        let result = sequence.insert_sorted_at(&NaturalOrder, &at(position), element, true);
        assert_eq!(result.is_ok(), accepted);
    }

    #[rstest]
    fn test_replace_sorted_at_allows_equal_when_not_strict() {
        let sequence: TreeSequence<i64> = vec![2, 4, 6].into_iter().collect();
        assert!(sequence.replace_sorted_at(&NaturalOrder, &at(1), 6, false).is_ok());
        assert_eq!(
            sequence.replace_sorted_at(&NaturalOrder, &at(1), 6, true).unwrap_err(),
            CollectionError::OrderViolation { position: at(1) }
        );
        assert!(sequence.replace_sorted_at(&NaturalOrder, &at(2), 100, true).is_ok());
    }

    #[rstest]
    fn test_catenate_sorted_boundary() {
        let low: TreeSequence<i64> = vec![1, 2].into_iter().collect();
        let high: TreeSequence<i64> = vec![2, 3].into_iter().collect();
        assert!(low.catenate_sorted(&high, &NaturalOrder, false).is_ok());
        assert_eq!(
            low.catenate_sorted(&high, &NaturalOrder, true).unwrap_err(),
            CollectionError::IncompatibleBoundary
        );
        assert!(
            low.catenate_sorted(&TreeSequence::default(), &NaturalOrder, true)
                .is_ok()
        );
    }

    #[derive(Debug, Clone)]
    enum Operation {
        Push(i64),
        Insert(u32, i64),
        Remove(u32),
        Slice(u32, u32),
        SelfCatenate,
    }

    fn operation() -> impl Strategy<Value = Operation> {
        prop_oneof![
            any::<i64>().prop_map(|value| Operation::Push(value % 1000)),
            (any::<u32>(), any::<i64>()).prop_map(|(at, value)| Operation::Insert(at, value % 1000)),
            any::<u32>().prop_map(Operation::Remove),
            (any::<u32>(), any::<u32>()).prop_map(|(start, end)| Operation::Slice(start, end)),
            Just(Operation::SelfCatenate),
        ]
    }

    proptest! {
        #[test]
        fn prop_operations_keep_balance_count_and_image(operations in prop::collection::vec(operation(), 1..40)) {
            let map = sum();
            let mut sequence = TreeSequence::<i64>::default().add_map(&map);
            let mut model: Vec<i64> = Vec::new();
            for operation in operations {
                let length = model.len() as u32;
                match operation {
                    Operation::Push(value) => {
                        sequence = sequence.push_back(value);
                        model.push(value);
                    }
                    Operation::Insert(position, value) => {
                        let position = position % (length + 1);
                        sequence = sequence.insert_at(&at(position), value).unwrap();
                        model.insert(position as usize, value);
                    }
                    Operation::Remove(position) if length > 0 => {
                        let position = position % length;
                        sequence = sequence.remove_at(&at(position)).unwrap();
                        model.remove(position as usize);
                    }
                    Operation::Remove(_) => {}
                    Operation::Slice(start, end) => {
                        let (start, end) = (start % (length + 1), end % (length + 1));
                        let (start, end) = (start.min(end), start.max(end));
                        sequence = sequence.slice(&at(start), &at(end)).unwrap();
                        model = model[start as usize..end as usize].to_vec();
                    }
                    Operation::SelfCatenate if length < 500 => {
                        sequence = sequence.catenate(&sequence);
                        model.extend(model.clone());
                    }
                    Operation::SelfCatenate => {}
                }
                prop_assert!(is_well_formed(sequence.root()));
                prop_assert_eq!(sequence.len(), model.len());
                prop_assert_eq!(collect(&sequence), model.clone());
                prop_assert!(image_matches(&sequence, &map));
            }
        }
    }

    #[derive(Debug, Clone)]
    enum OrderedOperation {
        Insert(i64),
        Remove(i64),
    }

    fn ordered_operation() -> impl Strategy<Value = OrderedOperation> {
        prop_oneof![
            (0_i64..40).prop_map(OrderedOperation::Insert),
            (0_i64..40).prop_map(OrderedOperation::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_ordered_operations_keep_balance_order_and_image(
            allow_copies in any::<bool>(),
            operations in prop::collection::vec(ordered_operation(), 1..200),
        ) {
            let behavior = if allow_copies {
                InsertBehavior::AllowCopies
            } else {
                InsertBehavior::ReplaceEqual
            };
            let map = sum();
            let mut sequence = TreeSequence::<i64>::default().add_map(&map);
            let mut model: Vec<i64> = Vec::new();
            for operation in operations {
                let touched = match operation {
                    OrderedOperation::Insert(value) => {
                        sequence = sequence.insert_ordered(&NaturalOrder, value, behavior);
                        if allow_copies || model.binary_search(&value).is_err() {
                            let after_equals = model.partition_point(|stored| *stored <= value);
                            model.insert(after_equals, value);
                        }
                        value
                    }
                    OrderedOperation::Remove(value) => {
                        let after_equals = model.partition_point(|stored| *stored <= value);
                        let present = after_equals > 0 && model[after_equals - 1] == value;
                        let removed = sequence.remove_ordered(&NaturalOrder, &value);
                        prop_assert_eq!(removed.is_some(), present);
                        if let Some(removed) = removed {
                            sequence = removed;
                            model.remove(after_equals - 1);
                        }
                        value
                    }
                };
                prop_assert!(is_well_formed(sequence.root()));
                prop_assert_eq!(collect(&sequence), model.clone());
                prop_assert!(image_matches(&sequence, &map));

                let leftmost = model.partition_point(|stored| *stored < touched);
                let expected = model
                    .get(leftmost)
                    .filter(|stored| **stored == touched)
                    .map(|_| at(leftmost as u32));
                let found = sequence
                    .find_first(&NaturalOrder, &touched)
                    .map(|(position, _)| position);
                prop_assert_eq!(found, expected);
            }
        }
    }
}

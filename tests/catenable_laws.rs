//! Property-based tests for the catenable collections.
//!
//! These tests check the collections against `Vec` and `BTreeSet` models:
//! catenation is associative with the empty list as identity, slicing
//! agrees with slice indexing, sorted variants stay sorted, and registered
//! images always equal a fresh fold.

use std::collections::BTreeSet;

use catenable::persistent::{BigUint, CatenableList, FoldMap, Homomorphism, SortedMultiset, SortedSet};
use catenable::typeclass::Sum;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generates a `CatenableList<i32>` with up to `max_size` elements.
fn catenable_list_strategy(max_size: usize) -> impl Strategy<Value = CatenableList<i32>> {
    prop::collection::vec(any::<i32>(), 0..max_size).prop_map(|vector| vector.into_iter().collect())
}

/// Generates a small `CatenableList<i32>` for faster tests.
fn small_list() -> impl Strategy<Value = CatenableList<i32>> {
    catenable_list_strategy(40)
}

fn to_vec<'a>(iterator: impl Iterator<Item = &'a i32>) -> Vec<i32> {
    iterator.copied().collect()
}

fn wide_sum(element: &i32) -> Sum<i64> {
    Sum(i64::from(*element))
}

proptest! {
    // =========================================================================
    // Catenation Laws
    // =========================================================================

    #[test]
    fn prop_catenate_left_identity(list in small_list()) {
        prop_assert_eq!(CatenableList::new().catenate(&list), list);
    }

    #[test]
    fn prop_catenate_right_identity(list in small_list()) {
        prop_assert_eq!(list.catenate(&CatenableList::new()), list);
    }

    #[test]
    fn prop_catenate_associativity(first in small_list(), second in small_list(), third in small_list()) {
        let left = first.catenate(&second).catenate(&third);
        let right = first.catenate(&second.catenate(&third));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_catenate_matches_vec(first in small_list(), second in small_list()) {
        let mut expected = to_vec(first.iter());
        expected.extend(second.iter());
        let joined = first.catenate(&second);
        prop_assert_eq!(joined.len(), expected.len());
        prop_assert_eq!(to_vec(joined.iter()), expected);
    }

    // =========================================================================
    // Slicing
    // =========================================================================

    #[test]
    fn prop_sub_array_matches_vec_slice(list in small_list(), bounds in (0_usize..50, 0_usize..50)) {
        let length = list.len();
        let (start, end) = (bounds.0.min(length), bounds.1.min(length));
        let (start, end) = (start.min(end), start.max(end));
        let expected = to_vec(list.iter())[start..end].to_vec();
        prop_assert_eq!(to_vec(list.sub_array(start, end).unwrap().iter()), expected);
    }

    #[test]
    fn prop_split_and_catenate_round_trips(list in small_list(), split in 0_usize..50) {
        let split = split.min(list.len());
        let head = list.sub_array(0_usize, split).unwrap();
        let tail = list.sub_array(split, list.len()).unwrap();
        prop_assert_eq!(head.catenate(&tail), list);
    }

    // =========================================================================
    // Positional Writes
    // =========================================================================

    #[test]
    fn prop_insert_then_remove_restores(list in small_list(), position in 0_usize..50, element: i32) {
        let position = position.min(list.len());
        let inserted = list.insert_at(position, element).unwrap();
        prop_assert_eq!(inserted.get(position), Ok(&element));
        prop_assert_eq!(inserted.remove_at(position).unwrap(), list);
    }

    #[test]
    fn prop_get_matches_iteration(list in small_list()) {
        for (position, element) in list.iter().enumerate() {
            prop_assert_eq!(list.get(position), Ok(element));
        }
    }

    // =========================================================================
    // Sorted Variants
    // =========================================================================

    #[test]
    fn prop_sorted_set_matches_btree_set(elements in prop::collection::vec(-50_i32..50, 0..60)) {
        let set: SortedSet<i32> = elements.iter().copied().collect();
        let model: BTreeSet<i32> = elements.iter().copied().collect();
        prop_assert_eq!(to_vec(set.iter()), model.iter().copied().collect::<Vec<_>>());
        for needle in -51..51 {
            prop_assert_eq!(set.contains(&needle), model.contains(&needle));
            prop_assert_eq!(set.rank(&needle), BigUint::from(model.range(..needle).count()));
        }
    }

    #[test]
    fn prop_sorted_set_remove_matches_btree_set(
        elements in prop::collection::vec(-20_i32..20, 0..40),
        removed in prop::collection::vec(-20_i32..20, 0..20),
    ) {
        let mut set: SortedSet<i32> = elements.iter().copied().collect();
        let mut model: BTreeSet<i32> = elements.iter().copied().collect();
        for element in &removed {
            set = set.remove(element);
            model.remove(element);
        }
        prop_assert_eq!(to_vec(set.iter()), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn prop_sorted_multiset_matches_sorted_vec(elements in prop::collection::vec(-10_i32..10, 0..60)) {
        let multiset: SortedMultiset<i32> = elements.iter().copied().collect();
        let mut model = elements.clone();
        model.sort_unstable();
        prop_assert_eq!(to_vec(multiset.iter()), model.clone());
        for needle in -10..10 {
            let count = model.iter().filter(|element| **element == needle).count();
            prop_assert_eq!(multiset.occurrences(&needle), BigUint::from(count));
        }
    }

    #[test]
    fn prop_sorted_catenation_accepts_exactly_ordered_boundaries(
        low in prop::collection::vec(-30_i32..30, 1..20),
        high in prop::collection::vec(-30_i32..30, 1..20),
    ) {
        let left: SortedSet<i32> = low.iter().copied().collect();
        let right: SortedSet<i32> = high.iter().copied().collect();
        let ordered = left.last().unwrap() < right.first().unwrap();
        prop_assert_eq!(left.catenate(&right).is_ok(), ordered);
    }

    #[test]
    fn prop_widening_catenation_accepts_equal_boundaries(
        low in prop::collection::vec(-30_i32..30, 1..20),
        high in prop::collection::vec(-30_i32..30, 1..20),
    ) {
        let left: SortedSet<i32> = low.iter().copied().collect();
        let right: SortedMultiset<i32> = high.iter().copied().collect();
        let ordered = left.last().unwrap() <= right.first().unwrap();
        match left.catenate_multiset(&right) {
            Ok(joined) => {
                prop_assert!(ordered);
                let expected: Vec<i32> = left.iter().chain(right.iter()).copied().collect();
                prop_assert_eq!(joined.iter().copied().collect::<Vec<_>>(), expected);
                prop_assert!(SortedMultiset::from(left.clone()).catenate(&right).is_ok());
            }
            Err(_) => prop_assert!(!ordered),
        }
        let listed = left.catenate_list(&CatenableList::from(right.clone()));
        prop_assert_eq!(listed.len(), left.len() + right.len());
    }

    // =========================================================================
    // Homomorphic Images
    // =========================================================================

    #[test]
    fn prop_registered_image_equals_fold(
        first in small_list(),
        second in small_list(),
        bounds in (0_usize..80, 0_usize..80),
    ) {
        let sum = Homomorphism::new(FoldMap::new(wide_sum as fn(&i32) -> Sum<i64>));
        let joined = first.add_map(&sum).catenate(&second);
        let (start, end) = (bounds.0.min(joined.len()), bounds.1.min(joined.len()));
        let sliced = joined.sub_array(start.min(end), start.max(end)).unwrap();
        for list in [&joined, &sliced] {
            let expected: i64 = list.iter().map(|element| i64::from(*element)).sum();
            prop_assert_eq!(list.get_image(&sum), Some(Sum(expected)));
        }
    }
}

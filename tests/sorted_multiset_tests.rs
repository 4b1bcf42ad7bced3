//! Integration tests for SortedMultiset.

use std::cmp::Ordering;

use catenable::persistent::{BigUint, CollectionError, SortedMultiset};
use rstest::rstest;

/// A value that carries the order it was added in, ignored by comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tagged {
    key: i32,
    serial: usize,
}

fn by_key(left: &Tagged, right: &Tagged) -> Ordering {
    left.key.cmp(&right.key)
}

type TaggedMultiset = SortedMultiset<Tagged, fn(&Tagged, &Tagged) -> Ordering>;

fn tagged(keys: &[i32]) -> TaggedMultiset {
    let empty: TaggedMultiset = SortedMultiset::with_comparator(by_key as fn(&Tagged, &Tagged) -> Ordering);
    keys.iter()
        .enumerate()
        .fold(empty, |multiset, (serial, key)| multiset.add(Tagged { key: *key, serial }))
}

fn key_only(key: i32) -> Tagged {
    Tagged { key, serial: usize::MAX }
}

// =============================================================================
// Duplicates
// =============================================================================

#[rstest]
fn test_find_returns_leftmost_copy() {
    let multiset = tagged(&[1, 2, 2, 2, 3]);
    assert_eq!(multiset.find(&key_only(2)).map(|found| found.serial), Some(1));
    assert_eq!(multiset.position_of(&key_only(2)), Some(BigUint::from(1_u32)));
}

#[rstest]
fn test_find_returns_first_added_copy_regardless_of_insert_order() {
    let multiset = tagged(&[2, 3, 2, 1, 2, 2]);
    let serials: Vec<usize> = multiset.iter().map(|value| value.serial).collect();
    assert_eq!(serials, vec![3, 0, 2, 4, 5, 1]);
    assert_eq!(multiset.find(&key_only(2)).map(|found| found.serial), Some(0));
}

#[rstest]
fn test_find_leftmost_copy_across_many_duplicates() {
    let keys: Vec<i32> = (0..200).map(|index| index % 3).collect();
    let multiset = tagged(&keys);
    for key in 0..3 {
        let found = multiset.find(&key_only(key)).map(|value| value.serial);
        assert_eq!(found, Some(key as usize));
    }
}

#[rstest]
#[case(2, 3)]
#[case(1, 1)]
#[case(4, 0)]
fn test_occurrences(#[case] key: i32, #[case] expected: u32) {
    let multiset = tagged(&[1, 2, 2, 2, 3]);
    assert_eq!(multiset.occurrences(&key_only(key)), BigUint::from(expected));
}

#[rstest]
fn test_remove_drops_one_copy() {
    let multiset: SortedMultiset<i32> = [5, 5, 5, 1].into_iter().collect();
    let removed = multiset.remove(&5);
    assert_eq!(removed.iter().copied().collect::<Vec<_>>(), vec![1, 5, 5]);
    assert_eq!(removed.occurrences(&5), BigUint::from(2_u32));
}

// =============================================================================
// Catenation
// =============================================================================

#[rstest]
fn test_catenate_accepts_equal_boundary() {
    let low: SortedMultiset<i32> = [1, 2, 2].into_iter().collect();
    let high: SortedMultiset<i32> = [2, 3].into_iter().collect();
    let joined = low.catenate(&high).unwrap();
    assert_eq!(joined.iter().copied().collect::<Vec<_>>(), vec![1, 2, 2, 2, 3]);
    assert_eq!(joined.occurrences(&2), BigUint::from(3_u32));
}

#[rstest]
fn test_catenate_rejects_descending_boundary() {
    let low: SortedMultiset<i32> = [1, 3].into_iter().collect();
    let high: SortedMultiset<i32> = [2, 4].into_iter().collect();
    assert_eq!(
        low.catenate(&high).unwrap_err(),
        CollectionError::IncompatibleBoundary
    );
}

#[rstest]
fn test_self_catenation_of_constant_multiset() {
    let mut multiset: SortedMultiset<i32> = [7, 7].into_iter().collect();
    for _ in 0..40 {
        multiset = multiset.catenate(&multiset).unwrap();
    }
    assert_eq!(multiset.occurrences(&7), BigUint::from(2_u32) << 40_usize);
    assert_eq!(multiset.rank(&8), BigUint::from(2_u32) << 40_usize);
    assert_eq!(multiset.position_of(&7), Some(BigUint::from(0_u32)));
}

//! Comparator-driven search and update over sorted element trees.
//!
//! Branches carry no key of their own. The representative of a branch's
//! right child (its leftmost element) separates the two halves, so every
//! descent compares against `right.value()`: strictly smaller goes left,
//! anything else goes right. Equal elements therefore land after the ones
//! already present and keep their insertion order.

use std::cmp::Ordering;

use num_bigint::BigUint;
use num_traits::Zero;

use super::compare::Comparator;
use super::node::{Leftmost, Link, Node, Tree, balance, combine, join};

/// What `insert` does with an element equal to one already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertBehavior {
    /// Overwrite the equal leaf (sets).
    ReplaceEqual,
    /// Keep both, the new one after the old one (multisets).
    AllowCopies,
}

/// Where `insert` put the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Placement {
    /// A new leaf now sits at this position.
    Inserted(BigUint),
    /// The equal leaf at this position was overwritten.
    Replaced(BigUint),
}

impl Placement {
    pub(crate) const fn position(&self) -> &BigUint {
        match self {
            Self::Inserted(position) | Self::Replaced(position) => position,
        }
    }
}

/// Inserts `element` into a sorted tree.
pub(crate) fn insert<T, C>(
    tree: &Tree<T>,
    comparator: &C,
    element: T,
    behavior: InsertBehavior,
) -> (Link<T>, Placement)
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    match tree {
        None => (Node::leaf(element), Placement::Inserted(BigUint::zero())),
        Some(link) => {
            let mut offset = BigUint::zero();
            insert_into(link, comparator, element, behavior, &mut offset)
        }
    }
}

fn insert_into<T, C>(
    link: &Link<T>,
    comparator: &C,
    element: T,
    behavior: InsertBehavior,
    offset: &mut BigUint,
) -> (Link<T>, Placement)
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    match &**link {
        Node::Leaf(existing) => match comparator.compare(&element, existing) {
            Ordering::Equal if behavior == InsertBehavior::ReplaceEqual => (
                Node::leaf(element),
                Placement::Replaced(offset.clone()),
            ),
            Ordering::Less => (
                combine(&Leftmost, Node::leaf(element), link.clone()),
                Placement::Inserted(offset.clone()),
            ),
            _ => (
                combine(&Leftmost, link.clone(), Node::leaf(element)),
                Placement::Inserted(&*offset + 1_u32),
            ),
        },
        Node::Branch(branch) => {
            if comparator.compare(&element, branch.right.value()) == Ordering::Less {
                let (left, placement) =
                    insert_into(&branch.left, comparator, element, behavior, offset);
                (join(&Leftmost, left, branch.right.clone()), placement)
            } else {
                *offset += branch.left.count();
                let (right, placement) =
                    insert_into(&branch.right, comparator, element, behavior, offset);
                (join(&Leftmost, branch.left.clone(), right), placement)
            }
        }
    }
}

/// Removes one element equal to `element` and reports its position.
///
/// With duplicates present, the last of the equal run goes. Returns `None`
/// when nothing equal is stored.
pub(crate) fn remove<T, C>(tree: &Tree<T>, comparator: &C, element: &T) -> Option<(Tree<T>, BigUint)>
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    let link = tree.as_ref()?;
    let mut offset = BigUint::zero();
    let removed = remove_from(link, comparator, element, &mut offset)?;
    Some((removed, offset))
}

fn remove_from<T, C>(link: &Link<T>, comparator: &C, element: &T, offset: &mut BigUint) -> Option<Tree<T>>
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    match &**link {
        Node::Leaf(existing) => (comparator.compare(element, existing) == Ordering::Equal).then_some(None),
        Node::Branch(branch) => {
            if comparator.compare(element, branch.right.value()) == Ordering::Less {
                let left = remove_from(&branch.left, comparator, element, offset)?;
                Some(balance(&Leftmost, left, Some(branch.right.clone())))
            } else {
                *offset += branch.left.count();
                let right = remove_from(&branch.right, comparator, element, offset)?;
                Some(balance(&Leftmost, Some(branch.left.clone()), right))
            }
        }
    }
}

/// Finds the leftmost element equal to `element`, with its position.
pub(crate) fn find_first<'a, T, C>(tree: &'a Tree<T>, comparator: &C, element: &T) -> Option<(BigUint, &'a T)>
where
    C: Comparator<T> + ?Sized,
{
    let root = tree.as_ref()?;
    match comparator.compare(element, root.value()) {
        Ordering::Less => return None,
        Ordering::Equal => return Some((BigUint::zero(), root.value())),
        Ordering::Greater => {}
    }

    let mut node: &Node<T> = root;
    let mut offset = BigUint::zero();
    let mut candidate = None;
    loop {
        match node {
            Node::Leaf(value) => {
                return if comparator.compare(element, value) == Ordering::Equal {
                    Some((offset, value))
                } else {
                    candidate
                };
            }
            Node::Branch(branch) => {
                let separator = branch.right.value();
                let ordering = comparator.compare(element, separator);
                if ordering == Ordering::Equal {
                    candidate = Some((&offset + branch.left.count(), separator));
                }
                if ordering == Ordering::Greater {
                    offset += branch.left.count();
                    node = &branch.right;
                } else {
                    node = &branch.left;
                }
            }
        }
    }
}

/// Number of elements ordered before `element`, or not after it when
/// `inclusive`.
pub(crate) fn rank<T, C>(tree: &Tree<T>, comparator: &C, element: &T, inclusive: bool) -> BigUint
where
    C: Comparator<T> + ?Sized,
{
    let goes_after = |stored: &T| match comparator.compare(element, stored) {
        Ordering::Greater => true,
        Ordering::Equal => inclusive,
        Ordering::Less => false,
    };

    let mut rank = BigUint::zero();
    let Some(root) = tree else {
        return rank;
    };
    let mut node: &Node<T> = root;
    loop {
        match node {
            Node::Leaf(value) => {
                if goes_after(value) {
                    rank += 1_u32;
                }
                return rank;
            }
            Node::Branch(branch) => {
                if goes_after(branch.right.value()) {
                    rank += branch.left.count();
                    node = &branch.right;
                } else {
                    node = &branch.left;
                }
            }
        }
    }
}

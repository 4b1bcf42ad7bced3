//! Forward iteration and predicate search.

use std::iter::FusedIterator;

use num_bigint::BigUint;
use num_traits::Zero;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::ReferenceCounter;
use super::node::{Link, Node, Tree};

/// Subtrees up to this height are never remembered by the negative cache.
const NEGATIVE_CACHE_MIN_HEIGHT: u32 = 3;

/// Iterator over the elements of a persistent sequence, front to back.
///
/// Keeps the not-yet-visited right subtrees on an explicit stack whose top
/// is always the next leaf, so each step is amortized O(1) and the stack
/// never grows beyond the tree height.
pub struct Iter<'a, T> {
    stack: SmallVec<[&'a Node<T>; 32]>,
    remaining: BigUint,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: BigUint::zero(),
        };
        if let Some(link) = tree {
            iterator.remaining = link.count().clone();
            iterator.descend_leftmost(link);
        }
        iterator
    }

    /// Starts at `position`, which the caller has checked against the count.
    pub(crate) fn starting_at(link: &'a Link<T>, position: &BigUint) -> Self {
        let mut stack: SmallVec<[&'a Node<T>; 32]> = SmallVec::new();
        let mut node: &'a Node<T> = link;
        let mut position = position.clone();
        let remaining = link.count() - &position;
        while let Node::Branch(branch) = node {
            let left_count = branch.left.count();
            if position < *left_count {
                stack.push(&branch.right);
                node = &branch.left;
            } else {
                position -= left_count;
                node = &branch.right;
            }
        }
        stack.push(node);
        Self { stack, remaining }
    }

    fn descend_leftmost(&mut self, mut node: &'a Node<T>) {
        while let Node::Branch(branch) = node {
            self.stack.push(&branch.right);
            node = &branch.left;
        }
        self.stack.push(node);
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Some(next) = self.stack.pop() {
            self.descend_leftmost(next);
        }
        if !self.remaining.is_zero() {
            self.remaining -= 1_u32;
        }
        match current {
            Node::Leaf(value) => Some(value),
            Node::Branch(branch) => Some(&branch.value),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(&self.remaining).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining.clone(),
        }
    }
}

/// Position of the first element satisfying `predicate`.
pub(crate) fn first_of<T, P>(tree: &Tree<T>, predicate: P) -> Option<BigUint>
where
    P: Fn(&T) -> bool,
{
    let link = tree.as_ref()?;
    let mut search = Search {
        predicate,
        ruled_out: FxHashSet::default(),
    };
    search.first(link, BigUint::zero())
}

/// Position of the last element satisfying `predicate`.
pub(crate) fn last_of<T, P>(tree: &Tree<T>, predicate: P) -> Option<BigUint>
where
    P: Fn(&T) -> bool,
{
    let link = tree.as_ref()?;
    let mut search = Search {
        predicate,
        ruled_out: FxHashSet::default(),
    };
    search.last(link, BigUint::zero())
}

/// A predicate search that remembers shared subtrees known not to match.
struct Search<T, P> {
    predicate: P,
    ruled_out: FxHashSet<*const Node<T>>,
}

impl<T, P> Search<T, P>
where
    P: Fn(&T) -> bool,
{
    fn first(&mut self, link: &Link<T>, offset: BigUint) -> Option<BigUint> {
        match &**link {
            Node::Leaf(value) => (self.predicate)(value).then_some(offset),
            Node::Branch(branch) => {
                let key = ReferenceCounter::as_ptr(link);
                if self.ruled_out.contains(&key) {
                    return None;
                }
                let right_offset = &offset + branch.left.count();
                let found = self
                    .first(&branch.left, offset)
                    .or_else(|| self.first(&branch.right, right_offset));
                if found.is_none() && branch.height > NEGATIVE_CACHE_MIN_HEIGHT {
                    self.ruled_out.insert(key);
                }
                found
            }
        }
    }

    fn last(&mut self, link: &Link<T>, offset: BigUint) -> Option<BigUint> {
        match &**link {
            Node::Leaf(value) => (self.predicate)(value).then_some(offset),
            Node::Branch(branch) => {
                let key = ReferenceCounter::as_ptr(link);
                if self.ruled_out.contains(&key) {
                    return None;
                }
                let right_offset = &offset + branch.left.count();
                let found = self
                    .last(&branch.right, right_offset)
                    .or_else(|| self.last(&branch.left, offset));
                if found.is_none() && branch.height > NEGATIVE_CACHE_MIN_HEIGHT {
                    self.ruled_out.insert(key);
                }
                found
            }
        }
    }
}

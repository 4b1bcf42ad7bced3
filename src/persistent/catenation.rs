//! Logarithmic catenation and range extraction.
//!
//! [`concat`] walks down the taller tree along the edge facing the other
//! operand until the heights are within one, pairs the two there, and
//! rebalances on the way back up. Its cost is proportional to the height
//! difference, not to the number of elements.
//!
//! [`slice`] splits a half-open range against the left subtree's count and
//! reassembles the overlapping parts with [`concat`], O(log² n) overall.

use num_bigint::BigUint;
use num_traits::Zero;

use super::node::{Link, Node, Summarize, Tree, branch_of, combine, join};

/// Catenates two trees. An empty operand returns the other one unchanged.
pub(crate) fn concat<T, S>(summary: &S, first: &Tree<T>, second: &Tree<T>) -> Tree<T>
where
    S: Summarize<T> + ?Sized,
{
    match (first, second) {
        (_, None) => first.clone(),
        (None, _) => second.clone(),
        (Some(first), Some(second)) => Some(concat_links(summary, first, second)),
    }
}

pub(crate) fn concat_links<T, S>(summary: &S, first: &Link<T>, second: &Link<T>) -> Link<T>
where
    S: Summarize<T> + ?Sized,
{
    let first_height = first.height();
    let second_height = second.height();
    if first_height.abs_diff(second_height) <= 1 {
        combine(summary, first.clone(), second.clone())
    } else if first_height > second_height {
        let branch = branch_of(first);
        join(
            summary,
            branch.left.clone(),
            concat_links(summary, &branch.right, second),
        )
    } else {
        let branch = branch_of(second);
        join(
            summary,
            concat_links(summary, first, &branch.left),
            branch.right.clone(),
        )
    }
}

/// Extracts the elements at positions `start..end`.
///
/// Positions past the end are clamped. A range covering the whole tree
/// returns the tree itself.
pub(crate) fn slice<T, S>(summary: &S, tree: &Tree<T>, start: &BigUint, end: &BigUint) -> Tree<T>
where
    S: Summarize<T> + ?Sized,
{
    tree.as_ref()
        .and_then(|link| slice_link(summary, link, start, end))
}

fn slice_link<T, S>(summary: &S, link: &Link<T>, start: &BigUint, end: &BigUint) -> Tree<T>
where
    S: Summarize<T> + ?Sized,
{
    if start >= end {
        return None;
    }
    if start.is_zero() && end >= link.count() {
        return Some(link.clone());
    }
    match &**link {
        Node::Leaf(_) => None,
        Node::Branch(branch) => {
            let left_count = branch.left.count();
            if end <= left_count {
                slice_link(summary, &branch.left, start, end)
            } else if start >= left_count {
                slice_link(
                    summary,
                    &branch.right,
                    &(start - left_count),
                    &(end - left_count),
                )
            } else {
                concat(
                    summary,
                    &slice_link(summary, &branch.left, start, left_count),
                    &slice_link(summary, &branch.right, &BigUint::zero(), &(end - left_count)),
                )
            }
        }
    }
}

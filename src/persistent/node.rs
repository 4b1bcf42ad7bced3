//! Tree nodes and the AVL join primitives.
//!
//! A tree is either empty (`None`) or a shared [`Node`]. A node is a leaf
//! holding one value, or a branch over two non-empty subtrees that caches
//! the element count, the height and a summary value. What the summary is
//! depends on the tree: element trees keep the leftmost element (the
//! *representative*), image trees keep the monoid aggregate of the subtree.
//! The [`Summarize`] policy passed to every constructor decides which.
//!
//! [`combine`] pairs two subtrees whose heights differ by at most one and
//! panics otherwise. [`join`] accepts any two subtrees and restores balance
//! with single or double rotations, recursing into the light side until the
//! heights fit.

#[cfg(test)]
use std::fmt;
use std::sync::LazyLock;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::ReferenceCounter;

static LEAF_COUNT: LazyLock<BigUint> = LazyLock::new(BigUint::one);
static EMPTY_COUNT: LazyLock<BigUint> = LazyLock::new(BigUint::zero);

/// A shared, immutable node.
pub(crate) type Link<T> = ReferenceCounter<Node<T>>;

/// A possibly empty tree.
pub(crate) type Tree<T> = Option<Link<T>>;

pub(crate) enum Node<T> {
    Leaf(T),
    Branch(Branch<T>),
}

pub(crate) struct Branch<T> {
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) value: T,
    pub(crate) count: BigUint,
    pub(crate) height: u32,
}

impl<T> Node<T> {
    pub(crate) fn leaf(value: T) -> Link<T> {
        ReferenceCounter::new(Self::Leaf(value))
    }

    /// The leaf value, or the cached summary of a branch.
    pub(crate) const fn value(&self) -> &T {
        match self {
            Self::Leaf(value) => value,
            Self::Branch(branch) => &branch.value,
        }
    }

    pub(crate) fn count(&self) -> &BigUint {
        match self {
            Self::Leaf(_) => &*LEAF_COUNT,
            Self::Branch(branch) => &branch.count,
        }
    }

    pub(crate) const fn height(&self) -> u32 {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(branch) => branch.height,
        }
    }
}

/// Number of elements in a possibly empty tree.
pub(crate) fn count_of<T>(tree: &Tree<T>) -> &BigUint {
    tree.as_ref().map_or(&*EMPTY_COUNT, |link| link.count())
}

/// Returns the branch of a node known to be taller than a leaf.
pub(crate) fn branch_of<T>(link: &Link<T>) -> &Branch<T> {
    match &**link {
        Node::Branch(branch) => branch,
        Node::Leaf(_) => unreachable!("a node taller than 1 is always a branch"),
    }
}

// =============================================================================
// Summaries
// =============================================================================

/// Computes the cached value of a branch from the values of its children.
pub(crate) trait Summarize<T> {
    fn summarize(&self, left: &T, right: &T) -> T;
}

/// Summary of element trees: a branch caches its leftmost element.
pub(crate) struct Leftmost;

impl<T: Clone> Summarize<T> for Leftmost {
    #[inline]
    fn summarize(&self, left: &T, _right: &T) -> T {
        left.clone()
    }
}

// =============================================================================
// Construction
// =============================================================================

/// Builds a branch from two subtrees whose heights differ by at most one.
///
/// # Panics
///
/// Panics if the AVL balance would be violated at the new node. This is an
/// engine bug, never a usage error.
pub(crate) fn combine<T, S>(summary: &S, left: Link<T>, right: Link<T>) -> Link<T>
where
    S: Summarize<T> + ?Sized,
{
    let left_height = left.height();
    let right_height = right.height();
    assert!(
        left_height.abs_diff(right_height) <= 1,
        "avl balance violated: left height {left_height}, right height {right_height}"
    );
    let value = summary.summarize(left.value(), right.value());
    let count = left.count() + right.count();
    ReferenceCounter::new(Node::Branch(Branch {
        left,
        right,
        value,
        count,
        height: left_height.max(right_height) + 1,
    }))
}

/// Joins two subtrees of arbitrary heights into one balanced tree.
///
/// The result is `max(height(left), height(right))` or one taller.
pub(crate) fn join<T, S>(summary: &S, left: Link<T>, right: Link<T>) -> Link<T>
where
    S: Summarize<T> + ?Sized,
{
    let left_height = left.height();
    let right_height = right.height();
    if left_height.abs_diff(right_height) <= 1 {
        return combine(summary, left, right);
    }

    if left_height > right_height {
        let heavy = branch_of(&left);
        let (outer, inner) = (heavy.left.clone(), heavy.right.clone());
        if outer.height() >= inner.height() {
            // single rotation to the right
            join(summary, outer, join(summary, inner, right))
        } else {
            // double rotation left-right
            let middle = branch_of(&inner);
            let (middle_left, middle_right) = (middle.left.clone(), middle.right.clone());
            join(
                summary,
                join(summary, outer, middle_left),
                join(summary, middle_right, right),
            )
        }
    } else {
        let heavy = branch_of(&right);
        let (inner, outer) = (heavy.left.clone(), heavy.right.clone());
        if outer.height() >= inner.height() {
            // single rotation to the left
            join(summary, join(summary, left, inner), outer)
        } else {
            // double rotation right-left
            let middle = branch_of(&inner);
            let (middle_left, middle_right) = (middle.left.clone(), middle.right.clone());
            join(
                summary,
                join(summary, left, middle_left),
                join(summary, middle_right, outer),
            )
        }
    }
}

/// [`join`] lifted to possibly empty trees: an empty side yields the other.
pub(crate) fn balance<T, S>(summary: &S, left: Tree<T>, right: Tree<T>) -> Tree<T>
where
    S: Summarize<T> + ?Sized,
{
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(left), Some(right)) => Some(join(summary, left, right)),
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Renders the shape of a tree as `(left value right)`, `.` for empty.
#[cfg(test)]
pub(crate) fn render<T: fmt::Display>(tree: &Tree<T>) -> String {
    let mut output = String::new();
    match tree {
        None => output.push('.'),
        Some(link) => render_node(link, &mut output),
    }
    output
}

#[cfg(test)]
fn render_node<T: fmt::Display>(node: &Node<T>, output: &mut String) {
    match node {
        Node::Leaf(value) => output.push_str(&value.to_string()),
        Node::Branch(branch) => {
            output.push('(');
            render_node(&branch.left, output);
            output.push(' ');
            output.push_str(&branch.value.to_string());
            output.push(' ');
            render_node(&branch.right, output);
            output.push(')');
        }
    }
}

/// Checks balance, cached heights and cached counts of every branch.
#[cfg(test)]
pub(crate) fn is_well_formed<T>(tree: &Tree<T>) -> bool {
    fn check<T>(node: &Node<T>) -> Option<(u32, BigUint)> {
        match node {
            Node::Leaf(_) => Some((1, BigUint::one())),
            Node::Branch(branch) => {
                let (left_height, left_count) = check(&branch.left)?;
                let (right_height, right_count) = check(&branch.right)?;
                let consistent = left_height.abs_diff(right_height) <= 1
                    && branch.height == left_height.max(right_height) + 1
                    && branch.count == &left_count + &right_count;
                consistent.then(|| (branch.height, left_count + right_count))
            }
        }
    }
    tree.as_ref().is_none_or(|link| check(link).is_some())
}

/// Builds an element tree directly from nested pairs, for shape tests.
#[cfg(test)]
pub(crate) fn pair<T: Clone>(left: Link<T>, right: Link<T>) -> Link<T> {
    combine(&Leftmost, left, right)
}

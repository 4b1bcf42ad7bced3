//! Index-based access and path-copying updates.
//!
//! Callers check bounds; these functions assume `position < count` (or
//! `<= count` for insertion) and only rebuild the nodes on the path to the
//! position.

use num_bigint::BigUint;
use num_traits::Zero;

use super::node::{Link, Node, Summarize, Tree, balance, combine, join};

/// Returns the leaf at `position`.
pub(crate) fn get<'a, T>(link: &'a Link<T>, position: &BigUint) -> &'a T {
    let mut node: &Node<T> = link;
    let mut position = position.clone();
    loop {
        match node {
            Node::Leaf(value) => return value,
            Node::Branch(branch) => {
                let left_count = branch.left.count();
                if position < *left_count {
                    node = &branch.left;
                } else {
                    position -= left_count;
                    node = &branch.right;
                }
            }
        }
    }
}

/// Returns the rightmost leaf.
pub(crate) fn last<T>(link: &Link<T>) -> &T {
    let mut node: &Node<T> = link;
    loop {
        match node {
            Node::Leaf(value) => return value,
            Node::Branch(branch) => node = &branch.right,
        }
    }
}

/// Replaces the leaf at `position`. Heights are unchanged, so no rebalancing.
pub(crate) fn replace<T, S>(summary: &S, link: &Link<T>, position: &BigUint, leaf: Link<T>) -> Link<T>
where
    S: Summarize<T> + ?Sized,
{
    match &**link {
        Node::Leaf(_) => leaf,
        Node::Branch(branch) => {
            let left_count = branch.left.count();
            if position < left_count {
                combine(
                    summary,
                    replace(summary, &branch.left, position, leaf),
                    branch.right.clone(),
                )
            } else {
                combine(
                    summary,
                    branch.left.clone(),
                    replace(summary, &branch.right, &(position - left_count), leaf),
                )
            }
        }
    }
}

/// Inserts a leaf so that it ends up at `position`.
pub(crate) fn insert_at<T, S>(summary: &S, tree: &Tree<T>, position: &BigUint, leaf: Link<T>) -> Link<T>
where
    S: Summarize<T> + ?Sized,
{
    match tree {
        None => leaf,
        Some(link) => insert_into(summary, link, position, leaf),
    }
}

fn insert_into<T, S>(summary: &S, link: &Link<T>, position: &BigUint, leaf: Link<T>) -> Link<T>
where
    S: Summarize<T> + ?Sized,
{
    match &**link {
        Node::Leaf(_) => {
            if position.is_zero() {
                combine(summary, leaf, link.clone())
            } else {
                combine(summary, link.clone(), leaf)
            }
        }
        Node::Branch(branch) => {
            let left_count = branch.left.count();
            if position < left_count {
                join(
                    summary,
                    insert_into(summary, &branch.left, position, leaf),
                    branch.right.clone(),
                )
            } else {
                join(
                    summary,
                    branch.left.clone(),
                    insert_into(summary, &branch.right, &(position - left_count), leaf),
                )
            }
        }
    }
}

/// Removes the leaf at `position`.
pub(crate) fn remove_at<T, S>(summary: &S, link: &Link<T>, position: &BigUint) -> Tree<T>
where
    S: Summarize<T> + ?Sized,
{
    match &**link {
        Node::Leaf(_) => None,
        Node::Branch(branch) => {
            let left_count = branch.left.count();
            if position < left_count {
                balance(
                    summary,
                    remove_at(summary, &branch.left, position),
                    Some(branch.right.clone()),
                )
            } else {
                balance(
                    summary,
                    Some(branch.left.clone()),
                    remove_at(summary, &branch.right, &(position - left_count)),
                )
            }
        }
    }
}

//! Reconstruction of subtrees into the canonical balanced shape.
//!
//! For `n` ordered entries the smaller side receives `ceil((n - 1) / 2)`
//! entries, the node takes the next one and the bigger side receives the
//! remaining `floor((n - 1) / 2)`. The shape depends only on `n`; the
//! comparator is never consulted since the input is already ordered.

use super::super::ReferenceCounter;
use super::node::{Link, Node};
use super::traversal::in_order;

/// Builds the canonical subtree holding the next `count` entries of
/// `entries`, leaving the rest of the iterator untouched.
pub(super) fn build_balanced<K, V, I>(entries: &mut I, count: usize) -> Link<K, V>
where
    I: Iterator<Item = (K, V)>,
{
    if count == 0 {
        return None;
    }
    let smaller_count = count / 2;
    let bigger_count = count - 1 - smaller_count;

    let left = build_balanced(entries, smaller_count);
    let (key, value) = entries.next()?;
    let right = build_balanced(entries, bigger_count);

    Some(ReferenceCounter::new(Node::branch(key, value, left, right)))
}

/// Rebuilds the subtree rooted at `node`, which holds `size` entries.
pub(super) fn rebalance<K: Clone, V: Clone>(
    node: Option<&ReferenceCounter<Node<K, V>>>,
    size: usize,
) -> Link<K, V> {
    let mut entries = in_order(node, size)
        .into_iter()
        .map(|(key, value)| (key.clone(), value.clone()));
    build_balanced(&mut entries, size)
}

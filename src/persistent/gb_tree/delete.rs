//! Deletion and subtree merging.
//!
//! Deletion never rebalances. A removed node is replaced by the merge of its
//! two subtrees, which roots the result at the smallest entry of the bigger
//! side. The weight of the merged subtree is bounded by the weights of its
//! inputs only approximately, so depth may grow under deletion-only workloads
//! until a later insertion rebuilds the affected subtree.

use std::cmp::Ordering;

use compare::Compare;

use super::super::ReferenceCounter;
use super::node::{Link, Node};

/// An entry cut out of a subtree together with what remains of it.
pub(super) struct Taken<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) rest: Link<K, V>,
}

/// Removes `key` from the subtree rooted at `node`.
///
/// Only the path down to the removed node is copied. Returns `None` when the
/// key is missing, in which case nothing is copied.
pub(super) fn delete<K, V, C>(
    comparator: &C,
    node: Option<&ReferenceCounter<Node<K, V>>>,
    key: &K,
) -> Option<Link<K, V>>
where
    K: Clone,
    V: Clone,
    C: Compare<K>,
{
    let node_ref = node?;
    match comparator.compare(key, &node_ref.key) {
        Ordering::Less => {
            let left = delete(comparator, node_ref.left.as_ref(), key)?;
            Some(Some(ReferenceCounter::new(node_ref.with_left(left))))
        }
        Ordering::Greater => {
            let right = delete(comparator, node_ref.right.as_ref(), key)?;
            Some(Some(ReferenceCounter::new(node_ref.with_right(right))))
        }
        Ordering::Equal => Some(merge(node_ref.left.as_ref(), node_ref.right.as_ref())),
    }
}

/// Joins two subtrees where every key of `smaller` compares below every key
/// of `bigger`.
pub(super) fn merge<K, V>(
    smaller: Option<&ReferenceCounter<Node<K, V>>>,
    bigger: Option<&ReferenceCounter<Node<K, V>>>,
) -> Link<K, V>
where
    K: Clone,
    V: Clone,
{
    match (smaller, bigger) {
        (smaller, None) => smaller.cloned(),
        (None, bigger) => bigger.cloned(),
        (Some(smaller), Some(bigger)) => {
            let Taken { key, value, rest } = take_smallest(bigger);
            Some(ReferenceCounter::new(Node::branch(
                key,
                value,
                Some(ReferenceCounter::clone(smaller)),
                rest,
            )))
        }
    }
}

/// Cuts the leftmost entry out of a non-empty subtree.
pub(super) fn take_smallest<K, V>(node: &ReferenceCounter<Node<K, V>>) -> Taken<K, V>
where
    K: Clone,
    V: Clone,
{
    match &node.left {
        None => Taken {
            key: node.key.clone(),
            value: node.value.clone(),
            rest: node.right.clone(),
        },
        Some(left) => {
            let Taken { key, value, rest } = take_smallest(left);
            Taken {
                key,
                value,
                rest: Some(ReferenceCounter::new(node.with_left(rest))),
            }
        }
    }
}

/// Cuts the rightmost entry out of a non-empty subtree.
pub(super) fn take_largest<K, V>(node: &ReferenceCounter<Node<K, V>>) -> Taken<K, V>
where
    K: Clone,
    V: Clone,
{
    match &node.right {
        None => Taken {
            key: node.key.clone(),
            value: node.value.clone(),
            rest: node.left.clone(),
        },
        Some(right) => {
            let Taken { key, value, rest } = take_largest(right);
            Taken {
                key,
                value,
                rest: Some(ReferenceCounter::new(node.with_right(rest))),
            }
        }
    }
}

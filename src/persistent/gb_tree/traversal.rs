//! In-order traversal and the iterators built on it.

use super::super::ReferenceCounter;
use super::node::{Link, Node};

/// Appends every entry of the subtree to `entries` in comparator order.
pub(super) fn collect_in_order<'a, K, V>(
    node: Option<&'a ReferenceCounter<Node<K, V>>>,
    entries: &mut Vec<(&'a K, &'a V)>,
) {
    if let Some(node_ref) = node {
        collect_in_order(node_ref.left.as_ref(), entries);
        entries.push((&node_ref.key, &node_ref.value));
        collect_in_order(node_ref.right.as_ref(), entries);
    }
}

/// Flattens the subtree into an ordered vector of borrowed entries.
pub(super) fn in_order<K, V>(
    node: Option<&ReferenceCounter<Node<K, V>>>,
    size_hint: usize,
) -> Vec<(&K, &V)> {
    let mut entries = Vec::with_capacity(size_hint);
    collect_in_order(node, &mut entries);
    entries
}

/// Rebuilds the subtree with every value replaced by `transform(key, value)`.
///
/// Entries are visited in comparator order and the shape is kept as is.
pub(super) fn map_in_order<K, V, W, F>(
    node: Option<&ReferenceCounter<Node<K, V>>>,
    transform: &mut F,
) -> Link<K, W>
where
    K: Clone,
    F: FnMut(&K, &V) -> W,
{
    let node_ref = node?;
    let left = map_in_order(node_ref.left.as_ref(), transform);
    let value = transform(&node_ref.key, &node_ref.value);
    let right = map_in_order(node_ref.right.as_ref(), transform);
    Some(ReferenceCounter::new(Node::branch(
        node_ref.key.clone(),
        value,
        left,
        right,
    )))
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of a [`GbTree`](super::GbTree) in comparator
/// order.
///
/// The entries are gathered when the iterator is created, so its length is
/// known up front.
pub struct GbTreeIterator<'a, K, V> {
    pub(super) entries: std::vec::IntoIter<(&'a K, &'a V)>,
}

impl<'a, K, V> Iterator for GbTreeIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for GbTreeIterator<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for GbTreeIterator<'_, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// An owning iterator over the entries of a [`GbTree`](super::GbTree).
pub struct GbTreeIntoIterator<K, V> {
    pub(super) entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for GbTreeIntoIterator<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for GbTreeIntoIterator<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for GbTreeIntoIterator<K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

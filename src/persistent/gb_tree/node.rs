//! Node representation and the weight measure used by the balance check.

use super::super::ReferenceCounter;

/// A possibly empty subtree. `None` is the empty-tree sentinel.
pub(super) type Link<K, V> = Option<ReferenceCounter<Node<K, V>>>;

/// Internal node of the tree.
///
/// Nodes are never mutated once built, which is what allows subtrees to be
/// shared between tree versions.
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    /// Subtree holding the keys that compare smaller than `key`.
    pub(super) left: Link<K, V>,
    /// Subtree holding the keys that compare bigger than `key`.
    pub(super) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a node without children.
    pub(super) const fn leaf(key: K, value: V) -> Self {
        Self::branch(key, value, None, None)
    }

    /// Creates a node from its parts.
    pub(super) const fn branch(key: K, value: V, left: Link<K, V>, right: Link<K, V>) -> Self {
        Self {
            key,
            value,
            left,
            right,
        }
    }

    /// Copies this node, replacing the smaller-side child.
    pub(super) fn with_left(&self, left: Link<K, V>) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self::branch(
            self.key.clone(),
            self.value.clone(),
            left,
            self.right.clone(),
        )
    }

    /// Copies this node, replacing the bigger-side child.
    pub(super) fn with_right(&self, right: Link<K, V>) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self::branch(
            self.key.clone(),
            self.value.clone(),
            self.left.clone(),
            right,
        )
    }

    /// Copies this node with a new value; key and children are kept.
    pub(super) fn with_value(&self, value: V) -> Self
    where
        K: Clone,
    {
        Self::branch(
            self.key.clone(),
            value,
            self.left.clone(),
            self.right.clone(),
        )
    }
}

// =============================================================================
// Weight Measure
// =============================================================================

/// Balance weight and element count of a subtree.
///
/// The weight doubles with every level: an empty subtree and a leaf weigh 1,
/// any other node weighs twice its heavier child. It therefore grows with the
/// height of the subtree, while `size` grows with its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Measure {
    pub(super) weight: usize,
    pub(super) size: usize,
}

impl Measure {
    pub(super) const EMPTY: Self = Self { weight: 1, size: 0 };
    pub(super) const LEAF: Self = Self { weight: 1, size: 1 };

    /// Measure of a node whose children measure `self` and `sibling`.
    pub(super) fn join(self, sibling: Self) -> Self {
        Self {
            weight: self.weight.max(sibling.weight).saturating_mul(2),
            size: self.size + sibling.size + 1,
        }
    }

    /// Returns `true` when the subtree is too tall for its size and must be
    /// rebuilt.
    pub(super) const fn is_overweight(self) -> bool {
        self.weight > weight_threshold(self.size)
    }
}

/// Largest weight a subtree holding `size` entries may have.
pub(super) const fn weight_threshold(size: usize) -> usize {
    size.saturating_mul(2).saturating_add(2)
}

/// Measures a subtree by walking all of it.
pub(super) fn measure<K, V>(link: Option<&ReferenceCounter<Node<K, V>>>) -> Measure {
    match link {
        None => Measure::EMPTY,
        Some(node) => match (&node.left, &node.right) {
            (None, None) => Measure::LEAF,
            (left, right) => measure(left.as_ref()).join(measure(right.as_ref())),
        },
    }
}

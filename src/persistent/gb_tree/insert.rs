//! Insertion with weight-based rebuilding.
//!
//! The descent carries a budget that starts at the weight threshold of the
//! grown tree and is halved at every level. A new leaf that lands while the
//! budget is still positive is shallow enough that no ancestor can have become
//! overweight, so the path is rebuilt without any checks. Once the budget is
//! exhausted the leaf is returned together with its measure and every ancestor
//! measures itself, rebuilding the first subtree found overweight. Nodes above
//! a rebuilt subtree are not checked again.

use std::cmp::Ordering;

use compare::Compare;

use super::super::ReferenceCounter;
use super::node::{Measure, Node, measure, weight_threshold};
use super::rebalance::rebalance;

/// Subtree produced by inserting below a node.
enum Insertion<K, V> {
    /// The ancestors still have to check their weight.
    Measured(ReferenceCounter<Node<K, V>>, Measure),
    /// No further checks are needed on the way up.
    Settled(ReferenceCounter<Node<K, V>>),
    /// An equal key had its value replaced; the size is unchanged.
    Replaced(ReferenceCounter<Node<K, V>>),
}

/// Root of a tree after [`insert`].
pub(super) struct Inserted<K, V> {
    pub(super) root: ReferenceCounter<Node<K, V>>,
    /// `false` when the key was already present and only its value changed.
    pub(super) added: bool,
}

/// Inserts `key` into the tree rooted at `root`, which holds `size` entries.
/// An equal key has its value replaced in place.
pub(super) fn insert<K, V, C>(
    comparator: &C,
    root: Option<&ReferenceCounter<Node<K, V>>>,
    key: K,
    value: V,
    size: usize,
) -> Inserted<K, V>
where
    K: Clone,
    V: Clone,
    C: Compare<K>,
{
    // The budget only matters when a leaf is added, which grows the tree by one.
    let budget = weight_threshold(size.saturating_add(1));
    match insert_into_node(comparator, root, key, value, budget) {
        Insertion::Measured(root, _) | Insertion::Settled(root) => Inserted { root, added: true },
        Insertion::Replaced(root) => Inserted { root, added: false },
    }
}

fn insert_into_node<K, V, C>(
    comparator: &C,
    node: Option<&ReferenceCounter<Node<K, V>>>,
    key: K,
    value: V,
    budget: usize,
) -> Insertion<K, V>
where
    K: Clone,
    V: Clone,
    C: Compare<K>,
{
    let Some(node_ref) = node else {
        let leaf = ReferenceCounter::new(Node::leaf(key, value));
        return if budget == 0 {
            Insertion::Measured(leaf, Measure::LEAF)
        } else {
            Insertion::Settled(leaf)
        };
    };

    match comparator.compare(&key, &node_ref.key) {
        Ordering::Less => {
            let inserted =
                insert_into_node(comparator, node_ref.left.as_ref(), key, value, budget / 2);
            ascend(inserted, node_ref.right.as_ref(), |left| {
                node_ref.with_left(Some(left))
            })
        }
        Ordering::Greater => {
            let inserted =
                insert_into_node(comparator, node_ref.right.as_ref(), key, value, budget / 2);
            ascend(inserted, node_ref.left.as_ref(), |right| {
                node_ref.with_right(Some(right))
            })
        }
        Ordering::Equal => Insertion::Replaced(ReferenceCounter::new(node_ref.with_value(value))),
    }
}

/// Rebuilds the parent of an inserted subtree and, while measuring, checks
/// the parent's weight against its size.
fn ascend<K, V, F>(
    inserted: Insertion<K, V>,
    sibling: Option<&ReferenceCounter<Node<K, V>>>,
    rebuild: F,
) -> Insertion<K, V>
where
    K: Clone,
    V: Clone,
    F: FnOnce(ReferenceCounter<Node<K, V>>) -> Node<K, V>,
{
    match inserted {
        Insertion::Settled(child) => Insertion::Settled(ReferenceCounter::new(rebuild(child))),
        Insertion::Replaced(child) => Insertion::Replaced(ReferenceCounter::new(rebuild(child))),
        Insertion::Measured(child, child_measure) => {
            let subtree = ReferenceCounter::new(rebuild(child));
            let subtree_measure = child_measure.join(measure(sibling));
            if subtree_measure.is_overweight() {
                tracing::trace!(
                    size = subtree_measure.size,
                    weight = subtree_measure.weight,
                    "rebuilding overweight subtree"
                );
                rebalance(Some(&subtree), subtree_measure.size)
                    .map_or(Insertion::Settled(subtree), Insertion::Settled)
            } else {
                Insertion::Measured(subtree, subtree_measure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::node::Link;
    use super::super::traversal::in_order;
    use super::*;
    use compare::{Natural, natural};
    use rstest::rstest;

    fn height<K, V>(link: Option<&ReferenceCounter<Node<K, V>>>) -> usize {
        link.map_or(0, |node| {
            1 + height(node.left.as_ref()).max(height(node.right.as_ref()))
        })
    }

    fn insert_all(keys: impl IntoIterator<Item = i32>) -> (Link<i32, i32>, usize) {
        let comparator: Natural<i32> = natural();
        let mut root: Link<i32, i32> = None;
        let mut size = 0;
        for key in keys {
            let inserted = insert(&comparator, root.as_ref(), key, key * 10, size);
            size += usize::from(inserted.added);
            root = Some(inserted.root);
        }
        (root, size)
    }

    #[rstest]
    fn test_insert_into_empty_creates_leaf() {
        let (root, _) = insert_all([7]);
        let node = root.as_ref().unwrap();
        assert_eq!((node.key, node.value), (7, 70));
        assert!(node.left.is_none() && node.right.is_none());
    }

    #[rstest]
    fn test_shallow_ascending_inserts_are_not_checked() {
        let (root, _) = insert_all(1..=4);
        assert_eq!(height(root.as_ref()), 4);
    }

    #[rstest]
    fn test_fifth_ascending_insert_rebuilds_spine() {
        let (root, _) = insert_all(1..=5);
        assert_eq!(height(root.as_ref()), 3);
        assert_eq!(root.as_ref().unwrap().key, 3);
    }

    #[rstest]
    #[case(100)]
    #[case(1000)]
    #[case(5000)]
    fn test_ascending_inserts_keep_logarithmic_height(#[case] count: i32) {
        let (root, size) = insert_all(1..=count);
        let bound = 2 * (usize::BITS - size.leading_zeros()) as usize + 2;
        assert!(height(root.as_ref()) <= bound);
        let keys: Vec<i32> = in_order(root.as_ref(), size)
            .into_iter()
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(keys, (1..=count).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_descending_inserts_keep_logarithmic_height() {
        let (root, size) = insert_all((1..=1000).rev());
        let bound = 2 * (usize::BITS - size.leading_zeros()) as usize + 2;
        assert!(height(root.as_ref()) <= bound);
    }

    #[rstest]
    fn test_equal_key_replaces_value_and_shares_children() {
        let comparator: Natural<i32> = natural();
        let (root, size) = insert_all([2, 1, 3]);
        let inserted = insert(&comparator, root.as_ref(), 2, 99, size);
        assert!(!inserted.added);
        let replaced = inserted.root;
        let original = root.as_ref().unwrap();
        assert_eq!((replaced.key, replaced.value), (2, 99));
        assert!(ReferenceCounter::ptr_eq(
            replaced.left.as_ref().unwrap(),
            original.left.as_ref().unwrap()
        ));
        assert!(ReferenceCounter::ptr_eq(
            replaced.right.as_ref().unwrap(),
            original.right.as_ref().unwrap()
        ));
    }

    #[rstest]
    fn test_insert_shares_untouched_sibling() {
        let comparator: Natural<i32> = natural();
        let (root, size) = insert_all([20, 10, 30]);
        let inserted = insert(&comparator, root.as_ref(), 5, 50, size);
        assert!(inserted.added);
        let grown = inserted.root;
        let original = root.as_ref().unwrap();
        assert!(ReferenceCounter::ptr_eq(
            grown.right.as_ref().unwrap(),
            original.right.as_ref().unwrap()
        ));
        assert!(original.left.as_ref().unwrap().left.is_none());
        assert_eq!(grown.left.as_ref().unwrap().left.as_ref().unwrap().key, 5);
    }

    #[rstest]
    fn test_insert_uses_comparator() {
        let reversed = |left: &i32, right: &i32| right.cmp(left);
        let mut root: Link<i32, i32> = None;
        for (index, key) in [1, 2, 3].into_iter().enumerate() {
            root = Some(insert(&reversed, root.as_ref(), key, key, index).root);
        }
        let keys: Vec<i32> = in_order(root.as_ref(), 3)
            .into_iter()
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(keys, vec![3, 2, 1]);
    }

    #[rstest]
    fn test_replacing_deep_key_is_not_counted() {
        let comparator: Natural<i32> = natural();
        let (root, size) = insert_all(1..=100);
        let inserted = insert(&comparator, root.as_ref(), 1, -1, size);
        assert!(!inserted.added);
        assert_eq!(in_order(Some(&inserted.root), size).len(), size);
        assert_eq!(height(Some(&inserted.root)), height(root.as_ref()));
    }

    #[rstest]
    fn test_repeated_keys_are_counted_once() {
        let (root, size) = insert_all([5, 3, 5, 8, 3, 5]);
        assert_eq!(size, 3);
        assert_eq!(in_order(root.as_ref(), size).len(), 3);
    }
}

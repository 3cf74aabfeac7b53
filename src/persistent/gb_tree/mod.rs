//! Persistent (immutable) ordered map based on a general balanced tree.
//!
//! This module provides [`GbTree`], an immutable ordered map that uses
//! structural sharing for efficient operations.
//!
//! # Overview
//!
//! `GbTree` is a weight-balanced binary search tree in the style of Erlang's
//! general balanced trees. Instead of keeping colours or heights in every
//! node, balance is checked only on the path of an insertion that lands deep
//! in the tree: a subtree whose weight (which doubles with every level) has
//! outgrown `2 * size + 2` is rebuilt wholesale into the canonical balanced
//! shape for its size. Deletions never rebalance.
//!
//! - O(log N) fetch
//! - O(log N) amortized put
//! - O(log N) delete on trees grown by insertion
//! - O(log N) min/max
//! - O(1) len and `is_empty`
//!
//! All operations return new trees without modifying the original,
//! and structural sharing ensures memory efficiency.
//!
//! # Ordering
//!
//! Every tree carries a comparator implementing [`compare::Compare`], fixed
//! when the tree is created. [`GbTree::new`] orders keys by their `Ord`
//! implementation; [`GbTree::with_comparator`] accepts any comparator,
//! including plain closures.
//!
//! # Examples
//!
//! ```rust
//! use gbtree::persistent::GbTree;
//!
//! let tree = GbTree::new()
//!     .put(3, "c")
//!     .put(1, "a")
//!     .put(2, "b");
//!
//! // Entries are always in comparator order
//! assert_eq!(tree.to_vec(), vec![(1, "a"), (2, "b"), (3, "c")]);
//!
//! // Structural sharing: the original tree is preserved
//! let smaller = tree.delete(&2);
//! assert_eq!(tree.len(), 3);
//! assert_eq!(smaller.len(), 2);
//! ```

mod delete;
mod insert;
mod node;
mod rebalance;
mod traits;
mod traversal;
mod update;

use std::cmp::Ordering;

use compare::{Compare, Natural, natural};

use super::GbTreeError;
use super::ReferenceCounter;
use delete::Taken;
use node::{Link, Node};
use traversal::in_order;

pub use traversal::{GbTreeIntoIterator, GbTreeIterator};
pub use update::Update;

// =============================================================================
// GbTree Definition
// =============================================================================

/// A persistent (immutable) ordered map based on a general balanced tree.
///
/// `K` is the key type, `V` the value type and `C` the comparator deciding
/// the order of keys. All structural decisions, including whether two keys
/// are the same key, go through the comparator.
///
/// # Time Complexity
///
/// | Operation      | Complexity          |
/// |----------------|---------------------|
/// | `new`          | O(1)                |
/// | `fetch`        | O(log N)            |
/// | `put`          | O(log N) amortized  |
/// | `delete`       | O(log N)            |
/// | `contains_key` | O(log N)            |
/// | `min`/`max`    | O(log N)            |
/// | `balance`      | O(N)                |
/// | `to_vec`       | O(N)                |
/// | `len`          | O(1)                |
/// | `is_empty`     | O(1)                |
///
/// # Examples
///
/// ```rust
/// use gbtree::persistent::GbTree;
///
/// let tree = GbTree::singleton(42, "answer");
/// assert_eq!(tree.fetch(&42), Some(&"answer"));
///
/// // A closure works as a comparator
/// let descending = GbTree::from_pairs_with_comparator(
///     [(1, "one"), (3, "three"), (2, "two")],
///     |left: &i32, right: &i32| right.cmp(left),
/// );
/// let keys: Vec<&i32> = descending.keys().collect();
/// assert_eq!(keys, vec![&3, &2, &1]);
/// ```
pub struct GbTree<K, V, C = Natural<K>> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
    /// Ordering shared by every version derived from this tree
    comparator: ReferenceCounter<C>,
}

impl<K: Ord, V> GbTree<K, V> {
    /// Creates a new empty tree ordered by the keys' `Ord` implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree: GbTree<i32, String> = GbTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(natural())
    }
}

impl<K: Ord + Clone, V: Clone> GbTree<K, V> {
    /// Creates a tree containing a single key-value pair.
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        Self::new().put(key, value)
    }

    /// Creates a tree by inserting the pairs in sequence order.
    ///
    /// When a key occurs more than once the last pair wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree = GbTree::from_pairs([(3, "c"), (1, "a"), (2, "b"), (1, "A")]);
    /// assert_eq!(tree.to_vec(), vec![(1, "A"), (2, "b"), (3, "c")]);
    /// ```
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_pairs_with_comparator(pairs, natural())
    }

    /// Builds a balanced tree directly from pairs in strictly increasing key
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`GbTreeError::UnorderedEntries`] when a key does not compare
    /// greater than its predecessor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::{GbTree, GbTreeError};
    ///
    /// let tree = GbTree::from_ordered(vec![(1, 'a'), (2, 'b'), (3, 'c')]).unwrap();
    /// assert_eq!(tree.len(), 3);
    ///
    /// let unordered = GbTree::from_ordered(vec![(1, 'a'), (1, 'b')]);
    /// assert_eq!(unordered.err(), Some(GbTreeError::UnorderedEntries { position: 1 }));
    /// ```
    pub fn from_ordered(entries: Vec<(K, V)>) -> Result<Self, GbTreeError> {
        Self::from_ordered_with_comparator(entries, natural())
    }
}

impl<K, V, C> GbTree<K, V, C> {
    /// Creates a new empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use compare::{Compare, natural};
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree = GbTree::with_comparator(natural().rev())
    ///     .put(1, "a")
    ///     .put(2, "b");
    /// assert_eq!(tree.to_vec(), vec![(2, "b"), (1, "a")]);
    /// ```
    #[inline]
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            length: 0,
            comparator: ReferenceCounter::new(comparator),
        }
    }

    /// Returns the number of entries in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the comparator ordering this tree.
    #[inline]
    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`GbTreeError::EmptyTree`] if the tree has no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree = GbTree::from_pairs([(3, "c"), (1, "a"), (2, "b")]);
    /// assert_eq!(tree.min(), Ok((&1, &"a")));
    /// ```
    pub fn min(&self) -> Result<(&K, &V), GbTreeError> {
        Self::min_from_node(self.root.as_ref()).ok_or(GbTreeError::EmptyTree)
    }

    fn min_from_node(node: Option<&ReferenceCounter<Node<K, V>>>) -> Option<(&K, &V)> {
        node.and_then(|node_ref| {
            node_ref.left.as_ref().map_or_else(
                || Some((&node_ref.key, &node_ref.value)),
                |left| Self::min_from_node(Some(left)),
            )
        })
    }

    /// Returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`GbTreeError::EmptyTree`] if the tree has no entries.
    pub fn max(&self) -> Result<(&K, &V), GbTreeError> {
        Self::max_from_node(self.root.as_ref()).ok_or(GbTreeError::EmptyTree)
    }

    fn max_from_node(node: Option<&ReferenceCounter<Node<K, V>>>) -> Option<(&K, &V)> {
        node.and_then(|node_ref| {
            node_ref.right.as_ref().map_or_else(
                || Some((&node_ref.key, &node_ref.value)),
                |right| Self::max_from_node(Some(right)),
            )
        })
    }

    /// Returns an iterator over entries in comparator order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree = GbTree::from_pairs([(2, "b"), (1, "a")]);
    /// let entries: Vec<(&i32, &&str)> = tree.iter().collect();
    /// assert_eq!(entries, vec![(&1, &"a"), (&2, &"b")]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> GbTreeIterator<'_, K, V> {
        GbTreeIterator {
            entries: in_order(self.root.as_ref(), self.length).into_iter(),
        }
    }

    /// Returns an iterator over keys in comparator order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns all entries as an ordered vector of owned pairs.
    #[must_use]
    pub fn to_vec(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Applies `transform` to every entry, keeping keys and tree shape.
    ///
    /// The transform is called once per entry, in key order. Since neither
    /// keys nor shape change, the result needs no rebalancing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree = GbTree::from_pairs([(1, 10), (2, 20)]);
    /// let described = tree.map(|key, value| format!("{key}={value}"));
    /// assert_eq!(described.fetch(&2), Some(&"2=20".to_string()));
    /// ```
    #[must_use]
    pub fn map<W, F>(&self, mut transform: F) -> GbTree<K, W, C>
    where
        K: Clone,
        F: FnMut(&K, &V) -> W,
    {
        GbTree {
            root: traversal::map_in_order(self.root.as_ref(), &mut transform),
            length: self.length,
            comparator: ReferenceCounter::clone(&self.comparator),
        }
    }
}

impl<K, V, C: Compare<K>> GbTree<K, V, C> {
    /// Returns a reference to the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree = GbTree::singleton("hello".to_string(), 42);
    /// assert_eq!(tree.fetch(&"hello".to_string()), Some(&42));
    /// assert_eq!(tree.fetch(&"world".to_string()), None);
    /// ```
    #[must_use]
    pub fn fetch(&self, key: &K) -> Option<&V> {
        Self::fetch_from_node(&*self.comparator, self.root.as_ref(), key)
    }

    fn fetch_from_node<'a>(
        comparator: &C,
        node: Option<&'a ReferenceCounter<Node<K, V>>>,
        key: &K,
    ) -> Option<&'a V> {
        node.and_then(|node_ref| match comparator.compare(key, &node_ref.key) {
            Ordering::Less => Self::fetch_from_node(comparator, node_ref.left.as_ref(), key),
            Ordering::Greater => Self::fetch_from_node(comparator, node_ref.right.as_ref(), key),
            Ordering::Equal => Some(&node_ref.value),
        })
    }

    /// Returns a reference to the value stored under `key`, treating a
    /// missing key as an error.
    ///
    /// # Errors
    ///
    /// Returns [`GbTreeError::KeyNotFound`] if `key` is absent.
    pub fn try_fetch(&self, key: &K) -> Result<&V, GbTreeError> {
        self.fetch(key).ok_or(GbTreeError::KeyNotFound)
    }

    /// Returns the value stored under `key`, or `default` when absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree = GbTree::singleton(1, "one");
    /// assert_eq!(tree.get_or(&1, &"none"), &"one");
    /// assert_eq!(tree.get_or(&2, &"none"), &"none");
    /// ```
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.fetch(key).unwrap_or(default)
    }

    /// Returns `true` if the tree stores a value under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.fetch(key).is_some()
    }
}

impl<K: Clone, V: Clone, C: Compare<K>> GbTree<K, V, C> {
    /// Creates a tree ordered by `comparator` by inserting the pairs in
    /// sequence order. When a key occurs more than once the last pair wins.
    #[must_use]
    pub fn from_pairs_with_comparator<I>(pairs: I, comparator: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .fold(Self::with_comparator(comparator), |tree, (key, value)| {
                tree.put(key, value)
            })
    }

    /// Builds a balanced tree ordered by `comparator` directly from pairs in
    /// strictly increasing order.
    ///
    /// # Errors
    ///
    /// Returns [`GbTreeError::UnorderedEntries`] with the index of the first
    /// pair that does not compare greater than its predecessor.
    pub fn from_ordered_with_comparator(
        entries: Vec<(K, V)>,
        comparator: C,
    ) -> Result<Self, GbTreeError> {
        if let Some(position) = entries
            .windows(2)
            .position(|pair| comparator.compare(&pair[0].0, &pair[1].0) != Ordering::Less)
        {
            return Err(GbTreeError::UnorderedEntries {
                position: position + 1,
            });
        }

        let length = entries.len();
        tracing::debug!(size = length, "building tree from ordered entries");
        Ok(Self {
            root: rebalance::build_balanced(&mut entries.into_iter(), length),
            length,
            comparator: ReferenceCounter::new(comparator),
        })
    }

    /// Inserts a key-value pair into the tree.
    ///
    /// If the tree already contains the key, the value is replaced and the
    /// entry keeps its position.
    ///
    /// # Complexity
    ///
    /// O(log N) amortized
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree1 = GbTree::new().put(1, "one");
    /// let tree2 = tree1.put(1, "ONE");
    ///
    /// assert_eq!(tree1.fetch(&1), Some(&"one")); // Original unchanged
    /// assert_eq!(tree2.fetch(&1), Some(&"ONE")); // New version
    /// assert_eq!(tree2.len(), 1);
    /// ```
    #[must_use]
    pub fn put(&self, key: K, value: V) -> Self {
        let inserted = insert::insert(
            &*self.comparator,
            self.root.as_ref(),
            key,
            value,
            self.length,
        );
        Self {
            root: Some(inserted.root),
            length: self.length + usize::from(inserted.added),
            comparator: ReferenceCounter::clone(&self.comparator),
        }
    }

    /// Replaces the value of an existing key.
    ///
    /// # Errors
    ///
    /// Returns [`GbTreeError::KeyNotFound`] if `key` is absent; the tree is
    /// never grown by this operation.
    pub fn try_update(&self, key: K, value: V) -> Result<Self, GbTreeError> {
        if self.contains_key(&key) {
            Ok(self.put(key, value))
        } else {
            Err(GbTreeError::KeyNotFound)
        }
    }

    /// Removes a key from the tree.
    ///
    /// Returns a new tree without the key. If the key doesn't exist,
    /// returns a clone of the original tree.
    ///
    /// Deletion does not rebalance; see [`balance`](Self::balance).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree = GbTree::from_pairs([(1, "one"), (2, "two")]);
    /// let removed = tree.delete(&1);
    ///
    /// assert_eq!(tree.len(), 2);     // Original unchanged
    /// assert_eq!(removed.len(), 1);  // New version
    /// assert_eq!(removed.fetch(&1), None);
    /// ```
    #[must_use]
    pub fn delete(&self, key: &K) -> Self {
        match delete::delete(&*self.comparator, self.root.as_ref(), key) {
            Some(root) => Self {
                root,
                length: self.length - 1,
                comparator: ReferenceCounter::clone(&self.comparator),
            },
            None => self.clone(),
        }
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`GbTreeError::EmptyTree`] if the tree has no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree = GbTree::from_pairs([(2, "b"), (1, "a")]);
    /// let ((key, value), rest) = tree.pop_min().unwrap();
    /// assert_eq!((key, value), (1, "a"));
    /// assert_eq!(rest.len(), 1);
    /// ```
    pub fn pop_min(&self) -> Result<((K, V), Self), GbTreeError> {
        let root = self.root.as_ref().ok_or(GbTreeError::EmptyTree)?;
        Ok(self.with_taken(delete::take_smallest(root)))
    }

    /// Removes and returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`GbTreeError::EmptyTree`] if the tree has no entries.
    pub fn pop_max(&self) -> Result<((K, V), Self), GbTreeError> {
        let root = self.root.as_ref().ok_or(GbTreeError::EmptyTree)?;
        Ok(self.with_taken(delete::take_largest(root)))
    }

    fn with_taken(&self, taken: Taken<K, V>) -> ((K, V), Self) {
        let Taken { key, value, rest } = taken;
        let remaining = Self {
            root: rest,
            length: self.length - 1,
            comparator: ReferenceCounter::clone(&self.comparator),
        };
        ((key, value), remaining)
    }

    /// Rebuilds the whole tree into the canonical balanced shape.
    ///
    /// Insertions keep the tree balanced on their own; this is useful after a
    /// long run of deletions, which never rebalance.
    ///
    /// # Complexity
    ///
    /// O(N)
    #[must_use]
    pub fn balance(&self) -> Self {
        tracing::debug!(size = self.length, "rebalancing whole tree");
        Self {
            root: rebalance::rebalance(self.root.as_ref(), self.length),
            length: self.length,
            comparator: ReferenceCounter::clone(&self.comparator),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Read-modify-write operations composed from fetch, put and delete.

use compare::Compare;

use super::super::GbTreeError;
use super::GbTree;

/// What an updater passed to [`GbTree::get_and_update`] wants done with the
/// entry.
///
/// Both variants carry the value handed back to the caller of
/// `get_and_update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Update<V, R> {
    /// Store `value` under the key.
    Replace {
        /// Returned to the caller.
        returned: R,
        /// New value for the key.
        value: V,
    },
    /// Remove the key from the tree.
    Remove {
        /// Returned to the caller.
        returned: R,
    },
}

impl<K: Clone, V: Clone, C: Compare<K>> GbTree<K, V, C> {
    /// Looks up `key` and lets `updater` decide what to store in its place.
    ///
    /// The updater receives the current value (`None` when absent) and
    /// returns an [`Update`]. Removing an absent key leaves the tree
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::{GbTree, Update};
    ///
    /// let tree = GbTree::singleton("hits", 1);
    ///
    /// let (previous, counted) = tree.get_and_update("hits", |current| Update::Replace {
    ///     returned: current.copied(),
    ///     value: current.map_or(1, |count| count + 1),
    /// });
    /// assert_eq!(previous, Some(1));
    /// assert_eq!(counted.fetch(&"hits"), Some(&2));
    ///
    /// let (removed, emptied) = counted.get_and_update("hits", |current| Update::Remove {
    ///     returned: current.copied(),
    /// });
    /// assert_eq!(removed, Some(2));
    /// assert!(emptied.is_empty());
    /// ```
    #[must_use]
    pub fn get_and_update<R, F>(&self, key: K, updater: F) -> (R, Self)
    where
        F: FnOnce(Option<&V>) -> Update<V, R>,
    {
        match updater(self.fetch(&key)) {
            Update::Replace { returned, value } => (returned, self.put(key, value)),
            Update::Remove { returned } => (returned, self.delete(&key)),
        }
    }

    /// Like [`get_and_update`](Self::get_and_update), but the key must be
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`GbTreeError::KeyNotFound`] if `key` is absent; the updater
    /// is not called in that case.
    pub fn try_get_and_update<R, F>(&self, key: K, updater: F) -> Result<(R, Self), GbTreeError>
    where
        F: FnOnce(&V) -> Update<V, R>,
    {
        let update = updater(self.try_fetch(&key)?);
        Ok(match update {
            Update::Replace { returned, value } => (returned, self.put(key, value)),
            Update::Remove { returned } => (returned, self.delete(&key)),
        })
    }

    /// Removes `key`, returning its value and the remaining tree.
    ///
    /// When the key is absent the value is `None` and the tree is returned
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree = GbTree::from_pairs([("a", 1), ("b", 2)]);
    /// let (value, rest) = tree.pop(&"a");
    /// assert_eq!(value, Some(1));
    /// assert_eq!(rest.len(), 1);
    /// ```
    #[must_use]
    pub fn pop(&self, key: &K) -> (Option<V>, Self) {
        match self.fetch(key) {
            Some(value) => (Some(value.clone()), self.delete(key)),
            None => (None, self.clone()),
        }
    }

    /// Removes `key`, returning its value (or `default` when absent) and the
    /// remaining tree.
    ///
    /// A stored value is always returned as is, even when it is itself an
    /// "empty" value such as `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gbtree::persistent::GbTree;
    ///
    /// let tree = GbTree::singleton("a", 1);
    /// let (value, unchanged) = tree.pop_or(&"c", 3);
    /// assert_eq!(value, 3);
    /// assert_eq!(unchanged, tree);
    /// ```
    #[must_use]
    pub fn pop_or(&self, key: &K, default: V) -> (V, Self) {
        let (value, remaining) = self.pop(key);
        (value.unwrap_or(default), remaining)
    }
}

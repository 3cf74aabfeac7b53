//! Error types for the persistent tree.
//!
//! Lookups that may legitimately miss (`fetch`, `contains_key`) return
//! `Option`/`bool`. The variants here cover the operations whose contract
//! requires the key or an entry to be present.

use thiserror::Error;

/// Represents errors raised by [`GbTree`](super::GbTree) operations.
///
/// # Examples
///
/// ```rust
/// use gbtree::persistent::{GbTree, GbTreeError};
///
/// let tree: GbTree<i32, &str> = GbTree::new();
/// assert_eq!(tree.min(), Err(GbTreeError::EmptyTree));
/// assert_eq!(tree.try_fetch(&1), Err(GbTreeError::KeyNotFound));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GbTreeError {
    /// The requested key is not stored in the tree.
    #[error("key not found in tree")]
    KeyNotFound,

    /// The operation needs at least one entry but the tree is empty.
    #[error("tree is empty")]
    EmptyTree,

    /// Entries handed to an ordered constructor were not strictly increasing
    /// under the tree's comparator.
    #[error("entries are not strictly increasing at position {position}")]
    UnorderedEntries {
        /// Index of the first entry that does not compare greater than its
        /// predecessor.
        position: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(GbTreeError::KeyNotFound, "key not found in tree")]
    #[case(GbTreeError::EmptyTree, "tree is empty")]
    #[case(
        GbTreeError::UnorderedEntries { position: 3 },
        "entries are not strictly increasing at position 3"
    )]
    fn test_error_display(#[case] error: GbTreeError, #[case] expected: &str) {
        assert_eq!(format!("{error}"), expected);
    }

    #[rstest]
    fn test_error_equality() {
        assert_eq!(GbTreeError::EmptyTree, GbTreeError::EmptyTree);
        assert_ne!(GbTreeError::EmptyTree, GbTreeError::KeyNotFound);
        assert_ne!(
            GbTreeError::UnorderedEntries { position: 1 },
            GbTreeError::UnorderedEntries { position: 2 }
        );
    }

    #[rstest]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&GbTreeError::KeyNotFound);
    }
}

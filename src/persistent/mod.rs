//! Persistent (immutable) data structures.
//!
//! This module provides [`GbTree`], a persistent ordered map built on a
//! general balanced tree. It uses structural sharing to minimize copying.
//!
//! # Structural Sharing
//!
//! Every update (`put`, `delete`, `map`, ...) creates a new version of the
//! tree that reuses all subtrees the update did not touch. Old versions stay
//! valid and unchanged.
//!
//! # Examples
//!
//! ```rust
//! use gbtree::persistent::GbTree;
//!
//! let tree = GbTree::new()
//!     .put(3, "three")
//!     .put(1, "one")
//!     .put(2, "two");
//!
//! // Entries are always in sorted order
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! // Structural sharing: the original tree is preserved
//! let updated = tree.put(1, "ONE");
//! assert_eq!(tree.fetch(&1), Some(&"one"));      // Original unchanged
//! assert_eq!(updated.fetch(&1), Some(&"ONE"));   // New version
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod error;
mod gb_tree;

pub use error::GbTreeError;
pub use gb_tree::GbTree;
pub use gb_tree::GbTreeIntoIterator;
pub use gb_tree::GbTreeIterator;
pub use gb_tree::Update;

// =============================================================================
// Tests
// =============================================================================

//! # gbtree
//!
//! A persistent ordered map for Rust built on a general balanced tree.
//!
//! ## Overview
//!
//! [`GbTree`](persistent::GbTree) stores key-value pairs in the order given
//! by a comparator fixed at construction time. Updates return new trees that
//! share every untouched subtree with the old one, so earlier versions stay
//! valid and cheap to keep around.
//!
//! Balance follows Erlang's general balanced trees: no per-node balance data
//! is stored, and a subtree that has grown too tall for its size during an
//! insertion is rebuilt into a perfectly balanced shape.
//!
//! ## Feature Flags
//!
//! - `arc`: Use `Arc` instead of `Rc` so trees can be shared across threads
//! - `serde`: Serialize and deserialize trees as maps
//! - `full`: Enable all optional features except `arc`
//!
//! ## Example
//!
//! ```rust
//! use gbtree::prelude::*;
//!
//! let tree = GbTree::from_pairs([(3, "c"), (1, "a"), (2, "b")]);
//! assert_eq!(tree.to_vec(), vec![(1, "a"), (2, "b"), (3, "c")]);
//! assert_eq!(tree.min(), Ok((&1, &"a")));
//! assert_eq!(GbTree::<i32, &str>::new().max(), Err(GbTreeError::EmptyTree));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the tree, its error type and the comparator vocabulary.
///
/// # Usage
///
/// ```rust
/// use gbtree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
    pub use compare::{Compare, Natural, natural};
}

pub mod persistent;

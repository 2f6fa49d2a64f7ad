//! An in-memory map from unique, totally ordered keys to values, kept as a plain (unbalanced)
//! Binary Search Tree: [`OrderedTree`].
//!
//! ## How keys are arranged
//!
//! Each node holds one key, its value, and up to two children. A node's left subtree only holds
//! smaller keys and its right subtree only larger ones, so a lookup compares against one node per
//! level and turns left or right until it hits the key or runs out of tree. Duplicate keys never
//! get in: [`OrderedTree::insert`] refuses a key that is already present and leaves the stored
//! value alone.
//!
//! Nothing moves nodes around to keep the tree short. Keys that arrive in a shuffled order give a
//! tree about `lg N` levels deep; keys that arrive already sorted give a chain `N` levels deep,
//! and every lookup on it costs `O(N)`. [`OrderedTree::height`] reports which one you got.
//!
//! ## Walking the tree
//!
//! The four classic visit orders are iterators in [`traversal`]. [`OrderedTree::inorder`] is the
//! one that comes out sorted by key; [`OrderedTree::level_order`] goes one depth at a time.
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let tree: OrderedTree<_, _> = [(2, "two"), (1, "one"), (3, "three")].into_iter().collect();
//!
//! assert_eq!(tree.inorder().map(|(k, _)| *k).collect::<Vec<_>>(), [1, 2, 3]);
//! assert_eq!(tree.level_order().map(|(k, _)| *k).collect::<Vec<_>>(), [2, 1, 3]);
//! assert_eq!(tree.height(), 2);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod ordered;
pub mod traversal;

pub use error::{Error, Result};
pub use ordered::OrderedTree;

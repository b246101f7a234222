//! Generation Tree
//!
//! Models the declared key namespace (`key`), the merged generation tree
//! (`node`), the merge algorithm (`builder`), output path derivation
//! (`path`), and traversal of the finished tree (`walker`).

pub mod builder;
pub mod key;
pub mod node;
pub mod path;
pub mod walker;

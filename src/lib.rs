//! Treegen: Declarative Key-Tree to File-Tree Generation
//!
//! Expands a declared hierarchical namespace of string keys into a matching
//! tree of generated text files, each rendered from a template. Multiple
//! independent generation runs are merged into one unified tree before
//! anything is written.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod logging;
pub mod run;
pub mod template;
pub mod tree;
pub mod writer;

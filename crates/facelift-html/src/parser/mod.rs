//! HTML tree construction module.
//!
//! Implements the subset of
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//! that host pages need.

/// Tree builder implementation.
pub mod core;

pub use self::core::{InsertionMode, ParseIssue, TreeBuilder, VOID_ELEMENTS, print_tree};

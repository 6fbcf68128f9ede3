//! HTML tokenizer module.
//!
//! Implements the subset of
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard that host pages need.

/// HTML tokenizer state machine implementation.
pub mod core;
/// Helper methods for state transitions, lookahead, and emission.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HtmlTokenizer, TokenizerState};
pub use token::{Attribute, Token};

//! HTML front end for the facelift page decorator.
//!
//! # Scope
//!
//! This crate implements the subset of HTML processing needed to load a
//! saved host page into a DOM tree, and to write the decorated tree back
//! out as HTML:
//!
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, tag, and attribute states
//!   - DOCTYPE and comment handling
//!   - Raw text for `script` and `style`
//!   - Named (basic set) and numeric character references
//!
//! - **Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Insertion modes: Initial, BeforeHtml, BeforeHead, InHead, AfterHead,
//!     InBody, Text, AfterBody, AfterAfterBody
//!   - Implicit `html`/`head`/`body` synthesis and stack of open elements
//!
//! - **Serializer** ([WHATWG § 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments))
//!
//! # Not Yet Implemented
//!
//! - Script data escape states (`<!--` inside `<script>`)
//! - RCDATA tokenization for `title`/`textarea` (their content is parsed
//!   as ordinary data, so it must not contain a literal `<`)
//! - The full named character reference table
//! - Table parsing modes, templates, foster parenting
//! - Adoption agency algorithm
//!
//! Unsupported constructs are reported once through
//! [`facelift_common::warning::warn_once`] and handled by recovery rather
//! than failure, since a partially styled host page is still useful.

/// Tree construction from the token stream.
pub mod parser;
/// HTML serialization of a DOM tree.
pub mod serializer;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use parser::{InsertionMode, ParseIssue, TreeBuilder, print_tree};
pub use serializer::serialize;
pub use tokenizer::{Attribute, HtmlTokenizer, Token};

use facelift_dom::DomTree;

/// Parse an HTML string into a DOM tree.
///
/// Convenience wrapper running the tokenizer and tree builder back to back.
/// Parse issues are dropped; use [`parse_with_issues`] to inspect them.
#[must_use]
pub fn parse(html: &str) -> DomTree {
    parse_with_issues(html).0
}

/// Parse an HTML string into a DOM tree, returning parse issues alongside.
#[must_use]
pub fn parse_with_issues(html: &str) -> (DomTree, Vec<ParseIssue>) {
    let mut tokenizer = HtmlTokenizer::new(html.to_string());
    tokenizer.run();
    let builder = TreeBuilder::new(tokenizer.into_tokens());
    builder.run_with_issues()
}

//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains the machinery shared by the state handlers:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input cursor management ("Consume the next input character")
//! - Draft-to-token emission
//! - Character reference flushing and lookup
//! - Raw text helpers for `script` and `style`

use facelift_common::warning::warn_once;

use super::core::{HtmlTokenizer, TokenizerState};
use super::token::Token;

/// Elements whose content is tokenized as raw text.
///
/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#raw-text-elements)
/// "Raw text elements: script, style."
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HtmlTokenizer {
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on
    /// the next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// Take the return state set when entering the character reference
    /// states, falling back to Data if none was recorded.
    pub(super) fn take_return_state(&mut self) -> TokenizerState {
        self.return_state.take().unwrap_or(TokenizerState::Data)
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HtmlTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns the character at the current position and advances the
    /// position. Returns None at the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        if let Some(c) = self.input[self.current_pos..].chars().next() {
            self.current_pos += c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    /// Peek at a codepoint at the given offset from the current position
    /// without consuming it.
    #[must_use]
    pub(super) fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// "If the next few characters are..."
    ///
    /// Check if the next few characters match the target string using
    /// ASCII case-insensitive comparison.
    #[must_use]
    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        for (i, target_char) in target.chars().enumerate() {
            match self.peek_codepoint(i) {
                Some(input_char) => {
                    if !input_char.eq_ignore_ascii_case(&target_char) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        // Advance by the number of bytes in the target string.
        // Safe for the ASCII strings used here ("OCTYPE", "-").
        self.current_pos += target.len();
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    ///
    /// NOTE: CR never reaches the tokenizer (normalized during input
    /// preprocessing).
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Emission Helpers
// =============================================================================

impl HtmlTokenizer {
    /// Emit the tag draft as a start or end tag token.
    ///
    /// [§ 13.2.6.3 Generic raw text element parsing](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    ///
    /// NOTE: Per spec, the parser switches the tokenizer state for raw text
    /// elements. Since the tokenizer runs to completion before the tree
    /// builder, raw text elements are detected here instead.
    pub(super) fn emit_tag(&mut self) {
        let token = std::mem::take(&mut self.tag).finish();
        if let Token::StartTag {
            ref name,
            self_closing,
            ..
        } = token
        {
            self.last_start_tag_name = Some(name.clone());
            if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                // "Switch the tokenizer to the RAWTEXT state."
                self.switch_to(TokenizerState::RawText);
            }
        }
        self.token_stream.push(token);
    }

    /// Emit the comment buffer as a comment token.
    pub(super) fn emit_comment(&mut self) {
        let data = std::mem::take(&mut self.comment);
        self.token_stream.push(Token::Comment { data });
    }

    /// Emit the doctype draft as a DOCTYPE token.
    pub(super) fn emit_doctype(&mut self) {
        let token = std::mem::take(&mut self.doctype).finish();
        self.token_stream.push(token);
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.token_stream.push(Token::Character { data: c });
    }

    /// "Emit an end-of-file token." Also marks the stream exhausted, which
    /// terminates the main loop.
    pub(super) fn emit_eof_token(&mut self) {
        self.token_stream.push(Token::EndOfFile);
        self.at_eof = true;
    }
}

// =============================================================================
// Character Reference Helpers
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.5.72](https://html.spec.whatwg.org/multipage/parsing.html#flush-code-points-consumed-as-a-character-reference)
    ///
    /// "Flush code points consumed as a character reference": a reference
    /// inside an attribute value lands in the tag draft, anywhere else it
    /// is emitted as a character token.
    pub(super) fn flush_char(&mut self, c: char) {
        let in_attribute = matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        );
        if in_attribute {
            self.tag.push_attr_value(c);
        } else {
            self.emit_character_token(c);
        }
    }

    /// Flush a whole string through [`Self::flush_char`].
    pub(super) fn flush_str(&mut self, s: &str) {
        for c in s.chars() {
            self.flush_char(c);
        }
    }

    /// Resolve one of the basic named character references.
    ///
    /// [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
    ///
    /// The full table has over two thousand entries; host pages only use
    /// the handful that HTML serializers themselves produce.
    pub(super) fn lookup_named_reference(name: &str) -> Option<char> {
        match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{A0}'),
            _ => None,
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Maps the accumulated character reference code to a character,
    /// substituting U+FFFD for null, surrogates, and out-of-range values.
    pub(super) fn code_point_to_char(code: u32) -> char {
        if code == 0 || code > 0x0010_FFFF {
            return '\u{FFFD}';
        }
        char::from_u32(code).unwrap_or('\u{FFFD}')
    }
}

// =============================================================================
// Raw Text Helpers
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name
    /// matches the tag name of the last start tag to have been emitted from
    /// this tokenizer, if any."
    ///
    /// Determines whether `</style>` closes the current `<style>` element
    /// or is just more raw text.
    pub(super) fn is_appropriate_end_tag(&self) -> bool {
        self.tag.is_end_tag && self.last_start_tag_name.as_deref() == Some(self.tag.name.as_str())
    }

    /// "Anything else" for the RAWTEXT end tag name state: the candidate
    /// was not an end tag for the open element, so replay `</` and the
    /// buffered candidate characters as literal text and drop the draft.
    pub(super) fn abandon_raw_text_end_tag(&mut self) {
        self.emit_character_token('<');
        self.emit_character_token('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        for c in buffer.chars() {
            self.emit_character_token(c);
        }
        self.reconsume_in(TokenizerState::RawText);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// Run when the tokenizer leaves the attribute name state: a completed
    /// name that collides with an earlier attribute on the same tag is a
    /// duplicate-attribute parse error, and the new attribute is dropped.
    pub(super) fn finish_attribute_name(&mut self) {
        if self.tag.current_attribute_is_duplicate() {
            self.log_parse_error();
            self.tag.drop_current_attribute();
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Logs a parse error through the shared warning system. Parse errors
    /// in HTML are not fatal; the tokenizer recovers and continues.
    pub(super) fn log_parse_error(&self) {
        let pos = self.current_pos;
        warn_once("HTML Tokenizer", &format!("parse error at position {pos}"));
    }

    /// Report a construct this tokenizer intentionally does not support.
    pub(super) fn warn_unsupported(message: &str) {
        warn_once("HTML Tokenizer", message);
    }
}

use strum_macros::Display;

use super::token::{DoctypeDraft, TagDraft, Token};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. Each state corresponds to a section in
/// § 13.2.5. States for constructs this front end does not support
/// (script data escaping, CDATA, DOCTYPE identifiers) are not modeled;
/// the handlers that would reach them recover instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    Doctype,
    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    BeforeDoctypeName,
    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    DoctypeName,
    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    ///
    /// Simplified: public/system identifiers are consumed and dropped.
    AfterDoctypeName,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Used for `script` and `style` content.
    RawText,
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    RawTextLessThanSign,
    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    RawTextEndTagOpen,
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    RawTextEndTagName,
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    CharacterReference,
    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// Simplified: only the basic named references are resolved.
    NamedCharacterReference,
    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    ///
    /// Folds the hexadecimal/decimal start, digit, and end states into one.
    NumericCharacterReference,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to
/// tokenize HTML."
///
/// The machine consumes one character per loop iteration and dispatches on
/// the current state. In-flight tags, comments, and doctypes accumulate in
/// draft buffers ([`TagDraft`], [`DoctypeDraft`], a plain `String` for
/// comments) that are converted into [`Token`]s when emitted.
pub struct HtmlTokenizer {
    pub(super) state: TokenizerState,
    pub(super) return_state: Option<TokenizerState>,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) at_eof: bool,
    pub(super) token_stream: Vec<Token>,
    // When true, the next iteration of the main loop will not consume a new
    // character. "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,

    /// Tag currently being assembled. Stale outside the tag states.
    pub(super) tag: TagDraft,
    /// Comment text currently being assembled.
    pub(super) comment: String,
    /// Doctype currently being assembled.
    pub(super) doctype: DoctypeDraft,

    /// Name of the last start tag emitted. Raw text end tags only close
    /// the element they opened ("appropriate end tag" check).
    pub(super) last_start_tag_name: Option<String>,

    /// [§ 13.2.5 temporary buffer](https://html.spec.whatwg.org/multipage/parsing.html#temporary-buffer)
    ///
    /// Holds end-tag candidate characters in raw text states, and the name
    /// or raw digits of an in-flight character reference.
    pub(super) temporary_buffer: String,

    /// [§ 13.2.5.80](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-code)
    /// "character reference code" accumulator for numeric references.
    pub(super) char_ref_code: u32,
    /// Radix of the numeric reference being accumulated (10 or 16).
    pub(super) char_ref_base: u32,
    /// Whether at least one digit has been consumed.
    pub(super) char_ref_had_digits: bool,
}

impl HtmlTokenizer {
    /// Create a tokenizer for the given input, starting in the data state.
    ///
    /// Newlines are normalized up front per
    /// [§ 13.2.3.5](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream):
    /// CRLF collapses to LF and bare CR becomes LF, so no later state has
    /// to consider CR.
    #[must_use]
    pub fn new(input: String) -> Self {
        let input = input.replace("\r\n", "\n").replace('\r', "\n");

        HtmlTokenizer {
            state: TokenizerState::Data,
            return_state: None,
            input,
            current_pos: 0,
            current_input_character: None,
            at_eof: false,
            token_stream: Vec::new(),
            reconsume: false,
            tag: TagDraft::default(),
            comment: String::new(),
            doctype: DoctypeDraft::default(),
            last_start_tag_name: None,
            temporary_buffer: String::new(),
            char_ref_code: 0,
            char_ref_base: 10,
            char_ref_had_digits: false,
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after `run()` to get the tokens for the tree builder.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // `&` opens a character reference that resolves back into data.
            Some('&') => {
                self.return_state = Some(TokenizerState::Data);
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::CharacterReference);
            }
            // `<` opens markup.
            Some('<') => {
                self.switch_to(TokenizerState::TagOpen);
            }
            // NUL is a parse error but still emitted as-is in data.
            Some('\0') => {
                self.log_parse_error();
                self.emit_character_token('\0');
            }
            None => {
                self.emit_eof_token();
            }
            // Everything else is literal text.
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // `<!` — comment, doctype, or (unsupported) CDATA.
            Some('!') => {
                self.switch_to(TokenizerState::MarkupDeclarationOpen);
            }
            // `</` — end tag.
            Some('/') => {
                self.switch_to(TokenizerState::EndTagOpen);
            }
            // A letter begins a start tag name.
            Some(c) if c.is_ascii_alphabetic() => {
                self.tag = TagDraft::start_tag();
                self.reconsume_in(TokenizerState::TagName);
            }
            // `<?` — bogus comment per spec (XML declarations and the
            // like), swallowed up to the next `>`.
            Some('?') => {
                self.log_parse_error();
                self.comment.clear();
                self.reconsume_in(TokenizerState::BogusComment);
            }
            // `<` at end of input is literal text.
            None => {
                self.log_parse_error();
                self.emit_character_token('<');
                self.emit_eof_token();
            }
            // Any other character means the `<` was not markup after all.
            Some(_) => {
                self.log_parse_error();
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            // A letter begins an end tag name.
            Some(c) if c.is_ascii_alphabetic() => {
                self.tag = TagDraft::end_tag();
                self.reconsume_in(TokenizerState::TagName);
            }
            // `</>` is dropped entirely.
            Some('>') => {
                self.log_parse_error();
                self.switch_to(TokenizerState::Data);
            }
            // `</` at end of input is literal text.
            None => {
                self.log_parse_error();
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.emit_eof_token();
            }
            // `</` followed by anything else becomes a bogus comment.
            Some(_) => {
                self.log_parse_error();
                self.comment.clear();
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            // Tag names are ASCII-lowercased as they are read.
            Some(c) if c.is_ascii_uppercase() => {
                self.tag.name.push(c.to_ascii_lowercase());
            }
            Some('\0') => {
                self.log_parse_error();
                self.tag.name.push('\u{FFFD}');
            }
            None => {
                self.log_parse_error();
                self.emit_eof_token();
            }
            Some(c) => {
                self.tag.name.push(c);
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // Tag is ending; let the after-attribute-name state finish it.
            Some('/' | '>') | None => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            // A leading `=` is an error but still starts an attribute
            // whose name begins with `=`.
            Some('=') => {
                self.log_parse_error();
                self.tag.open_attribute();
                self.tag.push_attr_name('=');
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                self.tag.open_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// Leaving this state runs the duplicate-attribute check
    /// ([`Self::finish_attribute_name`]).
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.finish_attribute_name();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') | None => {
                self.finish_attribute_name();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('=') => {
                self.finish_attribute_name();
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            // Attribute names are ASCII-lowercased as they are read.
            Some(c) if c.is_ascii_uppercase() => {
                self.tag.push_attr_name(c.to_ascii_lowercase());
            }
            Some('\0') => {
                self.log_parse_error();
                self.tag.push_attr_name('\u{FFFD}');
            }
            // Quotes and `<` inside a name are errors the spec keeps
            // as name characters.
            Some(c @ ('"' | '\'' | '<')) => {
                self.log_parse_error();
                self.tag.push_attr_name(c);
            }
            Some(c) => {
                self.tag.push_attr_name(c);
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => {
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            None => {
                self.log_parse_error();
                self.emit_eof_token();
            }
            // A bare word after a valueless attribute starts the next one.
            Some(_) => {
                self.tag.open_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => {
                self.switch_to(TokenizerState::AttributeValueDoubleQuoted);
            }
            Some('\'') => {
                self.switch_to(TokenizerState::AttributeValueSingleQuoted);
            }
            // `attr=>` — missing value, the tag just ends.
            Some('>') => {
                self.log_parse_error();
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            _ => {
                self.reconsume_in(TokenizerState::AttributeValueUnquoted);
            }
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    fn handle_attribute_value_double_quoted_state(&mut self) {
        match self.current_input_character {
            Some('"') => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            // Character references resolve inside attribute values.
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValueDoubleQuoted);
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::CharacterReference);
            }
            Some('\0') => {
                self.log_parse_error();
                self.tag.push_attr_value('\u{FFFD}');
            }
            None => {
                self.log_parse_error();
                self.emit_eof_token();
            }
            Some(c) => {
                self.tag.push_attr_value(c);
            }
        }
    }

    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_single_quoted_state(&mut self) {
        match self.current_input_character {
            Some('\'') => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValueSingleQuoted);
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::CharacterReference);
            }
            Some('\0') => {
                self.log_parse_error();
                self.tag.push_attr_value('\u{FFFD}');
            }
            None => {
                self.log_parse_error();
                self.emit_eof_token();
            }
            Some(c) => {
                self.tag.push_attr_value(c);
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            // Whitespace ends the value; `>` ends the whole tag.
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValueUnquoted);
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::CharacterReference);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            Some('\0') => {
                self.log_parse_error();
                self.tag.push_attr_value('\u{FFFD}');
            }
            // Quotes, `<`, `=`, and backtick are errors the spec keeps
            // as value characters.
            Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                self.log_parse_error();
                self.tag.push_attr_value(c);
            }
            None => {
                self.log_parse_error();
                self.emit_eof_token();
            }
            Some(c) => {
                self.tag.push_attr_value(c);
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            None => {
                self.log_parse_error();
                self.emit_eof_token();
            }
            // `a="b"c` — missing whitespace, but `c` still starts a new
            // attribute.
            Some(_) => {
                self.log_parse_error();
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            // The flag lands on the draft; `TagDraft::finish` drops it for
            // end tags.
            Some('>') => {
                self.tag.self_closing = true;
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            None => {
                self.log_parse_error();
                self.emit_eof_token();
            }
            // A stray `/` inside a tag is ignored.
            Some(_) => {
                self.log_parse_error();
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    ///
    /// Swallows malformed markup (`<?…>`, `<!x…>`, `</#…>`) into a comment
    /// token up to the next `>`.
    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_comment();
            }
            None => {
                self.emit_comment();
                self.emit_eof_token();
            }
            Some('\0') => {
                self.log_parse_error();
                self.comment.push('\u{FFFD}');
            }
            Some(c) => {
                self.comment.push(c);
            }
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// The current character is the first one after `<!`.
    fn handle_markup_declaration_open_state(&mut self) {
        match self.current_input_character {
            // `<!--` begins a comment.
            Some('-') if self.peek_codepoint(0) == Some('-') => {
                self.consume_string("-");
                self.comment.clear();
                self.switch_to(TokenizerState::CommentStart);
            }
            // `<!DOCTYPE`, case-insensitively.
            Some(c)
                if c.eq_ignore_ascii_case(&'d')
                    && self.next_few_characters_are_case_insensitive("OCTYPE") =>
            {
                self.consume_string("OCTYPE");
                self.switch_to(TokenizerState::Doctype);
            }
            // Anything else (including CDATA sections, which only occur in
            // foreign content) is a bogus comment.
            _ => {
                self.log_parse_error();
                self.comment.clear();
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentStartDash);
            }
            // `<!-->` — abruptly closed empty comment.
            Some('>') => {
                self.log_parse_error();
                self.switch_to(TokenizerState::Data);
                self.emit_comment();
            }
            _ => {
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
            }
            // `<!--->` — abruptly closed.
            Some('>') => {
                self.log_parse_error();
                self.switch_to(TokenizerState::Data);
                self.emit_comment();
            }
            None => {
                self.log_parse_error();
                self.emit_comment();
                self.emit_eof_token();
            }
            // The dash was comment data after all.
            Some(_) => {
                self.comment.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// The comment less-than-sign states (nested comment detection) are
    /// skipped; `<` is treated as ordinary comment data.
    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentEndDash);
            }
            Some('\0') => {
                self.log_parse_error();
                self.comment.push('\u{FFFD}');
            }
            None => {
                self.log_parse_error();
                self.emit_comment();
                self.emit_eof_token();
            }
            Some(c) => {
                self.comment.push(c);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
            }
            None => {
                self.log_parse_error();
                self.emit_comment();
                self.emit_eof_token();
            }
            // A lone dash inside the comment.
            Some(_) => {
                self.comment.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_comment();
            }
            // `--->` — extra dashes belong to the comment.
            Some('-') => {
                self.comment.push('-');
            }
            None => {
                self.log_parse_error();
                self.emit_comment();
                self.emit_eof_token();
            }
            // `--x` inside a comment: both dashes were data. (The comment
            // end bang state is folded into this branch.)
            Some(_) => {
                self.comment.push('-');
                self.comment.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDoctypeName);
            }
            Some('>') => {
                self.reconsume_in(TokenizerState::BeforeDoctypeName);
            }
            // `<!DOCTYPE` at end of input: emit a quirks doctype.
            None => {
                self.log_parse_error();
                self.doctype = DoctypeDraft::quirks();
                self.emit_doctype();
                self.emit_eof_token();
            }
            // Missing whitespace before the name; recover.
            Some(_) => {
                self.log_parse_error();
                self.reconsume_in(TokenizerState::BeforeDoctypeName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // The doctype name is ASCII-lowercased as it is read.
            Some(c) if c.is_ascii_uppercase() => {
                self.doctype = DoctypeDraft::default();
                self.doctype.push_name(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::DoctypeName);
            }
            Some('\0') => {
                self.log_parse_error();
                self.doctype = DoctypeDraft::default();
                self.doctype.push_name('\u{FFFD}');
                self.switch_to(TokenizerState::DoctypeName);
            }
            // `<!DOCTYPE>` — nameless quirks doctype.
            Some('>') => {
                self.log_parse_error();
                self.doctype = DoctypeDraft::quirks();
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            None => {
                self.log_parse_error();
                self.doctype = DoctypeDraft::quirks();
                self.emit_doctype();
                self.emit_eof_token();
            }
            Some(c) => {
                self.doctype = DoctypeDraft::default();
                self.doctype.push_name(c);
                self.switch_to(TokenizerState::DoctypeName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDoctypeName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            Some(c) if c.is_ascii_uppercase() => {
                self.doctype.push_name(c.to_ascii_lowercase());
            }
            Some('\0') => {
                self.log_parse_error();
                self.doctype.push_name('\u{FFFD}');
            }
            None => {
                self.log_parse_error();
                self.doctype.force_quirks = true;
                self.emit_doctype();
                self.emit_eof_token();
            }
            Some(c) => {
                self.doctype.push_name(c);
            }
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    ///
    /// Simplified: PUBLIC and SYSTEM identifiers are consumed and dropped
    /// rather than stored. Host pages use the plain HTML5 doctype; legacy
    /// doctypes keep their name but lose their identifiers.
    fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            None => {
                self.log_parse_error();
                self.doctype.force_quirks = true;
                self.emit_doctype();
                self.emit_eof_token();
            }
            Some(_) => {
                Self::warn_unsupported("DOCTYPE public/system identifiers are ignored");
            }
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Inside `script` and `style` everything is literal text except a
    /// possible closing tag; no character references, no nested markup.
    fn handle_raw_text_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.switch_to(TokenizerState::RawTextLessThanSign);
            }
            Some('\0') => {
                self.log_parse_error();
                self.emit_character_token('\u{FFFD}');
            }
            None => {
                self.emit_eof_token();
            }
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    fn handle_raw_text_less_than_sign_state(&mut self) {
        match self.current_input_character {
            // `</` might close the raw text element.
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::RawTextEndTagOpen);
            }
            // Any other `<` is just text.
            _ => {
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::RawText);
            }
        }
    }

    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    fn handle_raw_text_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.tag = TagDraft::end_tag();
                self.reconsume_in(TokenizerState::RawTextEndTagName);
            }
            _ => {
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.reconsume_in(TokenizerState::RawText);
            }
        }
    }

    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    ///
    /// The candidate end tag only counts if it matches the element that
    /// opened the raw text run (`</style>` inside `<script>` is text).
    /// Candidate characters accumulate in the temporary buffer so they can
    /// be replayed as text when the candidate fails.
    fn handle_raw_text_end_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                if self.is_appropriate_end_tag() {
                    self.switch_to(TokenizerState::BeforeAttributeName);
                } else {
                    self.abandon_raw_text_end_tag();
                }
            }
            Some('/') => {
                if self.is_appropriate_end_tag() {
                    self.switch_to(TokenizerState::SelfClosingStartTag);
                } else {
                    self.abandon_raw_text_end_tag();
                }
            }
            Some('>') => {
                if self.is_appropriate_end_tag() {
                    self.switch_to(TokenizerState::Data);
                    self.emit_tag();
                } else {
                    self.abandon_raw_text_end_tag();
                }
            }
            Some(c) if c.is_ascii_uppercase() => {
                self.tag.name.push(c.to_ascii_lowercase());
                self.temporary_buffer.push(c);
            }
            Some(c) if c.is_ascii_lowercase() => {
                self.tag.name.push(c);
                self.temporary_buffer.push(c);
            }
            _ => {
                self.abandon_raw_text_end_tag();
            }
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// The `&` has already been consumed; the temporary buffer is empty.
    fn handle_character_reference_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            Some('#') => {
                self.temporary_buffer.push('#');
                self.char_ref_code = 0;
                self.char_ref_base = 10;
                self.char_ref_had_digits = false;
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // A bare `&` is just an ampersand.
            _ => {
                self.flush_str("&");
                let return_state = self.take_return_state();
                self.reconsume_in(return_state);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// Simplified: only the basic named references (`amp`, `lt`, `gt`,
    /// `quot`, `apos`, `nbsp`) resolve; anything else flushes literally.
    fn handle_named_character_reference_state(&mut self) {
        match self.current_input_character {
            // Accumulate the candidate reference name.
            Some(c) if c.is_ascii_alphanumeric() => {
                self.temporary_buffer.push(c);
            }
            // `;` terminates the name.
            Some(';') => {
                if let Some(resolved) = Self::lookup_named_reference(&self.temporary_buffer) {
                    self.flush_char(resolved);
                } else {
                    let name = self.temporary_buffer.clone();
                    Self::warn_unsupported(&format!("unknown character reference '&{name};'"));
                    self.flush_str(&format!("&{name};"));
                }
                let return_state = self.take_return_state();
                self.switch_to(return_state);
            }
            // No trailing semicolon (the ambiguous ampersand case), so
            // nothing resolves.
            _ => {
                let name = self.temporary_buffer.clone();
                self.flush_str(&format!("&{name}"));
                let return_state = self.take_return_state();
                self.reconsume_in(return_state);
            }
        }
    }

    /// [§ 13.2.5.75 - § 13.2.5.80 Numeric character reference states](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    ///
    /// Folds base selection, digit accumulation, and the end state into a
    /// single handler.
    fn handle_numeric_character_reference_state(&mut self) {
        match self.current_input_character {
            // `&#x…` selects hexadecimal; only valid right after the `#`.
            Some(c @ ('x' | 'X')) if !self.char_ref_had_digits && self.char_ref_base == 10 => {
                self.temporary_buffer.push(c);
                self.char_ref_base = 16;
            }
            Some(c) if c.is_digit(self.char_ref_base) => {
                self.temporary_buffer.push(c);
                self.char_ref_had_digits = true;
                // Saturate instead of overflowing; anything above 0x10FFFF
                // resolves to U+FFFD regardless.
                let digit = c.to_digit(self.char_ref_base).unwrap_or(0);
                self.char_ref_code = self
                    .char_ref_code
                    .saturating_mul(self.char_ref_base)
                    .saturating_add(digit);
            }
            Some(';') if self.char_ref_had_digits => {
                let resolved = Self::code_point_to_char(self.char_ref_code);
                self.flush_char(resolved);
                let return_state = self.take_return_state();
                self.switch_to(return_state);
            }
            // Missing semicolon after digits; the reference still
            // resolves.
            _ if self.char_ref_had_digits => {
                self.log_parse_error();
                let resolved = Self::code_point_to_char(self.char_ref_code);
                self.flush_char(resolved);
                let return_state = self.take_return_state();
                self.reconsume_in(return_state);
            }
            // `&#` with no digits at all flushes literally.
            _ => {
                self.log_parse_error();
                let raw = self.temporary_buffer.clone();
                self.flush_str(&format!("&{raw}"));
                let return_state = self.take_return_state();
                self.reconsume_in(return_state);
            }
        }
    }

    /// Run the tokenizer to completion.
    ///
    /// Processes the input and populates the token stream.
    pub fn run(&mut self) {
        loop {
            // Each state begins by consuming the next input character,
            // unless we're reconsuming from a previous state transition.
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            if self.current_input_character.is_none() && self.at_eof {
                break;
            }

            match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::TagOpen => self.handle_tag_open_state(),
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
                TokenizerState::TagName => self.handle_tag_name_state(),
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
                TokenizerState::AttributeName => self.handle_attribute_name_state(),
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
                TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_double_quoted_state();
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_single_quoted_state();
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state();
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state();
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
                TokenizerState::BogusComment => self.handle_bogus_comment_state(),
                TokenizerState::MarkupDeclarationOpen => {
                    self.handle_markup_declaration_open_state();
                }
                TokenizerState::CommentStart => self.handle_comment_start_state(),
                TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
                TokenizerState::Comment => self.handle_comment_state(),
                TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
                TokenizerState::CommentEnd => self.handle_comment_end_state(),
                TokenizerState::Doctype => self.handle_doctype_state(),
                TokenizerState::BeforeDoctypeName => self.handle_before_doctype_name_state(),
                TokenizerState::DoctypeName => self.handle_doctype_name_state(),
                TokenizerState::AfterDoctypeName => self.handle_after_doctype_name_state(),
                TokenizerState::RawText => self.handle_raw_text_state(),
                TokenizerState::RawTextLessThanSign => self.handle_raw_text_less_than_sign_state(),
                TokenizerState::RawTextEndTagOpen => self.handle_raw_text_end_tag_open_state(),
                TokenizerState::RawTextEndTagName => self.handle_raw_text_end_tag_name_state(),
                TokenizerState::CharacterReference => self.handle_character_reference_state(),
                TokenizerState::NamedCharacterReference => {
                    self.handle_named_character_reference_state();
                }
                TokenizerState::NumericCharacterReference => {
                    self.handle_numeric_character_reference_state();
                }
            }
        }
    }
}

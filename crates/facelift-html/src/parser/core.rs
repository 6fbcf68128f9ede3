use strum_macros::Display;

use facelift_common::warning::warn_once;
use facelift_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::{Attribute, Token};

/// Elements that never have contents or an end tag.
///
/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr."
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary
/// operation of the tree construction stage."
///
/// Only the modes a host page reaches are modeled. Tables, templates, and
/// framesets are parsed as generic elements (see [`TreeBuilder`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
}

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// "The error handling for parse errors is well-defined... conforming
/// checkers must report at least one of the parse errors."
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// Description of the parse error per the spec's error definitions.
    pub message: String,
    /// Index into the token stream where this error was encountered.
    pub token_index: usize,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Builds a DOM tree from a stream of tokens.
///
/// Implicit `html`, `head`, and `body` elements are synthesized when the
/// input omits them. Implied end tags, foster parenting, and the adoption
/// agency algorithm are not implemented; table-family elements parse as
/// generic containers, which round-trips well-formed markup intact.
pub struct TreeBuilder {
    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    insertion_mode: InsertionMode,

    /// [§ 13.2.4.2 The original insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    ///
    /// Where to return after leaving the Text mode.
    original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Stores `NodeId`s into the arena.
    stack_of_open_elements: Vec<NodeId>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    head_element_pointer: Option<NodeId>,

    /// DOM tree with parent/sibling pointers.
    /// `NodeId::ROOT` (index 0) is the Document node.
    tree: DomTree,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Current position in token stream.
    token_index: usize,

    /// Whether we've stopped parsing.
    stopped: bool,

    /// Parse issues encountered during tree construction.
    issues: Vec<ParseIssue>,
}

impl TreeBuilder {
    /// Create a new tree builder from a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        // DomTree::new() creates the Document node at NodeId::ROOT
        Self {
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            stack_of_open_elements: Vec::new(),
            head_element_pointer: None,
            tree: DomTree::new(),
            tokens,
            token_index: 0,
            stopped: false,
            issues: Vec::new(),
        }
    }

    /// Run the tree builder and return the DOM tree.
    ///
    /// The returned `DomTree` preserves parent/sibling relationships for
    /// efficient traversal.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Run the tree builder and return both the `DomTree` and any parse
    /// issues.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        while !self.stopped && self.token_index < self.tokens.len() {
            let token = self.tokens[self.token_index].clone();
            self.process_token(&token);
            self.token_index += 1;
        }
        let issues = std::mem::take(&mut self.issues);
        (self.tree, issues)
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    fn process_token(&mut self, token: &Token) {
        match self.insertion_mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
        }
    }

    /// "Reprocess the token" - process the same token again in a new
    /// insertion mode.
    fn reprocess_token(&mut self, token: &Token) {
        self.process_token(token);
    }

    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // Whitespace - "Ignore the token."
            Token::Character { data } if Self::is_whitespace(*data) => {}
            // "A comment token - Insert a comment as the last child of the
            // Document object."
            Token::Comment { data } => {
                let comment_id = self.tree.alloc(NodeType::Comment(data.clone()));
                self.tree.append_child(NodeId::ROOT, comment_id);
            }
            // "A DOCTYPE token - ...Append a DocumentType node to the
            // Document node... Then, switch the insertion mode to
            // 'before html'."
            Token::Doctype { name, force_quirks } => {
                if *force_quirks {
                    self.parse_issue("malformed DOCTYPE");
                }
                let doctype_name = name.clone().unwrap_or_else(|| "html".to_string());
                let doctype_id = self.tree.alloc(NodeType::Doctype(doctype_name));
                self.tree.append_child(NodeId::ROOT, doctype_id);
                self.insertion_mode = InsertionMode::BeforeHtml;
            }
            // "Anything else - ...In any case, switch the insertion mode to
            // 'before html', then reprocess the token."
            _ => {
                self.insertion_mode = InsertionMode::BeforeHtml;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token - Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.parse_issue("unexpected DOCTYPE");
            }
            // "A comment token - Insert a comment as the last child of the
            // Document object."
            Token::Comment { data } => {
                let comment_id = self.tree.alloc(NodeType::Comment(data.clone()));
                self.tree.append_child(NodeId::ROOT, comment_id);
            }
            // Whitespace - "Ignore the token."
            Token::Character { data } if Self::is_whitespace(*data) => {}
            // "A start tag whose tag name is "html" - Create an element for
            // the token... Append it to the Document object. Put this
            // element in the stack of open elements... Switch the insertion
            // mode to 'before head'."
            Token::StartTag {
                name, attributes, ..
            } if name == "html" => {
                let html_id = self.create_element(name, attributes);
                self.tree.append_child(NodeId::ROOT, html_id);
                self.stack_of_open_elements.push(html_id);
                self.insertion_mode = InsertionMode::BeforeHead;
            }
            // "An end tag whose tag name is one of: "head", "body", "html",
            // "br" - Act as described in the "anything else" entry below."
            Token::EndTag { name, .. } if !matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                // "Any other end tag - Parse error. Ignore the token."
                self.parse_issue("unexpected end tag before <html>");
            }
            // "Anything else - Create an html element whose node document is
            // the Document object. Append it to the Document object...
            // Switch the insertion mode to 'before head', then reprocess the
            // token."
            _ => {
                let html_id = self.create_element("html", &[]);
                self.tree.append_child(NodeId::ROOT, html_id);
                self.stack_of_open_elements.push(html_id);
                self.insertion_mode = InsertionMode::BeforeHead;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            // Whitespace - "Ignore the token."
            Token::Character { data } if Self::is_whitespace(*data) => {}
            // "A comment token - Insert a comment."
            Token::Comment { data } => {
                self.insert_comment(data);
            }
            // "A DOCTYPE token - Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.parse_issue("unexpected DOCTYPE");
            }
            // "A start tag whose tag name is "head" - Insert an HTML element
            // for the token. Set the head element pointer... Switch the
            // insertion mode to 'in head'."
            Token::StartTag {
                name, attributes, ..
            } if name == "head" => {
                let head_id = self.insert_element(name, attributes);
                self.head_element_pointer = Some(head_id);
                self.insertion_mode = InsertionMode::InHead;
            }
            // "Any other end tag (not head, body, html, br) - Parse error.
            // Ignore the token."
            Token::EndTag { name, .. } if !matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.parse_issue("unexpected end tag before <head>");
            }
            // "Anything else - Insert an HTML element for a "head" start tag
            // token with no attributes. Set the head element pointer...
            // Switch the insertion mode to 'in head'. Reprocess the current
            // token."
            _ => {
                let head_id = self.insert_element("head", &[]);
                self.head_element_pointer = Some(head_id);
                self.insertion_mode = InsertionMode::InHead;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            // Whitespace - "Insert the character."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }
            // "A comment token - Insert a comment."
            Token::Comment { data } => {
                self.insert_comment(data);
            }
            // "A DOCTYPE token - Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.parse_issue("unexpected DOCTYPE");
            }
            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta" - Insert an HTML element for the
            // token. Immediately pop the current node off the stack of open
            // elements."
            Token::StartTag {
                name, attributes, ..
            } if matches!(name.as_str(), "base" | "basefont" | "bgsound" | "link" | "meta") => {
                let _ = self.insert_element(name, attributes);
                let _ = self.stack_of_open_elements.pop();
            }
            // "A start tag whose tag name is "title" - Follow the generic
            // RCDATA element parsing algorithm."
            // "A start tag whose tag name is one of: "noframes", "style",
            // "script" - Follow the generic raw text element parsing
            // algorithm."
            //
            // Both algorithms insert the element and switch to the Text
            // insertion mode.
            Token::StartTag {
                name, attributes, ..
            } if matches!(name.as_str(), "title" | "style" | "script") => {
                let _ = self.insert_element(name, attributes);
                self.original_insertion_mode = Some(self.insertion_mode);
                self.insertion_mode = InsertionMode::Text;
            }
            // "A start tag whose tag name is "head" - Parse error. Ignore
            // the token."
            Token::StartTag { name, .. } if name == "head" => {
                self.parse_issue("nested <head>");
            }
            // "An end tag whose tag name is "head" - Pop the current node
            // (which will be the head element) off the stack of open
            // elements. Switch the insertion mode to 'after head'."
            Token::EndTag { name, .. } if name == "head" => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::AfterHead;
            }
            // "Any other end tag (not body, html, br) - Parse error. Ignore
            // the token."
            Token::EndTag { name, .. } if !matches!(name.as_str(), "body" | "html" | "br") => {
                self.parse_issue("unexpected end tag in <head>");
            }
            // "Anything else - Pop the current node (which will be the head
            // element) off the stack of open elements. Switch the insertion
            // mode to 'after head'. Reprocess the token."
            _ => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::AfterHead;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    fn handle_after_head_mode(&mut self, token: &Token) {
        match token {
            // Whitespace - "Insert the character."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }
            // "A comment token - Insert a comment."
            Token::Comment { data } => {
                self.insert_comment(data);
            }
            // "A DOCTYPE token - Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.parse_issue("unexpected DOCTYPE");
            }
            // "A start tag whose tag name is "body" - Insert an HTML element
            // for the token... Switch the insertion mode to 'in body'."
            Token::StartTag {
                name, attributes, ..
            } if name == "body" => {
                let _ = self.insert_element(name, attributes);
                self.insertion_mode = InsertionMode::InBody;
            }
            // "A start tag whose tag name is "head" - Parse error. Ignore
            // the token."
            Token::StartTag { name, .. } if name == "head" => {
                self.parse_issue("<head> after </head>");
            }
            // NOTE: Per spec, base/link/meta/title/style/script here are
            // reprocessed into the head element. That shuffle is skipped;
            // the element lands in the synthesized body instead.
            // "Any other end tag (not body, html, br) - Parse error. Ignore
            // the token."
            Token::EndTag { name, .. } if !matches!(name.as_str(), "body" | "html" | "br") => {
                self.parse_issue("unexpected end tag after <head>");
            }
            // "Anything else - Insert an HTML element for a "body" start tag
            // token with no attributes. Switch the insertion mode to
            // 'in body'. Reprocess the current token."
            _ => {
                let _ = self.insert_element("body", &[]);
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL - Parse error. Ignore
            // the token."
            Token::Character { data: '\0' } => {
                self.parse_issue("null character in body");
            }
            // "Any other character token - Insert the token's character."
            Token::Character { data } => {
                self.insert_character(*data);
            }
            // "A comment token - Insert a comment."
            Token::Comment { data } => {
                self.insert_comment(data);
            }
            // "A DOCTYPE token - Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.parse_issue("unexpected DOCTYPE");
            }
            // "A start tag whose tag name is "html" - Parse error."
            // "A start tag whose tag name is "body" - Parse error."
            // (Attribute merging onto the existing elements is skipped.)
            Token::StartTag { name, .. } if matches!(name.as_str(), "html" | "body") => {
                self.parse_issue("unexpected start tag in body");
            }
            // Void elements - "Insert an HTML element for the token.
            // Immediately pop the current node off the stack of open
            // elements. Acknowledge the token's self-closing flag, if it is
            // set."
            Token::StartTag {
                name, attributes, ..
            } if VOID_ELEMENTS.contains(&name.as_str()) => {
                let _ = self.insert_element(name, attributes);
                let _ = self.stack_of_open_elements.pop();
            }
            // Raw text and RCDATA elements - insert and collect their text
            // through the Text insertion mode.
            Token::StartTag {
                name, attributes, ..
            } if matches!(name.as_str(), "script" | "style" | "title" | "textarea") => {
                let _ = self.insert_element(name, attributes);
                self.original_insertion_mode = Some(self.insertion_mode);
                self.insertion_mode = InsertionMode::Text;
            }
            // "Any other start tag - Insert an HTML element for the token."
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                if matches!(name.as_str(), "table" | "template" | "frameset") {
                    warn_once(
                        "HTML Parser",
                        &format!("<{name}> parsed as a generic element"),
                    );
                }
                let _ = self.insert_element(name, attributes);
                if *self_closing {
                    // "Non-void-html-element-start-tag-with-trailing-solidus
                    // parse error": the flag is ignored and the element
                    // stays open.
                    self.parse_issue("self-closing flag on non-void element");
                }
            }
            // "An end tag whose tag name is "body" - Switch the insertion
            // mode to 'after body'."
            Token::EndTag { name, .. } if name == "body" => {
                self.insertion_mode = InsertionMode::AfterBody;
            }
            // "An end tag whose tag name is "html" - Act as if an end tag
            // for body had been seen, then reprocess the token."
            Token::EndTag { name, .. } if name == "html" => {
                self.insertion_mode = InsertionMode::AfterBody;
                self.reprocess_token(token);
            }
            // "Any other end tag - ...if there is a node in the stack of
            // open elements whose tag name matches, pop all nodes from the
            // current node up to and including that node. Otherwise, parse
            // error; ignore the token."
            Token::EndTag { name, .. } => {
                self.close_element(name);
            }
            // "An end-of-file token - Stop parsing."
            Token::EndOfFile => {
                self.stop_parsing();
            }
        }
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    fn handle_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token - Insert the token's character."
            Token::Character { data } => {
                self.insert_character(*data);
            }
            // "An end-of-file token - Parse error... Pop the current node
            // off the stack of open elements. Switch the insertion mode to
            // the original insertion mode and reprocess the token."
            Token::EndOfFile => {
                self.parse_issue("unexpected end of file in raw text element");
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = self.take_original_insertion_mode();
                self.reprocess_token(token);
            }
            // "Any other end tag - Pop the current node off the stack of
            // open elements. Switch the insertion mode to the original
            // insertion mode."
            Token::EndTag { .. } => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = self.take_original_insertion_mode();
            }
            // Markup inside title/textarea content is not reconstructed.
            _ => {
                self.parse_issue("markup inside text element ignored");
            }
        }
    }

    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            // Whitespace - "Process the token using the rules for the
            // 'in body' insertion mode."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }
            // "A comment token - Insert a comment as the last child of the
            // first element in the stack of open elements (the html
            // element)."
            Token::Comment { data } => {
                let html_id = self
                    .stack_of_open_elements
                    .first()
                    .copied()
                    .unwrap_or(NodeId::ROOT);
                let comment_id = self.tree.alloc(NodeType::Comment(data.clone()));
                self.tree.append_child(html_id, comment_id);
            }
            // "A DOCTYPE token - Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.parse_issue("unexpected DOCTYPE");
            }
            // "An end tag whose tag name is "html" - Switch the insertion
            // mode to 'after after body'."
            Token::EndTag { name, .. } if name == "html" => {
                self.insertion_mode = InsertionMode::AfterAfterBody;
            }
            // "An end-of-file token - Stop parsing."
            Token::EndOfFile => {
                self.stop_parsing();
            }
            // "Anything else - Parse error. Switch the insertion mode to
            // 'in body' and reprocess the token."
            _ => {
                self.parse_issue("content after </body>");
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            // "A comment token - Insert a comment as the last child of the
            // Document object."
            Token::Comment { data } => {
                let comment_id = self.tree.alloc(NodeType::Comment(data.clone()));
                self.tree.append_child(NodeId::ROOT, comment_id);
            }
            // Whitespace - "Process the token using the rules for the
            // 'in body' insertion mode."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }
            // "An end-of-file token - Stop parsing."
            Token::EndOfFile => {
                self.stop_parsing();
            }
            // "Anything else - Parse error. Switch the insertion mode to
            // 'in body' and reprocess the token."
            _ => {
                self.parse_issue("content after </html>");
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }

    // =========================================================================
    // Creating and inserting nodes
    // =========================================================================

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open
    /// elements."
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    /// Convert token attributes to the `AttributesMap` used by
    /// `ElementData`. Duplicates were already dropped by the tokenizer.
    fn attributes_to_map(attributes: &[Attribute]) -> AttributesMap {
        attributes
            .iter()
            .map(|attr| (attr.name.clone(), attr.value.clone()))
            .collect()
    }

    /// [§ 13.2.6.1 Create an element for the token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// Creates a detached element node in the DOM arena.
    /// NOTE: Simplified; the full algorithm handles namespaces and custom
    /// elements.
    fn create_element(&mut self, tag_name: &str, attributes: &[Attribute]) -> NodeId {
        self.tree.alloc(NodeType::Element(ElementData {
            tag_name: tag_name.to_string(),
            attrs: Self::attributes_to_map(attributes),
        }))
    }

    /// [§ 13.2.6.1 Insert a foreign element](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// "Insert an HTML element for a token": create the element, append it
    /// at the current insertion point, and push it onto the stack of open
    /// elements.
    fn insert_element(&mut self, tag_name: &str, attributes: &[Attribute]) -> NodeId {
        let parent_id = self.current_node();
        let element_id = self.create_element(tag_name, attributes);
        self.tree.append_child(parent_id, element_id);
        self.stack_of_open_elements.push(element_id);
        element_id
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data. Otherwise,
    /// create a new Text node..."
    fn insert_character(&mut self, c: char) {
        let parent_id = self.current_node();

        let last_child = self.tree.children(parent_id).last().copied();
        if let Some(text_node_id) = last_child
            && let Some(node) = self.tree.get_mut(text_node_id)
            && let NodeType::Text(ref mut data) = node.node_type
        {
            data.push(c);
            return;
        }

        let text_id = self.tree.alloc(NodeType::Text(String::from(c)));
        self.tree.append_child(parent_id, text_id);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    fn insert_comment(&mut self, data: &str) {
        let parent_id = self.current_node();
        let comment_id = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.tree.append_child(parent_id, comment_id);
    }

    /// "Any other end tag" handling for the in body mode.
    ///
    /// Pops the stack of open elements up to and including the first
    /// element matching `tag_name`, recording an issue for every element
    /// closed implicitly on the way.
    fn close_element(&mut self, tag_name: &str) {
        let position = self
            .stack_of_open_elements
            .iter()
            .rposition(|&id| self.tag_name_of(id) == Some(tag_name));

        let Some(position) = position else {
            self.parse_issue(&format!("end tag </{tag_name}> matches no open element"));
            return;
        };

        if position + 1 < self.stack_of_open_elements.len() {
            self.parse_issue(&format!("unclosed elements before </{tag_name}>"));
        }
        self.stack_of_open_elements.truncate(position);
    }

    /// Tag name of a node on the stack of open elements.
    fn tag_name_of(&self, id: NodeId) -> Option<&str> {
        self.tree.as_element(id).map(|data| data.tag_name.as_str())
    }

    /// [§ 13.2.6.4.8](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    ///
    /// Take the original insertion mode recorded when entering Text mode.
    /// Falls back to `InBody`, which can only happen on a tree builder bug.
    fn take_original_insertion_mode(&mut self) -> InsertionMode {
        self.original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InBody)
    }

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#the-end)
    ///
    /// "Once the user agent stops parsing the document..."
    fn stop_parsing(&mut self) {
        self.stopped = true;
    }

    /// [§ 13.2.4.1 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    const fn is_whitespace(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
    }

    /// Record a parse issue and surface it through the shared warning
    /// system.
    fn parse_issue(&mut self, message: &str) {
        warn_once("HTML Parser", message);
        self.issues.push(ParseIssue {
            message: message.to_string(),
            token_index: self.token_index,
        });
    }
}

/// Print a DOM tree for debugging, one node per line.
///
/// Attributes are listed in sorted order so the dump is deterministic,
/// matching the serializer's output order.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(indent);

    match &node.node_type {
        NodeType::Document => println!("{prefix}#document"),
        NodeType::Doctype(name) => println!("{prefix}<!DOCTYPE {name}>"),
        NodeType::Element(data) => {
            let mut line = format!("{prefix}<{}", data.tag_name);
            let mut attrs: Vec<(&String, &String)> = data.attrs.iter().collect();
            attrs.sort_by_key(|&(name, _)| name);
            for (name, value) in attrs {
                if value.is_empty() {
                    line.push_str(&format!(" {name}"));
                } else {
                    line.push_str(&format!(" {name}=\"{value}\""));
                }
            }
            line.push('>');
            println!("{line}");
        }
        NodeType::Text(data) => {
            println!("{prefix}{data:?}");
        }
        NodeType::Comment(data) => println!("{prefix}<!--{data}-->"),
    }

    for &child_id in tree.children(id) {
        print_tree(tree, child_id, indent + 1);
    }
}

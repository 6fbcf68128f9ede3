use core::fmt;

/// A name/value pair on a tag token.
///
/// [§ 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// tag tokens carry "a list of attributes, each of which has a name and a
/// value".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, lowercased during tokenization.
    pub name: String,
    /// Attribute value, with character references already resolved.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the
/// following tokens: DOCTYPE, start tag, end tag, comment, character,
/// end-of-file."
///
/// Tokens are immutable once emitted. The tokenizer assembles tags and
/// doctypes in draft buffers ([`TagDraft`], [`DoctypeDraft`]) and converts
/// each draft into its token at emission time. DOCTYPE public and system
/// identifiers are not represented (see the crate docs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<!DOCTYPE …>`. The name is `None` when the input omitted it.
    Doctype {
        /// Doctype name, normally `"html"`.
        name: Option<String>,
        /// Quirks flag, set on malformed doctypes.
        force_quirks: bool,
    },

    /// An opening tag.
    StartTag {
        /// Tag name, lowercased.
        name: String,
        /// Whether the tag ended in `/>`.
        self_closing: bool,
        /// Attributes in source order, duplicates already dropped.
        attributes: Vec<Attribute>,
    },

    /// A closing tag. Attributes on end tags are a parse error, but the
    /// spec still tokenizes them; they are carried here and ignored by
    /// the tree builder.
    EndTag {
        /// Tag name, lowercased.
        name: String,
        /// Attributes in source order.
        attributes: Vec<Attribute>,
    },

    /// `<!-- … -->`, plus the bogus-comment recovery forms.
    Comment {
        /// Comment text between the markers.
        data: String,
    },

    /// One character of ordinary text.
    Character {
        /// The character.
        data: char,
    },

    /// End of the input stream.
    EndOfFile,
}

impl Token {
    /// Returns true if this is the end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }
}

/// A tag token under construction.
///
/// The state machine pushes name characters and attribute pieces into the
/// draft as it consumes input; [`TagDraft::finish`] turns the draft into
/// the emitted [`Token`].
///
/// The attribute being read is held apart from the committed list until
/// the next attribute opens (or the tag ends). That separation matters
/// for duplicate recovery: once a duplicate is dropped, the remainder of
/// its value still has to be consumed, and it must not bleed into the
/// earlier attribute of the same name.
#[derive(Debug, Default)]
pub struct TagDraft {
    /// True for `</…>` drafts.
    pub is_end_tag: bool,
    /// Tag name accumulated so far.
    pub name: String,
    /// Whether the tag ended in `/>`.
    pub self_closing: bool,
    /// Completed attributes, in source order.
    attributes: Vec<Attribute>,
    /// The attribute currently being read, if any. `None` after a
    /// duplicate was dropped; pushes then go nowhere.
    current_attr: Option<Attribute>,
}

impl TagDraft {
    /// Fresh draft for a start tag.
    #[must_use]
    pub fn start_tag() -> Self {
        Self::default()
    }

    /// Fresh draft for an end tag.
    #[must_use]
    pub fn end_tag() -> Self {
        Self {
            is_end_tag: true,
            ..Self::default()
        }
    }

    /// Open a new, empty attribute. Subsequent name and value pushes land
    /// on it; the previously open attribute (if any) is committed.
    pub fn open_attribute(&mut self) {
        self.commit_attribute();
        self.current_attr = Some(Attribute::new(String::new(), String::new()));
    }

    /// Append a character to the name of the attribute currently open.
    pub fn push_attr_name(&mut self, c: char) {
        if let Some(attr) = &mut self.current_attr {
            attr.name.push(c);
        }
    }

    /// Append a character to the value of the attribute currently open.
    pub fn push_attr_value(&mut self, c: char) {
        if let Some(attr) = &mut self.current_attr {
            attr.value.push(c);
        }
    }

    /// [§ 13.2.5.33](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "If there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    #[must_use]
    pub fn current_attribute_is_duplicate(&self) -> bool {
        let Some(current) = &self.current_attr else {
            return false;
        };
        self.attributes.iter().any(|attr| attr.name == current.name)
    }

    /// Drop the attribute currently open (duplicate recovery). Its value,
    /// still to be consumed by the tokenizer, is discarded as it arrives.
    pub fn drop_current_attribute(&mut self) {
        self.current_attr = None;
    }

    /// Move the open attribute onto the committed list.
    fn commit_attribute(&mut self) {
        if let Some(attr) = self.current_attr.take() {
            self.attributes.push(attr);
        }
    }

    /// Convert the draft into the token to emit. The self-closing flag is
    /// only meaningful on start tags; on end tags it is dropped, matching
    /// the spec's "acknowledge and ignore" handling.
    #[must_use]
    pub fn finish(mut self) -> Token {
        self.commit_attribute();
        if self.is_end_tag {
            Token::EndTag {
                name: self.name,
                attributes: self.attributes,
            }
        } else {
            Token::StartTag {
                name: self.name,
                self_closing: self.self_closing,
                attributes: self.attributes,
            }
        }
    }
}

/// A DOCTYPE token under construction.
///
/// Per [§ 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization),
/// a missing name is distinct from an empty one, hence the `Option`.
#[derive(Debug, Default)]
pub struct DoctypeDraft {
    /// Doctype name; `None` until the first name character arrives.
    pub name: Option<String>,
    /// Quirks flag.
    pub force_quirks: bool,
}

impl DoctypeDraft {
    /// Fresh draft with the force-quirks flag already on, for the error
    /// paths that synthesize a quirks doctype.
    #[must_use]
    pub fn quirks() -> Self {
        Self {
            name: None,
            force_quirks: true,
        }
    }

    /// Append a character to the doctype name, creating it if missing.
    pub fn push_name(&mut self, c: char) {
        self.name.get_or_insert_default().push(c);
    }

    /// Convert the draft into the token to emit.
    #[must_use]
    pub fn finish(self) -> Token {
        Token::Doctype {
            name: self.name,
            force_quirks: self.force_quirks,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { name, force_quirks } => {
                let name = name.as_deref().unwrap_or("(missing)");
                if *force_quirks {
                    write!(f, "DOCTYPE {name} (quirks)")
                } else {
                    write!(f, "DOCTYPE {name}")
                }
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}={:?}", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, "/")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, .. } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data } => write!(f, "char {data:?}"),
            Self::EndOfFile => write!(f, "end of file"),
        }
    }
}

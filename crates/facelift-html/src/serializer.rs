//! HTML serialization of a DOM tree.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! The decorator rewrites whole host pages, so the inverse of parsing is
//! needed: walk the arena in tree order and emit markup. Raw text elements
//! (`script`, `style`) are emitted verbatim; everything else is escaped.

use facelift_dom::{DomTree, NodeId, NodeType};

use crate::parser::VOID_ELEMENTS;
use crate::tokenizer::helpers::RAW_TEXT_ELEMENTS;

/// Serialize a whole document, starting at the Document node.
///
/// [§ 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
/// "The algorithm serializes the children of the node being serialized."
#[must_use]
pub fn serialize(tree: &DomTree) -> String {
    let mut out = String::new();
    for &child in tree.children(tree.root()) {
        serialize_node(tree, child, &mut out);
    }
    out
}

/// Serialize a single node and its descendants into `out`.
fn serialize_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };

    match &node.node_type {
        // The Document node itself never nests; serialize children only.
        NodeType::Document => {
            for &child in tree.children(id) {
                serialize_node(tree, child, out);
            }
        }
        // "If current node is a DocumentType, append the literal string
        // "<!DOCTYPE", followed by a space, followed by the value of
        // current node's name... followed by ">"."
        NodeType::Doctype(name) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        // "If current node is an element... append a "<" followed by the
        // element's tag name... For each attribute, append a space, the
        // attribute's serialized name, "=", a """, the attribute's value,
        // escaped... and a second """."
        NodeType::Element(data) => {
            out.push('<');
            out.push_str(&data.tag_name);

            // Sort for deterministic output; attribute order in HTML
            // carries no meaning.
            let mut attrs: Vec<(&String, &String)> = data.attrs.iter().collect();
            attrs.sort_by_key(|&(name, _)| name);
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attribute_value(value));
                out.push('"');
            }
            out.push('>');

            // "If current node's local name is area, base, basefont,
            // bgsound, br, col, embed, frame, hr, img, input, link, meta,
            // param, source, track or wbr, then continue."
            if VOID_ELEMENTS.contains(&data.tag_name.as_str()) {
                return;
            }

            let raw_text = RAW_TEXT_ELEMENTS.contains(&data.tag_name.as_str());
            for &child in tree.children(id) {
                if raw_text {
                    // "If the parent of current node is a style, script...
                    // element, then append the value of current node's data
                    // literally."
                    if let Some(text) = tree.as_text(child) {
                        out.push_str(text);
                        continue;
                    }
                }
                serialize_node(tree, child, out);
            }

            out.push_str("</");
            out.push_str(&data.tag_name);
            out.push('>');
        }
        // "Otherwise, append the value of current node's data, escaped."
        NodeType::Text(data) => {
            out.push_str(&escape_text(data));
        }
        // "If current node is a Comment, append "<!--", followed by the
        // value of current node's data, followed by "-->"."
        NodeType::Comment(data) => {
            out.push_str("<!--");
            out.push_str(data);
            out.push_str("-->");
        }
    }
}

/// [§ 13.3.2 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// Text mode: "Replace any occurrence of the "&" character by the string
/// "&amp;", any occurrence of the U+00A0 NO-BREAK SPACE character by
/// "&nbsp;"... any occurrences of the "<" character by "&lt;", and any
/// occurrences of the ">" character by "&gt;"."
fn escape_text(data: &str) -> String {
    let mut escaped = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\u{A0}' => escaped.push_str("&nbsp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// [§ 13.3.2 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// Attribute mode: "...any occurrences of the """ character by the string
/// "&quot;"."
fn escape_attribute_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\u{A0}' => escaped.push_str("&nbsp;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

//! Integration tests for the HTML serializer.

use facelift_dom::{DomTree, NodeId};
use facelift_html::{parse, serialize};

/// Helper to build a small tree by hand.
fn single_element_tree(tag: &str) -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let id = tree.alloc_element(tag);
    tree.append_child(NodeId::ROOT, id);
    (tree, id)
}

// ========== round trips ==========

#[test]
fn test_round_trip_minimal_document() {
    let html = "<!DOCTYPE html><html><head></head><body><p>Hi</p></body></html>";
    assert_eq!(serialize(&parse(html)), html);
}

#[test]
fn test_round_trip_preserves_comments() {
    let html = "<html><head></head><body><!-- marker --></body></html>";
    assert_eq!(serialize(&parse(html)), html);
}

#[test]
fn test_round_trip_script_is_verbatim() {
    let html = "<html><head><script>if (a < b && c) { run(); }</script></head><body></body></html>";
    assert_eq!(serialize(&parse(html)), html);
}

#[test]
fn test_round_trip_style_is_verbatim() {
    let html = "<html><head><style>.tabs > .tab-nav { gap: 0; }</style></head><body></body></html>";
    assert_eq!(serialize(&parse(html)), html);
}

#[test]
fn test_parse_synthesizes_then_serializes_skeleton() {
    // Bare text gains the implied html/head/body shell on the way through
    assert_eq!(
        serialize(&parse("Hello")),
        "<html><head></head><body>Hello</body></html>"
    );
}

// ========== escaping ==========

#[test]
fn test_text_is_escaped() {
    let (mut tree, p) = single_element_tree("p");
    let text = tree.alloc_text("a < b & c > d");
    tree.append_child(p, text);

    assert_eq!(serialize(&tree), "<p>a &lt; b &amp; c &gt; d</p>");
}

#[test]
fn test_attribute_value_is_escaped() {
    let (mut tree, div) = single_element_tree("div");
    tree.as_element_mut(div)
        .unwrap()
        .set_attribute("title", r#"say "hi" & go"#);

    assert_eq!(
        serialize(&tree),
        r#"<div title="say &quot;hi&quot; &amp; go"></div>"#
    );
}

#[test]
fn test_escaped_text_round_trips() {
    let html = "<html><head></head><body><p>1 &lt; 2 &amp; 3 &gt; 2</p></body></html>";
    assert_eq!(serialize(&parse(html)), html);
}

// ========== structure ==========

#[test]
fn test_void_element_has_no_end_tag() {
    let html = r#"<html><head></head><body><img src="a.png"></body></html>"#;
    assert_eq!(serialize(&parse(html)), html);
}

#[test]
fn test_attributes_are_sorted_for_determinism() {
    let (mut tree, div) = single_element_tree("div");
    tree.as_element_mut(div).unwrap().set_attribute("id", "x");
    tree.as_element_mut(div)
        .unwrap()
        .set_attribute("class", "tabs");

    // "class" sorts before "id" regardless of insertion order
    assert_eq!(serialize(&tree), r#"<div class="tabs" id="x"></div>"#);
}

#[test]
fn test_doctype_survives_round_trip() {
    let html = "<!DOCTYPE html><html><head></head><body></body></html>";
    let serialized = serialize(&parse(html));
    assert!(serialized.starts_with("<!DOCTYPE html>"));
}

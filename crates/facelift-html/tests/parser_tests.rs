//! Integration tests for the HTML tree builder.

use facelift_dom::{DomTree, Node, NodeId, NodeType};
use facelift_html::{HtmlTokenizer, TreeBuilder, parse, parse_with_issues};

/// Helper to parse HTML through the tokenizer and tree builder explicitly.
fn parse_explicit(html: &str) -> DomTree {
    let mut tokenizer = HtmlTokenizer::new(html.to_string());
    tokenizer.run();
    let builder = TreeBuilder::new(tokenizer.into_tokens());
    builder.run()
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if let Some(data) = tree.as_element(from)
        && data.tag_name == tag
    {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

/// Helper to get a node reference
fn get_node(tree: &DomTree, id: NodeId) -> &Node {
    tree.get(id).expect("Node not found")
}

#[test]
fn test_document_structure() {
    let tree = parse("<!DOCTYPE html><html><head></head><body></body></html>");

    // Root should be Document
    let root = get_node(&tree, NodeId::ROOT);
    assert!(matches!(root.node_type, NodeType::Document));

    // First child should be the doctype
    let first = tree.first_child(NodeId::ROOT).unwrap();
    assert!(matches!(
        &get_node(&tree, first).node_type,
        NodeType::Doctype(name) if name == "html"
    ));

    // Document should have html child with head and body
    let html_id = find_element(&tree, NodeId::ROOT, "html").unwrap();
    assert!(find_element(&tree, html_id, "head").is_some());
    assert!(find_element(&tree, html_id, "body").is_some());
    assert_eq!(tree.document_element(), Some(html_id));
}

#[test]
fn test_implicit_elements_are_synthesized() {
    // No html, head, or body tags in the input at all
    let tree = parse("Hello");

    let html_id = find_element(&tree, NodeId::ROOT, "html").unwrap();
    let head_id = find_element(&tree, html_id, "head").unwrap();
    let body_id = find_element(&tree, html_id, "body").unwrap();

    assert_eq!(tree.children(head_id).len(), 0);
    assert_eq!(tree.text_content(body_id), "Hello");
}

#[test]
fn test_text_node() {
    let tree = parse("<html><body>Hello World</body></html>");
    let body_id = find_element(&tree, NodeId::ROOT, "body").unwrap();

    assert_eq!(tree.text_content(body_id), "Hello World");
}

#[test]
fn test_adjacent_characters_coalesce() {
    let tree = parse("<html><body>abc</body></html>");
    let body_id = find_element(&tree, NodeId::ROOT, "body").unwrap();

    // One text node, not three
    assert_eq!(tree.children(body_id).len(), 1);
}

#[test]
fn test_comment_node() {
    let tree = parse("<html><body><!-- test comment --></body></html>");
    let body_id = find_element(&tree, NodeId::ROOT, "body").unwrap();

    let has_comment = tree.children(body_id).iter().any(|&child_id| {
        matches!(
            &get_node(&tree, child_id).node_type,
            NodeType::Comment(data) if data == " test comment "
        )
    });
    assert!(has_comment);
}

#[test]
fn test_nested_elements() {
    let tree = parse("<html><body><div><p>Text</p></div></body></html>");

    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    let p_id = find_element(&tree, div_id, "p").unwrap();
    assert_eq!(tree.text_content(p_id), "Text");
    assert_eq!(tree.parent(p_id), Some(div_id));
}

#[test]
fn test_attributes_are_preserved() {
    let tree = parse(r#"<html><body><div id="chat-tab" class="tabs"></div></body></html>"#);

    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    let data = tree.as_element(div_id).unwrap();
    assert_eq!(data.id(), Some("chat-tab"));
    assert_eq!(data.attribute("class"), Some("tabs"));
    assert_eq!(tree.get_element_by_id("chat-tab"), Some(div_id));
}

#[test]
fn test_void_element_has_no_children() {
    let tree = parse(r#"<html><body><img src="a.png">after</body></html>"#);

    let img_id = find_element(&tree, NodeId::ROOT, "img").unwrap();
    assert_eq!(tree.children(img_id).len(), 0);

    // "after" is a sibling of the img, not a child
    let body_id = find_element(&tree, NodeId::ROOT, "body").unwrap();
    assert_eq!(tree.text_content(body_id), "after");
    assert_eq!(tree.next_sibling(img_id).map(|id| tree.as_text(id).is_some()), Some(true));
}

#[test]
fn test_script_content_becomes_single_text_node() {
    let tree = parse("<html><head><script>let a = 1 < 2;</script></head></html>");

    let script_id = find_element(&tree, NodeId::ROOT, "script").unwrap();
    assert_eq!(tree.children(script_id).len(), 1);
    assert_eq!(tree.text_content(script_id), "let a = 1 < 2;");

    // The script element stays inside head
    let head_id = find_element(&tree, NodeId::ROOT, "head").unwrap();
    assert_eq!(tree.parent(script_id), Some(head_id));
}

#[test]
fn test_title_text_stays_in_head() {
    let tree = parse("<html><head><title>MS Hackathon 2024 Demo App</title></head></html>");

    let title_id = find_element(&tree, NodeId::ROOT, "title").unwrap();
    assert_eq!(tree.text_content(title_id), "MS Hackathon 2024 Demo App");

    let head_id = find_element(&tree, NodeId::ROOT, "head").unwrap();
    assert_eq!(tree.parent(title_id), Some(head_id));
}

#[test]
fn test_style_in_head() {
    let tree = parse("<html><head><style>body { margin: 0 }</style></head><body></body></html>");

    let style_id = find_element(&tree, NodeId::ROOT, "style").unwrap();
    assert_eq!(tree.text_content(style_id), "body { margin: 0 }");
}

#[test]
fn test_mismatched_end_tag_is_reported() {
    let (tree, issues) = parse_with_issues("<html><body><div>x</span></div></body></html>");

    // The stray </span> is ignored; the div still closes
    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(tree.text_content(div_id), "x");
    assert!(
        issues
            .iter()
            .any(|i| i.message.contains("matches no open element"))
    );
}

#[test]
fn test_unclosed_elements_are_closed_by_ancestor_end_tag() {
    let tree = parse("<html><body><div><span>x</div></body></html>");

    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    let span_id = find_element(&tree, div_id, "span").unwrap();
    assert_eq!(tree.parent(span_id), Some(div_id));

    // The </div> closed the span too; body is the open element afterwards
    let body_id = find_element(&tree, NodeId::ROOT, "body").unwrap();
    assert_eq!(tree.parent(div_id), Some(body_id));
}

#[test]
fn test_explicit_pipeline_matches_parse_helper() {
    let html = r#"<html><body><div id="a"></div></body></html>"#;
    let via_helper = parse(html);
    let explicit = parse_explicit(html);

    assert_eq!(via_helper.len(), explicit.len());
    assert_eq!(
        via_helper.get_element_by_id("a").is_some(),
        explicit.get_element_by_id("a").is_some()
    );
}

#[test]
fn test_deeply_nested_structure() {
    // The shape of the Gradio host page around the chat tab
    let tree = parse(concat!(
        r#"<html><body>"#,
        r#"<div class="app"><div class="column"><div class="tabs">"#,
        r#"<div class="tab-nav"></div>"#,
        r#"<div id="chat-tab"></div>"#,
        r#"</div></div></div>"#,
        r#"</body></html>"#,
    ));

    let anchor = tree.get_element_by_id("chat-tab").unwrap();
    let container = tree.parent(anchor).unwrap();
    assert_eq!(tree.as_element(container).unwrap().attribute("class"), Some("tabs"));

    let chain: Vec<Option<&str>> = tree
        .ancestors(anchor)
        .map(|id| tree.as_element(id).map(|e| e.tag_name.as_str()))
        .collect();
    // tabs div, column div, app div, body, html, then the document
    assert_eq!(chain.len(), 6);
    assert_eq!(chain[4], Some("html"));
    assert_eq!(chain[5], None);
}

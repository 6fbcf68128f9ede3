//! Tests for the page decorator against fixture pages shaped like the
//! generated chat interface.

use facelift_decor::{
    ANCHOR_ID, BANNER_STYLE, BANNER_TAG, BANNER_TEXT, CONTAINER_STYLE, DecorateError, ElementRole,
    HEADER_BAR_CLASS, LAYOUT_STYLE, PAGE_STYLE, decorate,
};
use facelift_dom::{DomTree, NodeId};
use facelift_html::{parse, serialize};

/// A minimal page with the chat tab nested the way the host app nests it:
/// page ("app") > layout ("column") > container ("tabs") > anchor, with the
/// tab strip as the container's first element child.
fn fixture_page() -> DomTree {
    parse(concat!(
        r#"<html><head></head><body>"#,
        r#"<div class="app"><div class="column"><div class="tabs">"#,
        r#"<div class="tab-nav"></div>"#,
        r#"<div id="chat-tab"></div>"#,
        r#"</div></div></div>"#,
        r#"</body></html>"#,
    ))
}

/// Children of `parent` whose text content equals the banner label.
fn banner_children(tree: &DomTree, parent: NodeId) -> Vec<NodeId> {
    tree.children(parent)
        .iter()
        .copied()
        .filter(|&id| tree.text_content(id) == BANNER_TEXT)
        .collect()
}

// ========== full decoration ==========

#[test]
fn test_decorate_applies_all_mutations() {
    let mut tree = fixture_page();
    let decoration = decorate(&mut tree).unwrap();

    // The tab strip gained the header-bar class and kept its own
    let header_bar = tree.as_element(decoration.chain.header_bar).unwrap();
    assert!(header_bar.has_class(HEADER_BAR_CLASS));
    assert!(header_bar.has_class("tab-nav"));

    // The three style attributes equal the fixed declarations exactly
    let container = tree.as_element(decoration.chain.container).unwrap();
    assert_eq!(container.style(), Some(CONTAINER_STYLE));
    let layout = tree.as_element(decoration.chain.layout).unwrap();
    assert_eq!(layout.style(), Some(LAYOUT_STYLE));
    let page = tree.as_element(decoration.chain.page).unwrap();
    assert_eq!(page.style(), Some(PAGE_STYLE));

    // Exactly one banner, appended as the container's last child
    let banners = banner_children(&tree, decoration.chain.container);
    assert_eq!(banners, vec![decoration.banner]);
    assert_eq!(tree.last_child(decoration.chain.container), Some(decoration.banner));

    let banner = tree.as_element(decoration.banner).unwrap();
    assert_eq!(banner.tag_name, BANNER_TAG);
    assert_eq!(banner.style(), Some(BANNER_STYLE));
    assert_eq!(tree.text_content(decoration.banner), BANNER_TEXT);
}

#[test]
fn test_decorate_resolves_the_expected_chain() {
    let mut tree = fixture_page();
    let decoration = decorate(&mut tree).unwrap();
    let chain = decoration.chain;

    assert_eq!(tree.get_element_by_id(ANCHOR_ID), Some(chain.anchor));
    assert_eq!(tree.parent(chain.anchor), Some(chain.container));
    assert_eq!(tree.parent(chain.container), Some(chain.layout));
    assert_eq!(tree.parent(chain.layout), Some(chain.page));
    assert_eq!(tree.first_element_child(chain.container), Some(chain.header_bar));
}

#[test]
fn test_decorated_page_serializes_with_banner() {
    let mut tree = fixture_page();
    let _ = decorate(&mut tree).unwrap();

    let html = serialize(&tree);
    assert!(html.contains(r#"class="tab-nav header-bar""#));
    assert!(html.contains(r#"<div class="tabs" style="padding: 0; margin: 0">"#));
    assert!(html.contains(r#"style="gap: 0""#));
    assert!(
        html.contains(r#"<p style="position: fixed; top: 10px; right: 10px;">MS Global Hackathon 2024 Demo App</p>"#)
    );
}

// ========== style overwrite semantics ==========

#[test]
fn test_existing_inline_styles_are_discarded() {
    let mut tree = fixture_page();
    let container = tree.parent(tree.get_element_by_id(ANCHOR_ID).unwrap()).unwrap();
    tree.as_element_mut(container)
        .unwrap()
        .set_style("padding: 24px; background: white");

    let _ = decorate(&mut tree).unwrap();

    // Full overwrite, not a merge: the background declaration is gone
    assert_eq!(
        tree.as_element(container).unwrap().style(),
        Some(CONTAINER_STYLE)
    );
}

// ========== repeated invocation ==========

#[test]
fn test_decorating_twice_appends_two_banners() {
    let mut tree = fixture_page();
    let first = decorate(&mut tree).unwrap();
    let second = decorate(&mut tree).unwrap();

    // Current behavior: each invocation appends a fresh banner
    let banners = banner_children(&tree, first.chain.container);
    assert_eq!(banners, vec![first.banner, second.banner]);

    // The class addition, by contrast, is idempotent
    let header_bar = tree.as_element(first.chain.header_bar).unwrap();
    assert_eq!(
        header_bar
            .classes()
            .iter()
            .filter(|&&c| c == HEADER_BAR_CLASS)
            .count(),
        1
    );
}

#[test]
fn test_host_can_remove_the_banner() {
    let mut tree = fixture_page();
    let decoration = decorate(&mut tree).unwrap();

    tree.remove_child(decoration.chain.container, decoration.banner);

    assert!(banner_children(&tree, decoration.chain.container).is_empty());
}

// ========== missing structure ==========

#[test]
fn test_missing_anchor_leaves_tree_untouched() {
    let mut tree = parse("<html><head></head><body><div class=\"app\"></div></body></html>");
    let before = serialize(&tree);

    let err = decorate(&mut tree).unwrap_err();

    assert_eq!(err, DecorateError::MissingElement(ElementRole::Anchor));
    assert_eq!(serialize(&tree), before);
}

#[test]
fn test_anchor_without_element_parent_is_missing_container() {
    // Anchor hanging directly off the document node
    let mut tree = DomTree::new();
    let anchor = tree.alloc_element("div");
    tree.as_element_mut(anchor).unwrap().set_attribute("id", ANCHOR_ID);
    tree.append_child(NodeId::ROOT, anchor);
    let node_count = tree.len();

    let err = decorate(&mut tree).unwrap_err();

    assert_eq!(err, DecorateError::MissingElement(ElementRole::Container));
    // Zero mutations: no nodes created, no attributes written
    assert_eq!(tree.len(), node_count);
    assert_eq!(tree.as_element(anchor).unwrap().style(), None);
}

#[test]
fn test_tree_shallower_than_assumed_names_the_missing_ancestor() {
    // container exists, but it hangs directly off the document node
    let mut tree = DomTree::new();
    let container = tree.alloc_element("div");
    tree.append_child(NodeId::ROOT, container);
    let anchor = tree.alloc_element("div");
    tree.as_element_mut(anchor).unwrap().set_attribute("id", ANCHOR_ID);
    tree.append_child(container, anchor);

    let err = decorate(&mut tree).unwrap_err();

    assert_eq!(err, DecorateError::MissingElement(ElementRole::Layout));
    assert_eq!(tree.as_element(container).unwrap().style(), None);
}

#[test]
fn test_anchor_alone_in_container_doubles_as_header_bar() {
    // With no siblings, the anchor is the container's first element child
    // and receives the header-bar class itself.
    let mut tree = DomTree::new();
    let page = tree.alloc_element("div");
    tree.append_child(NodeId::ROOT, page);
    let layout = tree.alloc_element("div");
    tree.append_child(page, layout);
    let container = tree.alloc_element("div");
    tree.append_child(layout, container);
    let anchor = tree.alloc_element("div");
    tree.as_element_mut(anchor).unwrap().set_attribute("id", ANCHOR_ID);
    tree.append_child(container, anchor);

    let decoration = decorate(&mut tree).unwrap();

    assert_eq!(decoration.chain.header_bar, anchor);
    assert!(tree.as_element(anchor).unwrap().has_class(HEADER_BAR_CLASS));
}

#[test]
fn test_error_message_names_the_role() {
    let mut tree = parse("<html><head></head><body></body></html>");
    let err = decorate(&mut tree).unwrap_err();

    assert_eq!(
        err.to_string(),
        "missing element: anchor element #chat-tab not found in document"
    );
}

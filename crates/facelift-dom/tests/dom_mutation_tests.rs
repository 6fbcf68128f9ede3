//! Tests for DOM tree mutation and lookup: append_child, insert_before,
//! remove_child, class-set edits, and id resolution.

use facelift_dom::{DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag)))
}

/// Helper to create an element with an id attribute.
fn alloc_element_with_id(tree: &mut DomTree, tag: &str, id: &str) -> NodeId {
    let node = alloc_element(tree, tag);
    tree.as_element_mut(node).unwrap().set_attribute("id", id);
    node
}

// ========== append_child ==========

#[test]
fn test_append_child_sets_links() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    tree.append_child(parent, a);
    tree.append_child(parent, b);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.parent(a), Some(parent));
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.first_child(parent), Some(a));
    assert_eq!(tree.last_child(parent), Some(b));
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    assert_eq!(tree.children(parent).len(), 1);

    tree.remove_child(parent, child);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, b);

    // a and c are siblings now
    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_last_of_three() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, c);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.next_sibling(b), None);
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let existing = alloc_element(&mut tree, "b");
    tree.append_child(parent, existing);

    let new_child = alloc_element(&mut tree, "a");
    tree.insert_before(parent, new_child, existing);

    // new_child should be first, existing second
    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

// ========== class-set edits ==========

#[test]
fn test_add_class_to_element_without_class_attribute() {
    let mut tree = DomTree::new();
    let node = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, node);

    tree.as_element_mut(node).unwrap().add_class("header-bar");

    let element = tree.as_element(node).unwrap();
    assert_eq!(element.attribute("class"), Some("header-bar"));
    assert!(element.has_class("header-bar"));
}

#[test]
fn test_add_class_preserves_existing_tokens() {
    let mut tree = DomTree::new();
    let node = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, node);

    tree.as_element_mut(node)
        .unwrap()
        .set_attribute("class", "tabs svelte-1a2b3c");
    tree.as_element_mut(node).unwrap().add_class("header-bar");

    let element = tree.as_element(node).unwrap();
    assert_eq!(element.classes(), vec!["tabs", "svelte-1a2b3c", "header-bar"]);
}

#[test]
fn test_add_class_twice_is_a_noop() {
    let mut tree = DomTree::new();
    let node = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, node);

    tree.as_element_mut(node).unwrap().add_class("header-bar");
    tree.as_element_mut(node).unwrap().add_class("header-bar");

    let element = tree.as_element(node).unwrap();
    assert_eq!(element.attribute("class"), Some("header-bar"));
}

#[test]
fn test_set_attribute_overwrites_entire_value() {
    let mut tree = DomTree::new();
    let node = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, node);

    tree.as_element_mut(node)
        .unwrap()
        .set_attribute("style", "color: red; padding: 4px");
    tree.as_element_mut(node)
        .unwrap()
        .set_attribute("style", "padding: 0; margin: 0");

    // Full replacement, not a merge
    assert_eq!(
        tree.as_element(node).unwrap().attribute("style"),
        Some("padding: 0; margin: 0")
    );
}

// ========== getElementById ==========

#[test]
fn test_get_element_by_id_finds_first_in_tree_order() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let body = alloc_element(&mut tree, "body");
    tree.append_child(html, body);

    let first = alloc_element_with_id(&mut tree, "div", "target");
    let second = alloc_element_with_id(&mut tree, "span", "target");
    tree.append_child(body, first);
    tree.append_child(body, second);

    assert_eq!(tree.get_element_by_id("target"), Some(first));
}

#[test]
fn test_get_element_by_id_missing() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);

    assert_eq!(tree.get_element_by_id("nope"), None);
}

#[test]
fn test_get_element_by_id_empty_string_is_none() {
    let mut tree = DomTree::new();
    let node = alloc_element_with_id(&mut tree, "div", "");
    tree.append_child(NodeId::ROOT, node);

    // "If elementId is the empty string, return null."
    assert_eq!(tree.get_element_by_id(""), None);
}

// ========== first_element_child / text_content ==========

#[test]
fn test_first_element_child_skips_text_nodes() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let text = tree.alloc_text("  \n  ");
    tree.append_child(parent, text);
    let element = alloc_element(&mut tree, "span");
    tree.append_child(parent, element);

    assert_eq!(tree.first_child(parent), Some(text));
    assert_eq!(tree.first_element_child(parent), Some(element));
}

#[test]
fn test_text_content_concatenates_descendants() {
    let mut tree = DomTree::new();
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p);

    let hello = tree.alloc_text("Hello ");
    tree.append_child(p, hello);
    let em = alloc_element(&mut tree, "em");
    tree.append_child(p, em);
    let world = tree.alloc_text("World");
    tree.append_child(em, world);

    assert_eq!(tree.text_content(p), "Hello World");
}

// ========== tree order ==========

#[test]
fn test_iter_all_is_document_order() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let head = alloc_element(&mut tree, "head");
    let body = alloc_element(&mut tree, "body");
    tree.append_child(html, head);
    tree.append_child(html, body);
    let div = alloc_element(&mut tree, "div");
    tree.append_child(body, div);

    let order: Vec<NodeId> = tree.iter_all().collect();
    assert_eq!(order, vec![NodeId::ROOT, html, head, body, div]);
}

#[test]
fn test_ancestors_walks_to_root() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let body = alloc_element(&mut tree, "body");
    tree.append_child(html, body);
    let div = alloc_element(&mut tree, "div");
    tree.append_child(body, div);

    let chain: Vec<NodeId> = tree.ancestors(div).collect();
    assert_eq!(chain, vec![body, html, NodeId::ROOT]);
    assert!(tree.is_descendant_of(div, NodeId::ROOT));
    assert!(!tree.is_descendant_of(html, div));
}

//! DOM tree implementation for the facelift page decorator.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. The decorator mutates a host-owned page through this
//! tree: it looks elements up by id, walks ancestor chains, rewrites
//! `class` and `style` attributes, and appends new elements.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the DOM tree.
///
/// Node handles are plain arena indices, so they are `Copy` and can be
/// held across mutations of other nodes. A `NodeId` is only meaningful
/// for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// One node of the document tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// Every tree relationship (parent, ordered children, both siblings) is
/// stored as an id, so each direction of traversal is one index lookup.
/// The sibling links are redundant with the child lists and are kept in
/// step by the mutation methods on [`DomTree`].
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub node_type: NodeType,
    /// Parent node, `None` for the document node and detached nodes.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Sibling immediately after this node under the same parent.
    pub next_sibling: Option<NodeId>,
    /// Sibling immediately before this node under the same parent.
    pub prev_sibling: Option<NodeId>,
}

/// The node kinds a decorated page can contain.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// Processing instructions and CDATA sections never occur in the pages
/// this tree is built from and are not represented.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    /// The document itself, always at [`NodeId::ROOT`].
    Document,
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    /// "DocumentType nodes are simply known as doctypes."
    ///
    /// Stores the doctype name (normally `"html"`). Host pages are rewritten
    /// whole, so the doctype has to survive a load/serialize round trip.
    Doctype(String),
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    /// "Comment nodes are known as comments."
    Comment(String),
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "Elements have an associated namespace, namespace prefix, local name..."
/// "An element has an associated attribute list."
///
/// NOTE: Only the local name and attribute list are stored. Namespaces and
/// custom elements are out of scope for decorating HTML pages.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with the given tag name and no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attrs: AttributesMap::new(),
        }
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Returns the value of an attribute if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value entirely.
    ///
    /// [§ 4.9 setAttribute](https://dom.spec.whatwg.org/#dom-element-setattribute)
    /// "Sets the value of element's first attribute whose qualified name is
    /// qualifiedName to value."
    ///
    /// This is a full overwrite. When the attribute is `style`, any inline
    /// declarations the page previously carried are discarded.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let _ = self.attrs.insert(name.to_string(), value.to_string());
    }

    /// Returns the element's inline style declaration if present.
    ///
    /// [§ 8.2 The style attribute](https://html.spec.whatwg.org/multipage/dom.html#the-style-attribute)
    #[must_use]
    pub fn style(&self) -> Option<&str> {
        self.attribute("style")
    }

    /// Replace the element's entire inline style declaration.
    ///
    /// This mirrors assigning to an element's `style` attribute wholesale:
    /// declarations the element previously carried are discarded, not
    /// merged.
    pub fn set_style(&mut self, css: &str) {
        self.set_attribute("style", css);
    }

    /// Returns the list of class names from the class attribute, in order.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens."
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        match self.attrs.get("class") {
            Some(classlist) => classlist.split_ascii_whitespace().collect(),
            None => Vec::new(),
        }
    }

    /// Returns true if the class attribute contains the given token.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// Add a class token to the class attribute.
    ///
    /// [§ 7.1 DOMTokenList add](https://dom.spec.whatwg.org/#dom-domtokenlist-add)
    /// "For each token in tokens, append token to this's token set."
    ///
    /// Token sets have set semantics: adding a token that is already present
    /// is a no-op, and pre-existing tokens keep their order.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        match self.attrs.get_mut("class") {
            Some(existing) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(class);
            }
            Some(existing) => existing.push_str(class),
            None => {
                let _ = self.attrs.insert("class".to_string(), class.to_string());
            }
        }
    }
}

/// Arena-based DOM tree.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// Every node lives in one vector and is addressed by [`NodeId`], so
/// handles stay valid while other parts of the tree are mutated; nothing
/// borrows across an edit. Nodes are never deallocated individually:
/// [`Self::remove_child`] detaches a node from the tree but keeps its slot,
/// which keeps every outstanding id stable for the life of the tree.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        DomTree {
            nodes: vec![document],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Allocate a detached element node with the given tag name.
    ///
    /// [§ 4.5 createElement](https://dom.spec.whatwg.org/#dom-document-createelement)
    /// "Creates an element with the given local name."
    pub fn alloc_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(tag_name)))
    }

    /// Allocate a detached text node with the given data.
    ///
    /// [§ 4.5 createTextNode](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    /// "Creates a Text node with the given data."
    pub fn alloc_text(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Text(data.to_string()))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`, wiring the parent
    /// pointer and the sibling link to the previous last child.
    ///
    /// # Panics
    ///
    /// Panics if `parent` or `child` is not a node in this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// [§ 4.2.1 Insert](https://dom.spec.whatwg.org/#concept-node-insert)
    ///
    /// "To insert a node into a parent before a child..."
    ///
    /// Inserts `new_child` into `parent`'s children immediately before
    /// `reference`, updating all sibling links.
    ///
    /// # Panics
    ///
    /// Panics if any id is not a node in this tree, or if `reference` is not
    /// a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, new_child: NodeId, reference: NodeId) {
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference)
            .expect("reference is not a child of parent");

        self.nodes[parent.0].children.insert(position, new_child);
        self.nodes[new_child.0].parent = Some(parent);

        let before = self.nodes[reference.0].prev_sibling;
        self.nodes[new_child.0].prev_sibling = before;
        self.nodes[new_child.0].next_sibling = Some(reference);
        self.nodes[reference.0].prev_sibling = Some(new_child);
        if let Some(before_id) = before {
            self.nodes[before_id.0].next_sibling = Some(new_child);
        }
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// "To remove a node, with an optional suppress observers flag..."
    ///
    /// Detaches `child` from `parent`. The node itself stays allocated in
    /// the arena but no longer participates in the tree; the host uses this
    /// to take decorator-created elements back out.
    ///
    /// # Panics
    ///
    /// Panics if either id is not a node in this tree, or if `child` is not
    /// a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == child)
            .expect("child is not a child of parent");
        let _ = self.nodes[parent.0].children.remove(position);

        let before = self.nodes[child.0].prev_sibling;
        let after = self.nodes[child.0].next_sibling;
        if let Some(before_id) = before {
            self.nodes[before_id.0].next_sibling = after;
        }
        if let Some(after_id) = after {
            self.nodes[after_id.0].prev_sibling = before;
        }

        self.nodes[child.0].parent = None;
        self.nodes[child.0].prev_sibling = None;
        self.nodes[child.0].next_sibling = None;
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// [§ 4.2.6 firstElementChild](https://dom.spec.whatwg.org/#dom-parentnode-firstelementchild)
    ///
    /// "The firstElementChild getter steps are to return the first child
    /// that is an element; otherwise null."
    #[must_use]
    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .iter()
            .find(|&&child| self.as_element(child).is_some())
            .copied()
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Whether `ancestor` appears on `descendant`'s parent chain.
    ///
    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over every node in tree order (depth-first, children in
    /// document order), starting at the document node.
    ///
    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-order)
    /// "In tree order is preorder, depth-first traversal of a tree."
    #[must_use]
    pub fn iter_all(&self) -> TreeOrderIterator<'_> {
        TreeOrderIterator {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "Returns the descendant text content of this."
    ///
    /// Concatenates the data of every descendant text node in tree order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        self.collect_text(id, &mut result);
        result
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.as_text(id) {
            out.push_str(text);
            return;
        }
        for &child in self.children(id) {
            self.collect_text(child, out);
        }
    }

    /// [§ 5.1 getElementById](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
    ///
    /// "Returns the first element within node's descendants whose ID is
    /// elementId."
    ///
    /// STEP 1: "If elementId is the empty string, return null."
    /// STEP 2: "Return the first element in tree order within node's
    ///          descendants whose ID is elementId; otherwise, return null."
    #[must_use]
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        if element_id.is_empty() {
            return None;
        }
        self.iter_all()
            .find(|&id| self.as_element(id).and_then(ElementData::id) == Some(element_id))
    }

    /// The element whose parent is the document itself; for HTML pages,
    /// the `<html>` element.
    ///
    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// The first `body` (or `frameset`) child of the document element.
    ///
    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;

        self.children(html)
            .iter()
            .find(|&&id| {
                self.as_element(id).is_some_and(|e| {
                    let tag = e.tag_name.to_ascii_lowercase();
                    tag == "body" || tag == "frameset"
                })
            })
            .copied()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over every node of a tree in tree order.
pub struct TreeOrderIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for TreeOrderIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Children pushed in reverse so the first child is visited next.
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

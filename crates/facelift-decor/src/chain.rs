//! Anchor-chain resolution.
//!
//! The decorator relies on a fixed nesting depth around the anchor:
//! anchor → container → layout → page, plus the container's first element
//! child. That reliance is an explicit precondition here: the whole chain
//! is resolved before any mutation, and the first missing link fails with
//! its role name.

use facelift_dom::{DomTree, NodeId};

use crate::ANCHOR_ID;
use crate::error::{DecorateError, ElementRole};

/// The resolved elements the decorator operates on.
///
/// All five ids are guaranteed to refer to element nodes in the tree the
/// chain was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorChain {
    /// The element with id [`ANCHOR_ID`].
    pub anchor: NodeId,
    /// The anchor's parent.
    pub container: NodeId,
    /// The container's parent.
    pub layout: NodeId,
    /// The container's grandparent.
    pub page: NodeId,
    /// The container's first element child.
    pub header_bar: NodeId,
}

impl AnchorChain {
    /// Resolve the chain against a document tree.
    ///
    /// Lookups run in the order the decorator touches them: anchor,
    /// container, header bar, then the two outer ancestors. Nothing is
    /// mutated.
    ///
    /// # Errors
    ///
    /// Returns [`DecorateError::MissingElement`] for the first link that
    /// is absent or is not an element (a parent chain that runs into the
    /// document node counts as absent).
    pub fn resolve(tree: &DomTree) -> Result<Self, DecorateError> {
        let anchor = tree
            .get_element_by_id(ANCHOR_ID)
            .ok_or(DecorateError::MissingElement(ElementRole::Anchor))?;

        let container = Self::parent_element(tree, anchor, ElementRole::Container)?;
        let header_bar = tree
            .first_element_child(container)
            .ok_or(DecorateError::MissingElement(ElementRole::HeaderBar))?;
        let layout = Self::parent_element(tree, container, ElementRole::Layout)?;
        let page = Self::parent_element(tree, layout, ElementRole::Page)?;

        Ok(Self {
            anchor,
            container,
            layout,
            page,
            header_bar,
        })
    }

    /// Parent of `id` if that parent is an element node.
    fn parent_element(
        tree: &DomTree,
        id: NodeId,
        role: ElementRole,
    ) -> Result<NodeId, DecorateError> {
        tree.parent(id)
            .filter(|&parent| tree.as_element(parent).is_some())
            .ok_or(DecorateError::MissingElement(role))
    }
}

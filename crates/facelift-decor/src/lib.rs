//! Page decorator for the hackathon chat page.
//!
//! The chat interface ships as a generated page with a tab widget whose
//! chat pane carries `id="chat-tab"`. This crate applies the demo-day
//! cosmetics to that page's DOM tree:
//!
//! 1. tags the tab strip (the first element in the chat tab's container)
//!    with the `header-bar` class,
//! 2. zeroes the padding, margin, and layout gap on the container and its
//!    two enclosing elements by overwriting their inline styles, and
//! 3. appends a fixed-position `<p>` banner naming the demo app.
//!
//! The tree is an injected handle ([`facelift_dom::DomTree`]), never
//! ambient state, so tests run against fixture trees.
//!
//! # Repeated invocation
//!
//! The class addition has set semantics and is idempotent. The style
//! overwrites discard whatever inline styles the elements carried, and
//! every invocation appends a fresh banner, so decorating twice leaves two
//! banners. Removing a banner is the host's job
//! ([`facelift_dom::DomTree::remove_child`]).

/// Anchor-chain resolution.
pub mod chain;
/// Decoration error types.
pub mod error;

pub use chain::AnchorChain;
pub use error::{DecorateError, ElementRole};

use facelift_dom::{DomTree, ElementData, NodeId, NodeType};

/// Id of the element the decorator anchors on: the chat tab pane.
pub const ANCHOR_ID: &str = "chat-tab";

/// Class added to the first element in the container (the tab strip).
pub const HEADER_BAR_CLASS: &str = "header-bar";

/// Inline style written to the container.
pub const CONTAINER_STYLE: &str = "padding: 0; margin: 0";

/// Inline style written to the container's parent.
pub const LAYOUT_STYLE: &str = "gap: 0";

/// Inline style written to the container's grandparent.
pub const PAGE_STYLE: &str = "padding: 0";

/// Tag name of the banner element.
pub const BANNER_TAG: &str = "p";

/// Text content of the banner element.
pub const BANNER_TEXT: &str = "MS Global Hackathon 2024 Demo App";

/// Inline style of the banner element.
pub const BANNER_STYLE: &str = "position: fixed; top: 10px; right: 10px;";

/// The elements touched by a successful decoration.
///
/// `banner` is the freshly created element; the rest are the resolved
/// [`AnchorChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    /// The resolved anchor chain.
    pub chain: AnchorChain,
    /// The banner element appended to the container.
    pub banner: NodeId,
}

/// Decorate the page.
///
/// Resolves the full [`AnchorChain`] up front, then applies the mutations
/// in order: header-bar class, container style, layout style, page style,
/// banner append. Because resolution happens first, a failed invocation
/// leaves the tree untouched.
///
/// # Errors
///
/// Returns [`DecorateError::MissingElement`] naming the first element of
/// the chain that could not be resolved.
pub fn decorate(tree: &mut DomTree) -> Result<Decoration, DecorateError> {
    let chain = AnchorChain::resolve(tree)?;

    element_mut(tree, chain.header_bar, ElementRole::HeaderBar)?.add_class(HEADER_BAR_CLASS);
    element_mut(tree, chain.container, ElementRole::Container)?.set_style(CONTAINER_STYLE);
    element_mut(tree, chain.layout, ElementRole::Layout)?.set_style(LAYOUT_STYLE);
    element_mut(tree, chain.page, ElementRole::Page)?.set_style(PAGE_STYLE);

    let banner = create_banner(tree);
    tree.append_child(chain.container, banner);

    Ok(Decoration { chain, banner })
}

/// Create the detached banner element with its text child and fixed
/// positioning.
fn create_banner(tree: &mut DomTree) -> NodeId {
    let mut data = ElementData::new(BANNER_TAG);
    data.set_style(BANNER_STYLE);
    let banner = tree.alloc(NodeType::Element(data));
    let text = tree.alloc_text(BANNER_TEXT);
    tree.append_child(banner, text);
    banner
}

/// Mutable element access that reports a missing role instead of
/// panicking. The chain resolution already proved these are elements, so
/// this only fires if the tree was mutated behind our back.
fn element_mut(
    tree: &mut DomTree,
    id: NodeId,
    role: ElementRole,
) -> Result<&mut ElementData, DecorateError> {
    tree.as_element_mut(id)
        .ok_or(DecorateError::MissingElement(role))
}

//! Decoration error types.

use strum_macros::Display;
use thiserror::Error;

/// The role an element plays in the decoration, used to name exactly which
/// lookup failed.
///
/// The page structure the decorator relies on is a fixed ancestor chain
/// around the anchor; each link has a name so a failure reads as "the page
/// does not have the expected shape" rather than as an anonymous lookup
/// miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ElementRole {
    /// The element with the fixed anchor id.
    #[strum(serialize = "anchor element #chat-tab")]
    Anchor,
    /// The anchor's parent, primary target of the restyling.
    #[strum(serialize = "container (anchor parent)")]
    Container,
    /// The container's parent, whose layout gap is zeroed.
    #[strum(serialize = "layout element (anchor grandparent)")]
    Layout,
    /// The container's grandparent, whose padding is zeroed.
    #[strum(serialize = "page element (anchor great-grandparent)")]
    Page,
    /// The first element in the container, which receives the header-bar
    /// class.
    #[strum(serialize = "header bar (first element in container)")]
    HeaderBar,
}

/// Error raised when the page does not contain the expected structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecorateError {
    /// A required element was absent: either the anchor itself, one of its
    /// fixed ancestors, or the container's first element child.
    #[error("missing element: {0} not found in document")]
    MissingElement(ElementRole),
}

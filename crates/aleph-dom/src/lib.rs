//! Aleph DOM - Document Object Model
//!
//! Memory-efficient arena DOM tree with mutation observation. Unlike a
//! rendering engine's DOM, this tree exists to be *queried and restyled*
//! while a host keeps mutating it: every structural or textual change is
//! routed to registered observers as a mutation record, and style/attribute
//! writes are no-ops (emitting nothing) when the value is unchanged.

mod document;
mod node;
mod observer;
mod selector;
mod style;
mod tree;

pub use document::Document;
pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use observer::{
    MutationObserver, MutationRecord, MutationType, ObserverId, ObserverOptions,
};
pub use selector::{AttrMatcher, AttrOp, CompoundSelector, SelectorError, SelectorList};
pub use style::InlineStyle;
pub use tree::{Children, DomTree};

/// Node identifier (index into the arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node" (absent parent/sibling/child links)
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Root node ID (the document node, always index 0)
    pub const ROOT: NodeId = NodeId(0);

    /// Check whether this ID refers to a node at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node not found")]
    NotFound,
    #[error("hierarchy request error")]
    HierarchyRequest,
    #[error("node is not a text node")]
    NotText,
}

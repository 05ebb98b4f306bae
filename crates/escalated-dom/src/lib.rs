//! Escalated DOM
//!
//! Arena-backed node tree used by the sanitizer pipeline.
//! Nodes live in a single `Vec` and link to each other by index, so a whole
//! tree is dropped in one pass no matter how deeply it nests.

mod node;
mod tree;

pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Synthetic document/fragment root
    pub const ROOT: NodeId = NodeId(0);

    /// Absent link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id refers to a node (not `NONE`)
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tree manipulation error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomError {
    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error("Cannot move {child:?} under {parent:?}: it would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("{reference:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, reference: NodeId },

    #[error("The root node cannot be moved or detached")]
    RootImmovable,
}

//! Error types for tree construction.
//!
//! Rendering itself never fails; every structural problem surfaces when a
//! component is materialized into a [`Document`](crate::Document) or when a
//! node is attached.

use crate::tree::{Kind, NodeId};

/// A component violates the contract of its kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidNodeError {
    /// A required property is absent (e.g. `href` on an anchor).
    #[error("{kind} node is missing required property `{property}`")]
    MissingProperty {
        /// Kind of the offending node.
        kind: Kind,
        /// Name of the missing property.
        property: &'static str,
    },

    /// A leaf kind was given children.
    #[error("{kind} node cannot have children (got {count})")]
    UnexpectedChildren {
        /// Kind of the offending node.
        kind: Kind,
        /// Number of children supplied.
        count: usize,
    },

    /// An anchor must wrap exactly one display value.
    #[error("anchor node must wrap exactly one display value (got {count})")]
    DisplayValue {
        /// Number of children supplied.
        count: usize,
    },

    /// Heading level outside 1..=6.
    #[error("heading level must be between 1 and 6 (got {0})")]
    HeadingLevel(u8),
}

/// A node cannot be attached where it was asked to go.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AttachmentError {
    /// The id does not belong to this document.
    #[error("node {0} does not belong to this document")]
    UnknownNode(NodeId),

    /// The node already has a parent.
    #[error("node {0} is already attached")]
    AlreadyAttached(NodeId),

    /// The target cannot own children.
    #[error("{kind} node {container} cannot own children")]
    NotAContainer {
        /// Target node.
        container: NodeId,
        /// Kind of the target node.
        kind: Kind,
    },

    /// The target anchor already wraps its display value.
    #[error("anchor node {0} already wraps a display value")]
    DisplayValueTaken(NodeId),

    /// The target is the node itself or one of its descendants.
    #[error("attaching node {child} under {container} would create a cycle")]
    Cycle {
        /// Node being attached.
        child: NodeId,
        /// Requested container.
        container: NodeId,
    },
}

/// Any tree construction error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidNode(#[from] InvalidNodeError),

    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}

/// Result alias for tree construction.
pub type Result<T, E = Error> = std::result::Result<T, E>;

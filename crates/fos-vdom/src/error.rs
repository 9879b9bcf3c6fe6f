//! Virtual DOM errors
//!
//! Redundant mutations (foreign parent, no-op moves, duplicate listeners)
//! are not errors; they return `Ok(())`. Only requests that cannot be
//! honoured at all end up here.

use crate::{DocumentId, NodeId};

/// Result type for virtual DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// Virtual DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    #[error("Node {0} is destroyed")]
    Destroyed(NodeId),

    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Hierarchy request error: cannot insert {node} into {parent}")]
    HierarchyRequest { parent: NodeId, node: NodeId },

    #[error("Node {node} is not a child of {parent}")]
    NotAChild { parent: NodeId, node: NodeId },

    #[error("Unknown document: {0}")]
    UnknownDocument(DocumentId),

    #[error("Document {0} already has a body")]
    BodyExists(DocumentId),
}

//! Document error types

use crate::tree::NodeId;
use thiserror::Error;

/// Structural document errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    /// Node id is stale or was never issued by this document
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Insertion would make a node its own ancestor
    #[error("Cannot insert {child:?} under {parent:?}: node would contain itself")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

/// Selector syntax error with the byte offset where parsing stopped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid selector `{selector}` at offset {offset}: {message}")]
pub struct SelectorError {
    pub selector: String,
    pub offset: usize,
    pub message: String,
}

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DomError>;

//! Error types for element tree operations
//!
//! Flat hierarchy: every failure is local to one mutation call.

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ElementError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Content not allowed in node {0}")]
    ContentNotAllowed(NodeId),

    #[error("Node {0} is already attached to another parent")]
    AlreadyAttached(NodeId),

    #[error("Appending node {0} would make it its own ancestor")]
    HierarchyCycle(NodeId),
}

impl ElementError {
    /// The node the failure is about
    pub fn node_id(&self) -> NodeId {
        match *self {
            ElementError::NodeNotFound(id)
            | ElementError::ContentNotAllowed(id)
            | ElementError::AlreadyAttached(id)
            | ElementError::HierarchyCycle(id) => id,
        }
    }
}

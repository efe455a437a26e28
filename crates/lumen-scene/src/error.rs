//! Error types for scene graph operations.

use thiserror::Error;

use crate::NodeId;

/// Errors that can occur while mutating or querying the scene graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The node handle does not refer to a live node.
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// A parent looked up by name does not exist.
    #[error("Parent node not found: {0}")]
    ParentNotFound(String),

    /// Attaching the node would make it its own ancestor.
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Node being attached.
        child: NodeId,
        /// Requested parent.
        parent: NodeId,
    },

    /// A world transform on the path has no inverse (zero scale).
    #[error("World transform of {0:?} is singular")]
    SingularTransform(NodeId),

    /// Mesh data is malformed.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),
}

/// A geometric query a shape cannot answer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// The shape has no meaningful implementation of the query.
    #[error("{query} is not supported by {kind} nodes")]
    Unsupported {
        /// Query name (`intersect` or `sdf`).
        query: &'static str,
        /// Shape kind name.
        kind: &'static str,
    },
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;

//! Errors for tree updates and strict navigation

use crate::id::NodeId;

/// Tree operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A path segment names no child of the node reached so far
    #[error("path mismatch at depth {depth}: node {parent} has no child {missing}")]
    PathMismatch {
        /// Id the path asked for
        missing: NodeId,
        /// Last node successfully reached
        parent: NodeId,
        /// Number of real descent steps taken before the mismatch
        depth: usize,
    },
}

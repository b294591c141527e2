//! Error types for Folio Core
//!
//! Provides error handling for:
//! - Lookups of unknown histories or nodes
//! - Tree updates whose path no longer matches the tree
//! - Stale writes detected by revision checks
//! - Generator failures

use crate::types::HistoryId;
use folio_tree::{NodeId, TreeError};

/// Main history error type
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// No history with this id in the store
    #[error("history not found: {0}")]
    NotFound(HistoryId),

    /// No node with this id in the history's tree
    #[error("node {node} not found in history {history}")]
    NodeNotFound {
        /// History that was searched
        history: HistoryId,
        /// Missing node
        node: NodeId,
    },

    /// Every history id has been handed out
    #[error("history ids exhausted")]
    IdsExhausted,

    /// Tree update or strict navigation failed
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Another write replaced the history since the caller read it
    #[error("stale revision for history {history}: expected {expected}, found {actual}")]
    StaleRevision {
        /// History being written
        history: HistoryId,
        /// Revision the caller based its write on
        expected: u64,
        /// Revision currently stored
        actual: u64,
    },

    /// Generator could not produce a page
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl HistoryError {
    /// Check if re-reading and retrying may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StaleRevision { .. } | Self::Generation(_))
    }

    /// Check if the error reports a path that no longer matches the tree
    #[inline]
    #[must_use]
    pub fn is_path_mismatch(&self) -> bool {
        matches!(self, Self::Tree(TreeError::PathMismatch { .. }))
    }
}

/// Generator failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Backend rejected or failed the request
    #[error("backend error: {0}")]
    Backend(String),

    /// Backend answered with something that is not a page
    #[error("malformed response: {0}")]
    Malformed(String),
}

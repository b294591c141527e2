//! Node paths for addressing within history trees
//!
//! Provides [`NodePath`], the ancestor-id sequence used to walk from the
//! conceptual super-root down to a node.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Leading entries consumed before real descent: super-root, then root
pub const SENTINEL_LEN: usize = 2;

/// Path within a history tree
///
/// The first two entries are the sentinel pair (`0`, then the root's own id)
/// and are skipped when descending. This lets every path be built uniformly:
/// the root's path is `[0]`, and a child's path is its parent's path followed
/// by the parent's id.
///
/// # Examples
/// - `0` → path of the root (addresses the root)
/// - `0/1` → root as target, or path of any root child
/// - `0/1/2` → node 2 under the root as target
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<NodeId>);

impl NodePath {
    /// Path of the root node: the lone super-root sentinel
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(vec![NodeId::SUPER_ROOT])
    }

    /// Entries left after the sentinel pair is consumed
    #[inline]
    #[must_use]
    pub fn descent(&self) -> &[NodeId] {
        &self.0[SENTINEL_LEN.min(self.0.len())..]
    }

    /// Append an id, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, id: NodeId) -> Self {
        let mut new = self.clone();
        new.0.push(id);
        new
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in &self.0 {
            if !first {
                f.write_str("/")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<&[u64]> for NodePath {
    fn from(ids: &[u64]) -> Self {
        Self(ids.iter().copied().map(NodeId).collect())
    }
}

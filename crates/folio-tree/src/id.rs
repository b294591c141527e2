//! Node identifiers

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Identifier of a node within one history
///
/// Ids are assigned by the owning history in strictly increasing order,
/// starting at [`NodeId::ROOT`]. [`NodeId::SUPER_ROOT`] never names a real node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Sentinel for the conceptual parent of the root
    pub const SUPER_ROOT: Self = Self(0);

    /// Id of every tree's root node
    pub const ROOT: Self = Self(1);

    /// Raw value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Id that follows this one
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

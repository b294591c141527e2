//! Core types for history management
//!
//! Identifiers and store configuration.

use crate::error::HistoryError;
use folio_tree::SiblingOrder;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Identifier of one history in a store
///
/// Allocated by the store, independent of node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(pub u64);

impl Display for HistoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store configuration
///
/// ```toml
/// sibling_order = "move_to_end"
/// first_history_id = 100
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Where a child rebuilt by an update lands among its siblings
    pub sibling_order: SiblingOrder,
    /// Id given to the first history created
    pub first_history_id: u64,
}

impl StoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With sibling order
    #[inline]
    #[must_use]
    pub fn with_sibling_order(mut self, order: SiblingOrder) -> Self {
        self.sibling_order = order;
        self
    }

    /// With first history id
    #[inline]
    #[must_use]
    pub fn with_first_history_id(mut self, id: u64) -> Self {
        self.first_history_id = id;
        self
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns [`HistoryError::Config`] on malformed TOML or invalid values.
    pub fn from_toml_str(source: &str) -> Result<Self, HistoryError> {
        let config: Self =
            toml::from_str(source).map_err(|e| HistoryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`HistoryError::Config`] if `first_history_id` is zero or
    /// `u64::MAX` (the counter would have nothing left to allocate).
    pub fn validate(&self) -> Result<(), HistoryError> {
        match self.first_history_id {
            0 => Err(HistoryError::Config(
                "first_history_id must be at least 1".to_string(),
            )),
            u64::MAX => Err(HistoryError::Config(format!(
                "first_history_id must be below {}",
                u64::MAX
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sibling_order: SiblingOrder::InPlace,
            first_history_id: 1,
        }
    }
}

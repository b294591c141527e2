//! History store
//!
//! Keyed collection of independent histories. Each stored history is replaced
//! as a whole value on every change; iteration is ascending by history id.

use crate::error::HistoryError;
use crate::history::History;
use crate::types::{HistoryId, StoreConfig};
use folio_page::Page;
use folio_tree::NodeId;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Store of histories
///
/// Thread-safe: each operation runs its read-compute-write under one write
/// lock. Callers that read a history, do something slow, and then write back
/// should use [`HistoryStore::extend_history_at`] with the revision they read.
#[derive(Debug)]
pub struct HistoryStore {
    config: StoreConfig,
    histories: RwLock<BTreeMap<HistoryId, History>>,
    next_history_id: AtomicU64,
}

impl HistoryStore {
    /// Create empty store with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::build(StoreConfig::default())
    }

    /// Create empty store with the given configuration
    ///
    /// # Errors
    /// Returns [`HistoryError::Config`] if the configuration is invalid.
    pub fn with_config(config: StoreConfig) -> Result<Self, HistoryError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: StoreConfig) -> Self {
        Self {
            config,
            histories: RwLock::new(BTreeMap::new()),
            next_history_id: AtomicU64::new(config.first_history_id),
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Start a new history with `page` at its root
    ///
    /// # Errors
    /// Returns [`HistoryError::IdsExhausted`] once the id counter reaches
    /// `u64::MAX`; ids are never reused.
    pub fn create_history(&self, page: Page) -> Result<History, HistoryError> {
        let id = self
            .next_history_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| next.checked_add(1))
            .map(HistoryId)
            .map_err(|_| {
                tracing::warn!("history id counter exhausted");
                HistoryError::IdsExhausted
            })?;
        let history = History::create(id, page);
        self.histories.write().insert(id, history.clone());
        tracing::debug!(history = %id, "created history");
        Ok(history)
    }

    /// Add a node under the current node and make it current
    ///
    /// # Errors
    /// - [`HistoryError::NotFound`] if no history has this id
    /// - [`HistoryError::Tree`] if the current position no longer resolves
    pub fn extend_history(
        &self,
        id: HistoryId,
        page: Page,
        selection_note: &str,
    ) -> Result<History, HistoryError> {
        let order = self.config.sibling_order;
        self.replace(id, None, |history| {
            history.extended(page, selection_note, order)
        })
    }

    /// Like [`HistoryStore::extend_history`], rejecting the write if the
    /// stored revision is not `expected_revision`
    ///
    /// # Errors
    /// Also returns [`HistoryError::StaleRevision`] on a revision mismatch.
    pub fn extend_history_at(
        &self,
        id: HistoryId,
        expected_revision: u64,
        page: Page,
        selection_note: &str,
    ) -> Result<History, HistoryError> {
        let order = self.config.sibling_order;
        self.replace(id, Some(expected_revision), |history| {
            history.extended(page, selection_note, order)
        })
    }

    /// Add a node under `node_id` and make it current
    ///
    /// # Errors
    /// - [`HistoryError::NotFound`] if no history has this id
    /// - [`HistoryError::NodeNotFound`] if `node_id` is not in the tree
    pub fn branch_from(
        &self,
        id: HistoryId,
        node_id: NodeId,
        page: Page,
        selection_note: &str,
    ) -> Result<History, HistoryError> {
        let order = self.config.sibling_order;
        self.replace(id, None, |history| {
            history.branched_from(node_id, page, selection_note, order)
        })
    }

    /// Merge `page` into the current node without adding a node
    ///
    /// # Errors
    /// - [`HistoryError::NotFound`] if no history has this id
    /// - [`HistoryError::Tree`] if the current position no longer resolves
    pub fn append_to_current(&self, id: HistoryId, page: Page) -> Result<History, HistoryError> {
        let order = self.config.sibling_order;
        self.replace(id, None, |history| history.appended_to_current(page, order))
    }

    /// Make `node_id` the current node
    ///
    /// # Errors
    /// - [`HistoryError::NotFound`] if no history has this id
    /// - [`HistoryError::NodeNotFound`] if `node_id` is not in the tree
    pub fn checkout(&self, id: HistoryId, node_id: NodeId) -> Result<History, HistoryError> {
        self.replace(id, None, |history| history.checked_out(node_id))
    }

    /// Latest value of a history
    #[must_use]
    pub fn get_history_by_id(&self, id: HistoryId) -> Option<History> {
        self.histories.read().get(&id).cloned()
    }

    /// Snapshot of all histories, ascending by id
    #[must_use]
    pub fn histories(&self) -> Vec<History> {
        self.histories.read().values().cloned().collect()
    }

    /// All history ids, ascending
    #[must_use]
    pub fn ids(&self) -> Vec<HistoryId> {
        self.histories.read().keys().copied().collect()
    }

    /// Number of histories
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.histories.read().len()
    }

    /// True when no history has been created
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.histories.read().is_empty()
    }

    fn replace(
        &self,
        id: HistoryId,
        expected_revision: Option<u64>,
        update: impl FnOnce(&History) -> Result<History, HistoryError>,
    ) -> Result<History, HistoryError> {
        let mut histories = self.histories.write();
        let current = histories.get(&id).ok_or(HistoryError::NotFound(id))?;

        if let Some(expected) = expected_revision {
            if current.revision() != expected {
                tracing::warn!(
                    history = %id,
                    expected,
                    actual = current.revision(),
                    "rejected stale write"
                );
                return Err(HistoryError::StaleRevision {
                    history: id,
                    expected,
                    actual: current.revision(),
                });
            }
        }

        let revision = current.revision() + 1;
        let updated = match update(current) {
            Ok(updated) => updated.with_revision(revision),
            Err(err) => {
                if err.is_path_mismatch() {
                    tracing::warn!(history = %id, error = %err, "current position does not resolve");
                }
                return Err(err);
            }
        };

        tracing::debug!(
            history = %id,
            revision,
            current = %updated.current_node_id(),
            nodes = updated.next_id(),
            "replaced history"
        );
        histories.insert(id, updated.clone());
        Ok(updated)
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_tree::SiblingOrder;

    fn page(first: &str) -> Page {
        Page::new(
            "T",
            vec![first.split(' ').map(str::to_string).collect()],
            vec![],
        )
    }

    #[test]
    fn ids_are_allocated_from_config() {
        let store =
            HistoryStore::with_config(StoreConfig::new().with_first_history_id(100)).unwrap();
        assert_eq!(store.create_history(page("a")).unwrap().id(), HistoryId(100));
        assert_eq!(store.create_history(page("b")).unwrap().id(), HistoryId(101));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn exhausted_ids_are_refused_not_wrapped() {
        let store =
            HistoryStore::with_config(StoreConfig::new().with_first_history_id(u64::MAX - 1))
                .unwrap();
        let last = store.create_history(page("a")).unwrap().id();

        let err = store.create_history(page("b")).unwrap_err();

        assert_eq!(last, HistoryId(u64::MAX - 1));
        assert!(matches!(err, HistoryError::IdsExhausted));
        assert_eq!(store.ids(), vec![last]);
        assert!(matches!(
            store.create_history(page("c")),
            Err(HistoryError::IdsExhausted)
        ));
    }

    #[test]
    fn max_first_id_is_rejected() {
        let err = HistoryStore::with_config(StoreConfig::new().with_first_history_id(u64::MAX))
            .unwrap_err();
        assert!(matches!(err, HistoryError::Config(_)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = HistoryStore::with_config(StoreConfig::new().with_first_history_id(0)).unwrap_err();
        assert!(matches!(err, HistoryError::Config(_)));
    }

    #[test]
    fn every_replacement_bumps_revision() {
        let store = HistoryStore::new();
        let id = store.create_history(page("a")).unwrap().id();

        let first = store.extend_history(id, page("b"), "").unwrap();
        assert_eq!(first.revision(), 1);
        let second = store.checkout(id, NodeId::ROOT).unwrap();
        assert_eq!(second.revision(), 2);
        assert_eq!(store.get_history_by_id(id).unwrap(), second);
    }

    #[test]
    fn stale_revision_leaves_store_unchanged() {
        let store = HistoryStore::new();
        let id = store.create_history(page("a")).unwrap().id();
        store.extend_history(id, page("b"), "").unwrap();

        let err = store.extend_history_at(id, 0, page("c"), "").unwrap_err();
        assert!(matches!(
            err,
            HistoryError::StaleRevision {
                expected: 0,
                actual: 1,
                ..
            }
        ));
        assert_eq!(store.get_history_by_id(id).unwrap().next_id(), 2);

        let ok = store.extend_history_at(id, 1, page("c"), "").unwrap();
        assert_eq!(ok.next_id(), 3);
    }

    #[test]
    fn failed_update_leaves_store_unchanged() {
        let store = HistoryStore::new();
        let id = store.create_history(page("a")).unwrap().id();
        let before = store.get_history_by_id(id).unwrap();

        assert!(store.checkout(id, NodeId(42)).is_err());
        assert_eq!(store.get_history_by_id(id).unwrap(), before);
    }

    #[test]
    fn move_to_end_config_reorders_siblings() {
        let store = HistoryStore::with_config(
            StoreConfig::new().with_sibling_order(SiblingOrder::MoveToEnd),
        )
        .unwrap();
        let id = store.create_history(page("root")).unwrap().id();
        store.extend_history(id, page("two"), "").unwrap();
        store.checkout(id, NodeId::ROOT).unwrap();
        store.extend_history(id, page("three"), "").unwrap();

        // extending under node 2 rebuilds it, which moves it after node 3
        let history = store.branch_from(id, NodeId(2), page("four"), "").unwrap();
        let order: Vec<_> = history.root().children().map(|c| c.id().get()).collect();
        assert_eq!(order, vec![3, 2]);
    }
}

//! One branching narrative session
//!
//! A [`History`] is a value: every operation returns a new `History` and
//! leaves `self` untouched. Trees share unchanged subtrees between values, so
//! keeping old values around as snapshots is cheap.

use crate::error::HistoryError;
use crate::types::HistoryId;
use folio_page::{merge_content, Page, Sentence};
use folio_tree::{
    assemble_text_strict, extend, replace_page, resolve_strict, HistoryNode, NodeId, NodePath,
    SiblingOrder,
};
use serde::{Deserialize, Serialize};

/// A history tree plus the current position within it
///
/// # Invariants
/// - node ids are unique and run from 1 to `next_id` in creation order
/// - `next_id` equals the number of nodes in `root`
/// - `current_path` followed by `current_node_id` resolves in `root`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    id: HistoryId,
    root: HistoryNode,
    current_node_id: NodeId,
    current_path: NodePath,
    next_id: u64,
    revision: u64,
}

impl History {
    /// Start a history whose root holds `page`
    #[must_use]
    pub fn create(id: HistoryId, page: Page) -> Self {
        Self {
            id,
            root: HistoryNode::make_root(page),
            current_node_id: NodeId::ROOT,
            current_path: NodePath::root(),
            next_id: NodeId::ROOT.get(),
            revision: 0,
        }
    }

    /// History id
    #[inline]
    #[must_use]
    pub fn id(&self) -> HistoryId {
        self.id
    }

    /// Root of the tree
    #[inline]
    #[must_use]
    pub fn root(&self) -> &HistoryNode {
        &self.root
    }

    /// Id of the active node
    #[inline]
    #[must_use]
    pub fn current_node_id(&self) -> NodeId {
        self.current_node_id
    }

    /// Ancestors of the active node, excluding it
    #[inline]
    #[must_use]
    pub fn current_path(&self) -> &NodePath {
        &self.current_path
    }

    /// Last node id issued; equals the node count
    #[inline]
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Number of times the store has replaced this history
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Path addressing the active node
    #[inline]
    #[must_use]
    pub fn current_address(&self) -> NodePath {
        self.current_path.child(self.current_node_id)
    }

    /// The active node
    ///
    /// # Errors
    /// Returns [`HistoryError::Tree`] if the current position does not resolve.
    pub fn current_node(&self) -> Result<&HistoryNode, HistoryError> {
        Ok(resolve_strict(&self.root, &self.current_address())?)
    }

    /// Linear text from the root to the active node
    ///
    /// # Errors
    /// Returns [`HistoryError::Tree`] if the current position does not resolve.
    pub fn text(&self) -> Result<Vec<Sentence>, HistoryError> {
        Ok(assemble_text_strict(&self.root, &self.current_address())?)
    }

    /// New node under the active node; the new node becomes active
    ///
    /// # Errors
    /// Returns [`HistoryError::Tree`] if the current position does not resolve.
    pub fn extended(
        &self,
        page: Page,
        selection_note: &str,
        order: SiblingOrder,
    ) -> Result<Self, HistoryError> {
        self.attach_under(self.current_address(), page, selection_note, order)
    }

    /// New node under `node_id`, wherever it is; the new node becomes active
    ///
    /// # Errors
    /// Returns [`HistoryError::NodeNotFound`] if `node_id` is not in the tree.
    pub fn branched_from(
        &self,
        node_id: NodeId,
        page: Page,
        selection_note: &str,
        order: SiblingOrder,
    ) -> Result<Self, HistoryError> {
        let parent = self.node(node_id)?.address();
        self.attach_under(parent, page, selection_note, order)
    }

    /// Same tree with `node_id` as the active node
    ///
    /// # Errors
    /// Returns [`HistoryError::NodeNotFound`] if `node_id` is not in the tree.
    pub fn checked_out(&self, node_id: NodeId) -> Result<Self, HistoryError> {
        let path = self.node(node_id)?.path().clone();
        Ok(Self {
            current_node_id: node_id,
            current_path: path,
            ..self.clone()
        })
    }

    /// Merge `page` into the active node without creating a node
    ///
    /// # Errors
    /// Returns [`HistoryError::Tree`] if the current position does not resolve.
    pub fn appended_to_current(&self, page: Page, order: SiblingOrder) -> Result<Self, HistoryError> {
        let merged = merge_content(self.current_node()?.page(), &page);
        let root = replace_page(&self.root, &self.current_address(), merged, order)?;
        Ok(Self {
            root,
            ..self.clone()
        })
    }

    pub(crate) fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    fn node(&self, node_id: NodeId) -> Result<&HistoryNode, HistoryError> {
        self.root.find(node_id).ok_or(HistoryError::NodeNotFound {
            history: self.id,
            node: node_id,
        })
    }

    fn attach_under(
        &self,
        parent: NodePath,
        page: Page,
        selection_note: &str,
        order: SiblingOrder,
    ) -> Result<Self, HistoryError> {
        let new_id = NodeId(self.next_id).next();
        let node = HistoryNode::make_child(new_id, page, selection_note, parent.clone());
        let root = extend(&self.root, node, &parent, order)?;

        Ok(Self {
            id: self.id,
            root,
            current_node_id: new_id,
            current_path: parent,
            next_id: new_id.get(),
            revision: self.revision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(sentences: &[&str]) -> Page {
        Page::new(
            "T",
            sentences
                .iter()
                .map(|s| s.split(' ').map(str::to_string).collect())
                .collect(),
            vec![],
        )
    }

    fn words(s: &str) -> Sentence {
        s.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn create_sets_root_position() {
        let history = History::create(HistoryId(1), page(&["A B"]));
        assert_eq!(history.current_node_id(), NodeId::ROOT);
        assert_eq!(history.current_path(), &NodePath::root());
        assert_eq!(history.next_id(), 1);
        assert_eq!(history.revision(), 0);
        assert_eq!(history.text().unwrap(), vec![words("A B")]);
    }

    #[test]
    fn extended_moves_to_new_node() {
        let history = History::create(HistoryId(1), page(&["A B"]));
        let next = history
            .extended(page(&["C"]), "happy path", SiblingOrder::InPlace)
            .unwrap();

        assert_eq!(next.current_node_id(), NodeId(2));
        assert_eq!(next.current_path().to_string(), "0/1");
        assert_eq!(next.next_id(), 2);
        assert_eq!(next.current_node().unwrap().selection_note(), "happy path");
        assert_eq!(next.text().unwrap(), vec![words("A B"), words("C")]);

        // the original value is unchanged
        assert_eq!(history.root().child_count(), 0);
    }

    #[test]
    fn branched_from_earlier_node_adds_sibling() {
        let history = History::create(HistoryId(1), page(&["A B"]))
            .extended(page(&["C"]), "", SiblingOrder::InPlace)
            .unwrap()
            .extended(page(&["E"]), "", SiblingOrder::InPlace)
            .unwrap();

        let branched = history
            .branched_from(NodeId(2), page(&["F"]), "alt", SiblingOrder::InPlace)
            .unwrap();

        assert_eq!(branched.current_node_id(), NodeId(4));
        let two = branched.root().find(NodeId(2)).unwrap();
        let ids: Vec<_> = two.children().map(HistoryNode::id).collect();
        assert_eq!(ids, vec![NodeId(3), NodeId(4)]);
        assert_eq!(
            branched.text().unwrap(),
            vec![words("A B"), words("C"), words("F")]
        );
    }

    #[test]
    fn branched_from_unknown_node_fails() {
        let history = History::create(HistoryId(3), page(&["A"]));
        let err = history
            .branched_from(NodeId(8), page(&["B"]), "", SiblingOrder::InPlace)
            .unwrap_err();
        assert!(matches!(
            err,
            HistoryError::NodeNotFound {
                history: HistoryId(3),
                node: NodeId(8)
            }
        ));
    }

    #[test]
    fn checked_out_then_extended_branches() {
        let history = History::create(HistoryId(1), page(&["A B"]))
            .extended(page(&["C"]), "happy path", SiblingOrder::InPlace)
            .unwrap();

        let back = history.checked_out(NodeId::ROOT).unwrap();
        assert_eq!(back.current_path(), &NodePath::root());
        assert_eq!(back.text().unwrap(), vec![words("A B")]);

        let alt = back
            .extended(page(&["D"]), "alt path", SiblingOrder::InPlace)
            .unwrap();
        assert_eq!(alt.root().child_count(), 2);
        assert_eq!(alt.current_node_id(), NodeId(3));
        assert_eq!(alt.text().unwrap(), vec![words("A B"), words("D")]);
    }

    #[test]
    fn appended_to_current_keeps_ids() {
        let history = History::create(HistoryId(1), page(&["A"]))
            .extended(page(&["B"]), "", SiblingOrder::InPlace)
            .unwrap();

        let appended = history
            .appended_to_current(page(&["C"]), SiblingOrder::InPlace)
            .unwrap();

        assert_eq!(appended.next_id(), 2);
        assert_eq!(appended.current_node_id(), NodeId(2));
        assert_eq!(appended.root().node_count(), 2);
        assert_eq!(
            appended.text().unwrap(),
            vec![words("A"), words("B"), words("C")]
        );
        assert_eq!(appended.current_node().unwrap().label(), "B");
    }

    #[test]
    fn corrupted_position_is_reported() {
        let history = History::create(HistoryId(1), page(&["A"]));
        let mut json = serde_json::to_value(&history).unwrap();
        json["current_path"] = serde_json::json!([0, 1]);
        json["current_node_id"] = serde_json::json!(5);
        let corrupted: History = serde_json::from_value(json).unwrap();

        assert!(corrupted.current_node().unwrap_err().is_path_mismatch());
        assert!(corrupted.text().is_err());
        assert!(corrupted
            .extended(page(&["B"]), "", SiblingOrder::InPlace)
            .unwrap_err()
            .is_path_mismatch());
    }
}

//! History nodes
//!
//! A [`HistoryNode`] is one vertex of a branching history. Children are held
//! in an [`im::Vector`] of [`Arc`]s so successive tree values share every
//! subtree an update did not touch.

use crate::id::NodeId;
use crate::path::NodePath;
use folio_page::Page;
use im::Vector;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One vertex of a history tree
///
/// # Invariants
/// - `label` is the page's first sentence joined by spaces
/// - `path` runs from the super-root through the parent (root: `[0]`)
/// - `children` are in insertion order and owned by this node only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryNode {
    pub(crate) id: NodeId,
    pub(crate) page: Arc<Page>,
    pub(crate) label: String,
    pub(crate) selection_note: String,
    pub(crate) path: NodePath,
    pub(crate) children: Vector<Arc<HistoryNode>>,
}

impl HistoryNode {
    /// Build the root of a new tree (id 1, empty note, path `[0]`)
    #[must_use]
    pub fn make_root(page: Page) -> Self {
        Self::build(NodeId::ROOT, page, String::new(), NodePath::root())
    }

    /// Build a leaf to attach under an existing node
    ///
    /// `path` is the parent's path followed by the parent's id.
    #[must_use]
    pub fn make_child(
        id: NodeId,
        page: Page,
        selection_note: impl Into<String>,
        path: NodePath,
    ) -> Self {
        Self::build(id, page, selection_note.into(), path)
    }

    fn build(id: NodeId, page: Page, selection_note: String, path: NodePath) -> Self {
        let label = page.label();
        Self {
            id,
            page: Arc::new(page),
            label,
            selection_note,
            path,
            children: Vector::new(),
        }
    }

    /// Node id
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Generated content of this node
    #[inline]
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Human-facing label (first sentence)
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Why this branch was taken; empty for the root
    #[inline]
    #[must_use]
    pub fn selection_note(&self) -> &str {
        &self.selection_note
    }

    /// Ancestor path, excluding this node
    #[inline]
    #[must_use]
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Path that addresses this node as a target
    #[inline]
    #[must_use]
    pub fn address(&self) -> NodePath {
        self.path.child(self.id)
    }

    /// Children in insertion order
    #[inline]
    pub fn children(&self) -> impl ExactSizeIterator<Item = &HistoryNode> + '_ {
        self.children.iter().map(|child| &**child)
    }

    /// Shared handle to the child at `index`
    ///
    /// Exposed so callers can check which subtrees two tree values share.
    #[inline]
    #[must_use]
    pub fn child_handle(&self, index: usize) -> Option<&Arc<HistoryNode>> {
        self.children.get(index)
    }

    /// Number of direct children
    #[inline]
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Direct child with the given id
    #[must_use]
    pub fn child(&self, id: NodeId) -> Option<&HistoryNode> {
        self.children
            .iter()
            .find(|child| child.id == id)
            .map(|child| &**child)
    }

    /// Node with the given id anywhere in this subtree
    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&HistoryNode> {
        self.depth_first()
            .map(|(_, node)| node)
            .find(|node| node.id == id)
    }

    /// Number of nodes in this subtree, including this one
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.depth_first().count()
    }

    /// Pre-order walk yielding `(depth, node)`, this node at depth 0
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            stack: vec![(0, self)],
        }
    }

    /// Copy of this node with the page replaced and the label re-derived
    pub(crate) fn with_page(&self, page: Arc<Page>) -> Self {
        let mut copy = self.clone();
        copy.label = page.label();
        copy.page = page;
        copy
    }
}

/// Pre-order iterator over a subtree
#[derive(Debug)]
pub struct DepthFirst<'a> {
    stack: Vec<(usize, &'a HistoryNode)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (usize, &'a HistoryNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, &**child)));
        Some((depth, node))
    }
}

//! Persistent branch insertion
//!
//! Every update walks the target path depth-first, rebuilds each node on that
//! path, and reuses every other subtree by reference. The input tree is never
//! modified, so earlier tree values stay valid snapshots.

use crate::error::TreeError;
use crate::id::NodeId;
use crate::node::HistoryNode;
use crate::path::NodePath;
use folio_page::Page;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where a rebuilt child lands among its siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiblingOrder {
    /// Rebuilt child keeps its index
    #[default]
    InPlace,
    /// Rebuilt child is removed and re-appended after its siblings
    MoveToEnd,
}

/// Attach `new_node` as the last child of the node at `target`
///
/// # Errors
/// Returns [`TreeError::PathMismatch`] if a segment of `target` names no
/// child of the node reached so far; `tree` is left as it was.
pub fn extend(
    tree: &HistoryNode,
    new_node: HistoryNode,
    target: &NodePath,
    order: SiblingOrder,
) -> Result<HistoryNode, TreeError> {
    let new_node = Arc::new(new_node);
    rebuild_at(tree, target.descent(), 0, order, &mut |node: &HistoryNode| {
        let mut copy = node.clone();
        copy.children.push_back(Arc::clone(&new_node));
        copy.label = copy.page.label();
        copy
    })
}

/// Like [`extend`], but an unmatched segment leaves that subtree unchanged
///
/// Callers cannot tell a no-op from a successful insertion by the return
/// value; compare node counts if it matters.
#[must_use]
pub fn extend_lenient(
    tree: &HistoryNode,
    new_node: HistoryNode,
    target: &NodePath,
    order: SiblingOrder,
) -> HistoryNode {
    match extend(tree, new_node, target, order) {
        Ok(updated) => updated,
        Err(err) => {
            tracing::warn!(target_path = %target, error = %err, "extend ignored unmatched path");
            tree.clone()
        }
    }
}

/// Replace the page of the node at `target`, keeping its id and children
///
/// # Errors
/// Returns [`TreeError::PathMismatch`] if `target` does not resolve.
pub fn replace_page(
    tree: &HistoryNode,
    target: &NodePath,
    page: Page,
    order: SiblingOrder,
) -> Result<HistoryNode, TreeError> {
    let page = Arc::new(page);
    rebuild_at(tree, target.descent(), 0, order, &mut |node: &HistoryNode| {
        node.with_page(Arc::clone(&page))
    })
}

fn rebuild_at(
    node: &HistoryNode,
    rest: &[NodeId],
    depth: usize,
    order: SiblingOrder,
    apply: &mut dyn FnMut(&HistoryNode) -> HistoryNode,
) -> Result<HistoryNode, TreeError> {
    let Some((next, tail)) = rest.split_first() else {
        return Ok(apply(node));
    };

    let index = node
        .children
        .iter()
        .position(|child| child.id == *next)
        .ok_or(TreeError::PathMismatch {
            missing: *next,
            parent: node.id,
            depth,
        })?;

    let rebuilt = Arc::new(rebuild_at(&node.children[index], tail, depth + 1, order, apply)?);

    let mut copy = node.clone();
    match order {
        SiblingOrder::InPlace => {
            copy.children.set(index, rebuilt);
        }
        SiblingOrder::MoveToEnd => {
            copy.children.remove(index);
            copy.children.push_back(rebuilt);
        }
    }
    Ok(copy)
}

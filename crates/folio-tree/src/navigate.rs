//! Path resolution and linear text assembly
//!
//! The lenient functions stop at the last node they could reach and report
//! nothing; the `_strict` variants turn the first unmatched segment into a
//! [`TreeError::PathMismatch`].

use crate::error::TreeError;
use crate::node::HistoryNode;
use crate::path::NodePath;
use folio_page::Sentence;

/// Nodes from the root down to the last node `path` reaches
///
/// The first element is always `tree` itself.
#[must_use]
pub fn walk<'a>(tree: &'a HistoryNode, path: &NodePath) -> Vec<&'a HistoryNode> {
    match walk_strict(tree, path) {
        Ok(nodes) => nodes,
        Err((nodes, _)) => nodes,
    }
}

/// Best-effort resolution: the node at `path`, or the deepest node reached
#[must_use]
pub fn resolve<'a>(tree: &'a HistoryNode, path: &NodePath) -> &'a HistoryNode {
    walk(tree, path).last().copied().unwrap_or(tree)
}

/// The node at `path`
///
/// # Errors
/// Returns [`TreeError::PathMismatch`] when a segment cannot be matched.
pub fn resolve_strict<'a>(
    tree: &'a HistoryNode,
    path: &NodePath,
) -> Result<&'a HistoryNode, TreeError> {
    walk_strict(tree, path)
        .map(|nodes| nodes.last().copied().unwrap_or(tree))
        .map_err(|(_, err)| err)
}

/// Sentences of every node from the root to the target, in path order
///
/// Truncates silently at the first unmatched segment.
#[must_use]
pub fn assemble_text(tree: &HistoryNode, path: &NodePath) -> Vec<Sentence> {
    concat(&walk(tree, path))
}

/// Like [`assemble_text`], but fails instead of truncating
///
/// # Errors
/// Returns [`TreeError::PathMismatch`] when a segment cannot be matched.
pub fn assemble_text_strict(
    tree: &HistoryNode,
    path: &NodePath,
) -> Result<Vec<Sentence>, TreeError> {
    walk_strict(tree, path)
        .map(|nodes| concat(&nodes))
        .map_err(|(_, err)| err)
}

fn concat(nodes: &[&HistoryNode]) -> Vec<Sentence> {
    nodes
        .iter()
        .flat_map(|node| node.page().sentences().iter().cloned())
        .collect()
}

type Partial<'a> = (Vec<&'a HistoryNode>, TreeError);

fn walk_strict<'a>(
    tree: &'a HistoryNode,
    path: &NodePath,
) -> Result<Vec<&'a HistoryNode>, Partial<'a>> {
    let mut nodes = vec![tree];
    let mut scope = tree;

    for (depth, id) in path.descent().iter().enumerate() {
        match scope.child(*id) {
            Some(next) => {
                nodes.push(next);
                scope = next;
            }
            None => {
                let err = TreeError::PathMismatch {
                    missing: *id,
                    parent: scope.id(),
                    depth,
                };
                return Err((nodes, err));
            }
        }
    }

    Ok(nodes)
}

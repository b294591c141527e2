//! Replay scripts
//!
//! A script is a JSON array of steps applied in order to one in-memory store.
//! Step text goes through [`parse_page`]; steps after `create` carry the
//! title of the node they attach under.

use anyhow::{Context, Result};
use folio_core::{History, HistoryId, HistoryStore, NodeId};
use folio_page::parse_page;
use serde::Deserialize;

/// One scripted store operation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum Step {
    /// Start a new history from `text`
    Create {
        text: String,
        #[serde(default)]
        keywords: Vec<String>,
    },
    /// Extend a history under its current node
    Extend {
        history: u64,
        text: String,
        #[serde(default)]
        note: String,
    },
    /// Attach a new child under `node` and make it current
    Branch {
        history: u64,
        node: u64,
        text: String,
        #[serde(default)]
        note: String,
    },
    /// Merge text into the current node without branching
    Append { history: u64, text: String },
    /// Move the current position to `node`
    Checkout { history: u64, node: u64 },
}

impl Step {
    fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Extend { .. } => "extend",
            Self::Branch { .. } => "branch",
            Self::Append { .. } => "append",
            Self::Checkout { .. } => "checkout",
        }
    }
}

/// Parse a script from JSON text
pub(crate) fn parse_script(source: &str) -> Result<Vec<Step>> {
    serde_json::from_str(source).context("script is not a JSON array of steps")
}

/// Apply every step to `store`, stopping at the first failure
pub(crate) fn replay(store: &HistoryStore, steps: &[Step]) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        apply(store, step).with_context(|| format!("step {} ({}) failed", index + 1, step.kind()))?;
    }
    tracing::info!(steps = steps.len(), histories = store.len(), "Replay finished");
    Ok(())
}

fn apply(store: &HistoryStore, step: &Step) -> Result<History> {
    let history = match step {
        Step::Create { text, keywords } => {
            store.create_history(parse_page(text, keywords.clone(), None))?
        }
        Step::Extend {
            history,
            text,
            note,
        } => {
            let id = HistoryId(*history);
            let page = continuation(store, id, None, text)?;
            store.extend_history(id, page, note)?
        }
        Step::Branch {
            history,
            node,
            text,
            note,
        } => {
            let id = HistoryId(*history);
            let page = continuation(store, id, Some(NodeId(*node)), text)?;
            store.branch_from(id, NodeId(*node), page, note)?
        }
        Step::Append { history, text } => {
            let id = HistoryId(*history);
            let page = continuation(store, id, None, text)?;
            store.append_to_current(id, page)?
        }
        Step::Checkout { history, node } => store.checkout(HistoryId(*history), NodeId(*node))?,
    };
    tracing::debug!(
        history = %history.id(),
        current = %history.current_node_id(),
        op = step.kind(),
        "Applied step"
    );
    Ok(history)
}

/// Parse `text` carrying the title and keywords of the node it will follow
fn continuation(
    store: &HistoryStore,
    id: HistoryId,
    anchor: Option<NodeId>,
    text: &str,
) -> Result<folio_core::Page> {
    let history = store
        .get_history_by_id(id)
        .with_context(|| format!("history {id} does not exist"))?;
    let parent = match anchor {
        Some(node) => history
            .root()
            .find(node)
            .with_context(|| format!("node {node} is not in history {id}"))?,
        None => history.current_node()?,
    };
    let page = parent.page();
    Ok(parse_page(text, page.keywords().to_vec(), Some(page.title())))
}

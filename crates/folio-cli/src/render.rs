//! Text and JSON views of histories

use folio_core::{History, HistoryError, Sentence};
use serde::Serialize;
use std::fmt::Write;

/// Indented outline of the tree followed by the current text
///
/// ```text
/// history 1 (current 3)
///   [1] Waves rolled in.
///     [2] Gulls cried.  (happy path)
///     * [3] A storm came.  (alt path)
/// ```
pub(crate) fn outline(history: &History) -> anyhow::Result<String> {
    let mut out = String::new();
    let current = history.current_node_id();
    writeln!(out, "history {} (current {})", history.id(), current)?;

    for (depth, node) in history.root().depth_first() {
        let marker = if node.id() == current { "* " } else { "" };
        write!(
            out,
            "{:indent$}{marker}[{}] {}.",
            "",
            node.id(),
            node.label(),
            indent = 2 * (depth + 1)
        )?;
        if !node.selection_note().is_empty() {
            write!(out, "  ({})", node.selection_note())?;
        }
        out.push('\n');
    }

    writeln!(out, "text: {}", join_text(&history.text()?))?;
    Ok(out)
}

/// Sentences joined back into prose, one `.` after each
pub(crate) fn join_text(sentences: &[Sentence]) -> String {
    sentences
        .iter()
        .map(|sentence| format!("{}.", sentence.join(" ")))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Serialize)]
struct HistoryView<'a> {
    #[serde(flatten)]
    history: &'a History,
    text: String,
}

/// Every history as pretty JSON, each with its assembled current text
pub(crate) fn to_json(histories: &[History]) -> anyhow::Result<String> {
    let views = histories
        .iter()
        .map(|history| {
            Ok(HistoryView {
                history,
                text: join_text(&history.text()?),
            })
        })
        .collect::<Result<Vec<_>, HistoryError>>()?;
    Ok(serde_json::to_string_pretty(&views)?)
}

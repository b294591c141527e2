//! Generator seam
//!
//! The store never talks to a generation backend itself. Callers hand in a
//! [`PageGenerator`]; the helpers here build its context from the current
//! narrative and record the result.

use crate::error::{GenerationError, HistoryError};
use crate::history::History;
use crate::store::HistoryStore;
use crate::types::HistoryId;
use async_trait::async_trait;
use folio_page::{Page, Sentence};

/// Produces the next page of a narrative
#[async_trait]
pub trait PageGenerator: Send + Sync {
    /// Generate a page for `context`
    ///
    /// # Errors
    /// Returns [`GenerationError`] when the backend fails.
    async fn generate(&self, context: &GenerationContext) -> Result<Page, GenerationError>;
}

/// What a generator is told about the narrative so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationContext {
    /// Title to continue under (empty for a fresh narrative)
    pub title: String,
    /// Keywords the text should be about
    pub keywords: Vec<String>,
    /// Narrative from the root to the current node
    pub preceding: Vec<Sentence>,
}

impl GenerationContext {
    /// Context for a fresh narrative
    #[inline]
    #[must_use]
    pub fn fresh(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            ..Self::default()
        }
    }

    /// Context continuing the current node of `history`
    ///
    /// # Errors
    /// Returns [`HistoryError::Tree`] if the current position does not resolve.
    pub fn continuing(history: &History) -> Result<Self, HistoryError> {
        let current = history.current_node()?.page();
        Ok(Self {
            title: current.title().to_string(),
            keywords: current.keywords().to_vec(),
            preceding: history.text()?,
        })
    }

    /// Preceding narrative as prose: `"A B. C."`
    #[must_use]
    pub fn preceding_text(&self) -> String {
        if self.preceding.is_empty() {
            return String::new();
        }
        let body = self
            .preceding
            .iter()
            .map(|words| words.join(" "))
            .collect::<Vec<_>>()
            .join(". ");
        format!("{body}.")
    }
}

/// Generate a page and start a history with it
///
/// Returns `Ok(None)` when the generator answers with an empty page.
///
/// # Errors
/// Returns [`HistoryError::Generation`] when the generator fails and
/// [`HistoryError::IdsExhausted`] when the store has no id left.
pub async fn start_history<G>(
    store: &HistoryStore,
    generator: &G,
    context: &GenerationContext,
) -> Result<Option<History>, HistoryError>
where
    G: PageGenerator + ?Sized,
{
    let page = generator.generate(context).await?;
    if page.is_empty() {
        tracing::debug!("generator returned an empty page; nothing created");
        return Ok(None);
    }
    Ok(Some(store.create_history(page)?))
}

/// Generate the next page of a history and extend it from its current node
///
/// The write is checked against the revision read before generating, so a
/// history changed in the meantime is reported instead of overwritten.
/// Returns `Ok(None)` when the generator answers with an empty page.
///
/// # Errors
/// - [`HistoryError::NotFound`] if no history has this id
/// - [`HistoryError::Generation`] when the generator fails
/// - [`HistoryError::StaleRevision`] if the history changed during generation
pub async fn continue_history<G>(
    store: &HistoryStore,
    id: HistoryId,
    generator: &G,
    selection_note: &str,
) -> Result<Option<History>, HistoryError>
where
    G: PageGenerator + ?Sized,
{
    let snapshot = store
        .get_history_by_id(id)
        .ok_or(HistoryError::NotFound(id))?;
    let context = GenerationContext::continuing(&snapshot)?;

    let page = match generator.generate(&context).await {
        Ok(page) => page,
        Err(err) => {
            tracing::warn!(history = %id, error = %err, "generation failed; history not extended");
            return Err(err.into());
        }
    };
    if page.is_empty() {
        tracing::debug!(history = %id, "generator returned an empty page; history not extended");
        return Ok(None);
    }

    store
        .extend_history_at(id, snapshot.revision(), page, selection_note)
        .map(Some)
}

//! Functional tests for the generator seam.
//!
//! The generator is the only asynchronous collaborator. These tests check that
//! the store records what it produces, ignores empty answers, surfaces
//! failures without touching the tree, and refuses writes based on a history
//! that changed while the generator was running.

use async_trait::async_trait;
use folio_core::{
    continue_history, start_history, GenerationContext, GenerationError, HistoryError, HistoryId,
    HistoryStore, NodeId, Page, PageGenerator,
};
use folio_test_utils::{page, sentence, titled_page, ScriptedGenerator};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn start_then_continue_builds_a_chain() {
    let store = HistoryStore::new();
    let generator = ScriptedGenerator::new()
        .with_page(titled_page("<Sea>", &["Waves rolled in"], &["sea"]))
        .with_page(titled_page("<Sea>", &["Gulls cried"], &["sea"]));

    let created = start_history(&store, &generator, &GenerationContext::fresh(vec!["sea".into()]))
        .await
        .unwrap()
        .expect("non-empty page creates a history");
    let extended = continue_history(&store, created.id(), &generator, "next")
        .await
        .unwrap()
        .expect("non-empty page extends");

    assert_eq!(extended.current_node_id(), NodeId(2));
    assert_eq!(
        extended.text().unwrap(),
        vec![sentence("Waves rolled in"), sentence("Gulls cried")]
    );

    let seen = generator.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].title, "<Sea>");
    assert_eq!(seen[1].keywords, vec!["sea".to_string()]);
    assert_eq!(seen[1].preceding_text(), "Waves rolled in.");
}

#[tokio::test]
async fn empty_page_does_not_extend() {
    let store = HistoryStore::new();
    let id = store.create_history(page(&["A"])).unwrap().id();
    let generator = ScriptedGenerator::new().with_page(Page::empty());

    let outcome = continue_history(&store, id, &generator, "").await.unwrap();

    assert!(outcome.is_none());
    assert_eq!(store.get_history_by_id(id).unwrap().next_id(), 1);
}

#[tokio::test]
async fn empty_first_page_creates_nothing() {
    let store = HistoryStore::new();
    let generator = ScriptedGenerator::new().with_page(Page::empty());

    let outcome = start_history(&store, &generator, &GenerationContext::default())
        .await
        .unwrap();

    assert!(outcome.is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn generator_failure_leaves_history_alone() {
    let store = HistoryStore::new();
    let id = store.create_history(page(&["A"])).unwrap().id();
    let before = store.get_history_by_id(id).unwrap();
    let generator = ScriptedGenerator::new().with_failure("backend down");

    let err = continue_history(&store, id, &generator, "").await.unwrap_err();

    assert!(matches!(
        err,
        HistoryError::Generation(GenerationError::Backend(_))
    ));
    assert!(err.is_retryable());
    assert_eq!(store.get_history_by_id(id).unwrap(), before);
}

#[tokio::test]
async fn unknown_history_is_not_found() {
    let store = HistoryStore::new();
    let generator = ScriptedGenerator::new().with_page(page(&["A"]));

    let err = continue_history(&store, HistoryId(7), &generator, "")
        .await
        .unwrap_err();

    assert!(matches!(err, HistoryError::NotFound(HistoryId(7))));
    assert!(generator.seen().is_empty());
}

/// Generator that extends the same history itself before answering, the way
/// a second caller racing on the same id would.
struct Interfering<'a> {
    store: &'a HistoryStore,
    id: HistoryId,
}

#[async_trait]
impl<'a> PageGenerator for Interfering<'a> {
    async fn generate(&self, _context: &GenerationContext) -> Result<Page, GenerationError> {
        self.store
            .extend_history(self.id, page(&["racer"]), "other caller")
            .map_err(|e| GenerationError::Backend(e.to_string()))?;
        Ok(page(&["late"]))
    }
}

#[tokio::test]
async fn concurrent_change_is_rejected_as_stale() {
    let store = HistoryStore::new();
    let id = store.create_history(page(&["A"])).unwrap().id();
    let generator = Interfering { store: &store, id };

    let err = continue_history(&store, id, &generator, "mine")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HistoryError::StaleRevision {
            expected: 0,
            actual: 1,
            ..
        }
    ));
    let stored = store.get_history_by_id(id).unwrap();
    assert_eq!(stored.next_id(), 2);
    assert_eq!(stored.current_node().unwrap().label(), "racer");
}

//! Testing utilities for Folio workspace
//!
//! Shared page fixtures and a scripted generator.

#![allow(missing_docs)]

use async_trait::async_trait;
use folio_core::{GenerationContext, GenerationError, HistoryStore, PageGenerator};
use folio_page::{Page, Sentence};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Sentence from space-separated words
pub fn sentence(text: &str) -> Sentence {
    text.split(' ').map(str::to_string).collect()
}

/// Page titled "T" with one sentence per entry
pub fn page(sentences: &[&str]) -> Page {
    titled_page("T", sentences, &[])
}

pub fn titled_page(title: &str, sentences: &[&str], keywords: &[&str]) -> Page {
    Page::new(
        title,
        sentences.iter().map(|s| sentence(s)).collect(),
        keywords.iter().map(|k| (*k).to_string()).collect(),
    )
}

/// Store holding one history with root "A B" and child "C" (current)
pub fn store_with_one_extension() -> HistoryStore {
    let store = HistoryStore::new();
    let history = store
        .create_history(page(&["A B"]))
        .expect("fresh store has ids");
    store
        .extend_history(history.id(), page(&["C"]), "happy path")
        .expect("fresh history extends");
    store
}

/// Generator that replays queued answers and records every context it saw
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    answers: Mutex<VecDeque<Result<Page, GenerationError>>>,
    seen: Mutex<Vec<GenerationContext>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page: Page) -> Self {
        self.answers.lock().push_back(Ok(page));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.answers
            .lock()
            .push_back(Err(GenerationError::Backend(message.to_string())));
        self
    }

    pub fn seen(&self) -> Vec<GenerationContext> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl PageGenerator for ScriptedGenerator {
    async fn generate(&self, context: &GenerationContext) -> Result<Page, GenerationError> {
        self.seen.lock().push(context.clone());
        self.answers
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Malformed("script exhausted".to_string())))
    }
}

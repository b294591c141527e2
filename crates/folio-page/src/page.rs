//! Generated page content
//!
//! A [`Page`] is produced by a generator and never mutated afterwards.
//! Counts are derived from the sentence list on demand.

use serde::{Deserialize, Serialize};

/// Ordered words of one sentence
pub type Sentence = Vec<String>;

/// One generated passage
///
/// # Invariants
/// - Immutable after construction (fields are private)
/// - Word and sentence counts are derived, never stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    title: String,
    sentences: Vec<Sentence>,
    keywords: Vec<String>,
}

impl Page {
    /// Create page from its parts
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>, sentences: Vec<Sentence>, keywords: Vec<String>) -> Self {
        Self {
            title: title.into(),
            sentences,
            keywords,
        }
    }

    /// Page with no title, sentences or keywords
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Page title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sentences in reading order
    #[inline]
    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Keywords the page was generated for
    #[inline]
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Number of sentences
    #[inline]
    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Number of words across all sentences
    #[inline]
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Vec::len).sum()
    }

    /// True when the page has no sentences
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// First sentence joined by single spaces
    ///
    /// Empty string when the page has no sentences.
    #[must_use]
    pub fn label(&self) -> String {
        self.sentences
            .first()
            .map(|words| words.join(" "))
            .unwrap_or_default()
    }
}

/// Concatenate two pages without creating a branch point
///
/// Keeps `a`'s title; sentences and keywords of `b` follow those of `a`.
#[must_use]
pub fn merge_content(a: &Page, b: &Page) -> Page {
    let sentences = a
        .sentences
        .iter()
        .chain(b.sentences.iter())
        .cloned()
        .collect();
    let keywords = a
        .keywords
        .iter()
        .chain(b.keywords.iter())
        .cloned()
        .collect();

    Page {
        title: a.title.clone(),
        sentences,
        keywords,
    }
}

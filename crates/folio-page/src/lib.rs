//! Folio Page Model
//!
//! Immutable units of generated text consumed by the history engine.
//!
//! # Core Concepts
//!
//! - [`Page`]: one generated passage (title, ordered sentences, keywords)
//! - [`Sentence`]: ordered words of one sentence
//! - [`merge_content`]: flat concatenation of two pages
//! - [`parse_page`]: split raw generator output into a [`Page`]
//!
//! # Example
//!
//! ```rust
//! use folio_page::{merge_content, parse_page};
//!
//! let first = parse_page("<Dawn> The sun rose. Birds sang.", vec!["sun".into()], None);
//! let next = parse_page("It was warm.", vec!["heat".into()], Some(first.title()));
//!
//! let merged = merge_content(&first, &next);
//! assert_eq!(merged.title(), "<Dawn>");
//! assert_eq!(merged.sentence_count(), 3);
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod page;
mod parse;

pub use page::{merge_content, Page, Sentence};
pub use parse::parse_page;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Folio Core - branching page histories
//!
//! Keeps every generated page of a narrative in a tree so generation can
//! resume from any earlier point without losing alternatives:
//! - Creates histories from a first page
//! - Extends, branches, checks out and flat-appends through persistent tree updates
//! - Rebuilds the linear text from the root to the current node
//! - Detects stale writes with per-history revisions
//!
//! # Example
//!
//! ```rust
//! use folio_core::{HistoryStore, NodeId};
//! use folio_page::parse_page;
//!
//! let store = HistoryStore::new();
//! let history = store.create_history(parse_page("<T> A B.", vec![], None))?;
//!
//! store.extend_history(history.id(), parse_page("C.", vec![], None), "happy path")?;
//! store.checkout(history.id(), NodeId::ROOT)?;
//! let alt = store.extend_history(history.id(), parse_page("D.", vec![], None), "alt path")?;
//!
//! assert_eq!(alt.root().child_count(), 2);
//! assert_eq!(alt.text()?.len(), 2);
//! # Ok::<(), folio_core::HistoryError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod generation;
pub mod history;
pub mod store;
pub mod types;

pub use error::{GenerationError, HistoryError};
pub use generation::{continue_history, start_history, GenerationContext, PageGenerator};
pub use history::History;
pub use store::HistoryStore;
pub use types::{HistoryId, StoreConfig};

pub use folio_page::{merge_content, Page, Sentence};
pub use folio_tree::{HistoryNode, NodeId, NodePath, SiblingOrder};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

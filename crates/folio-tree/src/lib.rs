//! Folio History Trees
//!
//! Persistent branching trees of generated pages.
//!
//! # Core Concepts
//!
//! - [`HistoryNode`]: one vertex; owns its children through shared handles
//! - [`NodePath`]: ancestor-id sequence with a leading sentinel pair
//! - [`extend`]: path-copying insertion of a new branch
//! - [`resolve`] / [`assemble_text`]: navigation and linear text rebuild
//!
//! # Example
//!
//! ```rust
//! use folio_page::Page;
//! use folio_tree::{assemble_text, extend, HistoryNode, NodeId, SiblingOrder};
//!
//! let root = HistoryNode::make_root(Page::new("T", vec![vec!["A".into()]], vec![]));
//! let child = HistoryNode::make_child(
//!     NodeId(2),
//!     Page::new("T", vec![vec!["B".into()]], vec![]),
//!     "continue",
//!     root.address(),
//! );
//!
//! let tree = extend(&root, child, &root.address(), SiblingOrder::InPlace)?;
//! let text = assemble_text(&tree, &tree.find(NodeId(2)).unwrap().address());
//! assert_eq!(text.len(), 2);
//! # Ok::<(), folio_tree::TreeError>(())
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod error;
mod id;
mod navigate;
mod node;
mod path;
mod update;

pub use error::TreeError;
pub use id::NodeId;
pub use navigate::{assemble_text, assemble_text_strict, resolve, resolve_strict, walk};
pub use node::{DepthFirst, HistoryNode};
pub use path::{NodePath, SENTINEL_LEN};
pub use update::{extend, extend_lenient, replace_page, SiblingOrder};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

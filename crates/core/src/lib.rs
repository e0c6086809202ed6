//! world-core
//!
//! Core library for plain-text world-building notes.
//!
//! Every node (a kingdom, a character, a tavern) lives in its own `<slug>.txt`
//! file inside a single data directory. This crate owns the slug rules, the
//! node file codec, the data-directory layout, configuration resolution, and
//! the tree assembler that stitches nodes together by parent slug.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (the CLI today).

pub mod config;
pub mod error;
pub mod layout;
pub mod node;
pub mod slug;
pub mod tree;

pub use config::WorldConfig;
pub use error::{NodeError, NodeResult};
pub use layout::WorldLayout;
pub use node::{parse_node, read_node, render_node, write_node, Node};
pub use slug::{parent_key, slugify, unslug};
pub use tree::{Forest, Render, TreeEntry};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

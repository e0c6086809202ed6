use std::path::PathBuf;

use thiserror::Error;

/// Error type for node storage and tree operations.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The node file (or requested root) does not exist.
    #[error("Node not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// `add` without `--force` on a slug that already has a file.
    #[error("Refusing to overwrite existing node: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// The file is missing its type or parent header line.
    #[error("Malformed node file {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    /// A header field would not survive encoding (e.g. it contains a newline).
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Parent references loop back onto the current traversal path.
    #[error("Parent cycle detected at '{slug}' (path: {})", path.join(" -> "))]
    Cycle { slug: String, path: Vec<String> },

    /// The data directory could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Underlying filesystem error.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NodeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Convenience result type for node operations.
pub type NodeResult<T> = Result<T, NodeError>;

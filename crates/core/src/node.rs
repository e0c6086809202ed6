//! Node file codec.
//!
//! A node file is plain UTF-8 text:
//!
//! ```text
//! <Type>
//! <parent-slug or "-">
//! <notes line 1>
//! <notes line 2>
//! ...
//! ```
//!
//! This module is the only place that reads or writes node files, so the
//! format can change without touching callers.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NodeError, NodeResult};
use crate::slug::{parent_key, NO_PARENT};

/// Decoded contents of a single node file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Free-form kind, e.g. `Kingdom`.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Raw parent reference; `None` for roots.
    pub parent: Option<String>,
    /// Everything after the header, joined with `\n`.
    pub notes: String,
}

impl Node {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self { node_type: node_type.into(), parent: None, notes: String::new() }
    }

    pub fn with_parent(mut self, parent: Option<String>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Whether the parent reference resolves to no node at all (`-`, blank,
    /// or a path with no usable segment).
    pub fn is_root(&self) -> bool {
        self.parent.as_deref().and_then(parent_key).is_none()
    }

    /// Parent line as written to disk.
    pub fn parent_line(&self) -> &str {
        match self.parent.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => NO_PARENT,
        }
    }
}

/// Decode node text. `origin` is only used for error messages.
///
/// Files with fewer than two lines are rejected as malformed rather than
/// padded with defaults. The header lines tolerate CRLF; the notes are kept
/// byte-for-byte except for the one trailing `\n` the encoder adds.
pub fn parse_node(text: &str, origin: &Path) -> NodeResult<Node> {
    let malformed = |found: usize| NodeError::Malformed {
        path: origin.to_path_buf(),
        reason: format!("expected a type line and a parent line, found {found} line(s)"),
    };

    let (type_line, rest) =
        text.split_once('\n').ok_or_else(|| malformed(usize::from(!text.is_empty())))?;
    let (parent_line, body) = match rest.split_once('\n') {
        Some(split) => split,
        None if !rest.trim().is_empty() => (rest, ""),
        None => return Err(malformed(1)),
    };

    let node_type = type_line.trim().to_string();
    let parent = match parent_line.trim() {
        "" | NO_PARENT => None,
        other => Some(other.to_string()),
    };
    let notes = body.strip_suffix('\n').unwrap_or(body).to_string();

    Ok(Node { node_type, parent, notes })
}

/// Encode a node into file text.
pub fn render_node(node: &Node) -> String {
    let mut out = String::new();
    out.push_str(&node.node_type);
    out.push('\n');
    out.push_str(node.parent_line());
    out.push('\n');
    if !node.notes.is_empty() {
        out.push_str(&node.notes);
        out.push('\n');
    }
    out
}

/// Read raw node text, mapping a missing file to [`NodeError::NotFound`] and
/// non-UTF-8 content to [`NodeError::Malformed`].
pub fn read_node_text(path: &Path) -> NodeResult<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(NodeError::NotFound { path: path.to_path_buf() })
        }
        Err(err) if err.kind() == ErrorKind::InvalidData => Err(NodeError::Malformed {
            path: path.to_path_buf(),
            reason: "not valid UTF-8".to_string(),
        }),
        Err(err) => Err(NodeError::io(path, err)),
    }
}

/// Read and decode the node stored at `path`.
pub fn read_node(path: &Path) -> NodeResult<Node> {
    let text = read_node_text(path)?;
    let node = parse_node(&text, path)?;
    tracing::debug!(path = %path.display(), node_type = %node.node_type, "read node");
    Ok(node)
}

/// Write `node` to `path`.
///
/// Without `overwrite` the file is opened create-new, so an existing file is
/// never truncated. The parent directory must already exist.
pub fn write_node(path: &Path, node: &Node, overwrite: bool) -> NodeResult<()> {
    check_header_field("type", &node.node_type)?;
    if let Some(parent) = &node.parent {
        check_header_field("parent", parent)?;
    }

    let body = render_node(node);
    if overwrite {
        fs::write(path, body).map_err(|err| NodeError::io(path, err))?;
    } else {
        let mut file =
            fs::OpenOptions::new().write(true).create_new(true).open(path).map_err(|err| {
                if err.kind() == ErrorKind::AlreadyExists {
                    NodeError::AlreadyExists { path: path.to_path_buf() }
                } else {
                    NodeError::io(path, err)
                }
            })?;
        file.write_all(body.as_bytes()).map_err(|err| NodeError::io(path, err))?;
    }

    tracing::debug!(path = %path.display(), overwrite, "wrote node");
    Ok(())
}

/// Replace an existing node file with `text` verbatim, provided it decodes.
///
/// Used after an external edit: the new text must still carry both header
/// lines, otherwise the file on disk is left as it was.
pub fn rewrite_node_text(path: &Path, text: &str) -> NodeResult<Node> {
    if !path.is_file() {
        return Err(NodeError::NotFound { path: path.to_path_buf() });
    }
    let node = parse_node(text, path)?;
    fs::write(path, text).map_err(|err| NodeError::io(path, err))?;
    tracing::debug!(path = %path.display(), "rewrote node text");
    Ok(node)
}

fn check_header_field(field: &'static str, value: &str) -> NodeResult<()> {
    if value.contains('\n') || value.contains('\r') {
        return Err(NodeError::InvalidField {
            field,
            reason: "header values must fit on a single line".to_string(),
        });
    }
    Ok(())
}

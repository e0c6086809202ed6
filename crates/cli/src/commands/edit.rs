use std::fs;
use std::io::{ErrorKind, Write};
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};
use world_core::node::{read_node_text, rewrite_node_text};
use world_core::{WorldConfig, WorldLayout};

use crate::commands::nodes::display_name;

/// Outcome of an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    Updated,
}

/// Hand a node's raw text to `editor` and save whatever comes back.
///
/// The text is staged in a temporary file; the node file is only rewritten
/// when the editor exits cleanly and the result still has both header lines.
/// `editor` may carry arguments (`"code --wait"`).
pub fn edit_node_command(config: &WorldConfig, name: &str, editor: &str) -> Result<EditOutcome> {
    let layout = config.layout();
    let slug = WorldLayout::validate_name(name)?;
    let path = layout.node_path(name);
    let original = read_node_text(&path)?;

    let mut staged = tempfile::Builder::new()
        .prefix(&format!("{slug}-"))
        .suffix(".txt")
        .tempfile()
        .context("Failed to create temporary file for editing")?;
    staged.write_all(original.as_bytes()).context("Failed to stage node for editing")?;
    staged.flush().context("Failed to stage node for editing")?;

    run_editor(editor, staged.path())?;

    let edited = fs::read_to_string(staged.path())
        .with_context(|| format!("Failed to read edited text from {}", staged.path().display()))?;

    if edited == original {
        println!("No changes to {}", display_name(name));
        return Ok(EditOutcome::Unchanged);
    }

    rewrite_node_text(&path, &edited)
        .with_context(|| format!("Edited text for '{}' was not saved", display_name(name)))?;
    tracing::info!(path = %path.display(), "node edited");
    println!("Updated node: {}", path.display());
    Ok(EditOutcome::Updated)
}

fn run_editor(editor: &str, file: &std::path::Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or_else(|| anyhow!("Editor command is empty"))?;

    let status = Command::new(program).args(parts).arg(file).status().map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            anyhow!("Editor not found: {editor}")
        } else {
            anyhow!("Failed to launch editor '{editor}': {err}")
        }
    })?;

    if !status.success() {
        bail!("Editor '{editor}' exited with {status}; node left unchanged");
    }
    Ok(())
}

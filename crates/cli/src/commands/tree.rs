use anyhow::{Context, Result};
use serde::Serialize;
use world_core::{Forest, TreeEntry, WorldConfig};

use crate::commands::util::{print_json, require_data_dir};

/// JSON shape of `tree --json`.
#[derive(Debug, Serialize)]
pub struct TreeSnapshot {
    pub entries: Vec<TreeEntry>,
    pub detached: Vec<String>,
}

/// Render `entries` (pre-order, with depths) as indented lines with
/// `├─`/`└─` connectors. Top-level trees are separated by a blank line.
pub fn format_tree_lines(entries: &[TreeEntry]) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len());
    // last_at_depth[d]: whether the current ancestor at depth d is its parent's last child.
    let mut last_at_depth: Vec<bool> = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        let depth = entry.depth;
        let label = format!("{} [{}]", entry.name, entry.node_type);

        if depth == 0 {
            if i > 0 {
                lines.push(String::new());
            }
            last_at_depth.clear();
            last_at_depth.push(true);
            lines.push(label);
            continue;
        }

        let is_last = entries[i + 1..]
            .iter()
            .find(|next| next.depth <= depth)
            .map_or(true, |next| next.depth < depth);

        last_at_depth.truncate(depth);
        let mut line = String::new();
        for ancestor_last in last_at_depth.iter().skip(1) {
            line.push_str(if *ancestor_last { "   " } else { "│  " });
        }
        line.push_str(if is_last { "└─ " } else { "├─ " });
        line.push_str(&label);
        lines.push(line);
        last_at_depth.push(is_last);
    }

    lines
}

/// Print the node hierarchy, from `root` or from every root.
///
/// Nodes that no root reaches (dangling parent, or a parent loop) are listed
/// separately. A loop under an explicit `root` prints what was walked and
/// then fails.
pub fn tree_command(config: &WorldConfig, root: Option<&str>, json: bool) -> Result<()> {
    let layout = config.layout();
    require_data_dir(&layout)?;
    let forest = Forest::load(&layout)
        .with_context(|| format!("Failed to scan {}", layout.data_dir.display()))?;

    let mut entries = Vec::new();
    let mut cycle = None;
    for item in forest.render(root)? {
        match item {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                cycle = Some(err);
                break;
            }
        }
    }
    let detached = if root.is_none() { forest.detached() } else { Vec::new() };

    if json {
        print_json(&TreeSnapshot { entries, detached })?;
    } else {
        if entries.is_empty() && detached.is_empty() {
            println!("(no nodes)");
        }
        for line in format_tree_lines(&entries) {
            println!("{line}");
        }
        if !detached.is_empty() {
            println!();
            println!("Detached (missing or looping parent):");
            for slug in &detached {
                let parent = forest.node(slug).map(|n| n.parent_line()).unwrap_or("-");
                println!("  - {slug} (parent={parent})");
            }
        }
    }

    match cycle {
        Some(err) => Err(err).context("Tree walk stopped"),
        None => Ok(()),
    }
}

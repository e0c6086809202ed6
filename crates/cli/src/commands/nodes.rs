use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use world_core::{
    parent_key, read_node, slugify, unslug, write_node, Forest, Node, WorldConfig, WorldLayout,
};

use crate::commands::util::{print_json, require_data_dir, NodeSummary};

/// Create a node file. Existing nodes are only replaced with `force`.
///
/// The parent reference is normalized to a slug (`Edoras`, `edoras` and
/// `/continents/edoras` all become `edoras`); `-` or nothing makes a root.
pub fn add_node_command(
    config: &WorldConfig,
    name: &str,
    node_type: &str,
    parent: Option<&str>,
    notes: &str,
    force: bool,
) -> Result<PathBuf> {
    let layout = config.layout();
    let slug = WorldLayout::validate_name(name)?;

    fs::create_dir_all(&layout.data_dir).with_context(|| {
        format!("Failed to create data directory: {}", layout.data_dir.display())
    })?;

    let parent = parent.and_then(parent_key);
    if let Some(p) = &parent {
        if !layout.node_path(p).exists() {
            tracing::warn!(node = %slug, parent = %p, "parent node does not exist yet");
        }
    }

    let path = layout.node_path(name);
    let existed = path.exists();
    let node = Node::new(node_type.trim()).with_parent(parent).with_notes(notes);
    write_node(&path, &node, force)?;

    if existed {
        println!("Overwrote node: {}", path.display());
    } else {
        println!("Created node: {}", path.display());
    }
    Ok(path)
}

/// Load one node by display name or slug.
pub fn load_node(config: &WorldConfig, name: &str) -> Result<NodeSummary> {
    let layout = config.layout();
    let node = read_node(&layout.node_path(name))?;
    Ok(NodeSummary::new(&slugify(name), &node))
}

/// Print a node's fields.
pub fn show_node_command(config: &WorldConfig, name: &str, json: bool) -> Result<()> {
    let summary = load_node(config, name)?;

    if json {
        return print_json(&summary);
    }

    println!("Name:   {}", summary.name);
    println!("Slug:   {}", summary.slug);
    println!("Type:   {}", summary.node_type);
    println!("Parent: {}", summary.parent_display());
    println!("Notes:");
    if summary.notes.is_empty() {
        println!("(none)");
    } else {
        println!("{}", summary.notes);
    }
    Ok(())
}

/// Every node, optionally filtered by type (case-insensitive), ordered by slug.
pub fn collect_nodes(config: &WorldConfig, type_filter: Option<&str>) -> Result<Vec<NodeSummary>> {
    let layout = config.layout();
    require_data_dir(&layout)?;
    let forest = Forest::load(&layout)
        .with_context(|| format!("Failed to scan {}", layout.data_dir.display()))?;

    let summaries: Vec<NodeSummary> = match type_filter {
        Some(t) => {
            forest.nodes_of_type(t).map(|(slug, node)| NodeSummary::new(slug, node)).collect()
        }
        None => forest.nodes().map(|(slug, node)| NodeSummary::new(slug, node)).collect(),
    };
    Ok(summaries)
}

/// One flat-list row: `slug [Type] parent=...`.
pub fn format_list_row(summary: &NodeSummary) -> String {
    format!("{:30}  [{}]  parent={}", summary.slug, summary.node_type, summary.parent_display())
}

/// Print every node (optionally only one type).
pub fn list_nodes_command(config: &WorldConfig, type_filter: Option<&str>, json: bool) -> Result<()> {
    let summaries = collect_nodes(config, type_filter)?;

    if json {
        return print_json(&summaries);
    }

    if summaries.is_empty() {
        println!("(no nodes)");
        return Ok(());
    }
    for summary in &summaries {
        println!("{}", format_list_row(summary));
    }
    Ok(())
}

/// Display name for a slug, used in confirmations.
pub fn display_name(name: &str) -> String {
    unslug(&slugify(name))
}

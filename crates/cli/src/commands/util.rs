use anyhow::{bail, Result};
use serde::Serialize;
use world_core::slug::NO_PARENT;
use world_core::{unslug, Node, WorldLayout};

/// Serializable view of one node, used by `show --json` and `list --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    pub slug: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub parent: Option<String>,
    pub notes: String,
}

impl NodeSummary {
    pub fn new(slug: &str, node: &Node) -> Self {
        Self {
            slug: slug.to_string(),
            name: unslug(slug),
            node_type: node.node_type.clone(),
            parent: node.parent.clone(),
            notes: node.notes.clone(),
        }
    }

    /// Parent column text: the raw reference or `-`.
    pub fn parent_display(&self) -> &str {
        self.parent.as_deref().unwrap_or(NO_PARENT)
    }
}

/// Fail with a pointer to `init` when the data directory is missing.
pub fn require_data_dir(layout: &WorldLayout) -> Result<()> {
    if !layout.data_dir.is_dir() {
        bail!("No data directory: {} (run `world-builder init` first)", layout.data_dir.display());
    }
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let serialized = serde_json::to_string_pretty(value)?;
    println!("{}", serialized);
    Ok(())
}

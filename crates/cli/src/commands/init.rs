use std::fs;

use anyhow::{Context, Result};
use world_core::WorldConfig;

const README_BODY: &str =
    "World Builder data directory.\nYou can store your notes here in plain text files.\n";

/// Create the data directory (and its README) if it does not exist yet.
pub fn init_command(config: &WorldConfig) -> Result<()> {
    let layout = config.layout();

    fs::create_dir_all(&layout.data_dir).with_context(|| {
        format!("Failed to create data directory: {}", layout.data_dir.display())
    })?;

    if !layout.readme_path.exists() {
        fs::write(&layout.readme_path, README_BODY).with_context(|| {
            format!("Failed to write README: {}", layout.readme_path.display())
        })?;
    }

    tracing::info!(dir = %layout.data_dir.display(), "initialized data directory");
    println!("Initialized data directory at: {}", layout.data_dir.display());
    Ok(())
}

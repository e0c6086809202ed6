pub mod commands;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;
use world_core::WorldConfig;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "WORLD_BUILDER_LOG";

/// Editor used when neither `EDITOR` nor `VISUAL` is set.
pub const FALLBACK_EDITOR: &str = "nano";

/// Resolve the data directory for this invocation.
pub fn resolve_config(dir: Option<&str>) -> Result<WorldConfig> {
    WorldConfig::resolve(dir).context("Failed to resolve data directory")
}

/// Install the stderr log subscriber.
///
/// `WORLD_BUILDER_LOG` wins when set; otherwise the level follows the number
/// of `-v` flags (warn, info, debug).
pub fn init_logging(verbosity: u8) -> Result<()> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to initialize logging: {err}"))
}

/// Pick the editor command: `EDITOR`, then `VISUAL`, then `nano`.
pub fn resolve_editor(editor: Option<String>, visual: Option<String>) -> String {
    editor
        .filter(|e| !e.trim().is_empty())
        .or_else(|| visual.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{NodeError, NodeResult};
use crate::layout::WorldLayout;

/// Environment variable that overrides the default data directory.
pub const DIR_ENV_VAR: &str = "WORLD_BUILDER_DIR";

/// Resolved settings for one invocation.
///
/// Built once by the frontend and passed into every operation; there is no
/// process-wide default directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldConfig {
    pub data_dir: PathBuf,
}

impl WorldConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Resolve the data directory: explicit flag, then `WORLD_BUILDER_DIR`,
    /// then `~/.local/share/world_builder`.
    pub fn resolve(dir_flag: Option<&str>) -> NodeResult<Self> {
        let env_dir = env::var(DIR_ENV_VAR).ok().filter(|v| !v.trim().is_empty());
        Self::resolve_with(dir_flag, env_dir.as_deref(), dirs::home_dir())
    }

    /// Same as [`WorldConfig::resolve`] with the environment passed in.
    pub fn resolve_with(
        dir_flag: Option<&str>,
        env_dir: Option<&str>,
        home: Option<PathBuf>,
    ) -> NodeResult<Self> {
        let raw = match dir_flag.or(env_dir) {
            Some(raw) => raw,
            None => {
                let home = home.ok_or_else(|| {
                    NodeError::Config("could not determine the home directory".to_string())
                })?;
                return Ok(Self::new(default_data_dir(&home)));
            }
        };
        Ok(Self::new(expand_tilde(raw, home.as_deref())?))
    }

    pub fn layout(&self) -> WorldLayout {
        WorldLayout::new(&self.data_dir)
    }
}

/// `~/.local/share/world_builder` under the given home.
pub fn default_data_dir(home: &Path) -> PathBuf {
    home.join(".local").join("share").join("world_builder")
}

fn expand_tilde(raw: &str, home: Option<&Path>) -> NodeResult<PathBuf> {
    let rest = if raw == "~" {
        ""
    } else if let Some(rest) = raw.strip_prefix("~/") {
        rest
    } else {
        return Ok(PathBuf::from(raw));
    };

    let home = home.ok_or_else(|| {
        NodeError::Config(format!("cannot expand '{raw}' without a home directory"))
    })?;
    Ok(if rest.is_empty() { home.to_path_buf() } else { home.join(rest) })
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NodeError, NodeResult};
use crate::slug::slugify;

/// Extension every node file carries.
pub const NODE_EXTENSION: &str = "txt";

/// Name of the marker file `init` drops into the data directory.
pub const README_FILE: &str = "README.txt";

/// Logical layout of a data directory.
///
/// Path arithmetic is pure; only [`WorldLayout::node_files`] touches the
/// filesystem. Frontends are responsible for creating the directory itself.
#[derive(Debug, Clone)]
pub struct WorldLayout {
    /// Directory holding every node file.
    pub data_dir: PathBuf,
    /// Path to the README written by `init`.
    pub readme_path: PathBuf,
}

impl WorldLayout {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        let readme_path = data_dir.join(README_FILE);
        Self { data_dir, readme_path }
    }

    /// File that stores the node called `name` (`<slug>.txt`).
    pub fn node_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{NODE_EXTENSION}", slugify(name)))
    }

    /// Whether `name` slugs to something usable as a filename.
    pub fn validate_name(name: &str) -> NodeResult<String> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(NodeError::InvalidField {
                field: "name",
                reason: format!("'{name}' has no letters or digits to build a file name from"),
            });
        }
        Ok(slug)
    }

    /// All node files in the data directory, sorted by file name.
    ///
    /// The scan is non-recursive and skips the directory README.
    pub fn node_files(&self) -> NodeResult<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(NodeError::NotFound { path: self.data_dir.clone() });
            }
            Err(err) => return Err(NodeError::io(&self.data_dir, err)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| NodeError::io(&self.data_dir, err))?;
            let file_type = entry.file_type().map_err(|err| NodeError::io(entry.path(), err))?;
            if !file_type.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(NODE_EXTENSION) {
                continue;
            }
            if path.file_name().and_then(|n| n.to_str()) == Some(README_FILE) {
                continue;
            }
            files.push(path);
        }

        files.sort();
        tracing::debug!(dir = %self.data_dir.display(), count = files.len(), "scanned node files");
        Ok(files)
    }
}

/// File stem of a node file; for well-formed names this is the node's slug.
pub fn file_stem_of(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_path_uses_slug() {
        let layout = WorldLayout::new("/data");
        assert_eq!(layout.node_path("The Iron Hills"), PathBuf::from("/data/the_iron_hills.txt"));
        assert_eq!(layout.readme_path, PathBuf::from("/data/README.txt"));
    }

    #[test]
    fn validate_name_rejects_symbol_only_names() {
        assert!(WorldLayout::validate_name("???").is_err());
        assert_eq!(WorldLayout::validate_name("Avelon").unwrap(), "avelon");
    }
}

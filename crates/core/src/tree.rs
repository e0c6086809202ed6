//! Tree assembler.
//!
//! Scans a data directory once, decodes every node file, and groups nodes by
//! the slug their parent line points at. Rendering walks that grouping
//! depth-first with an explicit stack, so parent cycles end the walk instead
//! of recursing forever.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{NodeError, NodeResult};
use crate::layout::{file_stem_of, WorldLayout, NODE_EXTENSION};
use crate::node::{read_node, Node};
use crate::slug::{parent_key, slugify, unslug};

/// One line of a tree rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub depth: usize,
    pub slug: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

/// A node file that was left out of the forest because it did not decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Every decoded node of a data directory, grouped by parent slug.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    data_dir: PathBuf,
    nodes: BTreeMap<String, Node>,
    roots: Vec<String>,
    children: BTreeMap<String, Vec<String>>,
    skipped: Vec<SkippedFile>,
}

impl Forest {
    /// Scan `layout` and decode every node file.
    ///
    /// Malformed files (including non-UTF-8 ones) and files whose name is not
    /// already a slug are skipped and logged; any other IO failure aborts the
    /// scan.
    pub fn load(layout: &WorldLayout) -> NodeResult<Self> {
        let mut decoded = Vec::new();
        let mut skipped = Vec::new();

        for path in layout.node_files()? {
            let Some(stem) = file_stem_of(&path) else {
                continue;
            };
            let slug = slugify(&stem);
            if slug != stem {
                let reason = if slug.is_empty() {
                    format!("file name '{stem}' has no letters or digits")
                } else {
                    format!("file name '{stem}' is not a slug (expected {slug}.{NODE_EXTENSION})")
                };
                tracing::warn!(path = %path.display(), %reason, "skipping node file");
                skipped.push(SkippedFile { path, reason });
                continue;
            }
            match read_node(&path) {
                Ok(node) => decoded.push((slug, node)),
                Err(err @ NodeError::Malformed { .. }) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping malformed node file");
                    skipped.push(SkippedFile { path, reason: err.to_string() });
                }
                Err(err) => return Err(err),
            }
        }

        let mut forest = Self::from_nodes(decoded);
        forest.data_dir = layout.data_dir.clone();
        forest.skipped = skipped;
        Ok(forest)
    }

    /// Build a forest from already-decoded `(slug, node)` pairs.
    pub fn from_nodes(nodes: impl IntoIterator<Item = (String, Node)>) -> Self {
        let mut forest = Self::default();
        for (slug, node) in nodes {
            forest.nodes.insert(slug, node);
        }

        for (slug, node) in &forest.nodes {
            match node.parent.as_deref().and_then(parent_key) {
                Some(parent) => forest.children.entry(parent).or_default().push(slug.clone()),
                None => forest.roots.push(slug.clone()),
            }
        }

        sort_bucket(&mut forest.roots);
        for bucket in forest.children.values_mut() {
            sort_bucket(bucket);
        }
        forest
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, slug: &str) -> Option<&Node> {
        self.nodes.get(slug)
    }

    /// All nodes ordered by slug.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.nodes.iter().map(|(slug, node)| (slug.as_str(), node))
    }

    /// Nodes whose type matches `node_type`, ignoring case (Unicode-aware).
    pub fn nodes_of_type<'a>(
        &'a self,
        node_type: &str,
    ) -> impl Iterator<Item = (&'a str, &'a Node)> + 'a {
        let wanted = node_type.to_lowercase();
        self.nodes().filter(move |(_, node)| node.node_type.to_lowercase() == wanted)
    }

    /// Children grouped under `parent`; `None` is the root bucket.
    pub fn children(&self, parent: Option<&str>) -> &[String] {
        match parent {
            None => &self.roots,
            Some(slug) => self.children.get(slug).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Number of nodes across every bucket, roots included.
    pub fn grouped_count(&self) -> usize {
        self.roots.len() + self.children.values().map(Vec::len).sum::<usize>()
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Depth-first, pre-order walk from `root` (a name or slug), or from every
    /// root when `None`.
    ///
    /// Fails with [`NodeError::NotFound`] when the requested root has no file.
    /// Each call starts a fresh walk.
    pub fn render(&self, root: Option<&str>) -> NodeResult<Render<'_>> {
        let stack = match root {
            Some(name) => {
                let slug = slugify(name);
                let Some((key, _)) = self.nodes.get_key_value(&slug) else {
                    return Err(NodeError::NotFound { path: self.node_file(&slug) });
                };
                vec![(key.as_str(), 0)]
            }
            None => self.roots.iter().rev().map(|slug| (slug.as_str(), 0)).collect(),
        };
        Ok(Render { forest: self, stack, path: Vec::new(), done: false })
    }

    /// Nodes no root reaches: dangling parents and rootless cycles.
    pub fn detached(&self) -> Vec<String> {
        let reachable: BTreeSet<String> = match self.render(None) {
            Ok(walk) => walk.filter_map(Result::ok).map(|entry| entry.slug).collect(),
            Err(_) => BTreeSet::new(),
        };
        self.nodes.keys().filter(|slug| !reachable.contains(*slug)).cloned().collect()
    }

    fn node_file(&self, slug: &str) -> PathBuf {
        self.data_dir.join(Path::new(&format!("{slug}.{NODE_EXTENSION}")))
    }
}

fn sort_bucket(bucket: &mut [String]) {
    bucket.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
}

/// Lazy tree walk produced by [`Forest::render`].
///
/// Yields one `Ok(TreeEntry)` per node. If a node turns up again on its own
/// ancestor path the walk yields a single [`NodeError::Cycle`] and stops.
#[derive(Debug)]
pub struct Render<'a> {
    forest: &'a Forest,
    stack: Vec<(&'a str, usize)>,
    path: Vec<&'a str>,
    done: bool,
}

impl<'a> Iterator for Render<'a> {
    type Item = NodeResult<TreeEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (slug, depth) = self.stack.pop()?;

        self.path.truncate(depth);
        if self.path.contains(&slug) {
            self.done = true;
            let mut path: Vec<String> = self.path.iter().map(|s| s.to_string()).collect();
            path.push(slug.to_string());
            tracing::warn!(slug, "parent cycle detected, stopping tree walk");
            return Some(Err(NodeError::Cycle { slug: slug.to_string(), path }));
        }
        self.path.push(slug);

        for child in self.forest.children(Some(slug)).iter().rev() {
            self.stack.push((child.as_str(), depth + 1));
        }

        let node_type =
            self.forest.nodes.get(slug).map(|node| node.node_type.clone()).unwrap_or_default();
        Some(Ok(TreeEntry { depth, slug: slug.to_string(), name: unslug(slug), node_type }))
    }
}

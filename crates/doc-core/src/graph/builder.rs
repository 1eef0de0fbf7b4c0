//! Walking the source tree and resolving imports

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use doc_fs::{NormalizedPath, normalize_lexical};
use walkdir::{DirEntry, WalkDir};

use super::imports::{extract_imports, is_relative};
use super::{DependencyGraph, EdgeKind, GraphEdge, GraphNode, NodeKind};
use crate::config::GraphSettings;

/// Builds a [`DependencyGraph`] for a project root
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    root: PathBuf,
    settings: GraphSettings,
}

impl GraphBuilder {
    pub fn new(root: impl Into<PathBuf>, settings: GraphSettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    /// Walk the tree and build the graph.
    ///
    /// Unreadable files and directories are logged and contribute nothing.
    pub fn build(&self) -> DependencyGraph {
        let files = self.scan_files();
        let tracked: HashSet<&str> = files.iter().map(String::as_str).collect();

        let mut seen = HashSet::new();
        let mut edges = Vec::new();

        for file in &files {
            let source = match fs::read_to_string(self.root.join(file)) {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!(file = %file, error = %e, "Skipping unreadable source file");
                    continue;
                }
            };

            for import in extract_imports(&source) {
                let Some(target) = self.resolve(file, &import) else {
                    continue;
                };
                if !tracked.contains(target.as_str()) {
                    tracing::trace!(file = %file, import = %import, "Import outside tracked set");
                    continue;
                }
                if seen.insert((file.clone(), target.clone())) {
                    edges.push(GraphEdge {
                        source: file.clone(),
                        target,
                        kind: EdgeKind::Import,
                    });
                }
            }
        }

        tracing::info!(nodes = files.len(), edges = edges.len(), "Built dependency graph");

        DependencyGraph {
            nodes: files
                .into_iter()
                .map(|id| GraphNode {
                    id,
                    kind: NodeKind::File,
                })
                .collect(),
            edges,
        }
    }

    /// Relative ids of every source file under the root, sorted.
    pub fn scan_files(&self) -> BTreeSet<String> {
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_skipped_dir(entry));

        let mut files = BTreeSet::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable path during source walk");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.is_source_file(entry.path()) {
                continue;
            }
            if let Some(id) = NormalizedPath::relative_to(entry.path(), &self.root) {
                files.insert(id.as_str().to_string());
            }
        }
        files
    }

    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        name.starts_with('.') || self.settings.ignored_dirs.iter().any(|d| *d == name)
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| self.settings.source_extensions.iter().any(|e| *e == ext))
    }

    /// Resolve an import of `importer` to a candidate node id.
    ///
    /// Relative targets probe the bare path, then each suffix, then each
    /// index file; the first candidate present on disk wins. Other targets
    /// are returned unchanged for a membership test.
    pub fn resolve(&self, importer: &str, target: &str) -> Option<String> {
        if !is_relative(target) {
            return Some(target.to_string());
        }

        let joined = match importer.rsplit_once('/') {
            Some((dir, _)) => format!("{}/{}", dir, target),
            None => target.to_string(),
        };
        let base = normalize_lexical(&joined);

        self.candidates(&base)
            .into_iter()
            .find(|candidate| self.root.join(candidate).is_file())
    }

    fn candidates(&self, base: &str) -> Vec<String> {
        let mut candidates = vec![base.to_string()];
        candidates.extend(
            self.settings
                .probe_suffixes
                .iter()
                .map(|suffix| format!("{}{}", base, suffix)),
        );
        candidates.extend(
            self.settings
                .index_files
                .iter()
                .map(|index| normalize_lexical(&format!("{}/{}", base, index))),
        );
        candidates
    }
}

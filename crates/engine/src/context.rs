use ir::{CallGraph, Catalog};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Counters gathered while building an [`AnalysisContext`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub files_discovered: usize,
    pub files_parsed: usize,
    pub parse_failures: usize,
    pub classes: usize,
    pub methods: usize,
    pub edges: usize,
    pub unresolved_edges: usize,
}

/// Everything the tracer reads: the class catalog and the call graph of
/// one project. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub root: PathBuf,
    pub catalog: Catalog,
    pub graph: CallGraph,
    pub stats: BuildStats,
}

impl AnalysisContext {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Last path component of the root, used to name output artifacts.
    pub fn project_name(&self) -> String {
        project_name(&self.root)
    }

    pub(crate) fn refresh_counts(&mut self) {
        self.stats.classes = self.catalog.len();
        self.stats.methods = self.catalog.method_count();
        self.stats.edges = self.graph.edge_count();
    }
}

/// Directory name of `root`, or `project` when it has none (e.g. `/`).
pub fn project_name(root: &Path) -> String {
    let canonical = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

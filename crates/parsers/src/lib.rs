//! Converts Java source files into the facts the tracer needs: the
//! per-class method catalog and the ordered call sites of every method.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::{debug, warn};

pub mod languages;
pub use languages::java::{
    self, parse_java, simple_type_name, CallSite, Callee, EntryAnnotations, FileFacts,
    FlatSymbolTable, MethodIndex, TypeLookup,
};

/// Determines whether the path is a Java source file.
///
/// # Example
/// ```
/// use parsers::is_java_file;
/// assert!(is_java_file(std::path::Path::new("src/App.java")));
/// assert!(!is_java_file(std::path::Path::new("pom.xml")));
/// ```
pub fn is_java_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("java"))
}

/// Analyses in-memory source. Returns `Ok(None)` when the grammar reports
/// syntax errors; such files are skipped rather than half-analysed.
///
/// # Example
/// ```
/// use parsers::{analyze_source, EntryAnnotations};
/// let src = "class A { void run(String c) { Runtime.getRuntime().exec(c); } }";
/// let facts = analyze_source("A.java", src, &EntryAnnotations::default())
///     .unwrap()
///     .unwrap();
/// assert_eq!(facts.classes[0].0, "A");
/// assert_eq!(facts.calls.len(), 2);
/// ```
pub fn analyze_source(
    file_path: &str,
    content: &str,
    annotations: &EntryAnnotations,
) -> Result<Option<FileFacts>> {
    let tree = parse_java(content)?;
    let root = tree.root_node();
    if root.has_error() || root.is_error() {
        warn!(file = file_path, "java source contains parse errors");
        return Ok(None);
    }
    Ok(Some(java::analyze_tree(root, content, file_path, annotations)))
}

/// Reads a file and produces its [`FileFacts`]. Read failures are errors;
/// syntax errors yield `Ok(None)`.
pub fn parse_file(path: &Path, annotations: &EntryAnnotations) -> Result<Option<FileFacts>> {
    debug!(file = %path.display(), "Parsing file");
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    analyze_source(&path.to_string_lossy(), &content, annotations)
}

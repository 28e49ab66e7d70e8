//! Method source lookup for reports.
//!
//! Every `.java` file under the project root is indexed, path exclusions
//! included, so the code shown for a chain is found even when the file
//! was left out of the graph.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use ir::{CodeBlock, CodeLocator};
use rayon::prelude::*;
use tracing::{debug, info};
use tree_sitter::Node;

use super::catalog::declared_methods;
use super::{field_text, for_each_named, parse_java, CLASS_LIKE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MethodSite {
    start_row: usize,
    /// Row of the opening brace of the body, if the method has one.
    body_row: Option<usize>,
    end_row: usize,
}

#[derive(Debug, Clone)]
struct IndexedClass {
    name: String,
    /// First declaration wins for overloaded names.
    methods: HashMap<String, MethodSite>,
}

#[derive(Debug, Clone)]
struct IndexedFile {
    path: String,
    content: String,
    /// Classes first, then interfaces, enums and records; each group in
    /// source order.
    classes: Vec<IndexedClass>,
}

#[derive(Debug, Clone, Default)]
/// Class and method positions of every parseable Java file of a project,
/// in discovery order.
pub struct MethodIndex {
    files: Vec<IndexedFile>,
}

impl MethodIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every `.java` file below `root`. Files that cannot be read
    /// or that contain syntax errors are skipped.
    pub fn build(root: &Path) -> Result<Self> {
        let paths = loader::collect_java_files(root, |_| false)?;
        let files: Vec<IndexedFile> = paths
            .par_iter()
            .filter_map(|path| {
                let content = match fs::read_to_string(path) {
                    Ok(c) => c,
                    Err(e) => {
                        debug!(path = %path.display(), error = %e, "Skipping unreadable file");
                        return None;
                    }
                };
                index_file(path.to_string_lossy().into_owned(), content)
            })
            .collect();
        info!(files = files.len(), "Method index built");
        Ok(Self { files })
    }

    /// Adds one in-memory source file after the ones already indexed.
    /// Returns false when the source does not parse cleanly.
    pub fn insert_source(&mut self, path: impl Into<String>, content: impl Into<String>) -> bool {
        match index_file(path.into(), content.into()) {
            Some(file) => {
                self.files.push(file);
                true
            }
            None => false,
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl CodeLocator for MethodIndex {
    fn locate(&self, class_name: &str, method_name: &str) -> Option<CodeBlock> {
        self.files.iter().find_map(|file| {
            file.classes
                .iter()
                .filter(|c| c.name == class_name)
                .find_map(|c| c.methods.get(method_name))
                .map(|site| CodeBlock {
                    file_path: file.path.clone(),
                    source: extract_code_block(
                        &file.content,
                        site.start_row,
                        site.body_row,
                        site.end_row,
                    ),
                })
        })
    }
}

fn index_file(path: String, content: String) -> Option<IndexedFile> {
    let tree = match parse_java(&content) {
        Ok(t) => t,
        Err(e) => {
            debug!(path = %path, error = %e, "Skipping file");
            return None;
        }
    };
    let root = tree.root_node();
    if root.has_error() {
        debug!(path = %path, "Skipping file with syntax errors");
        return None;
    }
    let mut found = Vec::new();
    for_each_named(root, |node| {
        if let Some(class) = indexed_class(node, &content) {
            found.push(class);
        }
    });
    // stable: keeps source order inside each kind
    found.sort_by_key(|(rank, _)| *rank);
    let classes = found.into_iter().map(|(_, c)| c).collect();
    Some(IndexedFile {
        path,
        content,
        classes,
    })
}

/// Class-like declaration with its methods, tagged with the rank of its
/// kind in `CLASS_LIKE`.
fn indexed_class(node: Node, src: &str) -> Option<(usize, IndexedClass)> {
    let rank = CLASS_LIKE.iter().position(|k| *k == node.kind())?;
    let name = field_text(node, "name", src)?;
    let mut methods = HashMap::new();
    for method in declared_methods(node) {
        let Some(method_name) = field_text(method, "name", src) else {
            continue;
        };
        methods
            .entry(method_name.to_string())
            .or_insert_with(|| MethodSite {
                start_row: method.start_position().row,
                body_row: method
                    .child_by_field_name("body")
                    .map(|b| b.start_position().row),
                end_row: method.end_position().row,
            });
    }
    Some((
        rank,
        IndexedClass {
            name: name.to_string(),
            methods,
        },
    ))
}

/// Slices the lines of a method out of `content`.
///
/// Lines from `start_row` are copied verbatim. Brace counting starts on
/// `body_row` and the slice ends on the first line where the count
/// returns to zero, or on `end_row` if that comes first. Without a body
/// the slice runs to `end_row`.
///
/// # Example
/// ```
/// use parsers::java::extract_code_block;
/// let src = "class A {\n  void f() {\n    if (x) { y(); }\n  }\n}\n";
/// assert_eq!(
///     extract_code_block(src, 1, Some(1), 3),
///     "  void f() {\n    if (x) { y(); }\n  }\n"
/// );
/// ```
pub fn extract_code_block(
    content: &str,
    start_row: usize,
    body_row: Option<usize>,
    end_row: usize,
) -> String {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    if start_row >= lines.len() {
        return String::new();
    }
    let end_row = end_row.min(lines.len() - 1).max(start_row);
    let Some(body_row) = body_row else {
        return lines[start_row..=end_row].concat();
    };

    let mut depth: i64 = 0;
    let mut started = false;
    let mut last = end_row;
    for (row, line) in lines.iter().enumerate().take(end_row + 1).skip(body_row) {
        let opens = line.matches('{').count() as i64;
        let closes = line.matches('}').count() as i64;
        if !started && opens > 0 {
            started = true;
        }
        if started {
            depth += opens - closes;
            if depth <= 0 {
                last = row;
                break;
            }
        }
    }
    lines[start_row..=last.max(start_row)].concat()
}

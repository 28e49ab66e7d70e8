use anyhow::{anyhow, Context, Result};
use ir::ClassEntry;
use tree_sitter::{Node, Tree};

#[cfg(test)]
mod tests;

pub mod calls;
pub mod catalog;
pub mod extract;
pub mod symbol_table;

pub use calls::{CallSite, Callee};
pub use catalog::EntryAnnotations;
pub use extract::{extract_code_block, MethodIndex};
pub use symbol_table::{FlatSymbolTable, TypeLookup};

/// Node kinds that own methods and give them their class name.
pub(crate) const CLASS_LIKE: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
];

/// Everything one file contributes to the analysis context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFacts {
    pub file_path: String,
    /// Class-like declarations in traversal order.
    pub classes: Vec<(String, ClassEntry)>,
    /// Call sites in evaluation order.
    pub calls: Vec<CallSite>,
}

pub fn parse_java(content: &str) -> Result<Tree> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(tree_sitter_java::language())
        .context("load java grammar")?;
    parser
        .parse(content, None)
        .ok_or_else(|| anyhow!("failed to parse java source"))
}

/// Runs catalog extraction and call-site extraction over a parsed tree.
/// The symbol table built here lives only for this file.
pub fn analyze_tree(
    root: Node,
    content: &str,
    file_path: &str,
    annotations: &EntryAnnotations,
) -> FileFacts {
    let classes = catalog::extract_classes(root, content, file_path, annotations);
    let symbols = FlatSymbolTable::from_tree(root, content);
    let calls = calls::extract_calls(root, content, &symbols);
    tracing::debug!(
        file = file_path,
        classes = classes.len(),
        symbols = symbols.len(),
        calls = calls.len(),
        "Java file analysed"
    );
    FileFacts {
        file_path: file_path.to_string(),
        classes,
        calls,
    }
}

pub(crate) fn node_text<'a>(node: Node, src: &'a str) -> Option<&'a str> {
    node.utf8_text(src.as_bytes()).ok()
}

pub(crate) fn field_text<'a>(node: Node, field: &str, src: &'a str) -> Option<&'a str> {
    node.child_by_field_name(field)
        .and_then(|n| node_text(n, src))
}

/// Reduces a written type to the bare class name used in graph nodes:
/// generic arguments, annotations, array dimensions and the package prefix
/// are dropped.
///
/// # Example
/// ```
/// use parsers::simple_type_name;
/// assert_eq!(simple_type_name("List<String>"), "List");
/// assert_eq!(simple_type_name("java.util.Map<K, V>"), "Map");
/// assert_eq!(simple_type_name("@NonNull String[]"), "String");
/// ```
pub fn simple_type_name(text: &str) -> String {
    let base = text.split('<').next().unwrap_or(text);
    let base = base.split_whitespace().last().unwrap_or(base);
    let base = base.trim_end_matches(|c: char| c == '[' || c == ']' || c == '.');
    base.rsplit('.').next().unwrap_or(base).trim().to_string()
}

/// Calls `f` on every named node under `root` (inclusive) in pre-order.
/// Uses a tree cursor, so deep trees do not grow the call stack.
pub(crate) fn for_each_named<'a>(root: Node<'a>, mut f: impl FnMut(Node<'a>)) {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_named() {
            f(node);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

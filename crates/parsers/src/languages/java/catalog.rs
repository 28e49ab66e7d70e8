use std::collections::HashSet;

use ir::{ClassEntry, MethodFacts};
use tree_sitter::Node;

use super::{field_text, for_each_named, node_text, CLASS_LIKE};

/// Route annotations recognised out of the box (Spring MVC and JAX-RS).
pub const DEFAULT_ENTRY_ANNOTATIONS: &[&str] = &[
    "GetMapping",
    "PostMapping",
    "RequestMapping",
    "PutMapping",
    "DeleteMapping",
    "Path",
    "GET",
    "POST",
    "PUT",
    "DELETE",
];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Simple annotation names that mark a method as a web entry point.
pub struct EntryAnnotations {
    names: HashSet<String>,
}

impl Default for EntryAnnotations {
    fn default() -> Self {
        Self {
            names: DEFAULT_ENTRY_ANNOTATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl EntryAnnotations {
    /// Default set extended with `extra`.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for name in extra {
            set.names
                .insert(name.as_ref().trim_start_matches('@').to_string());
        }
        set
    }

    /// Matches on the last dotted segment, so `@org.x.GetMapping` counts.
    pub fn contains(&self, annotation: &str) -> bool {
        let simple = annotation.trim_start_matches('@');
        let simple = simple.rsplit('.').next().unwrap_or(simple);
        self.names.contains(simple)
    }
}

/// Collects every class-like declaration of the file with its directly
/// declared methods. Constructors are not methods here. Declarations whose
/// name node is missing are skipped.
pub fn extract_classes(
    root: Node,
    src: &str,
    file_path: &str,
    annotations: &EntryAnnotations,
) -> Vec<(String, ClassEntry)> {
    let mut out = Vec::new();
    for_each_named(root, |node| {
        if !CLASS_LIKE.contains(&node.kind()) {
            return;
        }
        if let Some(name) = field_text(node, "name", src) {
            let mut entry = ClassEntry {
                file_path: file_path.to_string(),
                ..Default::default()
            };
            for method in declared_methods(node) {
                let Some(method_name) = field_text(method, "name", src) else {
                    continue;
                };
                entry.methods.insert(
                    method_name.to_string(),
                    MethodFacts {
                        requires_params: has_parameters(method),
                        is_entry_point: has_entry_annotation(method, src, annotations),
                    },
                );
            }
            out.push((name.to_string(), entry));
        }
    });
    out
}

/// Method declarations that are direct members of a class-like body.
pub(crate) fn declared_methods(decl: Node) -> Vec<Node> {
    let mut methods = Vec::new();
    let Some(body) = decl.child_by_field_name("body") else {
        return methods;
    };
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        match member.kind() {
            "method_declaration" => methods.push(member),
            // enum constants come first, members live in this block
            "enum_body_declarations" => {
                let mut inner = member.walk();
                methods.extend(
                    member
                        .named_children(&mut inner)
                        .filter(|m| m.kind() == "method_declaration"),
                );
            }
            _ => {}
        }
    }
    methods
}

fn has_parameters(method: Node) -> bool {
    let Some(params) = method.child_by_field_name("parameters") else {
        return false;
    };
    let mut cursor = params.walk();
    let found = params
        .named_children(&mut cursor)
        .any(|p| matches!(p.kind(), "formal_parameter" | "spread_parameter"));
    found
}

fn has_entry_annotation(method: Node, src: &str, annotations: &EntryAnnotations) -> bool {
    let mut cursor = method.walk();
    for child in method.named_children(&mut cursor) {
        if child.kind() != "modifiers" {
            continue;
        }
        let mut inner = child.walk();
        for modifier in child.named_children(&mut inner) {
            if !matches!(modifier.kind(), "annotation" | "marker_annotation") {
                continue;
            }
            let name = modifier
                .child_by_field_name("name")
                .and_then(|n| node_text(n, src));
            if name.is_some_and(|n| annotations.contains(n)) {
                return true;
            }
        }
    }
    false
}

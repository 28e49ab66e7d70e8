use std::collections::HashMap;

use tree_sitter::Node;

use super::{field_text, for_each_named, node_text, simple_type_name};

/// Name-to-type lookup consulted when resolving a call receiver.
pub trait TypeLookup {
    fn type_of(&self, name: &str) -> Option<&str>;
}

/// One scope for the whole file: locals, fields and method parameters
/// share a single map and a later declaration of the same name replaces
/// the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatSymbolTable {
    types: HashMap<String, String>,
}

impl FlatSymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-order walk recording local variables, fields and the formal
    /// parameters of method declarations.
    pub fn from_tree(root: Node, src: &str) -> Self {
        let mut table = Self::new();
        for_each_named(root, |node| table.record(node, src));
        table
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: impl Into<String>) {
        self.types.insert(name.into(), ty.into());
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn record(&mut self, node: Node, src: &str) {
        match node.kind() {
            "local_variable_declaration" | "field_declaration" => {
                if let Some(ty) = field_text(node, "type", src) {
                    let ty = simple_type_name(ty);
                    let mut cursor = node.walk();
                    for decl in node.children_by_field_name("declarator", &mut cursor) {
                        if let Some(name) = field_text(decl, "name", src) {
                            self.insert(name, ty.clone());
                        }
                    }
                }
            }
            "method_declaration" => {
                if let Some(params) = node.child_by_field_name("parameters") {
                    self.collect_parameters(params, src);
                }
            }
            _ => {}
        }
    }

    fn collect_parameters(&mut self, params: Node, src: &str) {
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            match param.kind() {
                "formal_parameter" => {
                    if let (Some(name), Some(ty)) = (
                        field_text(param, "name", src),
                        field_text(param, "type", src),
                    ) {
                        self.insert(name, simple_type_name(ty));
                    }
                }
                // `String... args`: type and declarator are unnamed children
                "spread_parameter" => {
                    let mut inner = param.walk();
                    let mut ty = None;
                    let mut name = None;
                    for child in param.named_children(&mut inner) {
                        match child.kind() {
                            "modifiers" => {}
                            "variable_declarator" => name = field_text(child, "name", src),
                            _ if ty.is_none() => ty = node_text(child, src),
                            _ => {}
                        }
                    }
                    if let (Some(name), Some(ty)) = (name, ty) {
                        self.insert(name, simple_type_name(ty));
                    }
                }
                _ => {}
            }
        }
    }
}

impl TypeLookup for FlatSymbolTable {
    fn type_of(&self, name: &str) -> Option<&str> {
        self.types.get(name).map(String::as_str)
    }
}

impl TypeLookup for HashMap<String, String> {
    fn type_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

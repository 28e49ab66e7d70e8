//! Per-class method facts collected while parsing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::NodeId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodFacts {
    /// The method declares at least one formal parameter.
    pub requires_params: bool,
    /// The method carries a web-route annotation.
    pub is_entry_point: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// File that declared the class.
    pub file_path: String,
    /// Declared methods by name. A later overload replaces an earlier one.
    pub methods: BTreeMap<String, MethodFacts>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Class catalog keyed by simple class name.
pub struct Catalog {
    classes: HashMap<String, ClassEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `entry` under `name`, replacing any same-named class seen
    /// earlier. The replaced entry is returned.
    pub fn insert_class(
        &mut self,
        name: impl Into<String>,
        entry: ClassEntry,
    ) -> Option<ClassEntry> {
        self.classes.insert(name.into(), entry)
    }

    pub fn class(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.get(name)
    }

    pub fn method(&self, node: &NodeId) -> Option<&MethodFacts> {
        self.classes.get(&node.owner)?.methods.get(&node.member)
    }

    /// Whether `node` declares parameters. Methods missing from the
    /// catalog count as requiring parameters so they are never pruned.
    pub fn requires_params(&self, node: &NodeId) -> bool {
        self.method(node).map_or(true, |m| m.requires_params)
    }

    /// Whether `node` is a web entry point. Unknown methods are not.
    pub fn is_entry_point(&self, node: &NodeId) -> bool {
        self.method(node).is_some_and(|m| m.is_entry_point)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn method_count(&self) -> usize {
        self.classes.values().map(|c| c.methods.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ClassEntry)> {
        self.classes.iter()
    }
}

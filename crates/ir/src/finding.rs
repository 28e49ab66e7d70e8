//! Tracer output and the types handed to reporting.

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// Node ids from an entry point to the sink, both inclusive.
pub type TaintPath = Vec<NodeId>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// A taint path resolved to source locations. `chain` and `code` are
/// parallel: same length, same order.
pub struct CallChain {
    /// `<filePath>:<methodName>` per resolved node.
    pub chain: Vec<String>,
    /// Verbatim method source per resolved node.
    pub code: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Every chain that reaches one sink point, labelled with its rule.
pub struct Finding {
    pub vul_type: String,
    pub sink_desc: String,
    pub severity: String,
    /// `Class:method` of the sink point.
    pub sink: String,
    pub call_chains: Vec<CallChain>,
    /// The search hit its state cap, so `call_chains` may be incomplete.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// File declaring the method.
    pub file_path: String,
    /// Brace-balanced slice of the method declaration.
    pub source: String,
}

/// Locates the declaring file and the source text of a method.
///
/// Implementations are bound to a project root and return `None` when the
/// class or method cannot be found (for instance when it lives in a
/// dependency that was never parsed).
pub trait CodeLocator: Sync {
    fn locate(&self, class_name: &str, method_name: &str) -> Option<CodeBlock>;
}

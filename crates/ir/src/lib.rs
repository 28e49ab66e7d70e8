//! Main types shared by every stage of the tracer.
//!
//! Graph nodes are [`NodeId`] values (`Owner:member`), deliberately
//! unqualified: no package, no overload signature and no inheritance
//! information. The [`Catalog`] records per-class method facts and the
//! [`CallGraph`] keeps the ordered `caller -> callee` edges.

pub mod catalog;
pub mod finding;
pub mod graph;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use catalog::{Catalog, ClassEntry, MethodFacts};
pub use finding::{CallChain, CodeBlock, CodeLocator, Finding, TaintPath};
pub use graph::{CallGraph, CallerIndex};

#[cfg(test)]
mod tests;

/// Owner and member used when a call happens outside any method declaration.
pub const UNKNOWN: &str = "unknown";
/// Marker for owners produced by a failed receiver resolution.
pub const DIAGNOSTIC_PREFIX: &str = "[!]";
/// Owner recorded when every receiver heuristic falls through.
pub const UNRESOLVED_OWNER: &str = "[!]unresolved";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
/// Method identifier of the form `Owner:member`.
pub struct NodeId {
    /// Simple class name (or a literal receiver, or a diagnostic owner).
    pub owner: String,
    /// Method name.
    pub member: String,
}

impl NodeId {
    pub fn new(owner: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            member: member.into(),
        }
    }

    /// The `unknown:unknown` sentinel caller.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN)
    }

    pub fn is_unknown(&self) -> bool {
        self.owner == UNKNOWN && self.member == UNKNOWN
    }

    /// True when the owner came from a failed resolution.
    pub fn is_diagnostic(&self) -> bool {
        self.owner.starts_with(DIAGNOSTIC_PREFIX)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.owner, self.member)
    }
}

impl FromStr for NodeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((owner, member)) if !owner.is_empty() && !member.is_empty() => {
                Ok(NodeId::new(owner, member))
            }
            _ => Err(format!("invalid node id '{s}', expected 'Class:method'")),
        }
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for NodeId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

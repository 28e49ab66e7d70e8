//! Method-level call graph.
//!
//! Every caller owns an append-only list of callees in the order the calls
//! were found, duplicates included. The order matters: the chained-call
//! receiver heuristic reads the last callee recorded for a caller.

use std::collections::{HashMap, HashSet};

use crate::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallGraph {
    /// Callers in first-insertion order.
    callers: Vec<NodeId>,
    edges: HashMap<NodeId, Vec<NodeId>>,
    edge_count: usize,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_edge(&mut self, caller: NodeId, callee: NodeId) {
        match self.edges.get_mut(&caller) {
            Some(callees) => callees.push(callee),
            None => {
                self.callers.push(caller.clone());
                self.edges.insert(caller, vec![callee]);
            }
        }
        self.edge_count += 1;
    }

    pub fn callees(&self, caller: &NodeId) -> &[NodeId] {
        self.edges.get(caller).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The most recent callee recorded for `caller`.
    pub fn last_callee(&self, caller: &NodeId) -> Option<&NodeId> {
        self.edges.get(caller).and_then(|v| v.last())
    }

    /// Callers with their callee lists, in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &[NodeId])> {
        self.callers.iter().map(move |c| (c, self.callees(c)))
    }

    /// Every caller whose callee list contains `callee`, linear scan.
    pub fn callers_of(&self, callee: &NodeId) -> Vec<&NodeId> {
        self.iter()
            .filter(|(_, callees)| callees.contains(callee))
            .map(|(caller, _)| caller)
            .collect()
    }

    /// Builds the reverse adjacency used by backward traversal.
    pub fn caller_index(&self) -> CallerIndex {
        let mut callers: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for (caller, callees) in self.iter() {
            let mut seen = HashSet::new();
            for callee in callees {
                if seen.insert(callee) {
                    callers
                        .entry(callee.clone())
                        .or_default()
                        .push(caller.clone());
                }
            }
        }
        CallerIndex { callers }
    }

    pub fn caller_count(&self) -> usize {
        self.callers.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.callers.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
/// Reverse view of a [`CallGraph`]: callee -> distinct callers, ordered as
/// the callers were first inserted in the graph.
pub struct CallerIndex {
    callers: HashMap<NodeId, Vec<NodeId>>,
}

impl CallerIndex {
    pub fn callers_of(&self, callee: &NodeId) -> &[NodeId] {
        self.callers.get(callee).map(Vec::as_slice).unwrap_or(&[])
    }
}

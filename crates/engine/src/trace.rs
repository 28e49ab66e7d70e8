//! Backward breadth-first search from a sink to entry points.

use ir::{Catalog, CallerIndex, NodeId, TaintPath};
use loader::RuleConfig;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Upper bound on queued states for a single sink.
pub const DEFAULT_MAX_STATES: usize = 500_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceLimits {
    /// A path is extended at most this many times, so it holds at most
    /// `max_depth + 1` nodes.
    pub max_depth: usize,
    /// Total states a trace may enqueue before it gives up.
    pub max_states: usize,
}

impl TraceLimits {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            max_states: DEFAULT_MAX_STATES,
        }
    }

    pub fn from_rules(rules: &RuleConfig) -> Self {
        Self::new(rules.depth)
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceOutcome {
    /// Completed paths, entry point first and sink last, in discovery order.
    pub paths: Vec<TaintPath>,
    /// The state ceiling stopped the search early.
    pub truncated: bool,
}

/// Walks callers backwards from `sink`.
///
/// Callers that take no parameters are dropped. A path is complete when its
/// new head is an entry point;
/// otherwise it is queued again until `max_depth` is reached. There is no
/// cycle detection: the depth bound and the state ceiling end the search.
pub fn trace_back(
    catalog: &Catalog,
    callers: &CallerIndex,
    sink: &NodeId,
    limits: &TraceLimits,
) -> TraceOutcome {
    let mut outcome = TraceOutcome::default();
    let mut queue: VecDeque<(TaintPath, usize)> = VecDeque::new();
    queue.push_back((vec![sink.clone()], 0));
    let mut enqueued = 1usize;

    while let Some((path, depth)) = queue.pop_front() {
        if depth >= limits.max_depth {
            continue;
        }
        let head = &path[0];
        let head_callers = callers.callers_of(head);
        if head_callers.is_empty() {
            continue;
        }
        debug!(method = %head, callers = head_callers.len(), "Tracing callers");
        for caller in head_callers {
            if !catalog.requires_params(caller) {
                debug!(caller = %caller, "Caller takes no parameters, path dropped");
                continue;
            }
            let mut extended = Vec::with_capacity(path.len() + 1);
            extended.push(caller.clone());
            extended.extend_from_slice(&path);
            if catalog.is_entry_point(caller) {
                debug!(path = %render(&extended), "Complete call chain");
                outcome.paths.push(extended);
            } else {
                if enqueued >= limits.max_states {
                    warn!(
                        sink = %sink,
                        states = enqueued,
                        "State limit reached, keeping the paths found so far"
                    );
                    outcome.truncated = true;
                    return outcome;
                }
                enqueued += 1;
                queue.push_back((extended, depth + 1));
            }
        }
    }
    outcome
}

pub(crate) fn render(path: &[NodeId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

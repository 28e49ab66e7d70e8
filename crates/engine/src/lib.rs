//! Analysis engine: builds the project call graph and traces every sink
//! point back to web entry points.
//! Ingestion and tracing both run on the rayon pool.

use anyhow::Result;
use ir::{CallerIndex, CodeLocator, Finding, NodeId};
use loader::{RuleConfig, SinkRule};
use rayon::prelude::*;
use tracing::{debug, info};

pub mod chain;
pub mod context;
pub mod ingest;
pub mod trace;

pub use chain::materialize;
pub use context::{project_name, AnalysisContext, BuildStats};
pub use ingest::{build_context, context_from_facts, merge_facts};
pub use trace::{trace_back, TraceLimits, TraceOutcome, DEFAULT_MAX_STATES};

/// Traces every sink point of every rule and returns one finding per sink
/// point that has at least one complete path, in rule order.
pub fn analyze(
    ctx: &AnalysisContext,
    rules: &RuleConfig,
    locator: &dyn CodeLocator,
    limits: &TraceLimits,
) -> Result<Vec<Finding>> {
    let mut jobs: Vec<(&SinkRule, NodeId)> = Vec::new();
    for rule in &rules.sink_rules {
        for sink in rule.sink_points()? {
            jobs.push((rule, sink));
        }
    }
    info!(
        sinks = jobs.len(),
        max_depth = limits.max_depth,
        "Tracing sink points"
    );

    let callers = ctx.graph.caller_index();
    let findings: Vec<Finding> = jobs
        .par_iter()
        .filter_map(|(rule, sink)| analyze_sink(ctx, &callers, rule, sink, locator, limits))
        .collect();
    info!(findings = findings.len(), "Tracing finished");
    Ok(findings)
}

/// Traces one sink point. `None` when no complete path exists.
pub fn analyze_sink(
    ctx: &AnalysisContext,
    callers: &CallerIndex,
    rule: &SinkRule,
    sink: &NodeId,
    locator: &dyn CodeLocator,
    limits: &TraceLimits,
) -> Option<Finding> {
    debug!(sink = %sink, rule = %rule.sink_name, "Tracing sink point");
    let outcome = trace_back(&ctx.catalog, callers, sink, limits);
    if outcome.paths.is_empty() {
        return None;
    }
    info!(sink = %sink, paths = outcome.paths.len(), "Call chains found");
    let call_chains = outcome
        .paths
        .iter()
        .map(|path| materialize(path, locator))
        .collect();
    Some(Finding {
        vul_type: rule.sink_name.clone(),
        sink_desc: rule.sink_desc.clone(),
        severity: rule.severity_level.clone(),
        sink: sink.to_string(),
        call_chains,
        truncated: outcome.truncated,
    })
}

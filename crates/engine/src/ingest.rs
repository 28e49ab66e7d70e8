//! Builds an [`AnalysisContext`] from a project directory.
//!
//! Files are parsed on the rayon pool and merged one by one in discovery
//! order. Merging in order keeps two things deterministic: a class defined
//! in several files ends up with the entry of the last one, and a chained
//! receiver sees the same previous callee a sequential build would.

use anyhow::{bail, Result};
use loader::RuleConfig;
use parsers::{EntryAnnotations, FileFacts};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, trace, warn};

use crate::context::AnalysisContext;

/// Walks `root`, skipping excluded directories, and builds the catalog and
/// call graph of every Java file that parses.
pub fn build_context(root: &Path, rules: &RuleConfig) -> Result<AnalysisContext> {
    if !root.is_dir() {
        bail!("project directory not found: {}", root.display());
    }
    let files = loader::collect_java_files(root, |rel| rules.is_excluded(rel))?;
    info!(files = files.len(), root = %root.display(), "Java files discovered");

    let annotations = EntryAnnotations::with_extra(&rules.entry_annotations);
    let parsed: Vec<_> = files
        .par_iter()
        .map(|path| (path, parsers::parse_file(path, &annotations)))
        .collect();

    let mut ctx = AnalysisContext::new(root);
    ctx.stats.files_discovered = files.len();
    for (path, result) in parsed {
        match result {
            Ok(Some(facts)) => {
                ctx.stats.files_parsed += 1;
                merge_facts(&mut ctx, facts);
            }
            Ok(None) => {
                ctx.stats.parse_failures += 1;
                warn!(file = %path.display(), "Skipping file with syntax errors");
            }
            Err(e) => {
                ctx.stats.parse_failures += 1;
                warn!(file = %path.display(), error = %e, "Skipping unreadable file");
            }
        }
    }
    ctx.refresh_counts();
    info!(
        classes = ctx.stats.classes,
        methods = ctx.stats.methods,
        edges = ctx.stats.edges,
        unresolved = ctx.stats.unresolved_edges,
        "Call graph built"
    );
    Ok(ctx)
}

/// Builds a context from facts that were already extracted, merging them
/// in iteration order.
pub fn context_from_facts<I>(root: &Path, facts: I) -> AnalysisContext
where
    I: IntoIterator<Item = FileFacts>,
{
    let mut ctx = AnalysisContext::new(root);
    for f in facts {
        ctx.stats.files_discovered += 1;
        ctx.stats.files_parsed += 1;
        merge_facts(&mut ctx, f);
    }
    ctx.refresh_counts();
    ctx
}

/// Adds one file to the context. Same-named classes replace earlier ones
/// and chained callees resolve against the edges merged so far.
pub fn merge_facts(ctx: &mut AnalysisContext, facts: FileFacts) {
    for (name, entry) in facts.classes {
        if let Some(previous) = ctx.catalog.insert_class(name.clone(), entry) {
            debug!(
                class = %name,
                previous = %previous.file_path,
                file = %facts.file_path,
                "Class declared again, keeping the later file"
            );
        }
    }
    for site in facts.calls {
        let callee = site.callee.resolve(&site.caller, &ctx.graph);
        if callee.is_diagnostic() {
            ctx.stats.unresolved_edges += 1;
            debug!(caller = %site.caller, callee = %callee, "[!] receiver not resolved");
        } else {
            trace!(caller = %site.caller, callee = %callee, "Call edge");
        }
        ctx.graph.push_edge(site.caller, callee);
    }
}

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};

use crate::args::{GraphArgs, ScanArgs};
use crate::config::{load_config, DEFAULT_RULES};
use crate::ui;

use engine::{analyze, build_context, TraceLimits};
use loader::RuleConfig;
use parsers::MethodIndex;
use reporters::{format_callgraph, CallGraphDump, ScanInfo};

fn init_logging(quiet: bool, debug: bool) {
    let level = if quiet {
        LevelFilter::OFF
    } else if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run_scan(args: ScanArgs) -> Result<()> {
    let user_cfg = load_config().context("failed to load configuration")?;
    init_logging(args.quiet, args.debug);
    if args.debug && !args.quiet {
        debug!("Debug mode enabled");
    }
    if !args.quiet {
        ui::print_header();
    }

    let rules_path = user_cfg.rules_path(args.rules.clone());
    let output_dir = user_cfg.output_dir(args.output.clone());
    info!(target = %args.project.display(), "Scan started");
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
    {
        error!("Failed to build global thread pool: {e}");
    }

    let rules = loader::load_rules(&rules_path)?;
    info!(
        rules = rules.sink_rules.len(),
        sinks = rules.sink_count(),
        depth = rules.depth,
        "Rules loaded"
    );

    let start_time = Instant::now();
    let ctx = build_context(&args.project, &rules)?;
    let locator = MethodIndex::build(&ctx.root)?;
    let mut limits = TraceLimits::from_rules(&rules);
    if let Some(max_states) = user_cfg.max_states(args.max_states) {
        limits = limits.with_max_states(max_states);
    }
    debug!(
        max_depth = limits.max_depth,
        max_states = limits.max_states,
        "Trace limits"
    );
    let findings = analyze(&ctx, &rules, &locator, &limits)?;

    let project_name = ctx.project_name();
    let paths = reporters::write_artifacts(
        &output_dir,
        &project_name,
        &ctx.root,
        &findings,
        !args.no_report,
    )?;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    if !args.quiet {
        ui::print_saved("JSON", &paths.json);
        if let Some(md) = &paths.markdown {
            ui::print_saved("REPORT", md);
        }
        if let Some(html) = &paths.html {
            ui::print_saved("HTML", html);
        }
        let scan_info = ScanInfo {
            project_name,
            sink_points: rules.sink_count(),
            duration_ms,
            stats: ctx.stats,
        };
        reporters::print_summary(&findings, Some(&scan_info))?;
    }

    let chains: usize = findings.iter().map(|f| f.call_chains.len()).sum();
    info!(findings = findings.len(), chains, duration_ms, "Scan completed");
    Ok(())
}

/// Rules used by `graph`: the explicit file, else the configured or default
/// file when present, else no exclusions and only the built-in annotations.
fn graph_rules(flag: Option<&Path>, configured: Option<&Path>) -> Result<RuleConfig> {
    if let Some(path) = flag.or(configured) {
        return loader::load_rules(path);
    }
    let default = Path::new(DEFAULT_RULES);
    if default.is_file() {
        return loader::load_rules(default);
    }
    Ok(RuleConfig {
        path_exclusions: Vec::new(),
        depth: 1,
        entry_annotations: Vec::new(),
        sink_rules: Vec::new(),
    })
}

pub fn run_graph(args: GraphArgs) -> Result<()> {
    let user_cfg = load_config().context("failed to load configuration")?;
    init_logging(false, args.debug);
    let rules = graph_rules(args.rules.as_deref(), user_cfg.rules.as_deref())?;
    let ctx = build_context(&args.project, &rules)?;
    let dump = CallGraphDump::from_context(&ctx);
    println!("{}", format_callgraph(&dump, args.format.into()));
    info!(
        nodes = dump.nodes.len(),
        edges = dump.edges.len(),
        "Call graph dumped"
    );
    Ok(())
}

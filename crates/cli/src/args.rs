use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::GraphFormat;

fn default_threads() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn parse_threads(s: &str) -> Result<usize, String> {
    let v: usize = s
        .parse()
        .map_err(|e: std::num::ParseIntError| e.to_string())?;
    if v == 0 {
        Err("threads must be greater than 0".into())
    } else {
        Ok(v)
    }
}

fn parse_max_states(s: &str) -> Result<usize, String> {
    let v: usize = s
        .parse()
        .map_err(|e: std::num::ParseIntError| e.to_string())?;
    if v == 0 {
        Err("max-states must be greater than 0".into())
    } else {
        Ok(v)
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "sinktrace - finds call chains from web entry points to dangerous sinks in Java projects",
    long_about = "sinktrace builds a call graph of a Java project and walks it backwards from every configured sink method, reporting each chain that starts at a web entry point (e.g. @RequestMapping, @Path).

Examples:
  sinktrace scan ./shop                          # Uses Rules/rules.json, writes to Result/
  sinktrace scan ./shop --rules my.yaml --output out
  sinktrace graph ./shop --format dot > graph.dot",
    subcommand_required = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Show version information
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Trace every sink point back to web entry points
    Scan(ScanArgs),
    /// Dump the project call graph
    Graph(GraphArgs),
}

#[derive(ClapArgs)]
pub struct ScanArgs {
    /// Root directory of the Java project
    pub project: PathBuf,
    /// Rule file (JSON or YAML) [default: Rules/rules.json]
    #[arg(long)]
    pub rules: Option<PathBuf>,
    /// Directory receiving the results [default: Result]
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Number of parallel threads to use
    #[arg(long, default_value_t = default_threads(), value_parser = parse_threads)]
    pub threads: usize,
    /// Upper bound on search states per sink point
    #[arg(long = "max-states", value_parser = parse_max_states)]
    pub max_states: Option<usize>,
    /// Skip the Markdown and HTML reports and only write the JSON artifact
    #[arg(long = "no-report")]
    pub no_report: bool,
    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
    /// Suppress non-essential output
    #[arg(long)]
    pub quiet: bool,
}

#[derive(ClapArgs)]
pub struct GraphArgs {
    /// Root directory of the Java project
    pub project: PathBuf,
    /// Rule file used for path exclusions and entry annotations
    #[arg(long)]
    pub rules: Option<PathBuf>,
    /// Output format for the graph
    #[arg(long, value_enum, default_value_t = GraphFormat::Text)]
    pub format: GraphFormat,
    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

//! Entry point for the command-line interface.
//! Delegates to dedicated modules for argument handling and scanning.

use sinktrace::args::{parse_cli, Commands};
use sinktrace::scan::{run_graph, run_scan};

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    match cli.command {
        Commands::Scan(args) => run_scan(args),
        Commands::Graph(args) => run_graph(args),
    }
}

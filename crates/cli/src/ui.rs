//! Banner and short status lines for the terminal.

use colored::*;
use std::env;
use std::path::Path;

/// Colour is disabled by `NO_COLOR`, dumb terminals and CI runs.
fn use_colored_output() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" || term == "unknown" {
            return false;
        }
    }
    if env::var("CI").is_ok() || env::var("CONTINUOUS_INTEGRATION").is_ok() {
        return false;
    }
    true
}

pub fn print_header() {
    let version = env!("CARGO_PKG_VERSION");
    // Avoid panics when the version exceeds the expected width
    let spaces = " ".repeat(24usize.saturating_sub(version.len()));
    eprintln!(
        r#"
    ╭──────────────────────────────────────╮
    │                                      │
    │          S I N K T R A C E           │
    │                                      │
    │     Entry-to-sink call chains        │
    │     for Java web projects            │
    │     Version: {version}{spaces}│
    │                                      │
    ╰──────────────────────────────────────╯
"#
    );
}

/// Prints where the artifacts of a scan were written.
pub fn print_saved(kind: &str, path: &Path) {
    if use_colored_output() {
        eprintln!("[{}] {}", kind.bright_green().bold(), path.display());
    } else {
        eprintln!("[{}] {}", kind, path.display());
    }
}

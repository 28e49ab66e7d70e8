//! Output for sinktrace results: the JSON artifact, the Markdown and HTML
//! reports, the console summary and call-graph dumps.

use engine::BuildStats;
use ir::Finding;
use std::io::{self, Write};

pub mod artifacts;
pub mod callgraph;
pub mod html;
pub mod markdown;

pub use artifacts::{write_artifacts, write_findings_json, ReportPaths};
pub use callgraph::{format_callgraph, CallGraphDump, Format};
pub use html::render_html;
pub use markdown::{format_utc, render_markdown};

/// Returns the severity upper-cased and wrapped in ANSI colour codes.
/// Unknown levels are printed without colour.
fn color_severity(sev: &str) -> String {
    let text = sev.to_uppercase();
    let code = match text.as_str() {
        "CRITICAL" | "HIGH" | "ERROR" => "\x1b[31m",
        "MEDIUM" | "WARNING" => "\x1b[33m",
        "LOW" | "INFO" => "\x1b[32m",
        _ => return text,
    };
    format!("{code}{text}\x1b[0m")
}

fn simple_box(title: &str) -> String {
    let width = title.chars().count() + 2;
    format!(
        "╭{}╮\n│ {} │\n╰{}╯\n",
        "─".repeat(width),
        title,
        "─".repeat(width)
    )
}

/// What the summary shows above the results.
#[derive(Debug, Clone)]
pub struct ScanInfo {
    pub project_name: String,
    pub sink_points: usize,
    pub duration_ms: u64,
    pub stats: BuildStats,
}

fn status_section(info: &ScanInfo) -> String {
    let mut output = simple_box("Analysis Status");
    output.push('\n');
    output.push_str(&format!(
        "    Traced {} sink points over {} Java files of {}\n\n",
        info.sink_points, info.stats.files_discovered, info.project_name
    ));
    output.push_str("    Metric                    Value\n");
    output.push_str(
        "    ──────────────────────────────────────────────────────────────\n",
    );
    let rows = [
        ("Files parsed", info.stats.files_parsed),
        ("Failed files", info.stats.parse_failures),
        ("Classes", info.stats.classes),
        ("Methods", info.stats.methods),
        ("Call edges", info.stats.edges),
        ("Unresolved edges", info.stats.unresolved_edges),
    ];
    for (name, value) in rows {
        output.push_str(&format!("    {name:<26}{value}\n"));
    }
    output.push_str(&format!(
        "    {:<26}{}ms\n",
        "Duration", info.duration_ms
    ));
    output
}

/// Prints the console summary to stdout.
///
/// # Example
/// ```
/// use reporters::print_summary;
/// print_summary(&[], None).unwrap();
/// ```
pub fn print_summary(findings: &[Finding], info: Option<&ScanInfo>) -> io::Result<()> {
    let mut out = io::stdout();
    write_summary(&mut out, findings, info)
}

/// Writes the console summary to any `Write`, used for tests.
pub fn write_summary<W: Write>(
    out: &mut W,
    findings: &[Finding],
    info: Option<&ScanInfo>,
) -> io::Result<()> {
    if let Some(info) = info {
        writeln!(out, "{}", status_section(info))?;
    }
    writeln!(out, "{}", simple_box("Results"))?;
    if findings.is_empty() {
        writeln!(out, "✔ No call chains found.")?;
        return Ok(());
    }
    let total: usize = findings.iter().map(|f| f.call_chains.len()).sum();
    writeln!(
        out,
        "⚠ {} sink point(s) reached by {} call chain(s):\n",
        findings.len(),
        total
    )?;
    for f in findings {
        let cap = if f.truncated { " [state cap hit]" } else { "" };
        writeln!(
            out,
            "{} {} {} ({} chain(s)){cap}",
            color_severity(&f.severity),
            f.vul_type,
            f.sink,
            f.call_chains.len()
        )?;
        writeln!(out, "    {}", f.sink_desc)?;
        for chain in &f.call_chains {
            if chain.chain.is_empty() {
                writeln!(out, "    ↳  (no source located)")?;
            } else {
                writeln!(out, "    ↳  {}", chain.chain.join(" → "))?;
            }
        }
        writeln!(out)?;
    }
    writeln!(out, "Total: {total}")?;
    Ok(())
}

#[cfg(test)]
mod tests;

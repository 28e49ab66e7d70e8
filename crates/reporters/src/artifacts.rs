use anyhow::{Context, Result};
use ir::Finding;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::info;

use crate::html::render_html;
use crate::markdown::{format_utc, render_markdown};

/// Files written for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub markdown: Option<PathBuf>,
    pub html: Option<PathBuf>,
}

/// Serialises findings as a pretty-printed JSON array.
pub fn write_findings_json<W: Write>(out: &mut W, findings: &[Finding]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, findings)?;
    writeln!(out)?;
    Ok(())
}

/// Writes `<out_dir>/<project>/sink_chains.json` and, unless disabled,
/// `VulReport_<project>.md` with its `.html` rendition next to it.
pub fn write_artifacts(
    out_dir: &Path,
    project_name: &str,
    project_path: &Path,
    findings: &[Finding],
    with_report: bool,
) -> Result<ReportPaths> {
    let target = out_dir.join(project_name);
    fs::create_dir_all(&target)
        .with_context(|| format!("Failed to create output directory: {}", target.display()))?;

    let json = target.join("sink_chains.json");
    let mut file = fs::File::create(&json)
        .with_context(|| format!("Failed to create {}", json.display()))?;
    write_findings_json(&mut file, findings)
        .with_context(|| format!("Failed to write {}", json.display()))?;
    info!(path = %json.display(), "Findings saved");

    if !with_report {
        return Ok(ReportPaths {
            json,
            markdown: None,
            html: None,
        });
    }

    let stem = format!("VulReport_{project_name}");
    let markdown = target.join(format!("{stem}.md"));
    let report = render_markdown(
        project_name,
        &project_path.display().to_string(),
        findings,
        &format_utc(SystemTime::now()),
    );
    fs::write(&markdown, &report)
        .with_context(|| format!("Failed to write {}", markdown.display()))?;
    info!(path = %markdown.display(), "Report saved");

    let html = target.join(format!("{stem}.html"));
    fs::write(&html, render_html(&stem, &report))
        .with_context(|| format!("Failed to write {}", html.display()))?;
    info!(path = %html.display(), "HTML report saved");

    Ok(ReportPaths {
        json,
        markdown: Some(markdown),
        html: Some(html),
    })
}

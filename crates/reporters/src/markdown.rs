use ir::Finding;
use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

/// Renders the Markdown report. One top-level section per finding and one
/// numbered sub-section per call chain, numbered across the whole report.
pub fn render_markdown(
    project_name: &str,
    project_path: &str,
    findings: &[Finding],
    generated_at: &str,
) -> String {
    let total: usize = findings.iter().map(|f| f.call_chains.len()).sum();
    let mut md = String::new();
    let _ = writeln!(md, "# sinktrace scan report");
    let _ = writeln!(md, "- Report time: {generated_at}");
    let _ = writeln!(md, "- Project name: **{project_name}**");
    let _ = writeln!(md, "- Source path: {project_path}");
    let _ = writeln!(md, "- Taint chains: **{total}** in total\n");

    let mut num = 1;
    for finding in findings {
        let _ = writeln!(
            md,
            "# {} ({} chain(s))\n",
            finding.vul_type,
            finding.call_chains.len()
        );
        let _ = writeln!(
            md,
            "Every call chain of the project that reaches the sink **'{}'**.\n",
            finding.sink
        );
        if finding.truncated {
            md.push_str("> Search stopped at the state cap; more chains may exist.\n\n");
        }
        for chain in &finding.call_chains {
            let _ = writeln!(md, "## Taint chain {num}\n");
            md.push_str("**1) Finding**\n\n");
            let _ = writeln!(md, "- Description: {}\n", finding.sink_desc);
            let _ = writeln!(md, "- Severity: **{}**\n", finding.severity);
            let _ = writeln!(md, "- Sink: **{}**\n", finding.sink);
            md.push_str("**2) Call chain**\n\n");
            for step in &chain.chain {
                let _ = writeln!(md, "- {step}");
            }
            md.push('\n');
            md.push_str("**3) Source**\n\n");
            md.push_str("```java\n");
            for (step, code) in chain.chain.iter().zip(&chain.code) {
                let _ = writeln!(md, "// {step}");
                let _ = writeln!(md, "{code}\n");
            }
            md.push_str("```\n\n");
            num += 1;
        }
        md.push('\n');
    }
    md
}

/// `YYYY-MM-DD HH:MM:SS UTC` for `time`.
///
/// # Example
/// ```
/// use std::time::{Duration, UNIX_EPOCH};
/// let t = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
/// assert_eq!(reporters::format_utc(t), "2023-11-14 22:13:20 UTC");
/// ```
pub fn format_utc(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (y, m, d) = civil_from_days(days);
    format!(
        "{y:04}-{m:02}-{d:02} {:02}:{:02}:{:02} UTC",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

// days since 1970-01-01 to proleptic Gregorian date
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let y = yoe + era * 400 + i64::from(m <= 2);
    (y, m, d)
}

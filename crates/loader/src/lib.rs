//! Loads the sink rule configuration (JSON or YAML) and validates it
//! before any source file is touched. A configuration error is the only
//! fatal condition of a run.

use anyhow::{anyhow, bail, Context};
use ir::NodeId;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Component, Path},
};
use tracing::debug;

mod walk;
pub use walk::{collect_java_files, visit};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// A vulnerability category and the library calls that trigger it.
pub struct SinkRule {
    /// Category label, e.g. "RCE".
    pub sink_name: String,
    /// Human description shown in reports.
    pub sink_desc: String,
    /// Free-form severity label copied into findings.
    pub severity_level: String,
    /// `pkg.ClassName:method1|method2` patterns.
    pub sinks: Vec<String>,
}

impl SinkRule {
    /// Expands every pattern of the rule into its sink points, in order.
    pub fn sink_points(&self) -> anyhow::Result<Vec<NodeId>> {
        let mut out = Vec::new();
        for pattern in &self.sinks {
            out.extend(
                parse_sink_pattern(pattern)
                    .with_context(|| format!("invalid sink in rule '{}'", self.sink_name))?,
            );
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Whole rule file.
pub struct RuleConfig {
    /// Directory names skipped anywhere below the project root.
    #[serde(default)]
    pub path_exclusions: Vec<String>,
    /// Maximum backward-trace depth.
    pub depth: usize,
    /// Extra annotation names that mark entry points.
    #[serde(default)]
    pub entry_annotations: Vec<String>,
    pub sink_rules: Vec<SinkRule>,
}

impl RuleConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.depth == 0 {
            bail!("depth must be greater than 0");
        }
        for rule in &self.sink_rules {
            rule.sink_points()?;
        }
        Ok(())
    }

    /// Whether `rel` (relative to the project root) crosses an excluded
    /// directory name.
    ///
    /// # Example
    /// ```
    /// use loader::RuleConfig;
    /// use std::path::Path;
    /// let cfg = RuleConfig {
    ///     path_exclusions: vec!["test".into()],
    ///     depth: 3,
    ///     entry_annotations: vec![],
    ///     sink_rules: vec![],
    /// };
    /// assert!(cfg.is_excluded(Path::new("src/test/java/A.java")));
    /// assert!(!cfg.is_excluded(Path::new("src/main/java/A.java")));
    /// ```
    pub fn is_excluded(&self, rel: &Path) -> bool {
        rel.components().any(|c| match c {
            Component::Normal(name) => self
                .path_exclusions
                .iter()
                .any(|ex| name.to_str() == Some(ex.as_str())),
            _ => false,
        })
    }

    /// Number of sink points across every rule.
    pub fn sink_count(&self) -> usize {
        self.sink_rules
            .iter()
            .filter_map(|r| r.sink_points().ok())
            .map(|p| p.len())
            .sum()
    }
}

/// Splits a `pkg.ClassName:m1|m2` pattern into `ClassName:m1`, `ClassName:m2`.
/// The package prefix is dropped since graph nodes are unqualified.
///
/// # Example
/// ```
/// use loader::parse_sink_pattern;
/// let points = parse_sink_pattern("java.lang.Runtime:exec|load").unwrap();
/// assert_eq!(points[0].to_string(), "Runtime:exec");
/// assert_eq!(points[1].to_string(), "Runtime:load");
/// ```
pub fn parse_sink_pattern(pattern: &str) -> anyhow::Result<Vec<NodeId>> {
    let (class, methods) = pattern
        .split_once(':')
        .ok_or_else(|| anyhow!("sink '{pattern}' must have the form 'Class:method'"))?;
    let class = class.trim().rsplit('.').next().unwrap_or_default();
    if class.is_empty() {
        bail!("sink '{pattern}' has an empty class name");
    }
    let mut out = Vec::new();
    for method in methods.split('|') {
        let method = method.trim();
        if method.is_empty() {
            bail!("sink '{pattern}' has an empty method name");
        }
        out.push(NodeId::new(class, method));
    }
    Ok(out)
}

/// Parses rule content. `yaml` selects the YAML front end, JSON otherwise.
pub fn parse_rules_str(content: &str, yaml: bool) -> anyhow::Result<RuleConfig> {
    let cfg: RuleConfig = if yaml {
        serde_yaml::from_str(content).context("failed to parse YAML rules")?
    } else {
        serde_json::from_str(content).context("failed to parse JSON rules")?
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Reads and validates the rule file at `path`.
pub fn load_rules(path: &Path) -> anyhow::Result<RuleConfig> {
    debug!(file = %path.display(), "Loading rules");
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file: {}", path.display()))?;
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let cfg = parse_rules_str(&data, yaml)
        .with_context(|| format!("Failed to parse rule file: {}", path.display()))?;
    debug!(
        rules = cfg.sink_rules.len(),
        sinks = cfg.sink_count(),
        depth = cfg.depth,
        "Rules loaded"
    );
    Ok(cfg)
}

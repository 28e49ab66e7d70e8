use engine::{AnalysisContext, BuildStats};
use ir::NodeId;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Output formats for the call graph.
pub enum Format {
    Text,
    Json,
    Dot,
}

#[derive(Debug, Serialize)]
pub struct CallGraphDump {
    pub nodes: Vec<CallNode>,
    pub edges: Vec<CallEdge>,
    pub stats: BuildStats,
}

#[derive(Debug, Serialize)]
pub struct CallNode {
    pub id: String,
    pub calls: Vec<String>,
    pub called_by: Vec<String>,
    pub is_entry: bool,
    pub requires_params: bool,
    pub unresolved: bool,
}

#[derive(Debug, Serialize)]
pub struct CallEdge {
    pub from: String,
    pub to: String,
    /// Number of call sites behind the edge.
    pub weight: usize,
}

impl CallGraphDump {
    /// Collects nodes in first-seen order and folds repeated edges into
    /// weights.
    pub fn from_context(ctx: &AnalysisContext) -> Self {
        let mut order: Vec<&NodeId> = Vec::new();
        let mut seen: HashSet<&NodeId> = HashSet::new();
        let mut edges: Vec<CallEdge> = Vec::new();
        let mut edge_at: HashMap<(&NodeId, &NodeId), usize> = HashMap::new();
        let mut calls: HashMap<&NodeId, Vec<String>> = HashMap::new();
        let mut called_by: HashMap<&NodeId, Vec<String>> = HashMap::new();

        for (caller, callees) in ctx.graph.iter() {
            if seen.insert(caller) {
                order.push(caller);
            }
            for callee in callees {
                if seen.insert(callee) {
                    order.push(callee);
                }
                match edge_at.get(&(caller, callee)) {
                    Some(&i) => edges[i].weight += 1,
                    None => {
                        edge_at.insert((caller, callee), edges.len());
                        edges.push(CallEdge {
                            from: caller.to_string(),
                            to: callee.to_string(),
                            weight: 1,
                        });
                        calls.entry(caller).or_default().push(callee.to_string());
                        called_by
                            .entry(callee)
                            .or_default()
                            .push(caller.to_string());
                    }
                }
            }
        }

        let nodes = order
            .into_iter()
            .map(|id| CallNode {
                id: id.to_string(),
                calls: calls.remove(id).unwrap_or_default(),
                called_by: called_by.remove(id).unwrap_or_default(),
                is_entry: ctx.catalog.is_entry_point(id),
                requires_params: ctx.catalog.requires_params(id),
                unresolved: id.is_diagnostic(),
            })
            .collect();

        Self {
            nodes,
            edges,
            stats: ctx.stats,
        }
    }
}

pub fn format_callgraph(dump: &CallGraphDump, format: Format) -> String {
    match format {
        Format::Json => serde_json::to_string_pretty(dump).unwrap_or_else(|_| "{}".to_string()),
        Format::Dot => callgraph_to_dot(dump),
        Format::Text => callgraph_to_text(dump),
    }
}

fn callgraph_to_text(dump: &CallGraphDump) -> String {
    let mut output = String::new();
    output.push_str("=== CALL GRAPH ===\n\n");
    output.push_str("METRICS:\n");
    output.push_str(&format!("  • Files parsed: {}\n", dump.stats.files_parsed));
    output.push_str(&format!("  • Failed files: {}\n", dump.stats.parse_failures));
    output.push_str(&format!("  • Classes: {}\n", dump.stats.classes));
    output.push_str(&format!("  • Methods: {}\n", dump.stats.methods));
    output.push_str(&format!("  • Call edges: {}\n", dump.stats.edges));
    output.push_str(&format!(
        "  • Unresolved edges: {}\n",
        dump.stats.unresolved_edges
    ));
    output.push('\n');

    output.push_str("METHODS:\n");
    for node in &dump.nodes {
        let status = if node.unresolved {
            "UNRESOLVED"
        } else if node.is_entry {
            "ENTRY"
        } else if !node.requires_params {
            "NO-PARAMS"
        } else {
            "INTERNAL"
        };
        output.push_str(&format!("  • {} ({})\n", node.id, status));
        if !node.calls.is_empty() {
            output.push_str(&format!("    calls: {}\n", node.calls.join(", ")));
        }
    }
    output.push('\n');

    output.push_str("CALLS:\n");
    for edge in &dump.edges {
        if edge.weight > 1 {
            output.push_str(&format!("  • {} -> {} (x{})\n", edge.from, edge.to, edge.weight));
        } else {
            output.push_str(&format!("  • {} -> {}\n", edge.from, edge.to));
        }
    }
    output
}

fn dot_id(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

fn callgraph_to_dot(dump: &CallGraphDump) -> String {
    let mut dot = String::from("digraph CallGraph {\n");
    dot.push_str("    rankdir=TB;\n");
    dot.push_str("    node [style=filled, shape=box, fontname=\"Arial\"];\n");
    dot.push_str("    edge [color=gray, fontname=\"Arial\"];\n\n");

    for node in &dump.nodes {
        let color = if node.unresolved {
            "#E74C3C"
        } else if node.is_entry {
            "#2ECC71"
        } else {
            "#3498DB"
        };
        dot.push_str(&format!(
            "    {} [fillcolor=\"{}\"];\n",
            dot_id(&node.id),
            color
        ));
    }

    for edge in &dump.edges {
        if edge.weight > 1 {
            dot.push_str(&format!(
                "    {} -> {} [label=\"{}\"];\n",
                dot_id(&edge.from),
                dot_id(&edge.to),
                edge.weight
            ));
        } else {
            dot.push_str(&format!(
                "    {} -> {};\n",
                dot_id(&edge.from),
                dot_id(&edge.to)
            ));
        }
    }

    dot.push('}');
    dot
}

use crate::{analyze_source, EntryAnnotations, FileFacts};
use ir::{CallGraph, NodeId};

mod extract;
mod receivers;

pub(super) fn facts(src: &str) -> FileFacts {
    analyze_source("T.java", src, &EntryAnnotations::default())
        .expect("parse java")
        .expect("source without syntax errors")
}

/// Resolves every call site of `src` in order, as ingestion does.
pub(super) fn edges(src: &str) -> Vec<(String, String)> {
    let mut graph = CallGraph::new();
    let mut out = Vec::new();
    for site in facts(src).calls {
        let callee = site.callee.resolve(&site.caller, &graph);
        out.push((site.caller.to_string(), callee.to_string()));
        graph.push_edge(site.caller, callee);
    }
    out
}

pub(super) fn edge(caller: &str, callee: &str) -> (String, String) {
    (caller.to_string(), callee.to_string())
}

pub(super) fn id(s: &str) -> NodeId {
    s.parse().expect("node id")
}

/// `String t = s + "a" + "a" + ...` with `terms` additions; every `+` nests
/// one level deeper in the tree.
pub(super) fn deep_concat(terms: usize) -> String {
    let mut src = String::from("class Deep {\n    void run(String s) {\n        String t = s");
    for _ in 0..terms {
        src.push_str(" + \"a\"");
    }
    src.push_str(";\n        Runtime.getRuntime().exec(t);\n    }\n}\n");
    src
}

use super::*;
use serde_json::{self, Value as JsonValue};

#[test]
fn node_id_renders_and_parses() {
    let id = NodeId::new("Runtime", "exec");
    assert_eq!(id.to_string(), "Runtime:exec");
    assert_eq!("Runtime:exec".parse::<NodeId>().unwrap(), id);
    assert!("Runtime".parse::<NodeId>().is_err());
    assert!(":exec".parse::<NodeId>().is_err());
}

#[test]
fn node_id_serializes_as_string() {
    let id = NodeId::new("Service", "run");
    let v = serde_json::to_value(&id).unwrap();
    assert_eq!(v, JsonValue::String("Service:run".into()));
    let back: NodeId = serde_json::from_value(v).unwrap();
    assert_eq!(back, id);
}

#[test]
fn diagnostic_and_unknown_markers() {
    assert!(NodeId::new(UNRESOLVED_OWNER, "trim").is_diagnostic());
    assert!(!NodeId::new("String", "trim").is_diagnostic());
    assert!(NodeId::unknown().is_unknown());
    assert_eq!(NodeId::unknown().to_string(), "unknown:unknown");
}

#[test]
fn graph_keeps_order_and_duplicates() {
    let caller = NodeId::new("A", "m");
    let mut g = CallGraph::new();
    g.push_edge(caller.clone(), NodeId::new("B", "x"));
    g.push_edge(caller.clone(), NodeId::new("C", "y"));
    g.push_edge(caller.clone(), NodeId::new("B", "x"));
    assert_eq!(g.callees(&caller).len(), 3);
    assert_eq!(g.last_callee(&caller), Some(&NodeId::new("B", "x")));
    assert_eq!(g.edge_count(), 3);
    assert_eq!(g.caller_count(), 1);
}

#[test]
fn caller_index_dedups_callers_in_insertion_order() {
    let sink = NodeId::new("Runtime", "exec");
    let mut g = CallGraph::new();
    g.push_edge(NodeId::new("Z", "late"), sink.clone());
    g.push_edge(NodeId::new("A", "early"), sink.clone());
    g.push_edge(NodeId::new("Z", "late"), sink.clone());
    let index = g.caller_index();
    assert_eq!(
        index.callers_of(&sink),
        &[NodeId::new("Z", "late"), NodeId::new("A", "early")]
    );
    assert_eq!(g.callers_of(&sink).len(), 2);
    assert!(index.callers_of(&NodeId::new("Nope", "x")).is_empty());
}

#[test]
fn catalog_defaults_for_unknown_methods() {
    let mut catalog = Catalog::new();
    let mut entry = ClassEntry {
        file_path: "Svc.java".into(),
        ..Default::default()
    };
    entry.methods.insert(
        "run".into(),
        MethodFacts {
            requires_params: false,
            is_entry_point: false,
        },
    );
    catalog.insert_class("Svc", entry);
    assert!(!catalog.requires_params(&NodeId::new("Svc", "run")));
    assert!(catalog.requires_params(&NodeId::new("Svc", "other")));
    assert!(catalog.requires_params(&NodeId::unknown()));
    assert!(!catalog.is_entry_point(&NodeId::new("Missing", "run")));
}

#[test]
fn catalog_later_class_replaces_earlier() {
    let mut catalog = Catalog::new();
    catalog.insert_class(
        "Util",
        ClassEntry {
            file_path: "a/Util.java".into(),
            ..Default::default()
        },
    );
    let previous = catalog.insert_class(
        "Util",
        ClassEntry {
            file_path: "b/Util.java".into(),
            ..Default::default()
        },
    );
    assert_eq!(previous.unwrap().file_path, "a/Util.java");
    assert_eq!(catalog.class("Util").unwrap().file_path, "b/Util.java");
    assert_eq!(catalog.len(), 1);
}

#[test]
fn finding_uses_report_field_names() {
    let finding = Finding {
        vul_type: "RCE".into(),
        sink_desc: "command execution".into(),
        severity: "High".into(),
        sink: "Runtime:exec".into(),
        call_chains: vec![CallChain {
            chain: vec!["/p/A.java:handle".into()],
            code: vec!["void handle(String c) {}".into()],
        }],
        truncated: false,
    };
    let v = serde_json::to_value(&finding).unwrap();
    assert_eq!(v["vul_type"], "RCE");
    assert_eq!(v["call_chains"][0]["chain"][0], "/p/A.java:handle");
    assert_eq!(v["call_chains"][0]["code"][0], "void handle(String c) {}");
}

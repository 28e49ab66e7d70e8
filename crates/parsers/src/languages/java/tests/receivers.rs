use super::{deep_concat, edge, edges, facts};
use crate::languages::java::calls::extract_calls;
use crate::{parse_java, Callee};
use std::collections::HashMap;

#[test]
fn declared_variable_gives_receiver_type() {
    let src = r#"
class A {
    void run(String cmd) {
        Runtime rt = Runtime.getRuntime();
        rt.exec(cmd);
    }
}
"#;
    assert_eq!(
        edges(src),
        vec![
            edge("A:run", "Runtime:getRuntime"),
            edge("A:run", "Runtime:exec"),
        ]
    );
}

#[test]
fn generic_arguments_are_dropped_from_declared_type() {
    let src = r#"
class A {
    void run(String x) {
        List<String> items = new ArrayList<>();
        items.add(x);
    }
}
"#;
    assert_eq!(edges(src), vec![edge("A:run", "List:add")]);
}

#[test]
fn parameter_and_field_types_resolve() {
    let src = r#"
class A {
    private Statement stmt;
    void run(Connection conn, String sql) {
        conn.prepareStatement(sql);
        stmt.executeQuery(sql);
        this.stmt.execute(sql);
    }
}
"#;
    assert_eq!(
        edges(src),
        vec![
            edge("A:run", "Connection:prepareStatement"),
            edge("A:run", "Statement:executeQuery"),
            edge("A:run", "Statement:execute"),
        ]
    );
}

#[test]
fn uppercase_qualifier_is_taken_as_class() {
    let src = r#"
class A {
    void run() {
        Foo.Bar.baz();
        Paths.get("x");
        helper.go();
    }
}
"#;
    assert_eq!(
        edges(src),
        vec![
            edge("A:run", "Foo:baz"),
            edge("A:run", "Paths:get"),
            edge("A:run", "helper:go"),
        ]
    );
}

#[test]
fn constructed_object_gives_receiver_type() {
    let src = r#"
class A {
    void run(String cmd) {
        new ProcessBuilder(cmd).start();
    }
}
"#;
    assert_eq!(edges(src), vec![edge("A:run", "ProcessBuilder:start")]);
}

#[test]
fn string_literal_receiver_is_string() {
    let src = r#"
class A {
    void run() {
        "abc".trim().length();
    }
}
"#;
    assert_eq!(
        edges(src),
        vec![edge("A:run", "String:trim"), edge("A:run", "String:length")]
    );
}

#[test]
fn chained_call_takes_previous_callee_type() {
    let src = r#"
class A {
    void run(String cmd) {
        Runtime.getRuntime().exec(cmd);
    }
}
"#;
    let sites = facts(src).calls;
    assert_eq!(
        sites[1].callee,
        Callee::Chained {
            member: "exec".into()
        }
    );
    assert_eq!(
        edges(src),
        vec![
            edge("A:run", "Runtime:getRuntime"),
            edge("A:run", "Runtime:exec"),
        ]
    );
}

#[test]
fn chain_links_come_before_argument_calls() {
    let src = r#"
class A {
    X a;
    Y b;
    void run() {
        a.foo(b.bar()).baz();
    }
}
"#;
    assert_eq!(
        edges(src),
        vec![
            edge("A:run", "X:foo"),
            edge("A:run", "X:baz"),
            edge("A:run", "Y:bar"),
        ]
    );
}

#[test]
fn chained_call_without_history_is_diagnostic() {
    let src = r#"
class A {
    void run(Object task) {
        ((Runnable) task).run();
    }
}
"#;
    let resolved = edges(src);
    assert_eq!(resolved, vec![edge("A:run", "[!]unresolved:run")]);
    assert!(super::id(&resolved[0].1).is_diagnostic());
}

#[test]
fn unqualified_and_this_calls_stay_in_class() {
    let src = r#"
class A {
    private String name;
    void run() {
        helper();
        this.helper();
        this.name.trim();
    }
    void helper() {}
}
"#;
    assert_eq!(
        edges(src),
        vec![
            edge("A:run", "A:helper"),
            edge("A:run", "A:helper"),
            edge("A:run", "String:trim"),
        ]
    );
}

#[test]
fn calls_outside_methods_use_unknown_caller() {
    let src = r#"
class A {
    static { Runtime.getRuntime(); }
    A() { init(); }
    void init() {}
}
"#;
    assert_eq!(
        edges(src),
        vec![
            edge("unknown:unknown", "Runtime:getRuntime"),
            edge("unknown:unknown", "unknown:init"),
        ]
    );
}

#[test]
fn nested_class_methods_use_their_own_class() {
    let src = r#"
class Outer {
    class Inner {
        void m() { work(); }
    }
    void n() { work(); }
}
"#;
    assert_eq!(
        edges(src),
        vec![edge("Inner:m", "Inner:work"), edge("Outer:n", "Outer:work")]
    );
}

#[test]
fn class_literal_receiver_is_the_class() {
    let src = r#"
class A {
    void run() {
        Foo.class.getName();
    }
}
"#;
    assert_eq!(edges(src), vec![edge("A:run", "Foo:getName")]);
}

#[test]
fn outer_link_arguments_come_before_first_link_arguments() {
    let src = r#"
class A {
    X a;
    void run() {
        a.f(x()).g(y());
    }
}
"#;
    assert_eq!(
        edges(src),
        vec![
            edge("A:run", "X:f"),
            edge("A:run", "X:g"),
            edge("A:run", "A:y"),
            edge("A:run", "A:x"),
        ]
    );
}

#[test]
fn arguments_follow_link_order_after_a_constructed_root() {
    let src = r#"
class A {
    void run() {
        new Foo().f(x()).g(y());
    }
}
"#;
    assert_eq!(
        edges(src),
        vec![
            edge("A:run", "Foo:f"),
            edge("A:run", "Foo:g"),
            edge("A:run", "A:x"),
            edge("A:run", "A:y"),
        ]
    );
}

#[test]
fn super_calls_are_not_recorded() {
    let src = r#"
class A extends B {
    void run(String s) {
        super.run(helper(s));
        super.close();
    }
}
"#;
    assert_eq!(edges(src), vec![edge("A:run", "A:helper")]);
}

#[test]
fn any_type_lookup_can_drive_resolution() {
    let src = "class A { void run() { repo.save(); cache.get(); } }";
    let tree = parse_java(src).unwrap();
    let mut types = HashMap::new();
    types.insert("repo".to_string(), "UserRepository".to_string());
    let sites = extract_calls(tree.root_node(), src, &types);
    let callees: Vec<Callee> = sites.into_iter().map(|s| s.callee).collect();
    assert_eq!(
        callees,
        vec![
            Callee::Resolved(super::id("UserRepository:save")),
            Callee::Resolved(super::id("cache:get")),
        ]
    );
}

#[test]
fn deeply_nested_expression_is_walked() {
    let src = deep_concat(20_000);
    let f = facts(&src);
    assert_eq!(f.classes.len(), 1);
    assert_eq!(f.classes[0].0, "Deep");
    assert_eq!(
        edges(&src),
        vec![
            edge("Deep:run", "Runtime:getRuntime"),
            edge("Deep:run", "Runtime:exec"),
        ]
    );
}

#[test]
fn long_builder_chain_is_walked() {
    let links = 20_000;
    let mut src = String::from("class B {\n    String build(StringBuilder sb) {\n        return sb");
    for _ in 0..links {
        src.push_str(".append(\"a\")");
    }
    src.push_str(".toString();\n    }\n}\n");
    let resolved = edges(&src);
    assert_eq!(resolved.len(), links + 1);
    assert!(resolved[..links]
        .iter()
        .all(|e| *e == edge("B:build", "StringBuilder:append")));
    assert_eq!(resolved[links], edge("B:build", "StringBuilder:toString"));
}

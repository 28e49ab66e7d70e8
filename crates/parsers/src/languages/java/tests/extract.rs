use crate::java::extract_code_block;
use crate::MethodIndex;
use ir::CodeLocator;
use std::fs;
use tempfile::tempdir;

#[test]
fn annotation_braces_do_not_end_the_block() {
    let src = "class C {\n    @RequestMapping(value = {\"/a\"})\n    public String h(String p) {\n        return p;\n    }\n}\n";
    let mut index = MethodIndex::new();
    assert!(index.insert_source("C.java", src));
    let block = index.locate("C", "h").expect("method found");
    assert_eq!(block.file_path, "C.java");
    assert_eq!(
        block.source,
        "    @RequestMapping(value = {\"/a\"})\n    public String h(String p) {\n        return p;\n    }\n"
    );
}

#[test]
fn bodiless_method_is_its_own_lines() {
    let src = "interface S {\n    void exec(String c);\n}\n";
    let mut index = MethodIndex::new();
    index.insert_source("S.java", src);
    let block = index.locate("S", "exec").unwrap();
    assert_eq!(block.source, "    void exec(String c);\n");
}

#[test]
fn first_overload_and_first_file_win() {
    let mut index = MethodIndex::new();
    index.insert_source(
        "one/A.java",
        "class A {\n  void f(int a) {}\n  void f(String b) {}\n}\n",
    );
    index.insert_source("two/A.java", "class A {\n  void f() {}\n  void g() {}\n}\n");
    let f = index.locate("A", "f").unwrap();
    assert_eq!(f.file_path, "one/A.java");
    assert_eq!(f.source, "  void f(int a) {}\n");
    assert_eq!(index.locate("A", "g").unwrap().file_path, "two/A.java");
    assert!(index.locate("A", "missing").is_none());
    assert!(index.locate("Nope", "f").is_none());
}

#[test]
fn classes_are_searched_before_interfaces() {
    let src = "interface Foo {\n  void a();\n}\nclass Outer {\n  class Foo {\n    void a() { }\n  }\n}\n";
    let mut index = MethodIndex::new();
    index.insert_source("F.java", src);
    assert_eq!(index.locate("Foo", "a").unwrap().source, "    void a() { }\n");
}

#[test]
fn unparseable_sources_are_not_indexed() {
    let mut index = MethodIndex::new();
    assert!(!index.insert_source("Bad.java", "class {{"));
    assert_eq!(index.file_count(), 0);
}

#[test]
fn build_walks_the_whole_project() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/test")).unwrap();
    fs::write(
        dir.path().join("src/test/T.java"),
        "class T {\n  void t() {\n  }\n}\n",
    )
    .unwrap();
    fs::write(dir.path().join("src/Broken.java"), "class B { void x( }").unwrap();
    fs::write(dir.path().join("README.md"), "# x").unwrap();

    let index = MethodIndex::build(dir.path()).unwrap();
    assert_eq!(index.file_count(), 1);
    let block = index.locate("T", "t").unwrap();
    assert!(block.file_path.ends_with("T.java"));
    assert_eq!(block.source, "  void t() {\n  }\n");
}

#[test]
fn slice_is_clamped_to_the_declaration() {
    // unbalanced braces inside a string literal
    let src = "class A {\n  void f() {\n    s = \"{\";\n  }\n  void g() {}\n}\n";
    assert_eq!(
        extract_code_block(src, 1, Some(1), 3),
        "  void f() {\n    s = \"{\";\n  }\n"
    );
    assert_eq!(extract_code_block(src, 40, Some(40), 41), "");
}

#[test]
fn deeply_nested_method_is_indexed() {
    let src = super::deep_concat(20_000);
    let mut index = MethodIndex::new();
    assert!(index.insert_source("Deep.java", &src));
    let block = index.locate("Deep", "run").unwrap();
    assert!(block.source.starts_with("    void run(String s) {\n"));
    assert!(block.source.ends_with("        Runtime.getRuntime().exec(t);\n    }\n"));
}

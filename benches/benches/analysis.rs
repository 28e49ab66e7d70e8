use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::{analyze, context_from_facts, TraceLimits};
use loader::parse_rules_str;
use parsers::{analyze_source, EntryAnnotations, MethodIndex};
use std::path::Path;

const LAYERS: usize = 6;
const WIDTH: usize = 4;

const RULES: &str = r#"{
  "depth": 8,
  "sink_rules": [
    {
      "sink_name": "RCE",
      "sink_desc": "Command execution",
      "severity_level": "High",
      "sinks": ["java.lang.Runtime:exec"]
    }
  ]
}"#;

/// One class per layer; every method calls every method of the next layer
/// and the last layer reaches the sink.
fn layered_sources() -> Vec<(String, String)> {
    (0..LAYERS)
        .map(|l| {
            let mut src = format!("class Layer{l} {{\n");
            for w in 0..WIDTH {
                if l == 0 {
                    src.push_str("    @RequestMapping(\"/x\")\n");
                }
                src.push_str(&format!("    public void m{w}(String arg) {{\n"));
                if l + 1 < LAYERS {
                    src.push_str(&format!("        Layer{} next = new Layer{}();\n", l + 1, l + 1));
                    for v in 0..WIDTH {
                        src.push_str(&format!("        next.m{v}(arg);\n"));
                    }
                } else {
                    src.push_str("        Runtime.getRuntime().exec(arg);\n");
                }
                src.push_str("    }\n");
            }
            src.push_str("}\n");
            (format!("Layer{l}.java"), src)
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let sources = layered_sources();
    let annotations = EntryAnnotations::default();
    c.bench_function("analyze_source", |b| {
        b.iter(|| {
            for (path, src) in &sources {
                black_box(analyze_source(path, src, &annotations).unwrap());
            }
        })
    });
}

fn bench_trace(c: &mut Criterion) {
    let sources = layered_sources();
    let annotations = EntryAnnotations::default();
    let facts: Vec<_> = sources
        .iter()
        .filter_map(|(path, src)| analyze_source(path, src, &annotations).unwrap())
        .collect();
    let ctx = context_from_facts(Path::new("."), facts);
    let mut index = MethodIndex::new();
    for (path, src) in sources {
        index.insert_source(path, src);
    }
    let rules = parse_rules_str(RULES, false).unwrap();
    let limits = TraceLimits::from_rules(&rules);
    c.bench_function("analyze_layered", |b| {
        b.iter(|| analyze(black_box(&ctx), &rules, &index, &limits).unwrap())
    });
}

criterion_group!(benches, bench_parse, bench_trace);
criterion_main!(benches);

use ir::{CallChain, Finding};


pub(super) fn sample_findings() -> Vec<Finding> {
    vec![Finding {
        vul_type: "RCE".into(),
        sink_desc: "Command execution".into(),
        severity: "High".into(),
        sink: "Runtime:exec".into(),
        call_chains: vec![CallChain {
            chain: vec![
                "src/Controller.java:handle".into(),
                "src/Service.java:run".into(),
            ],
            code: vec![
                "@GetMapping\npublic void handle(String c) { s.run(c); }\n".into(),
                "void run(String c) { Runtime.getRuntime().exec(c); }\n".into(),
            ],
        }],
        truncated: false,
    }]
}

//! Reports built from a real pipeline run over `fixtures/round_basic`.

use std::path::PathBuf;

use sb_pipeline::{run_from_manifest, EngineMeta, PipelineConfig};
use sb_report::{build_model, render_text};

fn manifest() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/round_basic/manifest.json")
}

fn artifact() -> serde_json::Value {
    let meta = EngineMeta { vendor: "test".into(), name: "sb".into(), version: "0.0.0".into(), build: "ci".into() };
    let outs = run_from_manifest(&manifest(), meta, PipelineConfig::default()).unwrap();
    serde_json::to_value(&outs.scoreboard).unwrap()
}

#[test]
fn text_report_for_fixture_round() {
    let model = build_model(&artifact()).unwrap();
    let labels: Vec<&str> = model.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Sword", "Shield", "Gem"]);
    assert_eq!(model.cover.ignored_count, 1);

    let text = render_text(&model);
    assert!(text.lines().any(|l| l.starts_with("Shield") && l.ends_with("20")));
    assert_eq!(text.lines().last(), Some("Bonuses: 20  Total: 95"));
}

#[cfg(feature = "render_html")]
#[test]
fn html_report_carries_integrity_footer() {
    let doc = artifact();
    let html = sb_report::render_html(&build_model(&doc).unwrap()).unwrap();
    assert!(html.contains(doc["id"].as_str().unwrap()));
    assert!(html.contains("Bonuses: 20  Total: 95"));
}

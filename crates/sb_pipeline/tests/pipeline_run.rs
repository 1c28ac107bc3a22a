//! Full pipeline over the shared `fixtures/round_basic` round.

use std::path::PathBuf;

use sb_algo::{AggregationStrategy, RowOrder};
use sb_pipeline::{run_from_manifest, run_from_paths, EngineMeta, PipelineConfig, PipelineError};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/round_basic").join(name)
}

fn meta() -> EngineMeta {
    EngineMeta { vendor: "test".into(), name: "sb".into(), version: "0.0.0".into(), build: "ci".into() }
}

#[test]
fn manifest_run_produces_expected_totals() {
    let outs = run_from_manifest(&fixture("manifest.json"), meta(), PipelineConfig::default()).unwrap();
    assert_eq!(outs.totals.total_bonus, 20);
    assert_eq!(outs.totals.grand_total, 95);
    let ids: Vec<&str> = outs.scoreboard.rows.iter().map(|r| r.item_id.as_str()).collect();
    assert_eq!(ids, vec!["sword", "shield", "gem"]);
    assert_eq!(outs.scoreboard.ignored_count, 1);
    assert_eq!(outs.scoreboard.collected_count, 7);
    assert!(!outs.rows.contains_key("potion"));
}

#[test]
fn explicit_paths_match_manifest_run() {
    let a = run_from_manifest(&fixture("manifest.json"), meta(), PipelineConfig::default()).unwrap();
    let b = run_from_paths(&fixture("catalog.json"), &fixture("collected.json"), meta(), PipelineConfig::default())
        .unwrap();
    assert_eq!(a.scoreboard, b.scoreboard);
}

#[test]
fn config_changes_presentation_not_values() {
    let base = run_from_manifest(&fixture("manifest.json"), meta(), PipelineConfig::default()).unwrap();
    let alt = run_from_manifest(
        &fixture("manifest.json"),
        meta(),
        PipelineConfig { strategy: AggregationStrategy::TwoPass, order: RowOrder::ScoreDesc },
    )
    .unwrap();
    assert_eq!(base.rows, alt.rows);
    assert_eq!(base.totals, alt.totals);
    let ids: Vec<&str> = alt.scoreboard.rows.iter().map(|r| r.item_id.as_str()).collect();
    assert_eq!(ids, vec!["gem", "shield", "sword"]);
}

#[test]
fn missing_input_is_an_io_error() {
    let err = run_from_paths(&fixture("missing.json"), &fixture("collected.json"), meta(), PipelineConfig::default())
        .unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
}

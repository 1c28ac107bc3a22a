//! End-to-end runs of the `scoreboard` binary over `fixtures/round_basic`.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/round_basic").join(name)
}

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("scoreboard").unwrap();
    cmd.env_remove("SCOREBOARD_LOG").env_remove("RUST_LOG");
    cmd
}

fn read_json(path: PathBuf) -> serde_json::Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn manifest_run_writes_scoreboard() {
    let out = tempdir().unwrap();
    bin()
        .arg("--manifest")
        .arg(fixture("manifest.json"))
        .arg("--out")
        .arg(out.path())
        .arg("--quiet")
        .assert()
        .success();

    let doc = read_json(out.path().join("scoreboard.json"));
    assert_eq!(doc["totals"]["total_bonus"], 20);
    assert_eq!(doc["totals"]["grand_total"], 95);
    assert_eq!(doc["ignored_count"], 1);
    assert!(doc["id"].as_str().unwrap().starts_with("SB:"));
    assert!(!out.path().join("report.json").exists());
}

#[test]
fn repeated_runs_are_byte_identical() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    for dir in [&a, &b] {
        bin()
            .args(["--catalog"])
            .arg(fixture("catalog.json"))
            .arg("--collected")
            .arg(fixture("collected.json"))
            .arg("--out")
            .arg(dir.path())
            .arg("--quiet")
            .assert()
            .success();
    }
    let x = fs::read(a.path().join("scoreboard.json")).unwrap();
    let y = fs::read(b.path().join("scoreboard.json")).unwrap();
    assert_eq!(x, y);
}

#[test]
fn print_and_render_all_formats() {
    let out = tempdir().unwrap();
    bin()
        .arg("--manifest")
        .arg(fixture("manifest.json"))
        .arg("--out")
        .arg(out.path())
        .args(["--render", "json", "--render", "html", "--render", "text", "--print", "--quiet"])
        .args(["--order", "score-desc", "--strategy", "two-pass"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("Bonuses: 20  Total: 95\n"))
        .stdout(predicate::str::contains("Gem"));

    let report = read_json(out.path().join("report.json"));
    assert_eq!(report["rows"][0]["item_id"], "gem");
    assert_eq!(report["integrity"]["order"], "score_desc");
    let html = fs::read_to_string(out.path().join("report.html")).unwrap();
    assert!(html.contains("Bonuses: 20  Total: 95"));
    let text = fs::read_to_string(out.path().join("report.txt")).unwrap();
    assert!(text.starts_with("Round Summary"));
}

#[test]
fn validate_only_writes_nothing() {
    let out = tempdir().unwrap();
    bin()
        .arg("--manifest")
        .arg(fixture("manifest.json"))
        .arg("--out")
        .arg(out.path())
        .arg("--validate-only")
        .assert()
        .success()
        .stderr(predicate::str::contains("validate-only: inputs OK"));
    assert!(!out.path().join("scoreboard.json").exists());
}

#[test]
fn bad_item_id_is_a_validation_failure() {
    let dir = tempdir().unwrap();
    let collected = dir.path().join("collected.json");
    fs::write(&collected, r#"["sword", ""]"#).unwrap();
    bin()
        .arg("--catalog")
        .arg(fixture("catalog.json"))
        .arg("--collected")
        .arg(&collected)
        .arg("--validate-only")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("scoreboard: error:"));
}

#[test]
fn digest_mismatch_is_a_validation_failure() {
    let dir = tempdir().unwrap();
    fs::copy(fixture("catalog.json"), dir.path().join("catalog.json")).unwrap();
    fs::copy(fixture("collected.json"), dir.path().join("collected.json")).unwrap();
    let manifest = dir.path().join("manifest.json");
    fs::write(
        &manifest,
        format!(
            r#"{{"catalog_path":"catalog.json","collected_path":"collected.json","expect":{{"catalog_sha256":"{}"}}}}"#,
            "0".repeat(64)
        ),
    )
    .unwrap();
    bin().arg("--manifest").arg(&manifest).arg("--validate-only").assert().code(2);
}

#[test]
fn missing_input_and_url_inputs_are_rejected() {
    bin()
        .args(["--catalog", "/definitely/missing.json", "--collected"])
        .arg(fixture("collected.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));

    bin()
        .args(["--manifest", "https://example.com/m.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no scheme"));
}

#[test]
fn conflicting_modes_fail_in_argument_parsing() {
    bin()
        .arg("--manifest")
        .arg(fixture("manifest.json"))
        .arg("--catalog")
        .arg(fixture("catalog.json"))
        .assert()
        .code(2);
}

//! Round loading end to end: manifest → catalog → collected → digests.

use std::fs;
use std::path::Path;

use assert_json_diff::assert_json_eq;
use serde_json::json;

use sb_io::{
    canonical_json::to_canonical_bytes,
    hasher::sha256_canonical,
    loader::{load_round_from_manifest, load_round_from_paths},
    IoError,
};

const CATALOG: &str = r#"{
  "sword":  { "value": 10 },
  "shield": { "value": 5, "bonus": { "count": 3, "amount": 20 } }
}"#;

const COLLECTED: &str = r#"["sword", "shield", "shield", "shield", "potion"]"#;

fn write_round(dir: &Path, manifest: &serde_json::Value) -> std::path::PathBuf {
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(dir.join("data/catalog.json"), CATALOG).unwrap();
    fs::write(dir.join("data/collected.json"), COLLECTED).unwrap();
    let mp = dir.join("manifest.json");
    fs::write(&mp, serde_json::to_vec(manifest).unwrap()).unwrap();
    mp
}

#[test]
fn manifest_paths_resolve_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let mp = write_round(
        dir.path(),
        &json!({"catalog_path": "data/catalog.json", "collected_path": "data/collected.json"}),
    );
    let round = load_round_from_manifest(&mp).unwrap();
    assert_eq!(round.catalog.len(), 2);
    assert_eq!(round.collected.len(), 5);

    // The loaded catalog re-serializes to the same JSON it came from.
    let back: serde_json::Value = serde_json::from_slice(&to_canonical_bytes(&round.catalog).unwrap()).unwrap();
    let orig: serde_json::Value = serde_json::from_str(CATALOG).unwrap();
    assert_json_eq!(back, orig);
}

#[test]
fn digests_match_manifest_pins() {
    let dir = tempfile::tempdir().unwrap();
    let cat: serde_json::Value = serde_json::from_str(CATALOG).unwrap();
    let col: serde_json::Value = serde_json::from_str(COLLECTED).unwrap();
    let mp = write_round(
        dir.path(),
        &json!({
            "catalog_path": "data/catalog.json",
            "collected_path": "data/collected.json",
            "expect": {
                "catalog_sha256": sha256_canonical(&cat).unwrap(),
                "collected_sha256": sha256_canonical(&col).unwrap()
            }
        }),
    );
    let round = load_round_from_manifest(&mp).unwrap();
    assert_eq!(round.digests.catalog_sha256, sha256_canonical(&cat).unwrap());
}

#[test]
fn digest_mismatch_is_an_expectation_error() {
    let dir = tempfile::tempdir().unwrap();
    let mp = write_round(
        dir.path(),
        &json!({
            "catalog_path": "data/catalog.json",
            "collected_path": "data/collected.json",
            "expect": { "collected_sha256": "0".repeat(64) }
        }),
    );
    assert!(matches!(load_round_from_manifest(&mp), Err(IoError::Expect(_))));
}

#[test]
fn explicit_paths_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    write_round(dir.path(), &json!({"catalog_path": "a", "collected_path": "b"}));
    let round = load_round_from_paths(
        &dir.path().join("data/catalog.json"),
        &dir.path().join("data/collected.json"),
    )
    .unwrap();
    assert_eq!(round.collected[4].as_str(), "potion");

    let missing = load_round_from_paths(&dir.path().join("nope.json"), &dir.path().join("data/collected.json"));
    assert!(matches!(missing, Err(IoError::Read(_))));
}

//! Loader: read local JSON artifacts (manifest → catalog → collected list),
//! compute canonical input digests, and return a typed `LoadedRound` for the
//! pipeline. No network I/O.
//!
//! Accepted shapes:
//! - catalog:   `{ "<id>": { "value": n, "bonus"?: { "count": n, "amount": n }, "name"?: s } }`
//! - collected: `["<id>", ...]` or `{ "collected": ["<id>", ...] }`
//!
//! Item data is not validated beyond its JSON shape; catalog authoring is
//! an upstream concern.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use sb_core::{Catalog, CollectedList, ItemId};

use crate::hasher::sha256_canonical;
use crate::manifest::{self as man, Expectations};
use crate::{looks_like_url_strict, IoError};

/// Upper bound on any single input file.
pub const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

// ----------------------------- Public types -----------------------------

/// Canonical SHA-256 digests (lowercase hex) of the two round inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDigests {
    pub catalog_sha256: String,
    pub collected_sha256: String,
}

/// Loaded, shape-checked round inputs.
#[derive(Debug, Clone)]
pub struct LoadedRound {
    pub catalog: Catalog,
    pub collected: CollectedList,
    pub digests: InputDigests,
}

// ----------------------------- Orchestration -----------------------------

/// Load everything from a **manifest file path** and enforce its digest pins.
pub fn load_round_from_manifest(path: &Path) -> Result<LoadedRound, IoError> {
    let manifest = man::load_manifest(path)?;
    let resolved = man::resolve_paths(path, &manifest)?;
    let round = load_round_from_paths(&resolved.catalog, &resolved.collected)?;
    if let Some(exp) = &manifest.expect {
        check_expectations(exp, &round.digests)?;
    }
    Ok(round)
}

/// Load the catalog and collected list from explicit paths.
pub fn load_round_from_paths(catalog: &Path, collected: &Path) -> Result<LoadedRound, IoError> {
    let catalog = load_catalog(catalog)?;
    let collected = load_collected(collected)?;
    if catalog.is_empty() {
        warn!("catalog is empty; every collected item will be ignored");
    }
    let digests = InputDigests {
        catalog_sha256: sha256_canonical(&catalog)?,
        collected_sha256: sha256_canonical(&collected)?,
    };
    let with_bonus = catalog.iter().filter(|(_, def)| def.bonus.is_some()).count();
    debug!(
        items = catalog.len(),
        with_bonus,
        pickups = collected.len(),
        catalog_sha256 = %digests.catalog_sha256,
        "round inputs loaded"
    );
    Ok(LoadedRound { catalog, collected, digests })
}

// ----------------------------- Targeted loaders -----------------------------

pub fn load_catalog(path: &Path) -> Result<Catalog, IoError> {
    let v = read_json_value_with_limits(path)?;
    parse_catalog_value(v)
}

pub fn load_collected(path: &Path) -> Result<CollectedList, IoError> {
    let v = read_json_value_with_limits(path)?;
    parse_collected_value(v)
}

/// Catalog from an in-memory JSON value; errors carry the offending item's pointer.
pub fn parse_catalog_value(v: Value) -> Result<Catalog, IoError> {
    let Value::Object(map) = v else {
        return Err(IoError::Json { pointer: "/".into(), msg: "catalog must be a JSON object".into() });
    };
    let mut catalog = Catalog::new();
    for (key, def) in map {
        let pointer = format!("/{}", escape_pointer_token(&key));
        let id = ItemId::try_from(key).map_err(|e| IoError::Json { pointer: pointer.clone(), msg: e.to_string() })?;
        let def = serde_json::from_value(def).map_err(|e| IoError::Json { pointer, msg: e.to_string() })?;
        catalog.insert(id, def);
    }
    Ok(catalog)
}

/// Collected list from an in-memory JSON value (bare array or wrapped object).
pub fn parse_collected_value(v: Value) -> Result<CollectedList, IoError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCollected {
        List(Vec<String>),
        Wrapped { collected: Vec<String> },
    }

    let raw: RawCollected = serde_json::from_value(v).map_err(|_| IoError::Json {
        pointer: "/".into(),
        msg: "collected must be an array of strings or {\"collected\": [...]}".into(),
    })?;
    let (base, list) = match raw {
        RawCollected::List(l) => ("", l),
        RawCollected::Wrapped { collected } => ("/collected", collected),
    };
    list.into_iter()
        .enumerate()
        .map(|(i, s)| {
            ItemId::try_from(s).map_err(|e| IoError::Json { pointer: format!("{base}/{i}"), msg: e.to_string() })
        })
        .collect()
}

// ----------------------------- Checks & helpers -----------------------------

fn check_expectations(exp: &Expectations, got: &InputDigests) -> Result<(), IoError> {
    if let Some(want) = &exp.catalog_sha256 {
        if *want != got.catalog_sha256 {
            return Err(IoError::Expect(format!(
                "catalog sha256 mismatch: expected {want}, got {}",
                got.catalog_sha256
            )));
        }
    }
    if let Some(want) = &exp.collected_sha256 {
        if *want != got.collected_sha256 {
            return Err(IoError::Expect(format!(
                "collected sha256 mismatch: expected {want}, got {}",
                got.collected_sha256
            )));
        }
    }
    Ok(())
}

/// Read a local JSON file bounded by `MAX_INPUT_BYTES`.
pub fn read_json_value_with_limits(path: &Path) -> Result<Value, IoError> {
    if let Some(s) = path.to_str() {
        if looks_like_url_strict(s) {
            return Err(IoError::Path(format!("not a local path: {s}")));
        }
    }
    let f = File::open(path).map_err(IoError::Read)?;
    let meta = f.metadata().map_err(IoError::Read)?;
    if !meta.is_file() {
        return Err(IoError::Path(format!("not a regular file: {}", path.display())));
    }
    if meta.len() > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!(
            "{} is {} bytes (max {MAX_INPUT_BYTES})",
            path.display(),
            meta.len()
        )));
    }
    let mut buf = Vec::with_capacity(meta.len() as usize);
    f.take(MAX_INPUT_BYTES + 1).read_to_end(&mut buf).map_err(IoError::Read)?;
    if buf.len() as u64 > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!("{} grew past {MAX_INPUT_BYTES} bytes", path.display())));
    }
    Ok(serde_json::from_slice(&buf)?)
}

/// RFC 6901 token escaping.
fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

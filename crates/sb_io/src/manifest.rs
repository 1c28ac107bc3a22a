//! crates/sb_io/src/manifest.rs
//! Round manifest: points at the catalog and collected-list files of one round,
//! optionally pinning their canonical digests.
//!
//! ```json
//! {
//!   "catalog_path": "catalog.json",
//!   "collected_path": "collected.json",
//!   "expect": { "catalog_sha256": "<64-hex>" }
//! }
//! ```
//!
//! Relative paths resolve against the manifest's own directory. URLs are rejected.

#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::hasher::is_valid_sha256;
use crate::loader::read_json_value_with_limits;
use crate::{looks_like_url_strict, IoError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoundManifest {
    pub catalog_path: String,
    pub collected_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Expectations>,
}

/// Optional pins on the canonical digests of the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expectations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_sha256: Option<String>,
}

/// Manifest entries resolved to concrete filesystem paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub catalog: PathBuf,
    pub collected: PathBuf,
}

/// Read, parse, and shape-check a manifest.
pub fn load_manifest(path: &Path) -> Result<RoundManifest, IoError> {
    let v = read_json_value_with_limits(path)?;
    let man: RoundManifest = serde_json::from_value(v).map_err(|e| IoError::Json {
        pointer: "/".into(),
        msg: e.to_string(),
    })?;
    validate_manifest(&man)?;
    Ok(man)
}

/// Shape checks: non-empty local paths, well-formed digests.
pub fn validate_manifest(man: &RoundManifest) -> Result<(), IoError> {
    for (field, p) in [("catalog_path", &man.catalog_path), ("collected_path", &man.collected_path)] {
        if p.trim().is_empty() {
            return Err(IoError::Manifest(format!("{field} is empty")));
        }
        if looks_like_url_strict(p) {
            return Err(IoError::Manifest(format!("{field} must be a local path, got URL {p}")));
        }
    }
    if let Some(exp) = &man.expect {
        for (field, d) in [("catalog_sha256", &exp.catalog_sha256), ("collected_sha256", &exp.collected_sha256)] {
            if let Some(d) = d {
                if !is_valid_sha256(d) {
                    return Err(IoError::Manifest(format!("expect.{field} is not lowercase 64-hex")));
                }
            }
        }
    }
    Ok(())
}

/// Resolve manifest paths relative to the manifest file's directory.
pub fn resolve_paths(manifest_path: &Path, man: &RoundManifest) -> Result<ResolvedPaths, IoError> {
    let base = manifest_path
        .parent()
        .ok_or_else(|| IoError::Path(format!("{} has no parent", manifest_path.display())))?;
    let resolve = |p: &str| {
        let p = Path::new(p);
        if p.is_absolute() { p.to_path_buf() } else { base.join(p) }
    };
    Ok(ResolvedPaths {
        catalog: resolve(&man.catalog_path),
        collected: resolve(&man.collected_path),
    })
}

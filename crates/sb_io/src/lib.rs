//! crates/sb_io/src/lib.rs
//! Minimal, single-source-of-truth I/O crate.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Loaders for the catalog, the collected list, and the round manifest.
//! - Canonical JSON writing and SHA-256 digests of canonical bytes.
//!
//! Offline only: any `<scheme>://` path is rejected.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for sb_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Reading a file failed.
    #[error("read error: {0}")]
    Read(std::io::Error),

    /// Writing a file (or its temp/rename dance) failed.
    #[error("write error: {0}")]
    Write(std::io::Error),

    /// Path shape errors (URL given, missing parent, not a file).
    #[error("path error: {0}")]
    Path(String),

    /// JSON parse/shape errors with a JSON Pointer hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Manifest content errors.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// An expected digest in the manifest did not match the loaded input.
    #[error("expectation failed: {0}")]
    Expect(String),

    /// Input exceeded a configured size limit.
    #[error("limit exceeded: {0}")]
    Limit(String),
}

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Read(e)
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; default to root.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod manifest;

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

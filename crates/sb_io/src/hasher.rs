//! crates/sb_io/src/hasher.rs
//!
//! Deterministic hashing and ID builders for canonical artifacts.
//!
//! - Use `sha256_canonical(..)` for JSON **values/structs** (goes through canonical_json).
//! - Use `sha256_hex(..)` for **raw bytes**.
//! - Hex digests are **lowercase**.
//! - Scoreboard document IDs are `SB:` + 64-hex over the canonical document body.

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoError;

pub const SCOREBOARD_ID_PREFIX: &str = "SB:";

/// SHA-256 over raw bytes, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over **canonical JSON bytes** of any serializable value.
pub fn sha256_canonical<T: Serialize + ?Sized>(value: &T) -> Result<String, IoError> {
    let bytes = to_canonical_bytes(value)?;
    Ok(sha256_hex(&bytes))
}

/// Lowercase 64-hex check.
#[inline]
pub fn is_valid_sha256(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// `SB:` + digest of the canonical document body.
pub fn scoreboard_id<T: Serialize + ?Sized>(body: &T) -> Result<String, IoError> {
    let digest = sha256_canonical(body)?;
    Ok(format!("{SCOREBOARD_ID_PREFIX}{digest}"))
}

/// Validate an `SB:` id shape.
pub fn is_scoreboard_id(s: &str) -> bool {
    s.strip_prefix(SCOREBOARD_ID_PREFIX).map(is_valid_sha256).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn canonical_hash_ignores_key_order() {
        let a = json!({"sword": {"value": 10}, "shield": {"value": 5}});
        let b = json!({"shield": {"value": 5}, "sword": {"value": 10}});
        assert_eq!(sha256_canonical(&a).unwrap(), sha256_canonical(&b).unwrap());
    }

    #[test]
    fn scoreboard_id_shape() {
        let id = scoreboard_id(&json!({"rows": []})).unwrap();
        assert!(is_scoreboard_id(&id));
        assert!(!is_scoreboard_id("SB:xyz"));
        assert!(!is_scoreboard_id(&id[3..]));
    }

    #[test]
    fn canonical_hash_is_hash_of_canonical_bytes() {
        let v = json!({"b": ["shield"], "a": 1});
        assert_eq!(sha256_canonical(&v).unwrap(), sha256_hex(br#"{"a":1,"b":["shield"]}"#));
    }
}

//! sb_core: Core item types, catalog, and stable ordering helpers.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! engine (`sb_io`, `sb_algo`, `sb_pipeline`, `sb_report`, `sb_cli`).
//!
//! - Item tokens: `ItemId`
//! - Definitions: `ItemDefinition`, `Bonus`
//! - Catalog: `Catalog` (key-ordered map `ItemId → ItemDefinition`)
//! - Ordering helpers for collected lists (first-seen index)
//!
//! Integers only: values, counts, and amounts are `u64`.
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        EmptyId,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::EmptyId => write!(f, "empty item id"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub mod determinism;
pub mod ids;
pub mod items;

pub use errors::CoreError;
pub use ids::ItemId;
pub use items::{Bonus, Catalog, ItemDefinition};

/// Ordered sequence of pickup events for one round (duplicates allowed).
pub type CollectedList = alloc::vec::Vec<ItemId>;

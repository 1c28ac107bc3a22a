// crates/sb_algo/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::collections::BTreeMap;

pub use sb_core::{Catalog, ItemDefinition, ItemId};

// ----------------------------- Rows & totals -----------------------------------------

/// Per-identifier aggregate for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub item: ItemDefinition,
    /// Occurrences of the id over the whole collected list.
    pub count: u64,
    /// `count * item.value` (saturating).
    pub score: u64,
    /// `item.bonus.amount` when the threshold is met, else 0.
    pub bonus: u64,
}

impl Row {
    /// `score + bonus` (saturating).
    #[inline]
    pub fn total(&self) -> u64 {
        self.score.saturating_add(self.bonus)
    }
}

/// Eligible id → row. Keys are always a subset of the catalog's keys.
pub type RowSet = BTreeMap<ItemId, Row>;

/// Derived sums over a `RowSet`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub total_bonus: u64,
    pub grand_total: u64,
}

/// Which of the two equivalent aggregation algorithms to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AggregationStrategy {
    /// One pass over the collected list, counting eligible ids.
    #[default]
    SinglePass,
    /// Distinct eligible ids first, then a full-list count per id.
    TwoPass,
}

impl AggregationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationStrategy::SinglePass => "single_pass",
            AggregationStrategy::TwoPass => "two_pass",
        }
    }
}

// ----------------------------- Modules ------------------------------------------------

pub mod ordering;
pub mod rows;
pub mod totals;

// Tight, explicit re-exports.
pub use ordering::{ordered_rows, RowOrder};
pub use rows::{bonus_for, compute_rows, compute_rows_two_pass, compute_rows_with};
pub use totals::compute_totals;

//! Stable presentation order for rows. Never changes row contents.

use alloc::vec::Vec;
use core::cmp::Ordering;

use sb_core::{
    determinism::{cmp_item_ids, first_seen_positions},
    ItemId,
};

use crate::{Row, RowSet};

/// How rows are sequenced for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// By first appearance in the collected list.
    #[default]
    FirstCollected,
    /// Lexicographic by id.
    ItemId,
    /// By `score + bonus` descending, then id.
    ScoreDesc,
}

impl RowOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowOrder::FirstCollected => "first_collected",
            RowOrder::ItemId => "item_id",
            RowOrder::ScoreDesc => "score_desc",
        }
    }
}

/// Rows of `rows` as a sequence in the requested `order`.
///
/// `collected` is only consulted for `FirstCollected`. Rows whose id never
/// appears in `collected` (impossible for a `RowSet` built from it) sort last.
pub fn ordered_rows<'a>(
    rows: &'a RowSet,
    collected: &[ItemId],
    order: RowOrder,
) -> Vec<(&'a ItemId, &'a Row)> {
    let mut out: Vec<(&ItemId, &Row)> = rows.iter().collect();
    match order {
        // BTreeMap iteration is already id-ordered.
        RowOrder::ItemId => {}
        RowOrder::FirstCollected => {
            let pos = first_seen_positions(collected);
            out.sort_by(|(a, _), (b, _)| {
                let pa = pos.get(a.as_str()).copied().unwrap_or(usize::MAX);
                let pb = pos.get(b.as_str()).copied().unwrap_or(usize::MAX);
                match pa.cmp(&pb) {
                    Ordering::Equal => cmp_item_ids(a, b),
                    o => o,
                }
            });
        }
        RowOrder::ScoreDesc => {
            out.sort_by(|(a, ra), (b, rb)| match rb.total().cmp(&ra.total()) {
                Ordering::Equal => cmp_item_ids(a, b),
                o => o,
            });
        }
    }
    out
}

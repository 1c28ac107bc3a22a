//! Derived totals over a `RowSet`.
//!
//! Sums run over rows, never over the collected list: each row already folds
//! every occurrence of its id, so summing pickups again would double-count.

use crate::{RowSet, Totals};

/// `total_bonus = Σ bonus`, `grand_total = Σ (score + bonus)`; saturating.
pub fn compute_totals(rows: &RowSet) -> Totals {
    rows.values().fold(Totals::default(), |acc, row| Totals {
        total_bonus: acc.total_bonus.saturating_add(row.bonus),
        grand_total: acc.grand_total.saturating_add(row.total()),
    })
}

//! AGGREGATE stage: rows then totals. Pure; no I/O.

use tracing::debug;

use sb_algo::{compute_rows_with, compute_totals, AggregationStrategy, RowSet, Totals};
use sb_core::{Catalog, ItemId};

/// Rows for every eligible id plus the derived totals.
pub fn aggregate_round(
    catalog: &Catalog,
    collected: &[ItemId],
    strategy: AggregationStrategy,
) -> (RowSet, Totals) {
    let rows = compute_rows_with(strategy, catalog, collected);
    let totals = compute_totals(&rows);
    debug!(
        strategy = strategy.as_str(),
        pickups = collected.len(),
        eligible = rows.len(),
        "aggregated round"
    );
    (rows, totals)
}

/// Pickups whose id is not in the catalog.
pub fn ignored_pickups(rows: &RowSet, collected: &[ItemId]) -> u64 {
    let counted: u64 = rows.values().map(|r| r.count).sum();
    (collected.len() as u64).saturating_sub(counted)
}

//! Live scoreboard: the display collaborator's view of the aggregation core.
//!
//! Rows and totals are memoized and dropped whenever the catalog or collected
//! list changes; the next read recomputes them. `new_game` forwards to the
//! caller's callback and does nothing else.

use tracing::debug;

use sb_algo::{
    compute_rows_with, compute_totals, ordered_rows, AggregationStrategy, Row, RowOrder, RowSet, Totals,
};
use sb_core::{Catalog, CollectedList, ItemId};

#[derive(Debug)]
struct Memo {
    rows: RowSet,
    totals: Totals,
}

impl Memo {
    fn compute(strategy: AggregationStrategy, catalog: &Catalog, collected: &[ItemId]) -> Self {
        let rows = compute_rows_with(strategy, catalog, collected);
        let totals = compute_totals(&rows);
        debug!(eligible = rows.len(), grand_total = totals.grand_total, "scoreboard memo refreshed");
        Memo { rows, totals }
    }
}

/// Memo slot plus its refresh counter, kept apart from the inputs so both can
/// be borrowed at once.
#[derive(Debug, Default)]
struct MemoSlot {
    memo: Option<Memo>,
    refreshes: u64,
}

impl MemoSlot {
    fn get(&mut self, strategy: AggregationStrategy, catalog: &Catalog, collected: &[ItemId]) -> &Memo {
        if self.memo.is_none() {
            self.refreshes += 1;
        }
        self.memo.get_or_insert_with(|| Memo::compute(strategy, catalog, collected))
    }

    fn invalidate(&mut self) {
        self.memo = None;
    }
}

pub struct Scoreboard<F: FnMut()> {
    catalog: Catalog,
    collected: CollectedList,
    strategy: AggregationStrategy,
    on_new_game: F,
    slot: MemoSlot,
}

impl<F: FnMut()> Scoreboard<F> {
    pub fn new(catalog: Catalog, collected: CollectedList, on_new_game: F) -> Self {
        Scoreboard {
            catalog,
            collected,
            strategy: AggregationStrategy::default(),
            on_new_game,
            slot: MemoSlot::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: AggregationStrategy) -> Self {
        if strategy != self.strategy {
            self.strategy = strategy;
            self.slot.invalidate();
        }
        self
    }

    pub fn catalog(&self) -> &Catalog { &self.catalog }

    pub fn collected(&self) -> &[ItemId] { &self.collected }

    /// Replace the catalog; equal catalogs keep the memo.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        if catalog != self.catalog {
            self.catalog = catalog;
            self.slot.invalidate();
        }
    }

    /// Replace the collected list; equal lists keep the memo.
    pub fn set_collected(&mut self, collected: CollectedList) {
        if collected != self.collected {
            self.collected = collected;
            self.slot.invalidate();
        }
    }

    /// Append one pickup event.
    pub fn record_pickup(&mut self, id: ItemId) {
        self.collected.push(id);
        self.slot.invalidate();
    }

    /// Drop all pickups (the catalog stays).
    pub fn clear(&mut self) {
        if !self.collected.is_empty() {
            self.collected.clear();
            self.slot.invalidate();
        }
    }

    pub fn rows(&mut self) -> &RowSet {
        &self.slot.get(self.strategy, &self.catalog, &self.collected).rows
    }

    pub fn totals(&mut self) -> Totals {
        self.slot.get(self.strategy, &self.catalog, &self.collected).totals
    }

    pub fn ordered_rows(&mut self, order: RowOrder) -> Vec<(&ItemId, &Row)> {
        let memo = self.slot.get(self.strategy, &self.catalog, &self.collected);
        ordered_rows(&memo.rows, &self.collected, order)
    }

    /// Invoke the new-game trigger verbatim.
    pub fn new_game(&mut self) {
        (self.on_new_game)();
    }

    /// How many times rows have been (re)computed.
    pub fn refreshes(&self) -> u64 {
        self.slot.refreshes
    }
}

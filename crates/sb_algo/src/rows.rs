//! Row aggregation (deterministic, integers-only).
//!
//! Inputs:
//! - `catalog`: item definitions keyed by `ItemId`
//! - `collected`: every pickup event of the round, duplicates allowed
//!
//! Output:
//! - `RowSet` keyed by the *eligible* ids (collected **and** present in the catalog).
//!
//! Rules in this layer:
//! - Ids missing from the catalog are ignored, not reported.
//! - `count` is the full-list occurrence count; `score = count * value` is never capped.
//! - `bonus` is a step: the whole `bonus.amount` once `count >= bonus.count`, else 0.
//!   It is never prorated and never stacks.
//! - Arithmetic saturates at `u64::MAX`; aggregation cannot fail.

#![forbid(unsafe_code)]

use alloc::collections::BTreeMap;

use sb_core::{determinism::distinct_in_order, Catalog, ItemDefinition, ItemId};

use crate::{AggregationStrategy, Row, RowSet};

/// Aggregate with the default single-pass algorithm.
pub fn compute_rows(catalog: &Catalog, collected: &[ItemId]) -> RowSet {
    let mut counts: BTreeMap<&ItemId, u64> = BTreeMap::new();
    for id in collected.iter().filter(|id| catalog.contains(id.as_str())) {
        let c = counts.entry(id).or_insert(0);
        *c = c.saturating_add(1);
    }

    counts
        .into_iter()
        .filter_map(|(id, count)| {
            let def = catalog.get(id.as_str())?;
            Some((id.clone(), make_row(def, count)))
        })
        .collect()
}

/// Aggregate by first finding distinct eligible ids, then counting each over the full list.
pub fn compute_rows_two_pass(catalog: &Catalog, collected: &[ItemId]) -> RowSet {
    let mut rows = RowSet::new();
    for id in distinct_in_order(collected) {
        let Some(def) = catalog.get(id.as_str()) else { continue };
        let count = collected.iter().filter(|c| *c == id).count() as u64;
        rows.insert(id.clone(), make_row(def, count));
    }
    rows
}

/// Dispatch on `strategy`. Both algorithms yield identical `RowSet`s.
pub fn compute_rows_with(
    strategy: AggregationStrategy,
    catalog: &Catalog,
    collected: &[ItemId],
) -> RowSet {
    match strategy {
        AggregationStrategy::SinglePass => compute_rows(catalog, collected),
        AggregationStrategy::TwoPass => compute_rows_two_pass(catalog, collected),
    }
}

/// Bonus awarded to a definition collected `count` times.
#[inline]
pub fn bonus_for(def: &ItemDefinition, count: u64) -> u64 {
    match def.bonus {
        Some(b) if b.is_met(count) => b.amount,
        _ => 0,
    }
}

fn make_row(def: &ItemDefinition, count: u64) -> Row {
    Row {
        item: def.clone(),
        count,
        score: count.saturating_mul(def.value),
        bonus: bonus_for(def, count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::str::FromStr;

    fn id(s: &str) -> ItemId { ItemId::from_str(s).unwrap() }

    fn ids(v: &[&str]) -> Vec<ItemId> { v.iter().map(|s| id(s)).collect() }

    fn demo_catalog() -> Catalog {
        [
            (id("sword"), ItemDefinition::new(10)),
            (id("shield"), ItemDefinition::new(5).with_bonus(3, 20)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn sword_shield_potion_scenario() {
        let l = ids(&["sword", "shield", "shield", "shield", "potion"]);
        for strategy in [AggregationStrategy::SinglePass, AggregationStrategy::TwoPass] {
            let rows = compute_rows_with(strategy, &demo_catalog(), &l);
            assert_eq!(rows.len(), 2);
            let sword = &rows["sword"];
            assert_eq!((sword.count, sword.score, sword.bonus), (1, 10, 0));
            let shield = &rows["shield"];
            assert_eq!((shield.count, shield.score, shield.bonus), (3, 15, 20));
            assert!(!rows.contains_key("potion"));
        }
    }

    #[test]
    fn below_threshold_gets_no_bonus() {
        let rows = compute_rows(&demo_catalog(), &ids(&["shield", "shield"]));
        assert_eq!(rows["shield"].bonus, 0);
        assert_eq!(rows["shield"].score, 10);
    }

    #[test]
    fn above_threshold_does_not_stack_or_cap() {
        let l: Vec<ItemId> = (0..10).map(|_| id("shield")).collect();
        let rows = compute_rows(&demo_catalog(), &l);
        let r = &rows["shield"];
        assert_eq!(r.count, 10);
        assert_eq!(r.score, 50);
        assert_eq!(r.bonus, 20);
    }

    #[test]
    fn zero_threshold_awards_on_first_pickup() {
        let cat: Catalog = [(id("gem"), ItemDefinition::new(1).with_bonus(0, 7))].into_iter().collect();
        let rows = compute_rows(&cat, &ids(&["gem"]));
        assert_eq!(rows["gem"].bonus, 7);
    }

    #[test]
    fn empty_and_unknown_only_lists() {
        assert!(compute_rows(&demo_catalog(), &[]).is_empty());
        assert!(compute_rows(&demo_catalog(), &ids(&["potion", "potion", "map"])).is_empty());
        assert!(compute_rows_two_pass(&Catalog::new(), &ids(&["sword"])).is_empty());
    }

    #[test]
    fn score_saturates_instead_of_overflowing() {
        let cat: Catalog = [(id("big"), ItemDefinition::new(u64::MAX))].into_iter().collect();
        let rows = compute_rows(&cat, &ids(&["big", "big"]));
        assert_eq!(rows["big"].score, u64::MAX);
        assert_eq!(rows["big"].total(), u64::MAX);
    }
}

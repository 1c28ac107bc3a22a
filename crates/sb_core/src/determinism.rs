//! Determinism utilities: stable ordering over collected lists.
//!
//! This module is **I/O-free**. It provides:
//! - First-seen positions for ids in a collected list
//! - Distinct ids in collection order
//! - A stable comparator for ids

use core::cmp::Ordering;

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use crate::ids::ItemId;

/// Compare ids lexicographically (byte order of the UTF-8 text).
#[inline]
pub fn cmp_item_ids(a: &ItemId, b: &ItemId) -> Ordering {
    a.as_str().cmp(b.as_str())
}

/// Index of the first occurrence of every distinct id in `collected`.
pub fn first_seen_positions(collected: &[ItemId]) -> BTreeMap<&str, usize> {
    let mut pos: BTreeMap<&str, usize> = BTreeMap::new();
    for (i, id) in collected.iter().enumerate() {
        pos.entry(id.as_str()).or_insert(i);
    }
    pos
}

/// Distinct ids in order of first collection.
pub fn distinct_in_order(collected: &[ItemId]) -> Vec<&ItemId> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    collected
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    fn ids(v: &[&str]) -> Vec<ItemId> {
        v.iter().map(|s| ItemId::from_str(s).unwrap()).collect()
    }

    #[test]
    fn first_seen_keeps_earliest_index() {
        let l = ids(&["b", "a", "b", "c", "a"]);
        let pos = first_seen_positions(&l);
        assert_eq!(pos.get("b"), Some(&0));
        assert_eq!(pos.get("a"), Some(&1));
        assert_eq!(pos.get("c"), Some(&3));
        assert_eq!(pos.len(), 3);
    }

    #[test]
    fn distinct_preserves_collection_order() {
        let l = ids(&["shield", "sword", "shield", "potion", "sword"]);
        let d: Vec<&str> = distinct_in_order(&l).into_iter().map(|i| i.as_str()).collect();
        assert_eq!(d, vec!["shield", "sword", "potion"]);
    }

    #[test]
    fn empty_list_is_empty() {
        assert!(first_seen_positions(&[]).is_empty());
        assert!(distinct_in_order(&[]).is_empty());
    }
}

//! crates/sb_core/src/items.rs
//! Item definitions and the catalog they live in.

use alloc::collections::btree_map::{self, BTreeMap};
use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// Fixed bonus awarded once `count` occurrences have been collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bonus {
    /// Threshold number of occurrences.
    pub count: u64,
    /// Amount awarded when the threshold is met.
    pub amount: u64,
}

impl Bonus {
    #[inline]
    pub fn is_met(&self, occurrences: u64) -> bool {
        occurrences >= self.count
    }
}

/// Per-item scoring rule. The identifier is the catalog key, not a field.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemDefinition {
    /// Score per occurrence.
    pub value: u64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub bonus: Option<Bonus>,
    /// Display label; never used for scoring.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
}

impl ItemDefinition {
    pub fn new(value: u64) -> Self {
        Self { value, bonus: None, name: None }
    }

    pub fn with_bonus(mut self, count: u64, amount: u64) -> Self {
        self.bonus = Some(Bonus { count, amount });
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Immutable, externally supplied item catalog. Key-ordered for determinism.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Catalog(BTreeMap<ItemId, ItemDefinition>);

impl Catalog {
    pub fn new() -> Self { Self(BTreeMap::new()) }

    pub fn insert(&mut self, id: ItemId, def: ItemDefinition) -> Option<ItemDefinition> {
        self.0.insert(id, def)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&ItemDefinition> { self.0.get(id) }

    #[inline]
    pub fn contains(&self, id: &str) -> bool { self.0.contains_key(id) }

    #[inline]
    pub fn len(&self) -> usize { self.0.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> btree_map::Iter<'_, ItemId, ItemDefinition> { self.0.iter() }
}

impl FromIterator<(ItemId, ItemDefinition)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (ItemId, ItemDefinition)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a ItemId, &'a ItemDefinition);
    type IntoIter = btree_map::Iter<'a, ItemId, ItemDefinition>;
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

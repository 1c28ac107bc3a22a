//! crates/sb_core/src/ids.rs
//! Item identifier token. Any non-empty string is accepted;
//! the catalog decides which ids are meaningful.

use alloc::borrow::ToOwned;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[inline]
fn check_item_id(s: &str) -> Result<(), CoreError> {
    if s.is_empty() {
        return Err(CoreError::EmptyId);
    }
    Ok(())
}

/// Catalog key / collected entry, e.g. `"sword"`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct ItemId(String);

impl ItemId {
    #[inline] pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ItemId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl FromStr for ItemId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_item_id(s)?;
        Ok(ItemId(s.to_owned()))
    }
}

impl TryFrom<&str> for ItemId {
    type Error = CoreError;
    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
}

impl TryFrom<String> for ItemId {
    type Error = CoreError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        check_item_id(&value)?;
        Ok(ItemId(value))
    }
}

impl From<ItemId> for String {
    #[inline]
    fn from(id: ItemId) -> Self { id.0 }
}

// Lets maps keyed by ItemId be queried with a plain &str.
impl Borrow<str> for ItemId {
    #[inline]
    fn borrow(&self) -> &str { &self.0 }
}

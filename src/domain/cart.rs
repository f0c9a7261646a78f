//! Cart value object embedded in the user record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-user map of item id to quantity.
///
/// Quantities are always at least 1; an item whose quantity would drop
/// to zero is removed from the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Cart(BTreeMap<String, u32>);

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the quantity of `item_id`, inserting it at 1.
    pub fn add(&mut self, item_id: &str) -> u32 {
        let quantity = self.0.entry(item_id.to_string()).or_insert(0);
        *quantity = quantity.saturating_add(1);
        *quantity
    }

    /// Decrement the quantity of `item_id`. Returns the remaining quantity.
    pub fn remove(&mut self, item_id: &str) -> u32 {
        match self.0.get_mut(item_id) {
            Some(quantity) if *quantity > 1 => {
                *quantity -= 1;
                *quantity
            }
            Some(_) => {
                self.0.remove(item_id);
                0
            }
            None => 0,
        }
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.0.get(item_id).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    /// Build a cart from a stored JSON document, dropping non-positive entries.
    ///
    /// Older records may carry zero quantities; they are not carried over.
    pub fn from_document(value: &serde_json::Value) -> Self {
        let entries = value
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(id, qty)| {
                        qty.as_u64()
                            .filter(|q| *q > 0)
                            .map(|q| (id.clone(), u32::try_from(q).unwrap_or(u32::MAX)))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self(entries)
    }

    /// Serialize to the JSON document stored with the user.
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(id, qty)| (id.clone(), serde_json::Value::from(*qty)))
                .collect(),
        )
    }
}

impl FromIterator<(String, u32)> for Cart {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|(_, qty)| *qty > 0).collect())
    }
}

//! Item record and the validated field set used to write one.

use serde::{Deserialize, Serialize};

/// An inventory item as stored and as serialized to clients and the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub quantity: i64,
}

/// Writable fields of an item after validation.
///
/// Only constructed from a payload that passed validation, so `name` is
/// non-empty and `quantity` is non-negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub quantity: i64,
}

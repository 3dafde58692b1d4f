//! Item Service
//!
//! Cache-aside orchestration over the item store:
//! - single-item reads try the cache first and populate it on a miss
//! - updates write the store, then overwrite the cached entry and reset its TTL
//! - deletes remove the store record, then the cached entry
//! - list and create never touch the cache
//!
//! Store and cache are updated in sequence with no spanning transaction. A
//! failure between the two steps leaves a cached representation that may be
//! stale (or describe a deleted item) until its TTL elapses.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::{item_key, CacheStats, ItemCache};
use crate::db::ItemStore;
use crate::error::{push_field_error, ApiError, FieldErrors, Result, StoreError};
use crate::models::requests::DUPLICATE_NAME_MESSAGE;
use crate::models::{Item, ItemPayload};

pub struct ItemService {
    store: Arc<dyn ItemStore>,
    cache: Arc<dyn ItemCache>,
    cache_ttl: Duration,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>, cache: Arc<dyn ItemCache>, cache_ttl: Duration) -> Self {
        Self {
            store,
            cache,
            cache_ttl,
        }
    }

    // == List ==
    /// All items, straight from the store.
    pub async fn list(&self) -> Result<Vec<Item>> {
        let items = self.store.list().await?;
        info!("Retrieved all items ({})", items.len());
        Ok(items)
    }

    // == Get ==
    /// A single item, served from the cache when present.
    ///
    /// A hit is returned verbatim even if the store has changed since it was
    /// cached. A miss reads the store and caches the result for the TTL.
    pub async fn get(&self, id: i64) -> Result<Item> {
        let key = item_key(id);

        if let Some(cached) = self.cache.get(&key).await? {
            info!("Retrieved item {} from cache", id);
            return Ok(serde_json::from_str(&cached)?);
        }

        let Some(item) = self.store.find(id).await? else {
            warn!("Item {} not found", id);
            return Err(ApiError::item_not_found());
        };

        self.cache
            .set(&key, serde_json::to_string(&item)?, self.cache_ttl)
            .await?;
        info!("Retrieved item {} from database and cached it", id);
        Ok(item)
    }

    // == Create ==
    /// Validates and inserts a new item. The cache is not populated.
    pub async fn create(&self, payload: ItemPayload) -> Result<Item> {
        let mut errors = FieldErrors::new();
        if let Some(name) = payload.candidate_name() {
            if self.store.name_exists(name).await? {
                push_field_error(&mut errors, "name", DUPLICATE_NAME_MESSAGE);
            }
        }

        let fields = match payload.into_fields() {
            Ok(fields) if errors.is_empty() => fields,
            Ok(_) => return Err(self.rejected("create item", errors)),
            Err(field_errors) => {
                for (field, messages) in field_errors {
                    errors.entry(field).or_default().extend(messages);
                }
                return Err(self.rejected("create item", errors));
            }
        };

        let item = self
            .store
            .insert(&fields)
            .await
            .map_err(|e| self.conflict_to_validation("create item", e))?;
        info!("Created new item: {}", item.name);
        Ok(item)
    }

    // == Update ==
    /// Replaces every field of an existing item and refreshes its cache entry.
    ///
    /// The name is not re-checked against other items here; a collision is
    /// still caught by the store's unique constraint.
    pub async fn update(&self, id: i64, payload: ItemPayload) -> Result<Item> {
        if self.store.find(id).await?.is_none() {
            warn!("Item {} not found for update", id);
            return Err(ApiError::item_not_found());
        }

        let fields = payload
            .into_fields()
            .map_err(|errors| self.rejected(&format!("update item {}", id), errors))?;

        let updated = self
            .store
            .update(id, &fields)
            .await
            .map_err(|e| self.conflict_to_validation(&format!("update item {}", id), e))?;
        let Some(item) = updated else {
            // Deleted between the lookup and the write
            warn!("Item {} not found for update", id);
            return Err(ApiError::item_not_found());
        };

        self.cache
            .set(&item_key(id), serde_json::to_string(&item)?, self.cache_ttl)
            .await?;
        info!("Updated item {}", id);
        Ok(item)
    }

    // == Delete ==
    /// Removes the store record, then any cached representation.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.store.delete(id).await? {
            warn!("Item {} not found for deletion", id);
            return Err(ApiError::item_not_found());
        }

        self.cache.delete(&item_key(id)).await?;
        info!("Deleted item {}", id);
        Ok(())
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Drops every cached item; subsequent reads go to the store.
    pub async fn clear_cache(&self) -> Result<()> {
        self.cache.clear().await?;
        info!("Item cache cleared");
        Ok(())
    }

    fn rejected(&self, action: &str, errors: FieldErrors) -> ApiError {
        warn!("Failed to {}: {:?}", action, errors);
        ApiError::Validation(errors)
    }

    fn conflict_to_validation(&self, action: &str, err: StoreError) -> ApiError {
        match err {
            StoreError::Conflict(_) => {
                let mut errors = FieldErrors::new();
                push_field_error(&mut errors, "name", DUPLICATE_NAME_MESSAGE);
                self.rejected(action, errors)
            }
            other => other.into(),
        }
    }
}

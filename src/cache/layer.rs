//! Cache Layer
//!
//! The key-value-with-expiry contract the item service depends on, and the
//! in-process implementation backed by [`CacheStore`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheError;

/// Key-value cache with per-entry expiry.
///
/// Implementations must treat single-key operations as atomic and must never
/// return an entry whose TTL has elapsed.
#[async_trait]
pub trait ItemCache: Send + Sync {
    /// Returns the live value for `key`, or `None` on a miss.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Writes `value` under `key`, replacing any previous value and TTL.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Absence is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Drops every entry in the namespace.
    async fn clear(&self) -> Result<(), CacheError>;

    async fn stats(&self) -> CacheStats;
}

/// In-process cache shared across request handlers.
#[derive(Clone, Default)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // Write lock: expired entries are removed and stats updated on read
        let mut store = self.store.write().await;
        match store.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(CacheError::NotFound(_)) | Err(CacheError::Expired(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.set(key.to_string(), value, ttl)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.delete(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        let removed = store.clear();
        tracing::debug!("Cache cleared: removed {} entries", removed);
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

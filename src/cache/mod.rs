//! Cache Module
//!
//! Provides the read-through cache for items: a TTL key-value store and the
//! `ItemCache` trait the item service is written against.

mod entry;
mod layer;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use layer::{ItemCache, MemoryCache};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Cache key under which a single item's representation is stored.
pub fn item_key(id: i64) -> String {
    format!("item_{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key_format() {
        assert_eq!(item_key(1), "item_1");
        assert_eq!(item_key(42), "item_42");
    }
}

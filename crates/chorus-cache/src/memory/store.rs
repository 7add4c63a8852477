//! In-memory query cache built on moka.

use std::time::Duration;

use moka::sync::Cache;
use serde_json::Value;
use tracing::debug;

use chorus_core::config::CacheConfig;
use chorus_core::traits::QueryCache;
use chorus_core::types::QueryKey;

/// In-memory query cache.
///
/// `invalidate_all` is a single cut-off in moka: every entry inserted
/// before the call becomes invisible at once, so no reader sees a
/// half-purged cache.
#[derive(Debug, Clone)]
pub struct MemoryQueryCache {
    /// The underlying moka cache.
    cache: Cache<QueryKey, Value>,
}

impl MemoryQueryCache {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self { cache }
    }
}

impl QueryCache for MemoryQueryCache {
    fn get(&self, key: &QueryKey) -> Option<Value> {
        self.cache.get(key)
    }

    fn insert(&self, key: QueryKey, value: Value) {
        debug!(key = %key, "Caching query response");
        self.cache.insert(key, value);
    }

    fn invalidate(&self, key: &QueryKey) {
        self.cache.invalidate(key);
    }

    fn invalidate_all(&self) {
        let purged = self.entry_count();
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
        debug!(purged, "Invalidated all cached queries");
    }

    fn entry_count(&self) -> u64 {
        // moka's own counter lags behind pending writes; iteration only
        // yields live entries.
        self.cache.iter().count() as u64
    }
}

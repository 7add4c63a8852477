//! Cache manager shared by the session context.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use chorus_core::config::CacheConfig;
use chorus_core::traits::QueryCache;
use chorus_core::types::QueryKey;

use crate::memory::MemoryQueryCache;

/// Handle to the process-wide query cache.
///
/// Cloning is cheap; all clones see the same entries.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// The inner cache backend.
    inner: Arc<dyn QueryCache>,
}

impl CacheManager {
    /// Create a new cache manager from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        info!(
            max_capacity = config.max_capacity,
            ttl_seconds = config.time_to_live_seconds,
            "Initializing in-memory query cache"
        );
        Self {
            inner: Arc::new(MemoryQueryCache::new(config)),
        }
    }
}

impl QueryCache for CacheManager {
    fn get(&self, key: &QueryKey) -> Option<Value> {
        self.inner.get(key)
    }

    fn insert(&self, key: QueryKey, value: Value) {
        self.inner.insert(key, value)
    }

    fn invalidate(&self, key: &QueryKey) {
        self.inner.invalidate(key)
    }

    fn invalidate_all(&self) {
        self.inner.invalidate_all()
    }

    fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

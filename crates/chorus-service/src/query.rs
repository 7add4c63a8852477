//! Cached fetches scoped to the current identity.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use chorus_core::result::AppResult;
use chorus_core::traits::QueryCache;
use chorus_core::types::QueryKey;

/// Generation counter of the session identity.
///
/// Bumped whenever the identity changes. A fetch that started under an
/// older generation must not populate the cache, otherwise a response for
/// the previous user could outlive a logout.
#[derive(Debug, Default)]
pub struct IdentityEpoch(AtomicU64);

impl IdentityEpoch {
    /// Current generation.
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Starts a new generation.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Returns the cached response for `key`, or runs `fetch` and caches its
/// result.
///
/// An entry that no longer decodes as `T` is dropped and refetched.
pub async fn cached<T, F, Fut>(
    cache: &dyn QueryCache,
    epoch: &IdentityEpoch,
    key: QueryKey,
    fetch: F,
) -> AppResult<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    if let Some(value) = cache.get(&key) {
        match serde_json::from_value(value) {
            Ok(hit) => {
                debug!(key = %key, "Query cache hit");
                return Ok(hit);
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Dropping undecodable cache entry");
                cache.invalidate(&key);
            }
        }
    }

    let started = epoch.current();
    let fresh = fetch().await?;

    if epoch.current() == started {
        cache.insert(key, serde_json::to_value(&fresh)?);
    } else {
        debug!(key = %key, "Identity changed during fetch, not caching");
    }

    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chorus_cache::MemoryQueryCache;
    use chorus_core::config::CacheConfig;
    use chorus_core::error::AppError;

    fn cache() -> MemoryQueryCache {
        MemoryQueryCache::new(&CacheConfig::default())
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let cache = cache();
        let epoch = IdentityEpoch::default();
        let key = QueryKey::new("numbers");

        let first: Vec<u32> = cached(&cache, &epoch, key.clone(), || async { Ok(vec![1, 2]) })
            .await
            .unwrap();
        let second: Vec<u32> = cached(&cache, &epoch, key, || async {
            Err(AppError::internal("must not be called"))
        })
        .await
        .unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.entry_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache = cache();
        let epoch = IdentityEpoch::default();

        let result: AppResult<u32> = cached(&cache, &epoch, QueryKey::new("x"), || async {
            Err(AppError::external_service("503"))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_spanning_identity_change_is_discarded() {
        let cache = cache();
        let epoch = IdentityEpoch::default();

        let value: u32 = cached(&cache, &epoch, QueryKey::new("x"), || async {
            epoch.advance();
            Ok(7)
        })
        .await
        .unwrap();

        assert_eq!(value, 7);
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_refetched() {
        let cache = cache();
        let epoch = IdentityEpoch::default();
        let key = QueryKey::new("x");
        cache.insert(key.clone(), serde_json::json!("not a number"));

        let value: u32 = cached(&cache, &epoch, key.clone(), || async { Ok(3) })
            .await
            .unwrap();

        assert_eq!(value, 3);
        assert_eq!(cache.get(&key), Some(serde_json::json!(3)));
    }
}

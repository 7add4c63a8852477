//! Remote data cache contract.

use serde_json::Value;

use crate::types::QueryKey;

/// Keyed store of previously fetched server responses.
///
/// Every entry is scoped to the current identity; the session layer calls
/// [`QueryCache::invalidate_all`] whenever that identity goes away.
pub trait QueryCache: Send + Sync + std::fmt::Debug + 'static {
    /// Returns a cached response.
    fn get(&self, key: &QueryKey) -> Option<Value>;

    /// Caches a response, replacing any previous one for `key`.
    fn insert(&self, key: QueryKey, value: Value);

    /// Drops a single entry.
    fn invalidate(&self, key: &QueryKey);

    /// Drops every entry. Safe on an empty cache; `entry_count` is zero
    /// when this returns.
    fn invalidate_all(&self);

    /// Number of live entries.
    fn entry_count(&self) -> u64;
}

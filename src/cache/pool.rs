//! Cache Pool Module
//!
//! A single bounded TTL key-value store with least-recently-used eviction.
//! Pools are pure data structures: the caller supplies the current time on
//! every operation, which keeps expiry deterministic under test.

use std::collections::{HashMap, VecDeque};

use serde_json::Value;

use crate::cache::{CacheEntry, PoolStats};

// == Cache Pool ==
/// Bounded, expiring key-value store for one data class.
///
/// Recency order is tracked in a deque: front = most recently used,
/// back = least recently used.
#[derive(Debug)]
pub struct CachePool {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Access order for LRU eviction
    recency: VecDeque<String>,
    /// Performance counters
    stats: PoolStats,
    /// Maximum number of live entries
    max_size: usize,
    /// TTL applied to every entry, in seconds
    ttl_seconds: u64,
}

impl CachePool {
    /// Creates an empty pool with the given capacity and TTL.
    pub fn new(max_size: usize, ttl_seconds: u64) -> Self {
        Self {
            entries: HashMap::new(),
            recency: VecDeque::new(),
            stats: PoolStats::default(),
            max_size,
            ttl_seconds,
        }
    }

    /// The TTL this pool applies to every entry, in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// The maximum number of live entries this pool holds.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    // == Get ==
    /// Returns the value for `key` if present and unexpired.
    ///
    /// An expired entry is removed on read and counted as a miss. A hit
    /// refreshes the key's recency.
    pub fn get(&mut self, key: &str, now_ms: u64) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired(now_ms) => {
                self.entries.remove(key);
                self.recency.retain(|k| k != key);
                self.stats.record_expired(1);
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.touch(key);
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores `value` under `key` with the pool's configured TTL.
    ///
    /// Overwriting an existing key resets its TTL. When the pool is at
    /// capacity and the key is new, expired entries are purged first; if
    /// still full, the least recently used entry is evicted.
    pub fn insert(&mut self, key: String, value: Value, now_ms: u64) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_size {
            if self.purge_expired(now_ms) == 0 {
                if let Some(oldest) = self.recency.pop_back() {
                    self.entries.remove(&oldest);
                    self.stats.record_eviction();
                }
            }
        }

        let entry = CacheEntry::new(value, now_ms, self.ttl_seconds);
        self.entries.insert(key.clone(), entry);
        self.touch(&key);
        self.stats.entries = self.entries.len();
    }

    // == Remove ==
    /// Removes one entry. Returns true if the key was present.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.recency.retain(|k| k != key);
            self.stats.entries = self.entries.len();
            true
        } else {
            false
        }
    }

    // == Invalidate By Prefix ==
    /// Removes every key starting with `prefix`; an empty prefix clears the
    /// whole pool. Returns the number of entries removed.
    pub fn invalidate_prefix(&mut self, prefix: &str) -> usize {
        if prefix.is_empty() {
            let removed = self.entries.len();
            self.entries.clear();
            self.recency.clear();
            self.stats.entries = 0;
            return removed;
        }

        let doomed: Vec<String> = self
            .entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();

        for key in &doomed {
            self.entries.remove(key);
        }
        self.recency.retain(|k| !k.starts_with(prefix));
        self.stats.entries = self.entries.len();
        doomed.len()
    }

    // == Purge Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn purge_expired(&mut self, now_ms: u64) -> usize {
        let doomed: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &doomed {
            self.entries.remove(key);
            self.recency.retain(|k| k != key);
        }

        self.stats.record_expired(doomed.len() as u64);
        self.stats.entries = self.entries.len();
        doomed.len()
    }

    // == Stats ==
    /// Returns a snapshot of this pool's counters.
    pub fn stats(&self) -> PoolStats {
        let mut stats = self.stats.clone();
        stats.entries = self.entries.len();
        stats
    }

    /// Returns the current number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the pool holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves `key` to the most-recently-used position.
    fn touch(&mut self, key: &str) {
        self.recency.retain(|k| k != key);
        self.recency.push_front(key.to_string());
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: u64 = 1_000_000;

    #[test]
    fn test_pool_set_and_get() {
        let mut pool = CachePool::new(100, 60);

        pool.insert("members:1".into(), json!(["alice"]), NOW);
        assert_eq!(pool.get("members:1", NOW), Some(json!(["alice"])));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_pool_get_missing() {
        let mut pool = CachePool::new(100, 60);
        assert_eq!(pool.get("nope", NOW), None);
        assert_eq!(pool.stats().misses, 1);
    }

    #[test]
    fn test_pool_overwrite_resets_ttl() {
        let mut pool = CachePool::new(100, 60);

        pool.insert("k".into(), json!(1), NOW);
        // Rewrite 30s later; entry should now live until NOW + 90s.
        pool.insert("k".into(), json!(2), NOW + 30_000);

        assert_eq!(pool.get("k", NOW + 80_000), Some(json!(2)));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_pool_ttl_expiry_on_read() {
        let mut pool = CachePool::new(100, 60);

        pool.insert("k".into(), json!("v"), NOW);
        assert!(pool.get("k", NOW + 59_999).is_some());
        assert!(pool.get("k", NOW + 60_000).is_none());
        assert_eq!(pool.len(), 0, "expired entry removed on read");
        assert_eq!(pool.stats().expired, 1);
    }

    #[test]
    fn test_pool_lru_eviction() {
        let mut pool = CachePool::new(3, 60);

        pool.insert("a".into(), json!(1), NOW);
        pool.insert("b".into(), json!(2), NOW);
        pool.insert("c".into(), json!(3), NOW);
        pool.insert("d".into(), json!(4), NOW);

        assert_eq!(pool.len(), 3);
        assert!(pool.get("a", NOW).is_none(), "oldest entry evicted");
        assert!(pool.get("b", NOW).is_some());
        assert!(pool.get("d", NOW).is_some());
        assert_eq!(pool.stats().evictions, 1);
    }

    #[test]
    fn test_pool_get_refreshes_recency() {
        let mut pool = CachePool::new(3, 60);

        pool.insert("a".into(), json!(1), NOW);
        pool.insert("b".into(), json!(2), NOW);
        pool.insert("c".into(), json!(3), NOW);

        // Touch "a" so "b" becomes the eviction candidate.
        pool.get("a", NOW);
        pool.insert("d".into(), json!(4), NOW);

        assert!(pool.get("a", NOW).is_some());
        assert!(pool.get("b", NOW).is_none());
    }

    #[test]
    fn test_pool_prefers_purging_expired_over_evicting_live() {
        let mut pool = CachePool::new(2, 60);

        pool.insert("old".into(), json!(1), NOW);
        pool.insert("live".into(), json!(2), NOW + 59_000);

        // "old" has expired by the time a third key arrives; it should be
        // purged instead of evicting "live".
        pool.insert("new".into(), json!(3), NOW + 61_000);

        assert!(pool.get("live", NOW + 61_000).is_some());
        assert!(pool.get("new", NOW + 61_000).is_some());
        assert_eq!(pool.stats().evictions, 0);
    }

    #[test]
    fn test_pool_remove() {
        let mut pool = CachePool::new(100, 60);

        pool.insert("k".into(), json!("v"), NOW);
        assert!(pool.remove("k"));
        assert!(!pool.remove("k"));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pool_invalidate_prefix() {
        let mut pool = CachePool::new(100, 60);

        pool.insert("members:1:page0".into(), json!(1), NOW);
        pool.insert("members:1:page1".into(), json!(2), NOW);
        pool.insert("members:2:page0".into(), json!(3), NOW);
        pool.insert("org_details:1".into(), json!(4), NOW);

        let removed = pool.invalidate_prefix("members:1");
        assert_eq!(removed, 2);
        assert!(pool.get("members:1:page0", NOW).is_none());
        assert!(pool.get("members:2:page0", NOW).is_some());
        assert!(pool.get("org_details:1", NOW).is_some());
    }

    #[test]
    fn test_pool_invalidate_empty_prefix_clears_all() {
        let mut pool = CachePool::new(100, 60);

        pool.insert("a".into(), json!(1), NOW);
        pool.insert("b".into(), json!(2), NOW);

        let removed = pool.invalidate_prefix("");
        assert_eq!(removed, 2);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pool_purge_expired() {
        let mut pool = CachePool::new(100, 60);

        pool.insert("old".into(), json!(1), NOW);
        pool.insert("new".into(), json!(2), NOW + 30_000);

        let removed = pool.purge_expired(NOW + 61_000);
        assert_eq!(removed, 1);
        assert_eq!(pool.len(), 1);
        assert!(pool.get("new", NOW + 61_000).is_some());
    }
}

//! Cache Registry Module
//!
//! Owns the set of named pools and fronts every cached read/write in the
//! process. Callers never handle pool objects directly: all operations go
//! through the facade methods here, and an unknown pool name degrades to a
//! miss/no-op rather than an error, so feature modules can reference pools
//! defensively before registration has happened.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, RwLock};

use serde_json::Value;
use tracing::debug;

use crate::cache::{CachePool, PoolStats};
use crate::clock::Clock;

// == Cache Registry ==
/// Named, independently configured TTL pools behind one facade.
///
/// The pool map is read-mostly after startup; each pool carries its own
/// mutex so concurrent flows touching different pools never contend.
pub struct CacheRegistry {
    pools: RwLock<HashMap<String, Arc<Mutex<CachePool>>>>,
    clock: Arc<dyn Clock>,
}

impl CacheRegistry {
    /// Creates an empty registry using the given clock for expiry.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            pools: RwLock::new(HashMap::new()),
            clock,
        }
    }

    // == Pool Registration ==
    /// Registers a pool. First registration wins: if the name is already
    /// taken this is a silent no-op, so feature modules can declare pools
    /// without coordinating with the core list or with each other.
    pub fn register_pool(&self, name: &str, max_size: usize, ttl_seconds: u64) {
        let mut pools = self.pools.write().expect("pool map lock poisoned");
        if pools.contains_key(name) {
            return;
        }
        debug!(pool = name, max_size, ttl_seconds, "cache pool registered");
        pools.insert(
            name.to_string(),
            Arc::new(Mutex::new(CachePool::new(max_size, ttl_seconds))),
        );
    }

    /// Returns the names of all registered pools, sorted.
    pub fn pool_names(&self) -> Vec<String> {
        let pools = self.pools.read().expect("pool map lock poisoned");
        let mut names: Vec<String> = pools.keys().cloned().collect();
        names.sort();
        names
    }

    // == Get ==
    /// Returns the cached value if the pool exists and the key is present
    /// and unexpired; `None` otherwise.
    pub fn get(&self, pool: &str, key: &str) -> Option<Value> {
        let handle = self.pool(pool)?;
        let mut guard = handle.lock().expect("pool lock poisoned");
        guard.get(key, self.clock.now_ms())
    }

    // == Set ==
    /// Stores a value with the pool's configured TTL. No-op if the pool
    /// does not exist.
    pub fn set(&self, pool: &str, key: &str, value: Value) {
        if let Some(handle) = self.pool(pool) {
            let mut guard = handle.lock().expect("pool lock poisoned");
            guard.insert(key.to_string(), value, self.clock.now_ms());
        }
    }

    // == Delete ==
    /// Removes one entry. Returns true if the key was present.
    pub fn delete(&self, pool: &str, key: &str) -> bool {
        match self.pool(pool) {
            Some(handle) => {
                let mut guard = handle.lock().expect("pool lock poisoned");
                guard.remove(key)
            }
            None => false,
        }
    }

    // == Invalidate ==
    /// Removes every key in `pool` starting with `prefix`; an empty prefix
    /// clears the pool. Returns the number of entries removed.
    ///
    /// Prefix invalidation is the contract write endpoints rely on: any key
    /// derivable from an entity must start with that entity's stable
    /// identifier (e.g. `"members:{org_id}"`), or invalidation will miss it.
    pub fn invalidate(&self, pool: &str, prefix: &str) -> usize {
        match self.pool(pool) {
            Some(handle) => {
                let mut guard = handle.lock().expect("pool lock poisoned");
                let removed = guard.invalidate_prefix(prefix);
                if removed > 0 {
                    debug!(pool, prefix, removed, "cache invalidated");
                }
                removed
            }
            None => 0,
        }
    }

    // == Invalidate Multi ==
    /// Applies `invalidate` across several pools in one call, for writes
    /// that touch several cached views at once. Returns the total removed.
    pub fn invalidate_multi(&self, pools: &[&str], prefix: &str) -> usize {
        pools.iter().map(|p| self.invalidate(p, prefix)).sum()
    }

    // == Purge Expired ==
    /// Sweeps expired entries from every pool. Returns the total removed.
    /// Driven by the core maintenance task; expiry is otherwise lazy.
    pub fn purge_expired(&self) -> usize {
        let handles: Vec<Arc<Mutex<CachePool>>> = {
            let pools = self.pools.read().expect("pool map lock poisoned");
            pools.values().cloned().collect()
        };

        let now_ms = self.clock.now_ms();
        handles
            .iter()
            .map(|handle| {
                let mut guard = handle.lock().expect("pool lock poisoned");
                guard.purge_expired(now_ms)
            })
            .sum()
    }

    // == Stats ==
    /// Returns a per-pool snapshot of cache counters.
    pub fn stats(&self) -> BTreeMap<String, PoolStats> {
        let pools = self.pools.read().expect("pool map lock poisoned");
        pools
            .iter()
            .map(|(name, handle)| {
                let guard = handle.lock().expect("pool lock poisoned");
                (name.clone(), guard.stats())
            })
            .collect()
    }

    fn pool(&self, name: &str) -> Option<Arc<Mutex<CachePool>>> {
        let pools = self.pools.read().expect("pool map lock poisoned");
        pools.get(name).cloned()
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("pools", &self.pool_names())
            .finish()
    }
}

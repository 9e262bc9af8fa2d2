//! Pool Statistics Module
//!
//! Tracks per-pool cache performance metrics.

use serde::Serialize;

// == Pool Stats ==
/// Performance counters for a single cache pool.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PoolStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted by the size bound
    pub evictions: u64,
    /// Number of entries removed because their TTL elapsed
    pub expired: u64,
    /// Current number of live entries in the pool
    pub entries: usize,
}

impl PoolStats {
    /// Calculates the hit rate: hits / (hits + misses), or 0.0 with no traffic.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_expired(&mut self, count: u64) {
        self.expired += count;
    }
}

//! Cache Entry Module
//!
//! Defines the structure for individual cached values with TTL metadata.

use serde_json::Value;

// == Cache Entry ==
/// A single cached value with its expiry metadata.
///
/// Entries always expire: the TTL comes from the owning pool's
/// configuration, never from the caller.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value (handlers cache JSON rows from the relational store)
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at_ms: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at_ms: u64,
}

impl CacheEntry {
    /// Creates a new entry expiring `ttl_seconds` after `now_ms`.
    pub fn new(value: Value, now_ms: u64, ttl_seconds: u64) -> Self {
        Self {
            value,
            created_at_ms: now_ms,
            expires_at_ms: now_ms + ttl_seconds * 1000,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now_ms`.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to the expiration time, so a TTL that has
    /// fully elapsed means the entry is treated as absent.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds as of `now_ms` (0 if expired).
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at_ms.saturating_sub(now_ms)
    }
}

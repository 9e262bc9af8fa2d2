//! Cache Module
//!
//! Named in-memory TTL pools with LRU eviction and prefix invalidation.
//! Every cached read/write in the backend goes through [`CacheRegistry`];
//! the database stays the source of truth and the cache is always a
//! disposable derived view.

mod entry;
mod pool;
mod registry;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use pool::CachePool;
pub use registry::CacheRegistry;
pub use stats::PoolStats;

// == Core Pools ==
/// Platform-level pools registered unconditionally at bootstrap, as
/// `(name, max_size, ttl_seconds)`.
///
/// The relative TTL ordering is the contract: auth/session data has the
/// shortest staleness window, near-static catalogs the longest.
pub const CORE_POOLS: &[(&str, usize, u64)] = &[
    ("auth", 512, 60),       // user lookups, membership checks
    ("org", 256, 120),       // org details, invite codes, member lists
    ("catalog", 256, 120),   // products, agent registry
    ("plans", 32, 600),      // subscription plans (rarely change)
    ("analytics", 256, 30),  // team/agent analytics, dashboards
    ("reports", 128, 60),    // activity reports
];

//! Configuration Module
//!
//! Handles loading scheduler/cache tuning knobs from environment variables.

use std::env;

/// Coordination layer configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scheduler base tick interval in seconds
    pub tick_interval_secs: u64,
    /// Interval in seconds for the core expired-entry purge task
    pub cache_purge_interval_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SCHEDULER_TICK_SECS` - Scheduler tick interval (default: 10)
    /// - `CACHE_PURGE_INTERVAL_SECS` - Expired-entry purge interval (default: 60)
    pub fn from_env() -> Self {
        Self {
            tick_interval_secs: env::var("SCHEDULER_TICK_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            cache_purge_interval_secs: env::var("CACHE_PURGE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_secs: 10,
            cache_purge_interval_secs: 60,
        }
    }
}

//! Context Module
//!
//! The explicit application context handed to every handler and task,
//! plus the bootstrap step that builds it from module manifests. There are
//! no process-wide singletons: everything flows through [`AppContext`].

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cache::{CacheRegistry, CORE_POOLS};
use crate::clock::Clock;
use crate::config::Config;
use crate::error::Result;
use crate::manifest::ModuleManifest;
use crate::scheduler::{work_fn, ScheduledTask, Scheduler};
use crate::tasklog::{TaskLogStore, TaskLogger};

// == App Context ==
/// Shared handles for request handlers and scheduled task bodies.
#[derive(Clone)]
pub struct AppContext {
    /// Cache facade, the only path to cached reads/writes
    pub cache: Arc<CacheRegistry>,
    /// Agent activity logger
    pub task_log: TaskLogger,
    /// Clock shared with the cache and scheduler
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("cache", &self.cache)
            .field("task_log", &self.task_log)
            .finish_non_exhaustive()
    }
}

// == Bootstrap ==
/// Builds the context and scheduler from the collected module manifests.
///
/// Order matters and runs once at process startup, before the scheduler
/// loop starts:
/// 1. register the core pools,
/// 2. register each manifest's pools (first-wins) and tasks,
/// 3. register the core expired-entry purge task.
///
/// The caller owns starting the loop (`tokio::spawn(scheduler.run())`) and
/// stopping it through [`crate::scheduler::SchedulerHandle`].
pub fn bootstrap(
    config: &Config,
    manifests: Vec<ModuleManifest>,
    log_store: Arc<dyn TaskLogStore>,
    clock: Arc<dyn Clock>,
) -> Result<(AppContext, Scheduler)> {
    let cache = Arc::new(CacheRegistry::new(clock.clone()));
    for (name, max_size, ttl_seconds) in CORE_POOLS {
        cache.register_pool(name, *max_size, *ttl_seconds);
    }

    let mut scheduler = Scheduler::new(Duration::from_secs(config.tick_interval_secs), clock.clone());

    for manifest in manifests {
        info!(module = %manifest.module_id, name = %manifest.name, "module registered");
        for pool in &manifest.pools {
            cache.register_pool(&pool.name, pool.max_size, pool.ttl_seconds);
        }
        let module_id = manifest.module_id;
        for task in manifest.tasks {
            scheduler.register(task.into_task(&module_id))?;
        }
    }

    // Expiry is lazy on read; this sweep bounds memory held by keys that
    // are never read again.
    let purge_cache = cache.clone();
    scheduler.register(ScheduledTask::new(
        "core:cache:purge-expired",
        "core",
        config.cache_purge_interval_secs,
        work_fn(move || {
            let cache = purge_cache.clone();
            async move {
                let removed = cache.purge_expired();
                if removed > 0 {
                    info!(removed, "purged expired cache entries");
                }
                Ok(())
            }
        }),
    ))?;

    let context = AppContext {
        cache,
        task_log: TaskLogger::new(log_store),
        clock,
    };

    Ok((context, scheduler))
}

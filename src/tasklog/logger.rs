//! Task Logger Module
//!
//! Thin front over the task log store, plus the wall-clock timer callers
//! use to fill `execution_time_ms`.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::error::Result;
use crate::tasklog::{NewTaskLog, TaskLogStore};

// == Task Logger ==
/// Records agent activity to the underlying store.
///
/// A pure data sink: no validation beyond the required fields, no
/// deduplication, one row per call. Write failures propagate to the
/// caller as [`crate::error::HubError::LogWrite`].
#[derive(Clone)]
pub struct TaskLogger {
    store: Arc<dyn TaskLogStore>,
}

impl TaskLogger {
    pub fn new(store: Arc<dyn TaskLogStore>) -> Self {
        Self { store }
    }

    /// Writes one record and returns its store-assigned id.
    pub async fn log(&self, entry: NewTaskLog) -> Result<String> {
        let agent = entry.agent_id.clone();
        let task_type = entry.task_type.clone();
        let stored = self.store.insert(entry).await?;
        debug!(agent = %agent, task_type = %task_type, id = %stored.id, "task logged");
        Ok(stored.id)
    }
}

impl std::fmt::Debug for TaskLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskLogger").finish_non_exhaustive()
    }
}

// == Task Timer ==
/// Scoped wall-clock measurement around one unit of work.
///
/// ```
/// # use hub_core::tasklog::TaskTimer;
/// let timer = TaskTimer::start();
/// // ... do the work ...
/// let elapsed = timer.elapsed_ms();
/// ```
#[derive(Debug)]
pub struct TaskTimer {
    started_at: Instant,
}

impl TaskTimer {
    /// Captures the start instant.
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    /// Milliseconds elapsed since `start`. Infallible.
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }
}

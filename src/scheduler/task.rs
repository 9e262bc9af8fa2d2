//! Scheduled Task Module
//!
//! Task and outcome types for the unified scheduler. Work and condition
//! functions are typed values captured at registration time: there is no
//! string-path dispatch, so a missing function is a compile error instead
//! of a silent runtime failure.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

// == Function Types ==
/// Boxed future returned by task work and condition functions.
pub type TaskFuture<T> = Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send>>;

/// An async unit of background work.
pub type WorkFn = Arc<dyn Fn() -> TaskFuture<()> + Send + Sync>;

/// A cheap async pre-run check; `false` skips the work for this interval.
pub type ConditionFn = Arc<dyn Fn() -> TaskFuture<bool> + Send + Sync>;

/// Wraps an async closure as a [`WorkFn`].
pub fn work_fn<F, Fut>(f: F) -> WorkFn
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move || Box::pin(f()))
}

/// Wraps an async closure as a [`ConditionFn`].
pub fn condition_fn<F, Fut>(f: F) -> ConditionFn
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
{
    Arc::new(move || Box::pin(f()))
}

// == Scheduled Task ==
/// A registered background job with its interval and mutable run state.
#[derive(Clone)]
pub struct ScheduledTask {
    /// Task name, by convention `module:agent:purpose`
    pub name: String,
    /// Owning feature module, for diagnostics
    pub module_id: String,
    /// Owning agent within the module, if any
    pub agent_id: Option<String>,
    /// Minimum seconds between run attempts
    pub interval_secs: u64,
    /// The work function
    pub work: WorkFn,
    /// Optional pre-run gate
    pub condition: Option<ConditionFn>,
    /// Unix millis of the last run attempt (successful or not)
    pub last_run_ms: Option<u64>,
    /// Paused tasks stay registered but are never attempted
    pub enabled: bool,
}

impl ScheduledTask {
    /// Creates an enabled task that has never run.
    pub fn new(name: impl Into<String>, module_id: impl Into<String>, interval_secs: u64, work: WorkFn) -> Self {
        Self {
            name: name.into(),
            module_id: module_id.into(),
            agent_id: None,
            interval_secs,
            work,
            condition: None,
            last_run_ms: None,
            enabled: true,
        }
    }

    /// Attaches a pre-run condition.
    pub fn with_condition(mut self, condition: ConditionFn) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Sets the owning agent id.
    pub fn with_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// True when the interval has elapsed since the last attempt, or the
    /// task has never been attempted.
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_run_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.interval_secs * 1000,
            None => true,
        }
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("name", &self.name)
            .field("module_id", &self.module_id)
            .field("agent_id", &self.agent_id)
            .field("interval_secs", &self.interval_secs)
            .field("has_condition", &self.condition.is_some())
            .field("last_run_ms", &self.last_run_ms)
            .field("enabled", &self.enabled)
            .finish()
    }
}

// == Task Outcome ==
/// Result of one attempt at one task within a tick.
///
/// `Skipped`, `ConditionFailed`, `Completed`, and `Failed` all advance the
/// task's `last_run_ms`, so a failing task or condition is retried no
/// sooner than its normal interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Task is paused
    Disabled,
    /// Interval has not elapsed since the last attempt
    NotDue,
    /// Condition returned false
    Skipped,
    /// Condition raised an error (treated as a skip)
    ConditionFailed(String),
    /// Work function ran to completion
    Completed,
    /// Work function returned an error
    Failed(String),
}

impl TaskOutcome {
    /// True for the outcomes that record a run attempt.
    pub fn attempted(&self) -> bool {
        !matches!(self, TaskOutcome::Disabled | TaskOutcome::NotDue)
    }
}

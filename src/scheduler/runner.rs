//! Scheduler Runner Module
//!
//! A single loop that, on a fixed tick, evaluates every registered task's
//! due-ness and condition and runs the eligible ones sequentially. One
//! task's failure never touches the others, and the loop never busy-waits:
//! a task's own interval decides how often it executes, the tick only
//! decides how often due-ness is checked.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::error::{HubError, Result};
use crate::scheduler::{ScheduledTask, TaskOutcome};

// == Tick Result ==
/// Outcome of one task within one tick, for observability and tests.
#[derive(Debug, Clone)]
pub struct TickResult {
    pub task: String,
    pub outcome: TaskOutcome,
}

// == Scheduler Handle ==
/// Cooperative stop signal for a running scheduler.
///
/// `stop` is checked once per tick; the tick in flight finishes its whole
/// task pass before the loop exits, and no task is cancelled mid-run.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    running: Arc<AtomicBool>,
}

impl SchedulerHandle {
    /// Asks the scheduler loop to exit after its current tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// True while the loop has not been asked to stop.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

// == Scheduler ==
/// Unified scheduler over a fixed, startup-registered task list.
///
/// Registration is append-only and happens before the loop starts;
/// `run` consumes the scheduler, so there is no runtime API for growing
/// the task set. This keeps the set auditable as a fixed list.
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    tick_interval: Duration,
    clock: Arc<dyn Clock>,
    running: Arc<AtomicBool>,
}

impl Scheduler {
    /// Creates a scheduler with the given tick cadence and clock.
    pub fn new(tick_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks: Vec::new(),
            tick_interval,
            clock,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    // == Registration ==
    /// Appends a task to the schedule.
    ///
    /// Rejects a zero interval (it would turn the task into a busy loop at
    /// tick granularity). A duplicate name is allowed but flagged, since it
    /// usually means a manifest was loaded twice.
    pub fn register(&mut self, task: ScheduledTask) -> Result<()> {
        if task.interval_secs == 0 {
            return Err(HubError::InvalidTask(format!(
                "task '{}' has a zero interval",
                task.name
            )));
        }
        if self.tasks.iter().any(|t| t.name == task.name) {
            warn!(task = %task.name, "duplicate task name registered");
        }
        info!(
            task = %task.name,
            module = %task.module_id,
            interval_secs = task.interval_secs,
            gated = task.condition.is_some(),
            "task registered"
        );
        self.tasks.push(task);
        Ok(())
    }

    /// Pauses or resumes a task by name. Returns false if no task matches.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let mut found = false;
        for task in self.tasks.iter_mut().filter(|t| t.name == name) {
            task.enabled = enabled;
            found = true;
        }
        found
    }

    /// Number of registered tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns a handle for stopping the loop from outside.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            running: self.running.clone(),
        }
    }

    // == Tick ==
    /// Evaluates every task once, sequentially, in registration order.
    ///
    /// Each attempt is awaited before the next task is considered, so the
    /// per-task non-overlap guarantee needs no locking.
    pub async fn tick_once(&mut self) -> Vec<TickResult> {
        let now_ms = self.clock.now_ms();
        let mut results = Vec::with_capacity(self.tasks.len());

        for task in &mut self.tasks {
            let outcome = Self::attempt(task, now_ms).await;
            results.push(TickResult {
                task: task.name.clone(),
                outcome,
            });
        }

        results
    }

    /// Attempts one task: due-check, condition gate, then the work body.
    ///
    /// Every attempted outcome records `now_ms` as the last run, including
    /// condition-false skips. That throttles condition re-checks to the
    /// task's own interval, so a cheap-but-frequent condition poll cannot
    /// itself become a hot loop.
    async fn attempt(task: &mut ScheduledTask, now_ms: u64) -> TaskOutcome {
        if !task.enabled {
            return TaskOutcome::Disabled;
        }
        if !task.is_due(now_ms) {
            return TaskOutcome::NotDue;
        }

        if let Some(condition) = &task.condition {
            match (condition)().await {
                Ok(true) => {}
                Ok(false) => {
                    task.last_run_ms = Some(now_ms);
                    debug!(task = %task.name, "condition false, skipped");
                    return TaskOutcome::Skipped;
                }
                Err(e) => {
                    task.last_run_ms = Some(now_ms);
                    warn!(task = %task.name, error = %e, "condition check failed, skipped");
                    return TaskOutcome::ConditionFailed(e.to_string());
                }
            }
        }

        let result = (task.work)().await;
        task.last_run_ms = Some(now_ms);

        match result {
            Ok(()) => {
                debug!(task = %task.name, "task completed");
                TaskOutcome::Completed
            }
            Err(e) => {
                // No immediate retry: the failure waits out the interval.
                error!(task = %task.name, error = %e, "task failed");
                TaskOutcome::Failed(e.to_string())
            }
        }
    }

    // == Run Loop ==
    /// Runs the tick loop until the handle asks it to stop.
    pub async fn run(mut self) {
        self.running.store(true, Ordering::SeqCst);
        info!(
            tasks = self.tasks.len(),
            tick_secs = self.tick_interval.as_secs(),
            "scheduler started"
        );

        while self.running.load(Ordering::SeqCst) {
            for result in self.tick_once().await {
                if let TaskOutcome::Failed(err) = &result.outcome {
                    warn!(task = %result.task, error = %err, "task will retry after its interval");
                }
            }
            tokio::time::sleep(self.tick_interval).await;
        }

        info!("scheduler stopped");
    }
}

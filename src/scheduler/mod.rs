//! Scheduler Module
//!
//! Unified background job scheduling: a fixed task list registered at
//! startup, one tick loop, per-task intervals and condition gates.

mod runner;
mod task;

// Re-export public types
pub use runner::{Scheduler, SchedulerHandle, TickResult};
pub use task::{condition_fn, work_fn, ConditionFn, ScheduledTask, TaskFuture, TaskOutcome, WorkFn};

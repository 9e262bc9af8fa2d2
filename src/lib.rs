//! Hub Core - background coordination layer for a multi-tenant mini-app backend
//!
//! Provides the process-wide TTL cache pools, the unified background task
//! scheduler, and the agent task logger that feature modules build on.

pub mod cache;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod manifest;
pub mod scheduler;
pub mod tasklog;

pub use cache::CacheRegistry;
pub use clock::{system_clock, Clock};
pub use config::Config;
pub use context::{bootstrap, AppContext};
pub use error::{HubError, Result};
pub use manifest::{ModuleManifest, PoolDecl, TaskDecl};
pub use scheduler::{Scheduler, SchedulerHandle};
pub use tasklog::{NewTaskLog, TaskLogger, TaskTimer};

//! Task Log Module
//!
//! Append-only recording of agent/background-task activity for reporting.

mod entry;
mod logger;
mod store;

// Re-export public types
pub use entry::{NewTaskLog, TaskLogEntry};
pub use logger::{TaskLogger, TaskTimer};
pub use store::{MemoryTaskLogStore, TaskLogStore};

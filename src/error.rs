//! Error types for the coordination layer
//!
//! Provides unified error handling using thiserror.
//!
//! Missing cache pools are deliberately *not* an error anywhere in this
//! crate: facade calls against an unknown pool degrade to a miss/no-op.
//! Failures inside scheduled task bodies are contained by the scheduler
//! and reported through `TaskOutcome`, never through this type.

use thiserror::Error;

// == Hub Error Enum ==
/// Unified error type for the coordination layer.
#[derive(Error, Debug)]
pub enum HubError {
    /// Task log write failed. Propagated to the caller because a silently
    /// dropped log entry corrupts downstream billing/ROI aggregates.
    #[error("task log write failed: {0}")]
    LogWrite(String),

    /// A task declaration was rejected at registration time.
    #[error("invalid task: {0}")]
    InvalidTask(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

// == Result Type Alias ==
/// Convenience Result type for the coordination layer.
pub type Result<T> = std::result::Result<T, HubError>;

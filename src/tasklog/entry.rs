//! Task Log Entry Module
//!
//! Record shapes for agent activity logging. Entries are insert-only:
//! nothing in this crate mutates or deletes a written record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// == New Task Log ==
/// A task log record as submitted by a caller, before the store assigns
/// an id and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskLog {
    /// Organization the work was done for
    pub org_id: String,
    /// Agent/bot that did the work (e.g. "lead-agent")
    pub agent_id: String,
    /// Kind of work (e.g. "prospect_scraped", "insights_generated")
    pub task_type: String,
    /// Free-form task-specific payload
    pub detail: Value,
    /// User who triggered the task, if any
    pub triggered_by: Option<String>,
    /// Wall-clock duration of the work, if measured
    pub execution_time_ms: Option<u64>,
    /// LLM tokens consumed, if any
    pub tokens_used: Option<u64>,
}

impl NewTaskLog {
    /// Creates a record with the required fields; optionals default to none.
    pub fn new(
        org_id: impl Into<String>,
        agent_id: impl Into<String>,
        task_type: impl Into<String>,
        detail: Value,
    ) -> Self {
        Self {
            org_id: org_id.into(),
            agent_id: agent_id.into(),
            task_type: task_type.into(),
            detail,
            triggered_by: None,
            execution_time_ms: None,
            tokens_used: None,
        }
    }

    /// Sets the triggering user.
    pub fn triggered_by(mut self, user_id: impl Into<String>) -> Self {
        self.triggered_by = Some(user_id.into());
        self
    }

    /// Sets the measured execution time.
    pub fn execution_time_ms(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Sets the token cost.
    pub fn tokens_used(mut self, tokens: u64) -> Self {
        self.tokens_used = Some(tokens);
        self
    }
}

// == Task Log Entry ==
/// A stored task log record, with the store-assigned id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskLogEntry {
    /// Store-assigned identifier
    pub id: String,
    pub org_id: String,
    pub agent_id: String,
    pub task_type: String,
    pub detail: Value,
    pub triggered_by: Option<String>,
    pub execution_time_ms: Option<u64>,
    pub tokens_used: Option<u64>,
    /// Store-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

impl TaskLogEntry {
    /// Materializes a submitted record with its assigned id and timestamp.
    pub fn from_new(id: String, created_at: DateTime<Utc>, new: NewTaskLog) -> Self {
        Self {
            id,
            org_id: new.org_id,
            agent_id: new.agent_id,
            task_type: new.task_type,
            detail: new.detail,
            triggered_by: new.triggered_by,
            execution_time_ms: new.execution_time_ms,
            tokens_used: new.tokens_used,
            created_at,
        }
    }
}

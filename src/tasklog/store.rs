//! Task Log Store Module
//!
//! Storage abstraction for task log records. Production wires this to the
//! relational store; tests and the demo binary use the in-memory store.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;
use crate::tasklog::{NewTaskLog, TaskLogEntry};

// == Store Trait ==
/// Append-only sink for task log records.
///
/// Implementations must surface write failures: callers use these records
/// for billing/ROI reporting and a silent loss corrupts the aggregates.
#[async_trait]
pub trait TaskLogStore: Send + Sync {
    /// Persists one record, assigning its id and creation timestamp.
    async fn insert(&self, entry: NewTaskLog) -> Result<TaskLogEntry>;
}

// == Memory Store ==
/// In-memory task log store backed by a vector.
#[derive(Debug, Default)]
pub struct MemoryTaskLogStore {
    entries: RwLock<Vec<TaskLogEntry>>,
}

impl MemoryTaskLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every stored entry, in insertion order.
    pub fn entries(&self) -> Vec<TaskLogEntry> {
        self.entries.read().expect("task log lock poisoned").clone()
    }

    /// Returns a copy of the entries for one organization.
    pub fn entries_for_org(&self, org_id: &str) -> Vec<TaskLogEntry> {
        self.entries
            .read()
            .expect("task log lock poisoned")
            .iter()
            .filter(|e| e.org_id == org_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TaskLogStore for MemoryTaskLogStore {
    async fn insert(&self, entry: NewTaskLog) -> Result<TaskLogEntry> {
        let stored = TaskLogEntry::from_new(Uuid::new_v4().to_string(), Utc::now(), entry);
        self.entries
            .write()
            .expect("task log lock poisoned")
            .push(stored.clone());
        Ok(stored)
    }
}

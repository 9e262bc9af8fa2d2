//! Manifest Module
//!
//! Declarative startup manifests owned by feature modules. Each module
//! declares the cache pools it wants and the background tasks it runs;
//! bootstrap collects the manifests once, before the scheduler starts.
//!
//! Work and condition functions are captured here as typed values, so a
//! misnamed function is caught by the compiler rather than discovered as
//! a silent no-op at tick time.

use serde::Deserialize;

use crate::scheduler::{ConditionFn, ScheduledTask, WorkFn};

// == Pool Declaration ==
/// One cache pool requested by a module.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolDecl {
    pub name: String,
    #[serde(default = "PoolDecl::default_max_size")]
    pub max_size: usize,
    #[serde(default = "PoolDecl::default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl PoolDecl {
    pub fn new(name: impl Into<String>, max_size: usize, ttl_seconds: u64) -> Self {
        Self {
            name: name.into(),
            max_size,
            ttl_seconds,
        }
    }

    fn default_max_size() -> usize {
        128
    }

    fn default_ttl_seconds() -> u64 {
        60
    }
}

// == Task Declaration ==
/// One scheduled task declared by a module.
pub struct TaskDecl {
    /// Task name, by convention `module:agent:purpose`
    pub name: String,
    /// Minimum seconds between run attempts
    pub interval_secs: u64,
    /// Owning agent within the module, if any
    pub agent_id: Option<String>,
    /// The work function
    pub work: WorkFn,
    /// Optional pre-run gate
    pub condition: Option<ConditionFn>,
}

impl TaskDecl {
    pub fn new(name: impl Into<String>, interval_secs: u64, work: WorkFn) -> Self {
        Self {
            name: name.into(),
            interval_secs,
            agent_id: None,
            work,
            condition: None,
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

    /// Binds this declaration to its owning module as a registrable task.
    pub(crate) fn into_task(self, module_id: &str) -> ScheduledTask {
        let mut task = ScheduledTask::new(self.name, module_id, self.interval_secs, self.work);
        task.agent_id = self.agent_id;
        task.condition = self.condition;
        task
    }
}

impl std::fmt::Debug for TaskDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskDecl")
            .field("name", &self.name)
            .field("interval_secs", &self.interval_secs)
            .field("agent_id", &self.agent_id)
            .field("has_condition", &self.condition.is_some())
            .finish()
    }
}

// == Module Manifest ==
/// Everything one feature module asks of the coordination layer.
#[derive(Debug)]
pub struct ModuleManifest {
    /// Stable module identifier (e.g. "workforce-accelerator")
    pub module_id: String,
    /// Human-readable name
    pub name: String,
    pub description: String,
    /// Pools to register (first-wins against core and other modules)
    pub pools: Vec<PoolDecl>,
    /// Background tasks to schedule
    pub tasks: Vec<TaskDecl>,
}

impl ModuleManifest {
    pub fn new(module_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            name: name.into(),
            description: String::new(),
            pools: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn pool(mut self, pool: PoolDecl) -> Self {
        self.pools.push(pool);
        self
    }

    pub fn task(mut self, task: TaskDecl) -> Self {
        self.tasks.push(task);
        self
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{condition_fn, work_fn};

    #[test]
    fn test_pool_decl_deserializes_with_defaults() {
        let decl: PoolDecl = serde_json::from_str(r#"{"name": "prospects"}"#).unwrap();
        assert_eq!(decl.name, "prospects");
        assert_eq!(decl.max_size, 128);
        assert_eq!(decl.ttl_seconds, 60);
    }

    #[test]
    fn test_manifest_builder() {
        let manifest = ModuleManifest::new("workforce-accelerator", "Workforce Accelerator")
            .description("B2B sales productivity suite")
            .pool(PoolDecl::new("prospects", 256, 120))
            .task(
                TaskDecl::new(
                    "wa:lead-agent:notifications",
                    60,
                    work_fn(|| async { Ok(()) }),
                )
                .with_agent("lead-agent")
                .with_condition(condition_fn(|| async { Ok(true) })),
            );

        assert_eq!(manifest.pools.len(), 1);
        assert_eq!(manifest.tasks.len(), 1);
        assert_eq!(manifest.tasks[0].agent_id.as_deref(), Some("lead-agent"));
    }

    #[test]
    fn test_task_decl_binds_module() {
        let decl = TaskDecl::new("wa:report-agent:reports", 3600, work_fn(|| async { Ok(()) }))
            .with_agent("report-agent");
        let task = decl.into_task("workforce-accelerator");

        assert_eq!(task.module_id, "workforce-accelerator");
        assert_eq!(task.interval_secs, 3600);
        assert!(task.enabled);
        assert!(task.last_run_ms.is_none());
    }
}

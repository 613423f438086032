//! Agent task/result value types (spec.md §3 "Agent task" / "Agent result").

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-wrapper execution deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(120_000);

/// A unit of work handed to a wrapper.
#[derive(Debug, Clone)]
pub struct AgentTask {
    /// Required, non-empty, trimmed prompt text.
    pub prompt: String,
    pub work_dir: Option<PathBuf>,
    pub files: Vec<PathBuf>,
    pub capability: Option<String>,
    pub timeout: Duration,
    /// Environment overrides, merged on top of the inherited environment.
    pub env: HashMap<String, String>,
}

impl AgentTask {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            work_dir: None,
            files: Vec::new(),
            capability: None,
            timeout: DEFAULT_TIMEOUT,
            env: HashMap::new(),
        }
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capability = Some(capability.into());
        self
    }

    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }
}

/// Outcome of one wrapper execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Success,
    Error,
    Timeout,
}

/// Result of running an [`AgentTask`] through a wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    pub agent_id: String,
    pub status: AgentStatus,
    pub output: String,
    pub stderr: Option<String>,
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
}

impl AgentResult {
    pub fn success(agent_id: impl Into<String>, output: String, duration_ms: u64) -> Self {
        Self {
            agent_id: agent_id.into(),
            status: AgentStatus::Success,
            output,
            stderr: None,
            exit_code: Some(0),
            duration_ms,
        }
    }

    pub fn error(agent_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            status: AgentStatus::Error,
            output: String::new(),
            stderr: Some(message.into()),
            exit_code: None,
            duration_ms: 0,
        }
    }
}

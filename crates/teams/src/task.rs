//! Team task (spec.md §4.8, §3 "Team task"): one JSON file per task under
//! `tasks/<teamName>/<taskId>.json`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamTask {
    pub id: String,
    pub subject: String,
    pub description: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields accepted when creating or patching a task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPartial {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub owner: Option<String>,
    pub blocked_by: Option<Vec<String>>,
    pub blocks: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TeamProgress {
    pub completed: usize,
    pub total: usize,
    pub pct: u32,
}

/// `completed / (total - deleted)`, rounded to the nearest integer percent,
/// 0 when the denominator is 0.
pub fn compute_progress(tasks: &[TeamTask]) -> TeamProgress {
    let completed = tasks.iter().filter(|t| t.status == TaskStatus::Completed).count();
    let total = tasks.iter().filter(|t| t.status != TaskStatus::Deleted).count();
    let pct = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    };
    TeamProgress { completed, total, pct }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;

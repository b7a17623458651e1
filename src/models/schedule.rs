use chrono::{DateTime, Utc};
use serde::Serialize;

pub const MS_PER_DAY: i64 = 86_400_000;

/// Convert a span in milliseconds to fractional days.
pub fn ms_to_days(ms: i64) -> f64 {
    ms as f64 / MS_PER_DAY as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_days: i64,
    pub task_count: usize,
    pub resolved_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskMetrics {
    pub human_id: String,
    pub duration_days: f64,
    pub slack_days: f64,
    pub earliest_start: DateTime<Utc>,
    pub earliest_finish: DateTime<Utc>,
    pub latest_start: DateTime<Utc>,
    pub latest_finish: DateTime<Utc>,
    pub is_critical: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CriticalPathResult {
    pub project_id: Option<String>,
    pub ordered_critical_tasks: Vec<String>,
    pub total_duration_days: f64,
    pub per_task_metrics: Vec<TaskMetrics>,
}

impl CriticalPathResult {
    pub fn empty(project_id: Option<String>) -> Self {
        Self {
            project_id,
            ..Default::default()
        }
    }
}

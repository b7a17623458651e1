use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub human_id: String,
    pub project_id: String,
    pub summary: Option<String>,
    pub assignee_id: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub estimated_minutes: Option<i64>,
    pub spent_minutes: Option<i64>,
    pub resolved: bool,
}

impl Task {
    /// Lower bound of the task's window: planned start, else creation.
    pub fn window_start(&self) -> Option<DateTime<Utc>> {
        self.start_date.or(self.created_at)
    }

    /// Upper bound of the task's window: due date, else resolution, else last update.
    pub fn window_end(&self) -> Option<DateTime<Utc>> {
        self.due_date.or(self.resolved_at).or(self.updated_at)
    }

    pub fn has_full_dates(&self) -> bool {
        self.start_date.is_some() && self.due_date.is_some()
    }

    /// Completion ratio in [0, 1]. Unknown unless resolved or both durations are recorded.
    pub fn progress(&self) -> Option<f64> {
        if self.resolved {
            return Some(1.0);
        }
        match (self.spent_minutes, self.estimated_minutes) {
            (Some(spent), Some(estimate)) if estimate > 0 => {
                Some((spent as f64 / estimate as f64).clamp(0.0, 1.0))
            }
            (Some(_), Some(_)) => Some(0.0),
            _ => None,
        }
    }
}

use chrono::{DateTime, Utc};

use crate::models::{Task, Timeline, MS_PER_DAY};

/// Overall project window. `now` stands in for bounds no task can supply,
/// so an empty project has a zero-length timeline instead of an error.
pub fn aggregate(tasks: &[Task], now: DateTime<Utc>) -> Timeline {
    let start = tasks.iter().filter_map(Task::window_start).min().unwrap_or(now);
    let end = tasks.iter().filter_map(Task::window_end).max().unwrap_or(now);

    let span_ms = (end - start).num_milliseconds().max(0);
    // ceil for non-negative spans
    let duration_days = (span_ms + MS_PER_DAY - 1) / MS_PER_DAY;

    Timeline {
        start,
        end,
        duration_days,
        task_count: tasks.len(),
        resolved_count: tasks.iter().filter(|t| t.resolved).count(),
    }
}

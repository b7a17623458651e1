use serde_json::{json, Value};

use super::{iso, round_days};
use crate::error::GanttaiError;
use crate::models::{Conflict, CriticalPathResult, DependencyEdge, Task, TaskMetrics, Timeline};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &GanttaiError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn render(v: &Value) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

pub fn task_json(t: &Task) -> Value {
    let mut v = json!({
        "human_id": t.human_id,
        "project_id": t.project_id,
        "resolved": t.resolved
    });
    if let Some(ref summary) = t.summary {
        v["summary"] = json!(summary);
    }
    if let Some(ref assignee) = t.assignee_id {
        v["assignee"] = json!(assignee);
    }
    if let Some(ref start) = t.start_date {
        v["start_date"] = json!(iso(start));
    }
    if let Some(ref due) = t.due_date {
        v["due_date"] = json!(iso(due));
    }
    if let Some(minutes) = t.estimated_minutes {
        v["estimated_minutes"] = json!(minutes);
    }
    if let Some(minutes) = t.spent_minutes {
        v["spent_minutes"] = json!(minutes);
    }
    if let Some(p) = t.progress() {
        v["progress"] = json!((p * 1000.0).round() / 10.0);
    }
    v
}

pub fn edge_json(e: &DependencyEdge) -> Value {
    json!({
        "from": e.from_task,
        "to": e.to_task,
        "kind": e.kind.as_str()
    })
}

pub fn timeline_json(t: &Timeline) -> Value {
    json!({
        "start": iso(&t.start),
        "end": iso(&t.end),
        "duration_days": t.duration_days,
        "task_count": t.task_count,
        "resolved_count": t.resolved_count
    })
}

pub fn conflict_json(c: &Conflict) -> Value {
    json!({
        "kind": c.kind.as_str(),
        "severity": c.severity.as_str(),
        "affected_tasks": c.affected_tasks,
        "description": c.description
    })
}

pub fn metrics_json(m: &TaskMetrics) -> Value {
    json!({
        "human_id": m.human_id,
        "duration_days": round_days(m.duration_days),
        "slack_days": round_days(m.slack_days),
        "earliest_start": iso(&m.earliest_start),
        "earliest_finish": iso(&m.earliest_finish),
        "latest_start": iso(&m.latest_start),
        "latest_finish": iso(&m.latest_finish),
        "critical": m.is_critical
    })
}

pub fn critical_path_json(r: &CriticalPathResult) -> Value {
    let metrics: Vec<_> = r.per_task_metrics.iter().map(metrics_json).collect();
    json!({
        "project_id": r.project_id,
        "critical_tasks": r.ordered_critical_tasks,
        "total_duration_days": round_days(r.total_duration_days),
        "tasks": metrics
    })
}

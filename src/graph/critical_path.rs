use chrono::{DateTime, Utc};

use super::ProjectGraph;
use crate::config::{SchedulerConfig, SinkAnchor};
use crate::models::{ms_to_days, CriticalPathResult, Task, TaskMetrics};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Scheduled duration: the planned window when both dates exist, otherwise the
/// estimate, otherwise the configured default.
pub fn duration_ms(task: &Task, config: &SchedulerConfig) -> i64 {
    match (task.start_date, task.due_date) {
        (Some(start), Some(due)) => (due - start).num_milliseconds().max(0),
        _ => task
            .estimated_minutes
            .map(|m| m.max(0).saturating_mul(60_000))
            .unwrap_or_else(|| config.default_estimate_ms()),
    }
}

fn to_datetime(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Two-pass CPM over one project's tasks. Every node carries an in-progress
/// mark during both passes; re-entering a marked node contributes nothing, so
/// cyclic input terminates.
struct Cpm<'g> {
    graph: &'g ProjectGraph,
    anchor: SinkAnchor,
    now_ms: i64,
    duration: Vec<i64>,
    forward_mark: Vec<Mark>,
    backward_mark: Vec<Mark>,
    earliest_start: Vec<i64>,
    earliest_finish: Vec<i64>,
    latest_start: Vec<i64>,
    latest_finish: Vec<i64>,
    project_end: i64,
}

impl<'g> Cpm<'g> {
    fn new(graph: &'g ProjectGraph, config: &SchedulerConfig, now: DateTime<Utc>) -> Self {
        let n = graph.len();
        Self {
            graph,
            anchor: config.sink_anchor,
            now_ms: now.timestamp_millis(),
            duration: graph.tasks().iter().map(|t| duration_ms(t, config)).collect(),
            forward_mark: vec![Mark::Unvisited; n],
            backward_mark: vec![Mark::Unvisited; n],
            earliest_start: vec![0; n],
            earliest_finish: vec![0; n],
            latest_start: vec![0; n],
            latest_finish: vec![0; n],
            project_end: i64::MIN,
        }
    }

    /// Earliest finish of `i`, or None when `i` is already on the stack.
    fn forward(&mut self, i: usize) -> Option<i64> {
        match self.forward_mark[i] {
            Mark::Done => return Some(self.earliest_finish[i]),
            Mark::InProgress => return None,
            Mark::Unvisited => {}
        }
        self.forward_mark[i] = Mark::InProgress;

        let task = &self.graph.tasks()[i];
        let mut start = task.window_start().map(|d| d.timestamp_millis());
        let graph = self.graph;
        for &dep in graph.dependency_indices(i) {
            if dep == i {
                continue;
            }
            if let Some(finish) = self.forward(dep) {
                start = Some(start.map_or(finish, |s| s.max(finish)));
            }
        }

        let es = start.unwrap_or(self.now_ms);
        self.earliest_start[i] = es;
        self.earliest_finish[i] = es.saturating_add(self.duration[i]);
        self.forward_mark[i] = Mark::Done;
        Some(self.earliest_finish[i])
    }

    /// Latest start of `i`, or None when `i` is already on the stack.
    fn backward(&mut self, i: usize) -> Option<i64> {
        match self.backward_mark[i] {
            Mark::Done => return Some(self.latest_start[i]),
            Mark::InProgress => return None,
            Mark::Unvisited => {}
        }
        self.backward_mark[i] = Mark::InProgress;

        let mut finish: Option<i64> = None;
        let graph = self.graph;
        for &dependent in graph.dependent_indices(i) {
            if dependent == i {
                continue;
            }
            if let Some(start) = self.backward(dependent) {
                finish = Some(finish.map_or(start, |f| f.min(start)));
            }
        }

        let lf = finish.unwrap_or(match self.anchor {
            SinkAnchor::ProjectEnd => self.project_end,
            SinkAnchor::OwnFinish => self.earliest_finish[i],
        });
        self.latest_finish[i] = lf;
        self.latest_start[i] = lf.saturating_sub(self.duration[i]);
        self.backward_mark[i] = Mark::Done;
        Some(self.latest_start[i])
    }

    fn run(mut self, project_id: Option<String>, tolerance_days: f64) -> CriticalPathResult {
        let n = self.graph.len();
        for i in 0..n {
            self.forward(i);
        }
        self.project_end = self.earliest_finish.iter().copied().max().unwrap_or(self.now_ms);
        for i in 0..n {
            self.backward(i);
        }

        let tasks = self.graph.tasks();
        let mut metrics: Vec<TaskMetrics> = (0..n)
            .map(|i| {
                let slack_days = ms_to_days(self.latest_start[i].saturating_sub(self.earliest_start[i]));
                TaskMetrics {
                    human_id: tasks[i].human_id.clone(),
                    duration_days: ms_to_days(self.duration[i]),
                    slack_days,
                    earliest_start: to_datetime(self.earliest_start[i]),
                    earliest_finish: to_datetime(self.earliest_finish[i]),
                    latest_start: to_datetime(self.latest_start[i]),
                    latest_finish: to_datetime(self.latest_finish[i]),
                    is_critical: slack_days.abs() < tolerance_days,
                }
            })
            .collect();

        let mut critical: Vec<usize> = (0..n).filter(|&i| metrics[i].is_critical).collect();
        critical.sort_by_key(|&i| self.earliest_start[i]);
        let ordered_critical_tasks = critical.iter().map(|&i| tasks[i].human_id.clone()).collect();

        let project_start = self.earliest_start.iter().copied().min().unwrap_or(self.now_ms);
        metrics.sort_by(|a, b| a.slack_days.total_cmp(&b.slack_days));

        CriticalPathResult {
            project_id,
            ordered_critical_tasks,
            total_duration_days: ms_to_days(self.project_end.saturating_sub(project_start)),
            per_task_metrics: metrics,
        }
    }
}

/// Critical path over every task in `graph`. The caller scopes the graph to one project.
/// Both passes recurse once per dependency hop, so chain depth is bounded by the
/// thread stack: a few thousand tasks on a 2 MB stack.
pub fn calculate(graph: &ProjectGraph, config: &SchedulerConfig, now: DateTime<Utc>) -> CriticalPathResult {
    let project_id = graph.tasks().first().map(|t| t.project_id.clone());
    if graph.is_empty() {
        return CriticalPathResult::empty(project_id);
    }
    Cpm::new(graph, config, now).run(project_id, config.critical_slack_tolerance_days)
}

/// Scope to `project_id` and calculate. A project with no tasks yields the empty result.
pub fn for_project(
    graph: &ProjectGraph,
    project_id: &str,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> CriticalPathResult {
    match graph.scoped(project_id) {
        Ok(scoped) => calculate(&scoped, config, now),
        Err(e) => {
            tracing::warn!(error = %e, "critical path scope is empty");
            CriticalPathResult::empty(Some(project_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::assemble::tests::task;
    use crate::models::{DependencyEdge, DependencyKind, MS_PER_DAY};

    const DAY_MINUTES: i64 = 24 * 60;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(100 * MS_PER_DAY).unwrap()
    }

    fn est(id: &str, days: i64) -> Task {
        let mut t = task(id, "P");
        t.estimated_minutes = Some(days * DAY_MINUTES);
        t
    }

    fn graph(tasks: Vec<Task>, deps: &[(&str, &str)]) -> ProjectGraph {
        ProjectGraph::from_edges(
            tasks,
            deps.iter()
                .map(|(a, b)| DependencyEdge::new(*a, *b, DependencyKind::DependsOn)),
        )
    }

    fn diamond() -> ProjectGraph {
        let mut a = task("A", "P");
        a.start_date = DateTime::from_timestamp_millis(0);
        a.due_date = DateTime::from_timestamp_millis(2 * MS_PER_DAY);
        graph(vec![a, est("B", 3), est("C", 1)], &[("B", "A"), ("C", "A")])
    }

    fn slack_of(result: &CriticalPathResult, id: &str) -> f64 {
        result
            .per_task_metrics
            .iter()
            .find(|m| m.human_id == id)
            .map(|m| m.slack_days)
            .unwrap()
    }

    #[test]
    fn test_critical_path_basic() {
        let r = calculate(&diamond(), &SchedulerConfig::default(), now());
        assert_eq!(r.ordered_critical_tasks, vec!["A", "B"]);
        assert!((r.total_duration_days - 5.0).abs() < 1e-9);
        assert!((slack_of(&r, "C") - 2.0).abs() < 1e-9);
        assert_eq!(slack_of(&r, "A"), 0.0);
        let order: Vec<_> = r.per_task_metrics.iter().map(|m| m.human_id.as_str()).collect();
        assert_eq!(order.last(), Some(&"C"));
    }

    #[test]
    fn test_own_finish_anchor_zeroes_sink_slack() {
        let config = SchedulerConfig {
            sink_anchor: SinkAnchor::OwnFinish,
            ..Default::default()
        };
        let r = calculate(&diamond(), &config, now());
        assert_eq!(slack_of(&r, "C"), 0.0);
        assert_eq!(r.ordered_critical_tasks, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_scope() {
        let r = calculate(&ProjectGraph::default(), &SchedulerConfig::default(), now());
        assert!(r.ordered_critical_tasks.is_empty());
        assert!(r.per_task_metrics.is_empty());
        assert_eq!(r.total_duration_days, 0.0);

        let r = for_project(&diamond(), "missing", &SchedulerConfig::default(), now());
        assert!(r.ordered_critical_tasks.is_empty());
        assert_eq!(r.project_id.as_deref(), Some("missing"));
    }

    #[test]
    fn test_default_estimate_is_one_day() {
        let t = task("A", "P");
        assert_eq!(duration_ms(&t, &SchedulerConfig::default()), MS_PER_DAY / 3);
        let r = calculate(&graph(vec![t], &[]), &SchedulerConfig::default(), now());
        assert_eq!(r.per_task_metrics[0].earliest_start, now());
        assert_eq!(r.ordered_critical_tasks, vec!["A"]);
    }

    #[test]
    fn test_cycle_terminates() {
        let g = graph(
            vec![est("A", 1), est("B", 1), est("C", 1)],
            &[("A", "B"), ("B", "C"), ("C", "A"), ("A", "A")],
        );
        let r = calculate(&g, &SchedulerConfig::default(), now());
        assert_eq!(r.per_task_metrics.len(), 3);
    }

    #[test]
    fn test_huge_estimate_does_not_overflow() {
        let mut a = task("A", "P");
        a.created_at = DateTime::from_timestamp_millis(0);
        a.estimated_minutes = Some(i64::MAX / 60_000 + 1);
        let mut b = task("B", "P");
        b.start_date = DateTime::from_timestamp_millis(-MS_PER_DAY);
        b.due_date = DateTime::from_timestamp_millis(0);
        let r = calculate(&graph(vec![a, b], &[]), &SchedulerConfig::default(), now());
        assert_eq!(r.per_task_metrics.len(), 2);
        assert!(r.total_duration_days > 0.0);
        assert!(r.per_task_metrics.iter().all(|m| m.slack_days.is_finite()));
    }

    #[test]
    fn test_long_chain() {
        let ids: Vec<String> = (0..2_000).map(|i| format!("T-{i}")).collect();
        let tasks = ids.iter().map(|id| est(id, 1)).collect();
        let deps: Vec<(&str, &str)> = ids
            .windows(2)
            .map(|w| (w[1].as_str(), w[0].as_str()))
            .collect();
        let r = calculate(&graph(tasks, &deps), &SchedulerConfig::default(), now());
        assert_eq!(r.ordered_critical_tasks.len(), 2_000);
        assert!((r.total_duration_days - 2_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_scoped_to_project() {
        let mut other = est("X", 10);
        other.project_id = "Q".into();
        let g = graph(vec![est("A", 1), est("B", 2), other], &[("B", "A"), ("X", "B")]);
        let r = for_project(&g, "P", &SchedulerConfig::default(), now());
        assert_eq!(r.ordered_critical_tasks, vec!["A", "B"]);
        assert!((r.total_duration_days - 3.0).abs() < 1e-9);
    }
}

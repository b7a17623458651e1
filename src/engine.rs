use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SchedulerConfig;
use crate::graph::{builder, conflicts, critical_path, timeline, ProjectGraph};
use crate::models::{Conflict, CriticalPathResult, DependencyEdge, Snapshot, Task, Timeline};

/// Everything computed for one request.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub tasks: Vec<Task>,
    pub edges: Vec<DependencyEdge>,
    pub timeline: Timeline,
    pub conflicts: Vec<Conflict>,
    pub critical_path: CriticalPathResult,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Project to run the critical path for. Defaults to the first task's project.
    pub project_id: Option<String>,
    /// Reference instant for tasks with no usable dates. Defaults to the wall clock.
    pub now: Option<DateTime<Utc>>,
}

/// Build the graph, skipping items that cannot be mapped.
pub fn assemble(snapshot: &Snapshot) -> (ProjectGraph, Vec<String>) {
    let (tasks, errors) = builder::build_tasks(&snapshot.items);
    let graph = ProjectGraph::build(tasks, &snapshot.links);
    let skipped = errors.into_iter().map(|e| e.message).collect();
    (graph, skipped)
}

fn resolve_project(graph: &ProjectGraph, options: &AnalyzeOptions) -> Option<String> {
    options
        .project_id
        .clone()
        .or_else(|| graph.tasks().first().map(|t| t.project_id.clone()))
}

pub fn critical_path_for(
    graph: &ProjectGraph,
    config: &SchedulerConfig,
    options: &AnalyzeOptions,
) -> CriticalPathResult {
    let now = options.now.unwrap_or_else(Utc::now);
    match resolve_project(graph, options) {
        Some(project_id) => critical_path::for_project(graph, &project_id, config, now),
        None => CriticalPathResult::empty(None),
    }
}

/// Run every component in order: build, assemble, then timeline, conflicts and CPM.
pub fn analyze(snapshot: &Snapshot, config: &SchedulerConfig, options: &AnalyzeOptions) -> Analysis {
    let now = options.now.unwrap_or_else(Utc::now);
    let options = AnalyzeOptions {
        now: Some(now),
        ..options.clone()
    };

    let (graph, skipped) = assemble(snapshot);
    let timeline = timeline::aggregate(graph.tasks(), now);
    let conflicts = conflicts::detect_all(&graph);
    let critical_path = critical_path_for(&graph, config, &options);

    tracing::info!(
        tasks = graph.len(),
        edges = graph.edges().len(),
        skipped = skipped.len(),
        conflicts = conflicts.len(),
        critical = critical_path.ordered_critical_tasks.len(),
        "analysis complete"
    );

    Analysis {
        edges: graph.edges().to_vec(),
        tasks: graph.tasks().to_vec(),
        timeline,
        conflicts,
        critical_path,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawLink, RawWorkItem};

    fn item(human_id: &str, project: &str) -> RawWorkItem {
        RawWorkItem {
            human_id: Some(human_id.into()),
            project_id: Some(project.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let a = analyze(
            &Snapshot::default(),
            &SchedulerConfig::default(),
            &AnalyzeOptions { project_id: None, now: Some(now) },
        );
        assert_eq!(a.timeline.start, now);
        assert_eq!(a.timeline.end, now);
        assert_eq!(a.timeline.duration_days, 0);
        assert!(a.conflicts.is_empty());
        assert!(a.critical_path.ordered_critical_tasks.is_empty());
    }

    #[test]
    fn test_bad_item_does_not_block_the_rest() {
        let snapshot = Snapshot {
            items: vec![item("P-1", "P"), RawWorkItem::default(), item("P-2", "P")],
            links: vec![RawLink {
                source: "P-2".into(),
                target: "P-1".into(),
                link_type: "Depend".into(),
                direction: Default::default(),
            }],
        };
        let a = analyze(&snapshot, &SchedulerConfig::default(), &AnalyzeOptions::default());
        assert_eq!(a.tasks.len(), 2);
        assert_eq!(a.skipped.len(), 1);
        assert_eq!(a.edges.len(), 1);
        assert_eq!(a.critical_path.ordered_critical_tasks, vec!["P-1", "P-2"]);
    }

    #[test]
    fn test_explicit_project_scope() {
        let snapshot = Snapshot {
            items: vec![item("P-1", "P"), item("Q-1", "Q")],
            links: vec![],
        };
        let options = AnalyzeOptions {
            project_id: Some("Q".into()),
            now: None,
        };
        let a = analyze(&snapshot, &SchedulerConfig::default(), &options);
        assert_eq!(a.critical_path.project_id.as_deref(), Some("Q"));
        assert_eq!(a.critical_path.ordered_critical_tasks, vec!["Q-1"]);
    }
}

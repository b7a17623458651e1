use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::cycle;
use super::ProjectGraph;
use crate::models::{Conflict, ConflictKind, Task};

/// Run all three checks. Order: missing dates, cycles, overlaps.
pub fn detect_all(graph: &ProjectGraph) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    conflicts.extend(missing_dates(graph.tasks()));
    conflicts.extend(dependency_cycles(graph));
    conflicts.extend(resource_overlaps(graph.tasks()));
    tracing::debug!(count = conflicts.len(), "conflict detection finished");
    conflicts
}

/// One conflict listing every task without a start date or a due date.
pub fn missing_dates(tasks: &[Task]) -> Option<Conflict> {
    let affected: Vec<String> = tasks
        .iter()
        .filter(|t| !t.has_full_dates())
        .map(|t| t.human_id.clone())
        .collect();
    if affected.is_empty() {
        return None;
    }
    let description = format!(
        "{} task(s) missing start or due date: {}",
        affected.len(),
        affected.join(", ")
    );
    Some(Conflict::new(ConflictKind::MissingDates, affected, description))
}

pub fn dependency_cycles(graph: &ProjectGraph) -> Vec<Conflict> {
    cycle::find_cycles(graph)
        .into_iter()
        .map(|cycle| {
            let mut chain = cycle.clone();
            chain.push(cycle[0].clone());
            let description = format!("Dependency cycle: {}", chain.join(" → "));
            Conflict::new(ConflictKind::DependencyCycle, cycle, description)
        })
        .collect()
}

/// Closed interval of a task with at least one planned date; a single date is a point.
fn interval(task: &Task) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    match (task.start_date, task.due_date) {
        (None, None) => None,
        (start, due) => {
            let start = start.or(due)?;
            let end = due.or(Some(start))?;
            Some((start, end))
        }
    }
}

/// Pairwise overlap per assignee. Quadratic in group size; groups are small.
/// Groups are visited by assignee id, pairs in task order.
pub fn resource_overlaps(tasks: &[Task]) -> Vec<Conflict> {
    let mut groups: BTreeMap<&str, Vec<(&Task, DateTime<Utc>, DateTime<Utc>)>> = BTreeMap::new();
    for task in tasks {
        let (Some(assignee), Some((start, end))) = (task.assignee_id.as_deref(), interval(task)) else {
            continue;
        };
        groups.entry(assignee).or_default().push((task, start, end));
    }

    let mut conflicts = Vec::new();
    for (assignee, group) in &groups {
        for (i, (a, a_start, a_end)) in group.iter().enumerate() {
            for (b, b_start, b_end) in &group[i + 1..] {
                if a_start <= b_end && b_start <= a_end {
                    conflicts.push(Conflict::new(
                        ConflictKind::ResourceOverlap,
                        vec![a.human_id.clone(), b.human_id.clone()],
                        format!(
                            "{} and {} overlap for assignee {}",
                            a.human_id, b.human_id, assignee
                        ),
                    ));
                }
            }
        }
    }
    conflicts
}

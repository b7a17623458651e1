use std::collections::{HashMap, HashSet};

use crate::error::GanttaiError;
use crate::models::{DependencyEdge, DependencyKind, LinkDirection, RawLink, Task};

/// Map a raw link to a typed edge. Direction reads the link name from the
/// source's side: an outward "Depend" link means source depends on target.
pub fn classify_link(link: &RawLink) -> DependencyEdge {
    let name = link.link_type.to_lowercase();
    let (forward, backward) = if name.contains("depend") {
        (DependencyKind::DependsOn, DependencyKind::Blocks)
    } else if name.contains("block") {
        (DependencyKind::Blocks, DependencyKind::DependsOn)
    } else if name.contains("subtask") {
        (DependencyKind::SubtaskOf, DependencyKind::ParentOf)
    } else if name.contains("parent") {
        (DependencyKind::ParentOf, DependencyKind::SubtaskOf)
    } else {
        (DependencyKind::RelatesTo, DependencyKind::RelatesTo)
    };

    let kind = match link.direction {
        LinkDirection::Outward => forward,
        LinkDirection::Inward => backward,
        // An undirected link carries no ordering.
        LinkDirection::Both => DependencyKind::RelatesTo,
    };
    DependencyEdge::new(link.source.clone(), link.target.clone(), kind)
}

/// Tasks of one request plus the edges among them. Depends-on edges are
/// indexed both ways over positions in `tasks`.
#[derive(Debug, Clone, Default)]
pub struct ProjectGraph {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
    edges: Vec<DependencyEdge>,
    dependencies: Vec<Vec<usize>>,
    dependents: Vec<Vec<usize>>,
}

impl ProjectGraph {
    /// Classify and normalize raw links, then assemble.
    pub fn build(tasks: Vec<Task>, links: &[RawLink]) -> Self {
        let edges = links.iter().map(|l| classify_link(l).normalized());
        Self::from_edges(tasks, edges)
    }

    /// Assemble from already-normalized edges. Edges touching a task outside
    /// `tasks` are dropped; repeated edges are kept once.
    pub fn from_edges(tasks: Vec<Task>, edges: impl IntoIterator<Item = DependencyEdge>) -> Self {
        let index: HashMap<String, usize> = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.human_id.clone(), i))
            .collect();

        let mut dependencies = vec![Vec::new(); tasks.len()];
        let mut dependents = vec![Vec::new(); tasks.len()];
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut dropped = 0usize;

        for edge in edges {
            let (Some(&from), Some(&to)) = (index.get(&edge.from_task), index.get(&edge.to_task)) else {
                dropped += 1;
                continue;
            };
            if !seen.insert(edge.clone()) {
                continue;
            }
            if edge.kind == DependencyKind::DependsOn {
                dependencies[from].push(to);
                dependents[to].push(from);
            }
            kept.push(edge);
        }
        if dropped > 0 {
            tracing::debug!(dropped, "dropped edges pointing outside the task set");
        }

        Self {
            tasks,
            index,
            edges: kept,
            dependencies,
            dependents,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, human_id: &str) -> Option<&Task> {
        self.index.get(human_id).map(|&i| &self.tasks[i])
    }

    pub(crate) fn dependency_indices(&self, i: usize) -> &[usize] {
        &self.dependencies[i]
    }

    pub(crate) fn dependent_indices(&self, i: usize) -> &[usize] {
        &self.dependents[i]
    }

    /// Tasks that `human_id` depends on.
    pub fn dependencies_of(&self, human_id: &str) -> Vec<&str> {
        self.neighbours(human_id, &self.dependencies)
    }

    /// Tasks that depend on `human_id`.
    pub fn dependents_of(&self, human_id: &str) -> Vec<&str> {
        self.neighbours(human_id, &self.dependents)
    }

    fn neighbours<'a>(&'a self, human_id: &str, adj: &'a [Vec<usize>]) -> Vec<&'a str> {
        self.index
            .get(human_id)
            .map(|&i| adj[i].iter().map(|&j| self.tasks[j].human_id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Direct subtasks, from either side of a parent/subtask link.
    pub fn children_of(&self, human_id: &str) -> Vec<&str> {
        let mut children = Vec::new();
        for e in &self.edges {
            let child = match e.kind {
                DependencyKind::SubtaskOf if e.to_task == human_id => e.from_task.as_str(),
                DependencyKind::ParentOf if e.from_task == human_id => e.to_task.as_str(),
                _ => continue,
            };
            if !children.contains(&child) {
                children.push(child);
            }
        }
        children
    }

    /// Distinct project ids in first-seen order.
    pub fn projects(&self) -> Vec<&str> {
        let mut projects: Vec<&str> = Vec::new();
        for t in &self.tasks {
            if !projects.contains(&t.project_id.as_str()) {
                projects.push(&t.project_id);
            }
        }
        projects
    }

    /// The subgraph of one project's tasks and the edges among them.
    pub fn scoped(&self, project_id: &str) -> Result<ProjectGraph, GanttaiError> {
        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        if tasks.is_empty() {
            return Err(GanttaiError::empty_scope(project_id));
        }
        Ok(Self::from_edges(tasks, self.edges.iter().cloned()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ErrorCode;

    pub(crate) fn task(human_id: &str, project_id: &str) -> Task {
        Task {
            id: format!("id-{human_id}"),
            human_id: human_id.into(),
            project_id: project_id.into(),
            summary: None,
            assignee_id: None,
            start_date: None,
            due_date: None,
            created_at: None,
            updated_at: None,
            resolved_at: None,
            estimated_minutes: None,
            spent_minutes: None,
            resolved: false,
        }
    }

    fn link(source: &str, target: &str, link_type: &str, direction: LinkDirection) -> RawLink {
        RawLink {
            source: source.into(),
            target: target.into(),
            link_type: link_type.into(),
            direction,
        }
    }

    #[test]
    fn test_classify_link_kinds() {
        use DependencyKind::*;
        let cases = [
            ("Depend", LinkDirection::Outward, DependsOn),
            ("Depend", LinkDirection::Inward, Blocks),
            ("Blocker", LinkDirection::Outward, Blocks),
            ("Blocker", LinkDirection::Inward, DependsOn),
            ("Subtask", LinkDirection::Outward, SubtaskOf),
            ("Subtask", LinkDirection::Inward, ParentOf),
            ("Parent-child", LinkDirection::Outward, ParentOf),
            ("Relates", LinkDirection::Outward, RelatesTo),
            ("Depend", LinkDirection::Both, RelatesTo),
        ];
        for (name, dir, want) in cases {
            assert_eq!(classify_link(&link("A", "B", name, dir)).kind, want, "{name} {dir:?}");
        }
    }

    #[test]
    fn test_depends_on_and_blocks_yield_same_edge() {
        let tasks = vec![task("A", "P"), task("B", "P")];
        let g1 = ProjectGraph::build(tasks.clone(), &[link("A", "B", "Depend", LinkDirection::Outward)]);
        let g2 = ProjectGraph::build(tasks.clone(), &[link("B", "A", "Blocker", LinkDirection::Outward)]);
        assert_eq!(g1.edges(), g2.edges());
        assert_eq!(g1.dependencies_of("A"), vec!["B"]);
        assert_eq!(g1.dependents_of("B"), vec!["A"]);

        let both = ProjectGraph::build(
            tasks,
            &[
                link("A", "B", "Depend", LinkDirection::Outward),
                link("B", "A", "Depend", LinkDirection::Inward),
            ],
        );
        assert_eq!(both.edges().len(), 1);
    }

    #[test]
    fn test_out_of_scope_edges_dropped() {
        let g = ProjectGraph::build(
            vec![task("A", "P")],
            &[link("A", "Z-9", "Depend", LinkDirection::Outward)],
        );
        assert!(g.edges().is_empty());
        assert!(g.dependencies_of("A").is_empty());
    }

    #[test]
    fn test_self_reference_retained() {
        let g = ProjectGraph::build(
            vec![task("A", "P")],
            &[link("A", "A", "Depend", LinkDirection::Outward)],
        );
        assert_eq!(g.edges().len(), 1);
        assert!(g.edges()[0].is_self_reference());
    }

    #[test]
    fn test_children_and_scope() {
        let g = ProjectGraph::build(
            vec![task("A", "P"), task("B", "P"), task("C", "P"), task("X", "Q")],
            &[
                link("B", "A", "Subtask", LinkDirection::Outward),
                link("A", "C", "Parent", LinkDirection::Outward),
                link("X", "A", "Depend", LinkDirection::Outward),
            ],
        );
        assert_eq!(g.children_of("A"), vec!["B", "C"]);
        assert_eq!(g.projects(), vec!["P", "Q"]);

        let p = g.scoped("P").unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.edges().len(), 2);
        assert_eq!(g.scoped("nope").unwrap_err().code, ErrorCode::ScopeError);
    }
}

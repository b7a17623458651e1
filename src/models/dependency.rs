use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    DependsOn,
    Blocks,
    SubtaskOf,
    ParentOf,
    RelatesTo,
}

impl DependencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DependsOn => "depends-on",
            Self::Blocks => "blocks",
            Self::SubtaskOf => "subtask-of",
            Self::ParentOf => "parent-of",
            Self::RelatesTo => "relates-to",
        }
    }
}

/// A directed relation between two tasks, keyed by human id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from_task: String,
    pub to_task: String,
    pub kind: DependencyKind,
}

impl DependencyEdge {
    pub fn new(from_task: impl Into<String>, to_task: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            from_task: from_task.into(),
            to_task: to_task.into(),
            kind,
        }
    }

    /// "A blocks B" is stored as "B depends on A".
    pub fn normalized(self) -> Self {
        match self.kind {
            DependencyKind::Blocks => Self {
                from_task: self.to_task,
                to_task: self.from_task,
                kind: DependencyKind::DependsOn,
            },
            _ => self,
        }
    }

    pub fn is_self_reference(&self) -> bool {
        self.from_task == self.to_task
    }
}

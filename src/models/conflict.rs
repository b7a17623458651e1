use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    MissingDates,
    DependencyCycle,
    ResourceOverlap,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingDates => "missing-dates",
            Self::DependencyCycle => "dependency-cycle",
            Self::ResourceOverlap => "resource-overlap",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingDates => Severity::Medium,
            Self::DependencyCycle => Severity::High,
            Self::ResourceOverlap => Severity::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub severity: Severity,
    pub affected_tasks: Vec<String>,
    pub description: String,
}

impl Conflict {
    /// Severity always follows the kind.
    pub fn new(kind: ConflictKind, affected_tasks: Vec<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            affected_tasks,
            description: description.into(),
        }
    }
}

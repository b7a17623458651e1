use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MappingError,
    ScopeError,
    InvalidInput,
    ConfigError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MappingError => "MAPPING_ERROR",
            Self::ScopeError => "SCOPE_ERROR",
            Self::InvalidInput => "INVALID_INPUT",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct GanttaiError {
    pub code: ErrorCode,
    pub message: String,
}

impl GanttaiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A raw work item lacks one of the identifiers every task needs.
    pub fn missing_identifier(field: &str, item_ref: &str) -> Self {
        Self::new(
            ErrorCode::MappingError,
            format!("Work item {item_ref} has no {field}"),
        )
    }

    pub fn empty_scope(project_id: &str) -> Self {
        Self::new(
            ErrorCode::ScopeError,
            format!("Project {project_id} has no schedulable tasks"),
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

impl From<std::io::Error> for GanttaiError {
    fn from(e: std::io::Error) -> Self {
        Self::invalid_input(e.to_string())
    }
}

impl From<serde_json::Error> for GanttaiError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_input(format!("Malformed JSON: {e}"))
    }
}

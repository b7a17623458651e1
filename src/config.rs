use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GanttaiError;

/// Minutes assumed for work nobody estimated: one 8-hour day.
pub const DEFAULT_ESTIMATE_MINUTES: i64 = 480;

pub const DEFAULT_SLACK_TOLERANCE_DAYS: f64 = 0.01;

/// File picked up from the working directory when `--config` is not given.
pub const LOCAL_CONFIG_FILE: &str = ".ganttai.json";

/// Where the backward pass anchors tasks that nothing depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkAnchor {
    /// Latest finish of a sink is the project end, so short branches get float.
    #[default]
    ProjectEnd,
    /// Latest finish of a sink is its own earliest finish; every sink has zero slack.
    OwnFinish,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub default_estimate_minutes: i64,
    pub critical_slack_tolerance_days: f64,
    pub sink_anchor: SinkAnchor,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_estimate_minutes: DEFAULT_ESTIMATE_MINUTES,
            critical_slack_tolerance_days: DEFAULT_SLACK_TOLERANCE_DAYS,
            sink_anchor: SinkAnchor::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn from_file(path: &Path) -> Result<Self, GanttaiError> {
        let content = fs::read_to_string(path)
            .map_err(|e| GanttaiError::config(format!("Cannot read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| GanttaiError::config(format!("Invalid config {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path wins; otherwise the local config file if present; otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, GanttaiError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            tracing::debug!(path = %local.display(), "loading local config");
            return Self::from_file(&local);
        }
        Ok(Self::default())
    }

    pub fn with_default_estimate(mut self, minutes: Option<i64>) -> Result<Self, GanttaiError> {
        if let Some(m) = minutes {
            self.default_estimate_minutes = m;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), GanttaiError> {
        if self.default_estimate_minutes <= 0 {
            return Err(GanttaiError::config(
                "default_estimate_minutes must be positive",
            ));
        }
        if !(self.critical_slack_tolerance_days > 0.0) {
            return Err(GanttaiError::config(
                "critical_slack_tolerance_days must be positive",
            ));
        }
        Ok(())
    }

    pub fn default_estimate_ms(&self) -> i64 {
        self.default_estimate_minutes * 60_000
    }
}

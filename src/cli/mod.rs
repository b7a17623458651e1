pub mod commands;
pub mod input;
pub mod analyze;
pub mod timeline;
pub mod conflicts;
pub mod critical_path;

use std::path::Path;

use crate::config::SchedulerConfig;
use crate::error::GanttaiError;
use crate::output;

/// Settings shared by every command.
pub struct Context {
    pub json_output: bool,
    pub config: SchedulerConfig,
}

impl Context {
    pub fn load(
        json_output: bool,
        config_path: Option<&Path>,
        default_estimate: Option<i64>,
    ) -> Result<Self, GanttaiError> {
        let config = SchedulerConfig::load(config_path)?.with_default_estimate(default_estimate)?;
        Ok(Self { json_output, config })
    }
}

/// Print an error in the selected format and return the error exit code.
pub fn report_error(e: &GanttaiError, json_output: bool) -> i32 {
    if json_output {
        println!("{}", output::json::render(&output::json::error(e)));
    } else {
        eprintln!("Error: {}", e.message);
    }
    1
}

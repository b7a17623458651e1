use std::fs;
use std::io::{self, Read};

use crate::cli::commands::InputArgs;
use crate::error::GanttaiError;
use crate::models::Snapshot;

pub fn read_snapshot(args: &InputArgs) -> Result<Snapshot, GanttaiError> {
    let raw = match &args.input {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            GanttaiError::invalid_input(format!("Cannot read {}: {e}", path.display()))
        })?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if raw.trim().is_empty() {
        return Err(GanttaiError::invalid_input("Empty input; expected a JSON snapshot"));
    }
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    tracing::debug!(
        items = snapshot.items.len(),
        links = snapshot.links.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

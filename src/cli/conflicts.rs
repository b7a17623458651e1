use serde_json::json;

use crate::cli::commands::InputArgs;
use crate::cli::{input, report_error, Context};
use crate::engine;
use crate::error::GanttaiError;
use crate::graph::conflicts;
use crate::output;

pub fn run(ctx: &Context, args: &InputArgs) -> i32 {
    match run_inner(ctx, args) {
        Ok(code) => code,
        Err(e) => report_error(&e, ctx.json_output),
    }
}

fn run_inner(ctx: &Context, args: &InputArgs) -> Result<i32, GanttaiError> {
    let snapshot = input::read_snapshot(args)?;
    let (graph, skipped) = engine::assemble(&snapshot);
    let found = conflicts::detect_all(&graph);

    if ctx.json_output {
        let conflicts_json: Vec<_> = found.iter().map(output::json::conflict_json).collect();
        println!("{}", output::json::render(&output::json::success(json!({
            "conflicts": conflicts_json,
            "skipped": skipped
        }))));
    } else {
        output::text::print_conflicts(&found);
        output::text::print_skipped(&skipped);
    }
    Ok(if found.is_empty() { 0 } else { 2 })
}

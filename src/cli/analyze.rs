use serde_json::json;

use crate::cli::commands::InputArgs;
use crate::cli::{input, report_error, Context};
use crate::engine::{self, AnalyzeOptions};
use crate::error::GanttaiError;
use crate::output;

pub fn run(ctx: &Context, args: &InputArgs, project: Option<&str>) -> i32 {
    match run_inner(ctx, args, project) {
        Ok(code) => code,
        Err(e) => report_error(&e, ctx.json_output),
    }
}

fn run_inner(ctx: &Context, args: &InputArgs, project: Option<&str>) -> Result<i32, GanttaiError> {
    let snapshot = input::read_snapshot(args)?;
    let options = AnalyzeOptions {
        project_id: project.map(str::to_string),
        now: None,
    };
    let analysis = engine::analyze(&snapshot, &ctx.config, &options);

    if ctx.json_output {
        let tasks_json: Vec<_> = analysis.tasks.iter().map(output::json::task_json).collect();
        let edges_json: Vec<_> = analysis.edges.iter().map(output::json::edge_json).collect();
        let conflicts_json: Vec<_> = analysis.conflicts.iter().map(output::json::conflict_json).collect();
        println!("{}", output::json::render(&output::json::success(json!({
            "tasks": tasks_json,
            "edges": edges_json,
            "timeline": output::json::timeline_json(&analysis.timeline),
            "conflicts": conflicts_json,
            "critical_path": output::json::critical_path_json(&analysis.critical_path),
            "skipped": analysis.skipped
        }))));
    } else {
        output::text::print_timeline(&analysis.timeline);
        println!();
        output::text::print_critical_path(&analysis.critical_path);
        println!();
        output::text::print_conflicts(&analysis.conflicts);
        output::text::print_skipped(&analysis.skipped);
    }

    Ok(if analysis.conflicts.is_empty() { 0 } else { 2 })
}

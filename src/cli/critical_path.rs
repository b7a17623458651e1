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
    let (graph, skipped) = engine::assemble(&snapshot);
    let options = AnalyzeOptions {
        project_id: project.map(str::to_string),
        now: None,
    };
    let result = engine::critical_path_for(&graph, &ctx.config, &options);

    if ctx.json_output {
        println!("{}", output::json::render(&output::json::success(
            output::json::critical_path_json(&result),
        )));
    } else {
        output::text::print_critical_path(&result);
        output::text::print_skipped(&skipped);
    }
    Ok(0)
}

use crate::cli::commands::InputArgs;
use crate::cli::{input, report_error, Context};
use crate::engine;
use crate::error::GanttaiError;
use crate::graph::timeline;
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
    let tl = timeline::aggregate(graph.tasks(), chrono::Utc::now());

    if ctx.json_output {
        println!("{}", output::json::render(&output::json::success(output::json::timeline_json(&tl))));
    } else {
        output::text::print_timeline(&tl);
        output::text::print_skipped(&skipped);
    }
    Ok(0)
}

use super::{iso, round_days};
use crate::models::{Conflict, CriticalPathResult, Timeline};

pub fn print_timeline(t: &Timeline) {
    println!("Timeline: {} → {} ({} days)", iso(&t.start), iso(&t.end), t.duration_days);
    println!("  Tasks: {} ({} resolved)", t.task_count, t.resolved_count);
}

pub fn print_critical_path(r: &CriticalPathResult) {
    if r.per_task_metrics.is_empty() {
        println!("No tasks to schedule.");
        return;
    }
    let project = r.project_id.as_deref().unwrap_or("?");
    println!(
        "Critical path for {project}: {} ({} days)",
        r.ordered_critical_tasks.join(" → "),
        round_days(r.total_duration_days)
    );
    for m in &r.per_task_metrics {
        println!(
            "  {}{} duration={}d slack={}d start={}",
            if m.is_critical { "* " } else { "  " },
            m.human_id,
            round_days(m.duration_days),
            round_days(m.slack_days),
            iso(&m.earliest_start)
        );
    }
}

pub fn print_conflicts(conflicts: &[Conflict]) {
    if conflicts.is_empty() {
        println!("No conflicts found.");
        return;
    }
    println!("Conflicts ({}):", conflicts.len());
    for c in conflicts {
        println!("  [{}] {}: {}", c.severity.as_str(), c.kind.as_str(), c.description);
    }
}

pub fn print_skipped(skipped: &[String]) {
    if skipped.is_empty() {
        return;
    }
    println!("\nSkipped {} item(s):", skipped.len());
    for s in skipped {
        println!("  {s}");
    }
}

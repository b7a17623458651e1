use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

const VERSION: &str = env!("GANTTAI_VERSION");

#[derive(Parser)]
#[command(
    name = "ganttai",
    version = VERSION,
    about = "Project timeline analysis for tracker snapshots",
    after_help = "\
INPUT:
  A JSON snapshot read from --input or stdin:
  {\"items\": [{\"human_id\": \"P-1\", \"project_id\": \"P\", \"start_date\": <ms>, ...}],
   \"links\": [{\"source\": \"P-2\", \"target\": \"P-1\", \"link_type\": \"Depend\", \"direction\": \"outward\"}]}
  Timestamps are epoch milliseconds. Items without human_id or project_id are skipped.

EXIT CODES:
  0  Success
  1  Error (unreadable input, bad config)
  2  Success, but conflicts were detected (analyze, conflicts)

CONFIG:
  --config <file> or ./.ganttai.json, e.g.
  {\"default_estimate_minutes\": 480, \"critical_slack_tolerance_days\": 0.01,
   \"sink_anchor\": \"project_end\"}

LOGGING:
  GANTTAI_LOG=<filter> (default: warn). Logs go to stderr."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Minutes assumed for unestimated tasks
    #[arg(long, global = true)]
    pub default_estimate: Option<i64>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Clone)]
pub struct InputArgs {
    /// Snapshot file; stdin when omitted
    #[arg(long, short)]
    pub input: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Timeline, conflicts and critical path in one report
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        /// Project for the critical path (default: first task's project)
        #[arg(long)]
        project: Option<String>,
    },

    /// Overall project window
    Timeline {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Missing dates, dependency cycles and assignee overlaps
    Conflicts {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Critical path and slack per task
    #[command(after_help = "\
NOTE:
  Only depends-on links (and inverted blocks links) are scheduled.
  Cycles do not hang the calculation; run `conflicts` to see them.")]
    CriticalPath {
        #[command(flatten)]
        input: InputArgs,
        /// Project to schedule (default: first task's project)
        #[arg(long)]
        project: Option<String>,
    },
}

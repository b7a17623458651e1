use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ganttai::cli::commands::{Cli, Commands};
use ganttai::cli::{self, Context};

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("GANTTAI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}

fn main() {
    let cli_args = Cli::parse();
    if let Err(e) = init_tracing(cli_args.verbose) {
        eprintln!("{e:#}");
    }
    let json_output = cli_args.json;

    let ctx = match Context::load(
        json_output,
        cli_args.config.as_deref(),
        cli_args.default_estimate,
    ) {
        Ok(ctx) => ctx,
        Err(e) => process::exit(cli::report_error(&e, json_output)),
    };

    let exit_code = match &cli_args.command {
        Commands::Analyze { input, project } => cli::analyze::run(&ctx, input, project.as_deref()),
        Commands::Timeline { input } => cli::timeline::run(&ctx, input),
        Commands::Conflicts { input } => cli::conflicts::run(&ctx, input),
        Commands::CriticalPath { input, project } => {
            cli::critical_path::run(&ctx, input, project.as_deref())
        }
    };

    process::exit(exit_code);
}

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::process::ExitCode;

use bin2coe::driver;
use bin2coe::report::RunReport;
use cli::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(logging::level_for(cli.verbose, cli.debug))?;

    let tasks = cli.task_list();
    let stdout = io::stdout();
    let summary = driver::run(&tasks, &cli.run_options(), &mut stdout.lock())
        .context("Failed to write progress output")?;

    if let Some(path) = &cli.report {
        RunReport::from_summary(&summary, &tasks)
            .write_json(path)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
    }

    Ok(ExitCode::from(summary.exit_code(cli.strict)))
}

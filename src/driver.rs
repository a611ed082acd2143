//! Task driver
//!
//! Runs the converter over a [`TaskList`] in order and prints the progress
//! lines users (and scripts scraping them) rely on.

use crate::converter::{ByteCount, Conversion, Converter};
use crate::error::ConversionError;
use crate::tasks::{ConversionTask, TaskList};
use std::io::{self, Write};

pub const START_BANNER: &str = "--- start transforming ---";
pub const END_BANNER: &str = "--- compeleted ---";

/// Options controlling a run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Decode each written file and compare it with the input
    pub verify: bool,
    /// Stop after the first task that fails
    pub fail_fast: bool,
}

/// Result of one task
#[derive(Debug)]
pub struct TaskOutcome {
    pub task: ConversionTask,
    pub result: Result<Conversion, ConversionError>,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of every task that was attempted, in task-list order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<TaskOutcome>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn bytes_converted(&self) -> ByteCount {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|conversion| conversion.bytes)
            .sum()
    }

    /// Process exit status for this run: 1 only when `strict` is set and a
    /// task failed.
    pub fn exit_code(&self, strict: bool) -> u8 {
        if strict && !self.is_success() { 1 } else { 0 }
    }
}

/// Converts every task in `tasks`, writing progress lines to `console`.
///
/// Task failures are reported and recorded in the summary; only a failure to
/// write to `console` aborts the run.
pub fn run<W: Write>(
    tasks: &TaskList,
    options: &RunOptions,
    console: &mut W,
) -> io::Result<RunSummary> {
    let converter = Converter::new().with_verify(options.verify);
    let mut summary = RunSummary::default();

    tracing::info!("Starting conversion of {} tasks", tasks.len());
    writeln!(console, "{START_BANNER}")?;

    for task in tasks.tasks() {
        let outcome = run_task(&converter, tasks, task, console)?;
        let stop = options.fail_fast && !outcome.is_success();
        summary.outcomes.push(outcome);

        if stop {
            tracing::info!("Stopping after failed task {}", task);
            break;
        }
    }

    writeln!(console, "{END_BANNER}")?;
    console.flush()?;

    tracing::info!(
        "Finished: {} succeeded, {} failed, {} bytes converted",
        summary.succeeded(),
        summary.failed(),
        summary.bytes_converted()
    );

    Ok(summary)
}

fn run_task<W: Write>(
    converter: &Converter,
    tasks: &TaskList,
    task: &ConversionTask,
    console: &mut W,
) -> io::Result<TaskOutcome> {
    writeln!(console, "processing: {} ...", task.input().display())?;

    let input = tasks.resolve(task.input());
    let output = tasks.resolve(task.output());
    let result = converter.convert_with_digest(&input, &output);

    match &result {
        Ok(conversion) => {
            tracing::info!("Converted {} ({} bytes)", task, conversion.bytes);
            writeln!(
                console,
                "   success, new file: {} (size: {} bytes)",
                task.output().display(),
                conversion.bytes
            )?;
        }
        Err(ConversionError::MissingInput(path)) => {
            tracing::info!("Input not found: {}", path.display());
            writeln!(console, " error, cannot find file: {}", task.input().display())?;
        }
        Err(e) => {
            tracing::info!("Conversion of {} failed: {}", task, e);
            writeln!(console, "   error: {e}")?;
        }
    }

    Ok(TaskOutcome {
        task: task.clone(),
        result,
    })
}

use bin2coe::driver::RunOptions;
use bin2coe::tasks::{ConversionTask, TaskList};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bin2coe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert raw binary files into COE memory-initialization files", long_about = None)]
pub struct Cli {
    /// Conversions as INPUT=OUTPUT pairs (defaults to the built-in voice images)
    ///
    /// The pair is split at the first `=`: INPUT must not contain `=`, OUTPUT may.
    #[arg(value_name = "TASK")]
    pub tasks: Vec<ConversionTask>,

    /// Directory relative task paths are resolved from
    #[arg(short = 'C', long)]
    pub dir: Option<PathBuf>,

    /// Decode every written file and compare it with its input
    #[arg(long)]
    pub verify: bool,

    /// Stop after the first failed task
    #[arg(long)]
    pub fail_fast: bool,

    /// Exit with a failure status if any task failed
    #[arg(long)]
    pub strict: bool,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    pub fn task_list(&self) -> TaskList {
        let list = if self.tasks.is_empty() {
            TaskList::default()
        } else {
            self.tasks.iter().cloned().collect()
        };

        match &self.dir {
            Some(dir) => list.with_base_dir(dir),
            None => list,
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            verify: self.verify,
            fail_fast: self.fail_fast,
        }
    }
}

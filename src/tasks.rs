//! Conversion task lists
//!
//! A [`TaskList`] is the configuration handed to the driver: which files to
//! convert, in which order, and where relative paths are resolved from.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Built-in voice prompt images converted when no tasks are given.
pub const DEFAULT_TASKS: [(&str, &str); 3] = [
    ("Date8.raw", "date_voice.coe"),
    ("Temperature8.raw", "temp_voice.coe"),
    ("Time8.raw", "time_voice.coe"),
];

/// One `(input, output)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTask {
    input: PathBuf,
    output: PathBuf,
}

impl ConversionTask {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl fmt::Display for ConversionTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input.display(), self.output.display())
    }
}

/// Error returned when a task argument is not of the form `INPUT=OUTPUT`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected INPUT=OUTPUT, got {0:?}")]
pub struct ParseTaskError(String);

/// Parses `INPUT=OUTPUT`, splitting at the first `=`. Inputs containing `=`
/// cannot be expressed this way; build the task with [`ConversionTask::new`].
impl FromStr for ConversionTask {
    type Err = ParseTaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((input, output)) if !input.is_empty() && !output.is_empty() => {
                Ok(Self::new(input, output))
            }
            _ => Err(ParseTaskError(s.to_string())),
        }
    }
}

/// Ordered list of conversion tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    base_dir: Option<PathBuf>,
    tasks: Vec<ConversionTask>,
}

impl TaskList {
    pub fn new(tasks: Vec<ConversionTask>) -> Self {
        Self {
            base_dir: None,
            tasks,
        }
    }

    /// Resolve relative task paths against `dir` instead of the working
    /// directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn tasks(&self) -> &[ConversionTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Path actually opened for `path`. Absolute paths are returned as-is.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new(
            DEFAULT_TASKS
                .into_iter()
                .map(|(input, output)| ConversionTask::new(input, output))
                .collect(),
        )
    }
}

impl FromIterator<ConversionTask> for TaskList {
    fn from_iter<I: IntoIterator<Item = ConversionTask>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

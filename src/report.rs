//! JSON run report
//!
//! Records what a run did so a build script can check the generated memory
//! images without scraping console output.

use crate::driver::RunSummary;
use crate::error::ErrorKind;
use crate::tasks::{ConversionTask, TaskList};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Success,
    MissingInput,
    Failed,
    /// Not attempted because an earlier task failed under `--fail-fast`
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub input: String,
    pub output: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    /// SHA-256 of the COE text this task wrote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskRecord {
    fn new(task: &ConversionTask, status: TaskStatus) -> Self {
        Self {
            input: task.input().display().to_string(),
            output: task.output().display().to_string(),
            status,
            bytes: None,
            sha256: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: String,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    /// One record per configured task, in task-list order
    pub tasks: Vec<TaskRecord>,
}

impl RunReport {
    pub fn from_summary(summary: &RunSummary, tasks: &TaskList) -> Self {
        let mut records: Vec<TaskRecord> = summary
            .outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(conversion) => TaskRecord {
                    bytes: Some(conversion.bytes),
                    sha256: Some(conversion.sha256.clone()),
                    ..TaskRecord::new(&outcome.task, TaskStatus::Success)
                },
                Err(e) => {
                    let status = match e.kind() {
                        ErrorKind::MissingInput => TaskStatus::MissingInput,
                        ErrorKind::IoFailure => TaskStatus::Failed,
                    };
                    TaskRecord {
                        error: Some(e.to_string()),
                        ..TaskRecord::new(&outcome.task, status)
                    }
                }
            })
            .collect();

        let skipped = tasks.tasks().iter().skip(summary.outcomes.len());
        records.extend(skipped.map(|task| TaskRecord::new(task, TaskStatus::Skipped)));

        Self {
            generated_at: Utc::now().to_rfc3339(),
            succeeded: summary.succeeded(),
            failed: summary.failed(),
            skipped: tasks.len().saturating_sub(summary.outcomes.len()),
            tasks: records,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        fs::write(path, json)
    }
}

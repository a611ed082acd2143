//! End-to-end conversion tests
//!
//! Exercise the converter and driver against real files in temporary
//! directories.

use bin2coe::driver::{self, RunOptions};
use bin2coe::{CoeDocument, ConversionError, ConversionTask, Converter, TaskList, convert};
use rstest::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const EXAMPLE_COE: &str =
    "memory_initialization_radix=10;\nmemory_initialization_vector=\n0,\n1,\n255;";

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn voice_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Date8.raw"), [0u8, 1, 255]).unwrap();
    fs::write(dir.path().join("Temperature8.raw"), b"").unwrap();
    fs::write(
        dir.path().join("Time8.raw"),
        (0..=255u8).cycle().take(1000).collect::<Vec<_>>(),
    )
    .unwrap();
    dir
}

fn run_default(dir: &TempDir) -> (bin2coe::RunSummary, String) {
    let tasks = TaskList::default().with_base_dir(dir.path());
    let mut console = Vec::new();
    let summary = driver::run(&tasks, &RunOptions::default(), &mut console).unwrap();
    (summary, String::from_utf8(console).unwrap())
}

// ============================================================================
// Converter
// ============================================================================

#[rstest]
fn test_example_bytes(voice_dir: TempDir) {
    let output = voice_dir.path().join("date_voice.coe");
    let count = convert(voice_dir.path().join("Date8.raw"), &output).unwrap();

    assert_eq!(count, 3);
    assert_eq!(fs::read_to_string(&output).unwrap(), EXAMPLE_COE);
}

#[rstest]
fn test_empty_input_has_empty_vector(voice_dir: TempDir) {
    let output = voice_dir.path().join("temp_voice.coe");
    let count = convert(voice_dir.path().join("Temperature8.raw"), &output).unwrap();

    assert_eq!(count, 0);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "memory_initialization_radix=10;\nmemory_initialization_vector=\n;"
    );
}

#[rstest]
fn test_output_round_trips(voice_dir: TempDir) {
    let input = voice_dir.path().join("Time8.raw");
    let output = voice_dir.path().join("time_voice.coe");
    let count = convert(&input, &output).unwrap();

    let decoded = CoeDocument::parse(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(count, 1000);
    assert_eq!(decoded.as_bytes(), fs::read(&input).unwrap().as_slice());
}

#[rstest]
fn test_reconversion_is_identical(voice_dir: TempDir) {
    let input = voice_dir.path().join("Time8.raw");
    let output = voice_dir.path().join("time_voice.coe");

    convert(&input, &output).unwrap();
    let first = fs::read(&output).unwrap();
    convert(&input, &output).unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[rstest]
fn test_existing_output_is_truncated(voice_dir: TempDir) {
    let output = voice_dir.path().join("date_voice.coe");
    fs::write(&output, "x".repeat(10_000)).unwrap();

    convert(voice_dir.path().join("Date8.raw"), &output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), EXAMPLE_COE);
}

#[rstest]
fn test_missing_input_keeps_existing_output(voice_dir: TempDir) {
    let output = voice_dir.path().join("stale.coe");
    fs::write(&output, "stale").unwrap();

    let err = convert(voice_dir.path().join("Nope8.raw"), &output).unwrap_err();

    assert!(matches!(err, ConversionError::MissingInput(ref p) if p.ends_with("Nope8.raw")));
    assert_eq!(fs::read_to_string(&output).unwrap(), "stale");
}

#[rstest]
fn test_verify_option(voice_dir: TempDir) {
    let converter = Converter::new().with_verify(true);
    let count = converter
        .convert(
            &voice_dir.path().join("Time8.raw"),
            &voice_dir.path().join("time_voice.coe"),
        )
        .unwrap();
    assert_eq!(count, 1000);
}

// ============================================================================
// Driver
// ============================================================================

#[rstest]
fn test_default_task_list_console(voice_dir: TempDir) {
    let (summary, out) = run_default(&voice_dir);

    let expected = [
        "--- start transforming ---",
        "processing: Date8.raw ...",
        "   success, new file: date_voice.coe (size: 3 bytes)",
        "processing: Temperature8.raw ...",
        "   success, new file: temp_voice.coe (size: 0 bytes)",
        "processing: Time8.raw ...",
        "   success, new file: time_voice.coe (size: 1000 bytes)",
        "--- compeleted ---",
    ];
    assert_eq!(out.lines().collect::<Vec<_>>(), expected);
    assert!(summary.is_success());
    assert_eq!(summary.bytes_converted(), 1003);
}

#[rstest]
fn test_missing_task_is_skipped(voice_dir: TempDir) {
    fs::remove_file(voice_dir.path().join("Temperature8.raw")).unwrap();

    let (summary, out) = run_default(&voice_dir);

    assert!(out.contains(" error, cannot find file: Temperature8.raw\n"));
    assert!(out.contains("   success, new file: time_voice.coe (size: 1000 bytes)\n"));
    assert!(!voice_dir.path().join("temp_voice.coe").exists());
    assert_eq!(summary.succeeded(), 2);
    assert!(summary.outcomes[1].result.as_ref().unwrap_err().is_missing_input());
}

#[rstest]
fn test_io_failure_is_reported_and_run_continues(voice_dir: TempDir) {
    let tasks = TaskList::new(vec![
        ConversionTask::new("Date8.raw", PathBuf::from("no_such_dir").join("date_voice.coe")),
        ConversionTask::new("Time8.raw", "time_voice.coe"),
    ])
    .with_base_dir(voice_dir.path());
    let mut console = Vec::new();

    let summary = driver::run(&tasks, &RunOptions::default(), &mut console).unwrap();
    let out = String::from_utf8(console).unwrap();

    assert!(out.contains("   error: failed to write "));
    assert!(out.contains("   success, new file: time_voice.coe"));
    assert_eq!(summary.failed(), 1);
    assert!(!summary.outcomes[0].result.as_ref().unwrap_err().is_missing_input());
}

#[rstest]
fn test_input_below_regular_file_is_reported_missing(voice_dir: TempDir) {
    let tasks = TaskList::new(vec![ConversionTask::new(
        PathBuf::from("Date8.raw").join("x.raw"),
        "x.coe",
    )])
    .with_base_dir(voice_dir.path());
    let mut console = Vec::new();

    let summary = driver::run(&tasks, &RunOptions::default(), &mut console).unwrap();
    let out = String::from_utf8(console).unwrap();

    assert!(out.contains(" error, cannot find file: Date8.raw"));
    assert!(summary.outcomes[0].result.as_ref().unwrap_err().is_missing_input());
    assert!(!voice_dir.path().join("x.coe").exists());
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting one binary file into a COE file
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("cannot find file: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("verification of {} failed: {reason}", .path.display())]
    Verification { path: PathBuf, reason: String },
}

/// Coarse classification used by the driver when reporting outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    IoFailure,
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::MissingInput(_) => ErrorKind::MissingInput,
            _ => ErrorKind::IoFailure,
        }
    }

    pub fn is_missing_input(&self) -> bool {
        self.kind() == ErrorKind::MissingInput
    }
}

/// Errors that can occur when decoding COE text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoeParseError {
    #[error("missing `{0}=` statement")]
    MissingKey(&'static str),

    #[error("unsupported radix: {0}")]
    UnsupportedRadix(String),

    #[error("unterminated `{0}` statement")]
    Unterminated(&'static str),

    #[error("invalid value at index {index}: {value:?}")]
    InvalidValue { index: usize, value: String },

    #[error("unexpected content after the vector terminator")]
    TrailingContent,
}

pub type Result<T> = std::result::Result<T, ConversionError>;

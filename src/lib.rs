//! bin2coe - binary to COE converter
//!
//! Turns raw memory images into radix-10 COE files for FPGA block memory
//! initialization.

pub mod coe;
pub mod converter;
pub mod driver;
pub mod error;
pub mod report;
pub mod tasks;

pub use coe::CoeDocument;
pub use converter::{ByteCount, Conversion, Converter, convert};
pub use driver::{RunOptions, RunSummary, TaskOutcome};
pub use error::{CoeParseError, ConversionError, ErrorKind};
pub use tasks::{ConversionTask, TaskList};

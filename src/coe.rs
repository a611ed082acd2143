//! COE (Coefficient) documents
//!
//! Renders a byte sequence as a radix-10 memory-initialization file and
//! decodes such files back into bytes.

use crate::error::CoeParseError;
use std::fmt;
use std::io::{self, Write};

pub const RADIX_KEY: &str = "memory_initialization_radix";
pub const VECTOR_KEY: &str = "memory_initialization_vector";

/// First header line of every document we produce.
pub const RADIX_HEADER: &str = "memory_initialization_radix=10;";
/// Second header line; the vector values follow on the next lines.
pub const VECTOR_HEADER: &str = "memory_initialization_vector=";

const VALUE_SEPARATOR: &str = ",\n";
const TERMINATOR: char = ';';

/// A radix-10 COE document holding the bytes of one memory image.
///
/// The `Display` implementation produces the exact on-disk text:
///
/// ```text
/// memory_initialization_radix=10;
/// memory_initialization_vector=
/// 0,
/// 1,
/// 255;
/// ```
///
/// There is no newline after the final `;`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoeDocument {
    bytes: Vec<u8>,
}

impl CoeDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Streams the rendered document into `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")?;
        writer.flush()
    }

    /// Decodes COE text with a radix of 10.
    ///
    /// Whitespace around keys, `=`, values and separators is ignored, so
    /// documents written by hand or by other tools decode as long as they
    /// use decimal values in `0..=255`.
    pub fn parse(text: &str) -> Result<Self, CoeParseError> {
        let rest = strip_key(text, RADIX_KEY)?;
        let (radix, rest) = rest
            .split_once(TERMINATOR)
            .ok_or(CoeParseError::Unterminated(RADIX_KEY))?;
        let radix = radix.trim();
        if radix != "10" {
            return Err(CoeParseError::UnsupportedRadix(radix.to_string()));
        }

        let rest = strip_key(rest, VECTOR_KEY)?;
        let (vector, trailing) = rest
            .split_once(TERMINATOR)
            .ok_or(CoeParseError::Unterminated(VECTOR_KEY))?;
        if !trailing.trim().is_empty() {
            return Err(CoeParseError::TrailingContent);
        }

        let vector = vector.trim();
        if vector.is_empty() {
            return Ok(Self::default());
        }

        let bytes = vector
            .split(',')
            .enumerate()
            .map(|(index, value)| {
                let value = value.trim();
                parse_decimal(value).ok_or_else(|| CoeParseError::InvalidValue {
                    index,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Ok(Self { bytes })
    }
}

impl From<Vec<u8>> for CoeDocument {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Display for CoeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RADIX_HEADER}")?;
        writeln!(f, "{VECTOR_HEADER}")?;
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(VALUE_SEPARATOR)?;
            }
            write!(f, "{byte}")?;
        }
        write!(f, "{TERMINATOR}")
    }
}

fn strip_key<'a>(text: &'a str, key: &'static str) -> Result<&'a str, CoeParseError> {
    text.trim_start()
        .strip_prefix(key)
        .and_then(|rest| rest.trim_start().strip_prefix('='))
        .ok_or(CoeParseError::MissingKey(key))
}

// `u8::from_str` also accepts a leading `+`, which is not a radix-10 COE value.
fn parse_decimal(value: &str) -> Option<u8> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

//! Binary to COE conversion
//!
//! Reads an input file as an opaque byte sequence, renders it as a
//! [`CoeDocument`] and writes the document to the output path.

use crate::coe::CoeDocument;
use crate::error::{ConversionError, Result};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Number of input bytes processed by one conversion.
pub type ByteCount = u64;

/// What one successful conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Input bytes rendered into the document
    pub bytes: ByteCount,
    /// SHA-256 (hex) of the COE text written to the output
    pub sha256: String,
}

/// Converts binary files into COE files.
///
/// A `Converter` holds no state between calls; every [`convert`](Self::convert)
/// is an independent read, render, write pipeline.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    verify: bool,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-read and decode every written file, failing the conversion if it
    /// does not hold exactly the input bytes.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn verify(&self) -> bool {
        self.verify
    }

    /// Converts `input` into a COE file at `output`.
    ///
    /// A missing input is reported as [`ConversionError::MissingInput`] and
    /// leaves `output` untouched. An existing `output` is truncated.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<ByteCount> {
        self.convert_with_digest(input, output)
            .map(|conversion| conversion.bytes)
    }

    /// Like [`convert`](Self::convert), also returning the digest of the
    /// text this call wrote.
    pub fn convert_with_digest(&self, input: &Path, output: &Path) -> Result<Conversion> {
        let bytes = read_input(input)?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), input.display());

        let document = CoeDocument::new(bytes);
        let sha256 = write_document(&document, output)?;
        tracing::debug!("Wrote {} values to {}", document.len(), output.display());

        if self.verify {
            verify_output(&document, output)?;
            tracing::debug!("Verified {}", output.display());
        }

        Ok(Conversion {
            bytes: document.len() as ByteCount,
            sha256,
        })
    }
}

/// Converts `input` into a COE file at `output` with default options.
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<ByteCount> {
    Converter::default().convert(input.as_ref(), output.as_ref())
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    // A path through a regular file (`Date8.raw/x.raw`) fails with ENOTDIR;
    // it does not exist either.
    let read_error = |source: io::Error| match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
            ConversionError::MissingInput(input.to_path_buf())
        }
        _ => ConversionError::Read {
            path: input.to_path_buf(),
            source,
        },
    };

    match input.try_exists() {
        Ok(true) => {}
        Ok(false) => return Err(ConversionError::MissingInput(input.to_path_buf())),
        Err(e) => return Err(read_error(e)),
    }

    fs::read(input).map_err(read_error)
}

/// Passes writes through to `inner` while hashing every byte accepted.
struct HashingWriter<W> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn write_document(document: &CoeDocument, output: &Path) -> Result<String> {
    let write_error = |source| ConversionError::Write {
        path: output.to_path_buf(),
        source,
    };

    let file = File::create(output).map_err(write_error)?;
    let mut writer = HashingWriter {
        inner: BufWriter::new(file),
        hasher: Sha256::new(),
    };
    document.write_to(&mut writer).map_err(write_error)?;

    Ok(hex::encode(writer.hasher.finalize()))
}

fn verify_output(document: &CoeDocument, output: &Path) -> Result<()> {
    let verification_error = |reason: String| ConversionError::Verification {
        path: output.to_path_buf(),
        reason,
    };

    let text = fs::read_to_string(output).map_err(|source| ConversionError::Read {
        path: output.to_path_buf(),
        source,
    })?;
    let decoded = CoeDocument::parse(&text).map_err(|e| verification_error(e.to_string()))?;

    if decoded.len() != document.len() {
        return Err(verification_error(format!(
            "expected {} values, found {}",
            document.len(),
            decoded.len()
        )));
    }
    if let Some(index) = decoded
        .as_bytes()
        .iter()
        .zip(document.as_bytes())
        .position(|(a, b)| a != b)
    {
        return Err(verification_error(format!("value {index} differs from input")));
    }

    Ok(())
}

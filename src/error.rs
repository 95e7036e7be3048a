//! Error types for the log decoder.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Result type alias for decoder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when loading or decoding a log file.
#[derive(Debug, Error)]
pub enum Error {
    /// The log file could not be opened or read as text.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The `###` header section is missing, unterminated, or has a bad descriptor line.
    #[error("Malformed header: {0}")]
    HeaderMalformed(String),

    /// Fewer than two `---` sentinel lines, so no record can be delimited.
    #[error("Found {found} record sentinel line(s), at least 2 are required")]
    BoundaryUnderflow { found: usize },

    /// A single field of a record failed to decode.
    #[error("Failed to decode field '{field}' of record {record}")]
    FieldDecode {
        record: usize,
        field: String,
        #[source]
        source: DecodeError,
    },
}

/// Reasons a single data line can fail to decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The record block ends before this field's data line.
    #[error("data line {line} is past the end of the file")]
    MissingLine { line: usize },

    #[error("invalid integer '{value}': {source}")]
    InvalidInt {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid float '{value}': {source}")]
    InvalidFloat {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// Booleans are encoded strictly as `0` or `1`.
    #[error("invalid bool '{0}', expected '0' or '1'")]
    InvalidBool(String),

    /// The `<d1>x<d2>x...` dimension token could not be parsed.
    #[error("invalid shape '{0}'")]
    InvalidShape(String),

    #[error("cannot reshape {found} element(s) into shape {shape:?} ({expected} expected)")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        found: usize,
    },
}

impl Error {
    pub(crate) fn field(record: usize, field: &str, source: DecodeError) -> Self {
        Error::FieldDecode {
            record,
            field: field.to_string(),
            source,
        }
    }
}

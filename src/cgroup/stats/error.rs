//! Defines structured error types for decoding cgroup accounting files.
//!
//! A [`DecodeError`] is always scoped to the one file being decoded: it stops the
//! decoder for that file, and the walker reports it together with the file path before
//! moving on to the next file.
//!
//! # Error Types
//!
//! - [`DecodeError::MalformedLine`]: A line does not have the expected shape (wrong field
//!   count, a `KEY=VALUE` token without exactly one `=`, or a missing scalar).
//! - [`DecodeError::ParseFailure`]: A value expected to be numeric could not be parsed.
//! - [`DecodeError::UnknownEntryKind`]: A pressure file names an entry other than the known kinds.
//! - [`DecodeError::Io`]: Reading the file failed part way through.
//! - [`DecodeError::Closed`]: The consumer went away; this is not a fault of the file.

use std::num::ParseFloatError;

use thiserror::Error;

use crate::cgroup::sink::SinkClosed;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed line {line}: '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("invalid value for '{key}' at line {line}: '{value}': {source}")]
    ParseFailure {
        key: String,
        value: String,
        line: usize,
        #[source]
        source: ParseFloatError,
    },

    #[error("unknown entry '{entry}' at line {line}")]
    UnknownEntryKind { entry: String, line: usize },

    #[error("error during I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Closed(#[from] SinkClosed),
}

/// Parses `value` as a float, attributing failures to `key` at `line`.
pub(super) fn parse_value(key: &str, value: &str, line: usize) -> Result<f64, DecodeError> {
    value
        .parse::<f64>()
        .map_err(|source| DecodeError::ParseFailure {
            key: key.to_owned(),
            value: value.to_owned(),
            line,
            source,
        })
}

//! Error types for record parsing, correlation and configuration
//!
//! Data-quality problems (negative durations, duplicate join rows) are never
//! errors; they flow through as data and are counted by the summary.

use std::fmt;
use thiserror::Error;

/// Field of a raw record that failed to convert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Timestamp,
    Kind,
    SequenceNumber,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordField::Timestamp => "timestamp",
            RecordField::Kind => "kind",
            RecordField::SequenceNumber => "sequence number",
        };
        f.write_str(name)
    }
}

/// A single record could not be converted to an event
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed record at line {position}: invalid {field}: {reason}")]
pub struct MalformedRecordError {
    /// 1-based line or record index in the input
    pub position: usize,
    /// The field that failed
    pub field: RecordField,
    /// Human-readable cause
    pub reason: String,
}

impl MalformedRecordError {
    pub fn new(position: usize, field: RecordField, reason: impl Into<String>) -> Self {
        Self {
            position,
            field,
            reason: reason.into(),
        }
    }
}

/// Parse failures that stop the whole run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// First malformed record under the abort policy
    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),

    /// A record used a different timestamp format than the rest of the log.
    /// Fatal regardless of policy.
    #[error("mixed timestamp formats at line {position}: expected {expected}, found {found}")]
    MixedTimestampFormats {
        position: usize,
        expected: String,
        found: String,
    },
}

impl ParseError {
    /// Position of the offending record
    pub fn position(&self) -> usize {
        match self {
            ParseError::Malformed(err) => err.position,
            ParseError::MixedTimestampFormats { position, .. } => *position,
        }
    }
}

/// Raised by consumers that treat an empty derived output as a failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorrelationError {
    #[error("no correlatable events for {output}")]
    EmptyInput { output: &'static str },
}

/// Invalid analysis configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

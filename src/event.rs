//! Typed log events and the raw records they are parsed from

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a logged occurrence
///
/// Only `SampleStart` and `SampleEnd` carry a sequence number and take part
/// in correlation. Network events and unrelated application messages share
/// the same log and are kept as non-correlatable kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    SampleStart,
    SampleEnd,
    NackFrag,
    SnArrival,
    Other(String),
}

impl EventKind {
    /// Map trimmed kind text to a kind. Never fails; unknown text is `Other`.
    pub fn from_text(text: &str) -> Self {
        match text.trim() {
            "SAMPLE_START" => EventKind::SampleStart,
            "SAMPLE_END" => EventKind::SampleEnd,
            "NACKFRAG" => EventKind::NackFrag,
            // LTTng kinds are stripped to letters and '_'
            "SN Arrival" | "SNArrival" => EventKind::SnArrival,
            other => EventKind::Other(other.to_string()),
        }
    }

    /// Whether events of this kind are paired by sequence number
    pub fn is_correlatable(&self) -> bool {
        matches!(self, EventKind::SampleStart | EventKind::SampleEnd)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::SampleStart => f.write_str("SAMPLE_START"),
            EventKind::SampleEnd => f.write_str("SAMPLE_END"),
            EventKind::NackFrag => f.write_str("NACKFRAG"),
            EventKind::SnArrival => f.write_str("SN Arrival"),
            EventKind::Other(text) => f.write_str(text),
        }
    }
}

/// One observed log occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// 1-based position of the source record
    pub position: usize,
    pub timestamp: NaiveDateTime,
    pub kind: EventKind,
    /// Present exactly when `kind` is correlatable
    pub sequence_number: Option<u64>,
}

impl Event {
    pub fn sample_start(position: usize, timestamp: NaiveDateTime, sequence_number: u64) -> Self {
        Self {
            position,
            timestamp,
            kind: EventKind::SampleStart,
            sequence_number: Some(sequence_number),
        }
    }

    pub fn sample_end(position: usize, timestamp: NaiveDateTime, sequence_number: u64) -> Self {
        Self {
            position,
            timestamp,
            kind: EventKind::SampleEnd,
            sequence_number: Some(sequence_number),
        }
    }
}

/// A record as yielded by an ingestion backend, before typing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line or record index
    pub position: usize,
    pub timestamp: String,
    pub kind: String,
    pub sequence_number: Option<String>,
}

impl RawRecord {
    pub fn new(
        position: usize,
        timestamp: impl Into<String>,
        kind: impl Into<String>,
        sequence_number: Option<String>,
    ) -> Self {
        Self {
            position,
            timestamp: timestamp.into(),
            kind: kind.into(),
            sequence_number,
        }
    }
}

//! START/END correlation and start-to-start jitter
//!
//! Pairing is an inner equi-join on sequence number: keys present on one side
//! only produce nothing, and a key seen `m` times among STARTs and `n` times
//! among ENDs produces `m * n` rows. Durations are signed and never clamped so
//! ordering bugs upstream stay visible in the output.

use crate::error::CorrelationError;
use crate::event::{Event, EventKind};
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One START paired with one END sharing a sequence number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationRecord {
    pub sequence_number: u64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// `end_time - start_time`, negative when the END precedes the START
    pub duration_us: f64,
}

/// Gap between two chronologically adjacent STARTs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JitterRecord {
    /// Sequence number of the later START
    pub sequence_number: u64,
    /// Sequence number of the earlier START
    pub previous_sequence_number: u64,
    pub start_time: NaiveDateTime,
    pub start_diff_us: f64,
}

/// Both derived sequences for one log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub durations: Vec<DurationRecord>,
    pub jitter: Vec<JitterRecord>,
}

impl Correlation {
    /// Durations, or `EmptyInput` when no START/END pair joined
    pub fn require_durations(&self) -> Result<&[DurationRecord], CorrelationError> {
        if self.durations.is_empty() {
            return Err(CorrelationError::EmptyInput {
                output: "durations",
            });
        }
        Ok(&self.durations)
    }

    /// Jitter, or `EmptyInput` when fewer than two STARTs were seen
    pub fn require_jitter(&self) -> Result<&[JitterRecord], CorrelationError> {
        if self.jitter.is_empty() {
            return Err(CorrelationError::EmptyInput { output: "jitter" });
        }
        Ok(&self.jitter)
    }
}

/// Signed microseconds between two timestamps, at nanosecond resolution
pub fn delta_us(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let delta: TimeDelta = to - from;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1_000.0,
        // Only reachable for gaps beyond ~292 years
        None => match delta.num_microseconds() {
            Some(micros) => micros as f64,
            None if delta < TimeDelta::zero() => i64::MIN as f64,
            None => i64::MAX as f64,
        },
    }
}

/// Stateless correlation over a complete event sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationEngine;

impl CorrelationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Produce durations and jitter for one log
    ///
    /// Empty outputs are returned as empty sequences, never as errors.
    pub fn correlate(&self, events: &[Event]) -> Correlation {
        let correlation = Correlation {
            durations: self.pair_durations(events),
            jitter: self.start_jitter(events),
        };
        debug!(
            events = events.len(),
            durations = correlation.durations.len(),
            jitter = correlation.jitter.len(),
            "correlated events"
        );
        correlation
    }

    /// Inner join of STARTs and ENDs on sequence number
    ///
    /// Rows follow STARTs in input order; for a repeated key, matching ENDs
    /// follow in input order.
    pub fn pair_durations(&self, events: &[Event]) -> Vec<DurationRecord> {
        let mut ends_by_seq: HashMap<u64, Vec<NaiveDateTime>> = HashMap::new();
        for (seq, end) in keyed(events, EventKind::SampleEnd) {
            ends_by_seq.entry(seq).or_default().push(end.timestamp);
        }

        let mut durations = Vec::new();
        for (seq, start) in keyed(events, EventKind::SampleStart) {
            let Some(ends) = ends_by_seq.get(&seq) else {
                continue;
            };
            for &end_time in ends {
                durations.push(DurationRecord {
                    sequence_number: seq,
                    start_time: start.timestamp,
                    end_time,
                    duration_us: delta_us(start.timestamp, end_time),
                });
            }
        }
        durations
    }

    /// Consecutive differences of STARTs sorted by timestamp
    ///
    /// The sort is stable, so equal timestamps keep input order. The first
    /// START has no predecessor and yields no record.
    pub fn start_jitter(&self, events: &[Event]) -> Vec<JitterRecord> {
        let mut starts: Vec<(u64, &Event)> = keyed(events, EventKind::SampleStart).collect();
        starts.sort_by_key(|(_, event)| event.timestamp);

        starts
            .windows(2)
            .map(|pair| {
                let (previous_seq, previous) = pair[0];
                let (seq, current) = pair[1];
                JitterRecord {
                    sequence_number: seq,
                    previous_sequence_number: previous_seq,
                    start_time: current.timestamp,
                    start_diff_us: delta_us(previous.timestamp, current.timestamp),
                }
            })
            .collect()
    }
}

/// Events of `kind` with their sequence number
///
/// Events lacking a sequence number never reach here through the parser; a
/// hand-built one is not correlatable and is left out.
fn keyed(events: &[Event], kind: EventKind) -> impl Iterator<Item = (u64, &Event)> {
    events
        .iter()
        .filter(move |event| event.kind == kind)
        .filter_map(|event| event.sequence_number.map(|seq| (seq, event)))
}

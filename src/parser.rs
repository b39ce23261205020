//! Raw record to typed event conversion
//!
//! One record yields one `Event` or a `MalformedRecordError`. Whether a
//! malformed record is skipped or stops the run is decided by the configured
//! `ParsePolicy`. A log mixing timestamp formats is always rejected.

use crate::config::{AnalysisConfig, ParsePolicy, TimestampFormat};
use crate::error::{MalformedRecordError, ParseError, RecordField};
use crate::event::{Event, EventKind, RawRecord};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

const DATE_TIME_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const TIME_OF_DAY_LAYOUT: &str = "%H:%M:%S%.f";

/// Result of parsing a whole log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// Events in input order
    pub events: Vec<Event>,
    /// Records dropped under the skip policy
    pub skipped: Vec<MalformedRecordError>,
    /// Timestamp format every event was parsed with (None if no event parsed)
    pub timestamp_format: Option<TimestampFormat>,
}

/// Converts raw records into events
#[derive(Debug, Clone)]
pub struct EventParser {
    timestamp_format: TimestampFormat,
    base_date: NaiveDate,
    policy: ParsePolicy,
}

impl Default for EventParser {
    fn default() -> Self {
        Self::new(TimestampFormat::Auto, ParsePolicy::Skip)
    }
}

impl EventParser {
    pub fn new(timestamp_format: TimestampFormat, policy: ParsePolicy) -> Self {
        Self {
            timestamp_format,
            base_date: NaiveDate::default(),
            policy,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.timestamp_format, config.on_error).with_base_date(config.base_date)
    }

    /// Date attached to time-of-day timestamps
    pub fn with_base_date(mut self, base_date: NaiveDate) -> Self {
        self.base_date = base_date;
        self
    }

    pub fn policy(&self) -> ParsePolicy {
        self.policy
    }

    /// Convert a single record
    ///
    /// With an explicit timestamp format, a timestamp in the other format is
    /// reported as malformed. Use [`EventParser::parse_all`] to get the
    /// whole-log mixed-format check.
    pub fn parse_record(&self, record: &RawRecord) -> Result<Event, MalformedRecordError> {
        let (found, timestamp) = self.parse_timestamp(record)?;
        if self.timestamp_format != TimestampFormat::Auto && found != self.timestamp_format {
            return Err(MalformedRecordError::new(
                record.position,
                RecordField::Timestamp,
                format!(
                    "expected {} timestamp, found {}",
                    self.timestamp_format, found
                ),
            ));
        }
        build_event(record, timestamp)
    }

    /// Convert a whole log, applying the configured policy
    pub fn parse_all(&self, records: &[RawRecord]) -> Result<ParseOutcome, ParseError> {
        let mut locked = match self.timestamp_format {
            TimestampFormat::Auto => None,
            concrete => Some(concrete),
        };
        let mut outcome = ParseOutcome::default();

        for record in records {
            // The format lock is checked before the kind and sequence number
            let (found, timestamp) = match self.parse_timestamp(record) {
                Ok(parsed) => parsed,
                Err(err) => {
                    self.reject(err, &mut outcome)?;
                    continue;
                }
            };
            match locked {
                None => locked = Some(found),
                Some(expected) if expected != found => {
                    return Err(ParseError::MixedTimestampFormats {
                        position: record.position,
                        expected: expected.to_string(),
                        found: found.to_string(),
                    });
                }
                Some(_) => {}
            }

            match build_event(record, timestamp) {
                Ok(event) => outcome.events.push(event),
                Err(err) => self.reject(err, &mut outcome)?,
            }
        }

        outcome.timestamp_format = if outcome.events.is_empty() {
            None
        } else {
            locked
        };
        debug!(
            records = records.len(),
            events = outcome.events.len(),
            skipped = outcome.skipped.len(),
            "parsed log records"
        );
        Ok(outcome)
    }

    /// Apply the policy to one malformed record
    fn reject(&self, err: MalformedRecordError, outcome: &mut ParseOutcome) -> Result<(), ParseError> {
        match self.policy {
            ParsePolicy::Abort => Err(err.into()),
            ParsePolicy::Skip => {
                warn!(
                    position = err.position,
                    field = %err.field,
                    "skipping malformed record: {}",
                    err.reason
                );
                outcome.skipped.push(err);
                Ok(())
            }
        }
    }

    fn parse_timestamp(
        &self,
        record: &RawRecord,
    ) -> Result<(TimestampFormat, NaiveDateTime), MalformedRecordError> {
        let text = record.timestamp.trim();

        for layout in DATE_TIME_LAYOUTS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(text, layout) {
                return Ok((TimestampFormat::DateTime, ts));
            }
        }
        if let Ok(time) = NaiveTime::parse_from_str(text, TIME_OF_DAY_LAYOUT) {
            return Ok((TimestampFormat::TimeOfDay, self.base_date.and_time(time)));
        }

        Err(MalformedRecordError::new(
            record.position,
            RecordField::Timestamp,
            format!("unrecognized timestamp {:?}", text),
        ))
    }
}

/// Type the kind and sequence number of a record whose timestamp parsed
fn build_event(record: &RawRecord, timestamp: NaiveDateTime) -> Result<Event, MalformedRecordError> {
    let kind_text = record.kind.trim();
    if kind_text.is_empty() {
        return Err(MalformedRecordError::new(
            record.position,
            RecordField::Kind,
            "missing event kind",
        ));
    }
    let kind = EventKind::from_text(kind_text);

    let sequence_number = if kind.is_correlatable() {
        Some(parse_sequence_number(record)?)
    } else {
        None
    };

    Ok(Event {
        position: record.position,
        timestamp,
        kind,
        sequence_number,
    })
}

fn parse_sequence_number(record: &RawRecord) -> Result<u64, MalformedRecordError> {
    let text = record
        .sequence_number
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            MalformedRecordError::new(
                record.position,
                RecordField::SequenceNumber,
                format!("missing sequence number for {}", record.kind.trim()),
            )
        })?;

    text.parse::<u64>().map_err(|_| {
        MalformedRecordError::new(
            record.position,
            RecordField::SequenceNumber,
            format!("{:?} is not a non-negative integer", text),
        )
    })
}

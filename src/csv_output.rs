//! CSV output format for correlated records
//!
//! Two sections separated by a blank line: START/END durations, then
//! START/START gaps.

use crate::correlation::{DurationRecord, JitterRecord};
use chrono::NaiveDateTime;

const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    durations: Vec<DurationRecord>,
    jitter: Vec<JitterRecord>,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a duration row
    pub fn add_duration(&mut self, record: DurationRecord) {
        self.durations.push(record);
    }

    /// Add a jitter row
    pub fn add_jitter(&mut self, record: JitterRecord) {
        self.jitter.push(record);
    }

    fn format_timestamp(ts: &NaiveDateTime) -> String {
        ts.format(TIMESTAMP_LAYOUT).to_string()
    }

    fn format_duration(record: &DurationRecord) -> String {
        format!(
            "{},{},{},{}",
            record.sequence_number,
            Self::format_timestamp(&record.start_time),
            Self::format_timestamp(&record.end_time),
            record.duration_us
        )
    }

    fn format_jitter(record: &JitterRecord) -> String {
        format!(
            "{},{},{}",
            record.sequence_number,
            Self::format_timestamp(&record.start_time),
            record.start_diff_us
        )
    }

    /// Duration section only
    pub fn durations_csv(&self) -> String {
        let mut output = String::from("sequence_number,start_time,end_time,duration_us\n");
        for record in &self.durations {
            output.push_str(&Self::format_duration(record));
            output.push('\n');
        }
        output
    }

    /// Jitter section only
    pub fn jitter_csv(&self) -> String {
        let mut output = String::from("sequence_number,start_time,start_diff_us\n");
        for record in &self.jitter {
            output.push_str(&Self::format_jitter(record));
            output.push('\n');
        }
        output
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        format!("{}\n{}", self.durations_csv(), self.jitter_csv())
    }
}

//! End-to-end analysis of one collected log
//!
//! raw records -> `EventParser` -> events -> `CorrelationEngine` ->
//! durations and jitter -> `LatencySummary`

use crate::config::{AnalysisConfig, TimestampFormat};
use crate::correlation::{Correlation, CorrelationEngine};
use crate::error::{MalformedRecordError, ParseError};
use crate::event::RawRecord;
use crate::parser::EventParser;
use crate::summary::LatencySummary;
use tracing::info;

/// Everything derived from one log
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Timestamp format the log was parsed with
    pub timestamp_format: Option<TimestampFormat>,
    /// Number of events parsed, all kinds
    pub event_count: usize,
    /// Records dropped under the skip policy
    pub skipped: Vec<MalformedRecordError>,
    pub correlation: Correlation,
    pub summary: LatencySummary,
}

/// Run the parse, correlation and summary stages over `records`
///
/// Fails only on parse errors that stop the run: the first malformed record
/// under the abort policy, or a log mixing timestamp formats.
pub fn analyze(records: &[RawRecord], config: &AnalysisConfig) -> Result<AnalysisReport, ParseError> {
    let outcome = EventParser::from_config(config).parse_all(records)?;
    let correlation = CorrelationEngine::new().correlate(&outcome.events);
    let summary = LatencySummary::from_correlation(&correlation, &config.percentiles)
        .with_skipped_records(outcome.skipped.len());

    info!(
        events = outcome.events.len(),
        skipped = outcome.skipped.len(),
        durations = correlation.durations.len(),
        jitter = correlation.jitter.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        timestamp_format: outcome.timestamp_format,
        event_count: outcome.events.len(),
        skipped: outcome.skipped,
        correlation,
        summary,
    })
}

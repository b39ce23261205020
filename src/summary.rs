//! Descriptive latency and jitter statistics
//!
//! All reductions stay in f64 so sub-microsecond deltas survive. Percentiles
//! interpolate linearly between closest ranks.
//! Data-quality counters only count what is present in the derived records.

use crate::correlation::{Correlation, DurationRecord, JitterRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Summary of one series of microsecond values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
    /// `(percentile, value)` pairs in the configured order
    pub percentiles: Vec<(f64, f64)>,
}

impl DescriptiveStats {
    /// Compute statistics, or `None` for an empty series
    pub fn from_values(values: &[f64], percentiles: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len() as f64;
        let mean = values.iter().sum::<f64>() / count;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        // Extrema come from the same sorted series as P0 and P100
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];

        let percentiles = percentiles
            .iter()
            .map(|&p| (p, calculate_percentile(&sorted, p)))
            .collect();

        Some(Self {
            count: values.len(),
            mean,
            stddev: variance.sqrt(),
            min,
            max,
            percentiles,
        })
    }

    /// Value recorded for percentile `p`, if it was requested
    pub fn percentile(&self, p: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|(q, _)| *q == p)
            .map(|(_, value)| *value)
    }
}

/// Calculate percentile from sorted data
fn calculate_percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

/// Counts of upstream misbehavior visible in the derived records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQuality {
    /// Duration rows whose END precedes their START
    pub negative_durations: usize,
    /// Sequence numbers that joined into more than one duration row
    pub duplicate_sequence_numbers: usize,
    /// Adjacent STARTs whose sequence number did not increase
    pub non_monotonic_sequence_numbers: usize,
    /// Records dropped by the parser under the skip policy
    pub skipped_records: usize,
}

impl DataQuality {
    pub fn from_records(durations: &[DurationRecord], jitter: &[JitterRecord]) -> Self {
        let negative_durations = durations.iter().filter(|d| d.duration_us < 0.0).count();

        let mut rows_per_seq: HashMap<u64, usize> = HashMap::new();
        for record in durations {
            *rows_per_seq.entry(record.sequence_number).or_default() += 1;
        }
        let duplicate_sequence_numbers = rows_per_seq.values().filter(|&&n| n > 1).count();

        let non_monotonic_sequence_numbers = jitter
            .iter()
            .filter(|j| j.sequence_number <= j.previous_sequence_number)
            .count();

        Self {
            negative_durations,
            duplicate_sequence_numbers,
            non_monotonic_sequence_numbers,
            skipped_records: 0,
        }
    }

    /// Whether any counter is non-zero
    pub fn has_anomalies(&self) -> bool {
        self.negative_durations > 0
            || self.duplicate_sequence_numbers > 0
            || self.non_monotonic_sequence_numbers > 0
            || self.skipped_records > 0
    }
}

/// Statistical summary of one correlated log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    /// START to END latency, `None` when nothing paired
    pub durations: Option<DescriptiveStats>,
    /// START to START gaps, `None` with fewer than two STARTs
    pub jitter: Option<DescriptiveStats>,
    pub quality: DataQuality,
}

impl LatencySummary {
    pub fn from_correlation(correlation: &Correlation, percentiles: &[f64]) -> Self {
        let durations: Vec<f64> = correlation
            .durations
            .iter()
            .map(|d| d.duration_us)
            .collect();
        let gaps: Vec<f64> = correlation
            .jitter
            .iter()
            .map(|j| j.start_diff_us)
            .collect();

        let quality = DataQuality::from_records(&correlation.durations, &correlation.jitter);
        if quality.has_anomalies() {
            debug!(
                negative_durations = quality.negative_durations,
                duplicate_sequence_numbers = quality.duplicate_sequence_numbers,
                non_monotonic_sequence_numbers = quality.non_monotonic_sequence_numbers,
                "data-quality anomalies in correlated records"
            );
        }

        Self {
            durations: DescriptiveStats::from_values(&durations, percentiles),
            jitter: DescriptiveStats::from_values(&gaps, percentiles),
            quality,
        }
    }

    /// Record how many input records the parser dropped
    pub fn with_skipped_records(mut self, skipped: usize) -> Self {
        self.quality.skipped_records = skipped;
        self
    }
}

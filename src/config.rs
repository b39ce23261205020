//! Analysis configuration
//!
//! Settings are fixed for one run: a log is parsed with a single timestamp
//! format and a single malformed-record policy. Values come from an optional
//! TOML file and are then overridden by CLI flags.

use crate::error::ConfigError;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Log text grammar handled by an ingestion backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    /// `TIMESTAMP, KIND[, SEQ]` lines written by the application file log
    #[default]
    Delimited,
    /// babeltrace text output of the LTTng tracepoints
    Lttng,
}

/// Timestamp layout used by every record of one log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampFormat {
    /// Detect from the first parsable record, then lock
    #[default]
    Auto,
    /// `2024-10-14 13:40:40.123456`
    DateTime,
    /// `13:40:40.123456789`, anchored at the configured base date
    TimeOfDay,
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimestampFormat::Auto => "auto",
            TimestampFormat::DateTime => "date-time",
            TimestampFormat::TimeOfDay => "time-of-day",
        };
        f.write_str(name)
    }
}

/// What to do with a record that cannot be converted to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ParsePolicy {
    /// Log the bad record, exclude it and continue
    #[default]
    Skip,
    /// Stop at the first bad record
    Abort,
}

fn default_percentiles() -> Vec<f64> {
    vec![50.0, 75.0, 90.0, 95.0, 99.0]
}

/// Configuration for one analysis run
///
/// # Example
/// ```
/// use seqlat::config::{AnalysisConfig, ParsePolicy};
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.on_error, ParsePolicy::Skip);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub log_format: LogFormat,
    pub timestamp_format: TimestampFormat,
    pub on_error: ParsePolicy,
    /// Date attached to time-of-day timestamps
    pub base_date: NaiveDate,
    /// Percentiles reported for durations and jitter, each in [0, 100]
    #[serde(default = "default_percentiles")]
    pub percentiles: Vec<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            timestamp_format: TimestampFormat::default(),
            on_error: ParsePolicy::default(),
            base_date: NaiveDate::default(),
            percentiles: default_percentiles(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(p) = self
            .percentiles
            .iter()
            .find(|p| !(0.0..=100.0).contains(*p))
        {
            return Err(ConfigError::InvalidValue {
                key: "percentiles",
                reason: format!("percentile must be in [0, 100], got {}", p),
            });
        }
        Ok(())
    }
}

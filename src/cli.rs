//! CLI argument parsing for seqlat

use crate::config::{AnalysisConfig, LogFormat, ParsePolicy, TimestampFormat};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis and plotting
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "seqlat")]
#[command(version)]
#[command(about = "Sample START/END correlation with latency and jitter statistics", long_about = None)]
pub struct Cli {
    /// Log file to analyze
    #[arg(value_name = "LOG")]
    pub log: PathBuf,

    /// Log grammar (overrides config file)
    #[arg(long = "log-format", value_enum)]
    pub log_format: Option<LogFormat>,

    /// Timestamp format used by every record (overrides config file)
    #[arg(long = "timestamp-format", value_enum)]
    pub timestamp_format: Option<TimestampFormat>,

    /// Malformed record policy: skip and continue, or abort on first (overrides config file)
    #[arg(long = "on-error", value_enum)]
    pub on_error: Option<ParsePolicy>,

    /// Date attached to time-of-day timestamps, e.g. 2024-10-14
    #[arg(long = "base-date", value_name = "DATE")]
    pub base_date: Option<NaiveDate>,

    /// Output format
    #[arg(long = "output", value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Print only the statistical summary
    #[arg(short = 's', long = "summary")]
    pub summary: bool,

    /// TOML analysis config file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing output on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply flag overrides on top of a base configuration
    pub fn apply_overrides(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(format) = self.timestamp_format {
            config.timestamp_format = format;
        }
        if let Some(policy) = self.on_error {
            config.on_error = policy;
        }
        if let Some(date) = self.base_date {
            config.base_date = date;
        }
        config
    }
}

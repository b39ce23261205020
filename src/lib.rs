//! seqlat - sample lifecycle correlation for transport pipeline logs
//!
//! Parses timestamped SAMPLE_START / SAMPLE_END records, pairs them by
//! sequence number, and derives per-sample latency and start-to-start jitter
//! with descriptive statistics for diagnostic reporting.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod correlation;
pub mod csv_output;
pub mod error;
pub mod event;
pub mod ingest;
pub mod json_output;
pub mod parser;
pub mod summary;
pub mod text_output;

// Log ingestion backends
//
// Each backend turns the text of one log into raw records. Backends know the
// grammar of their format and nothing else: typing, timestamp handling and
// malformed-record policy live in the parser.

mod delimited;
mod lttng;

pub use delimited::parse_delimited;
pub use lttng::parse_lttng;

use crate::config::LogFormat;
use crate::event::RawRecord;
use anyhow::{Context, Result};
use std::path::Path;

/// Split log text into raw records using the grammar of `format`
pub fn records_from_text(text: &str, format: LogFormat) -> Result<Vec<RawRecord>> {
    match format {
        LogFormat::Delimited => Ok(parse_delimited(text)),
        LogFormat::Lttng => parse_lttng(text).context("Failed to build LTTng record pattern"),
    }
}

/// Read a log file and split it into raw records
pub fn read_log(path: &Path, format: LogFormat) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read log file {}", path.display()))?;
    let records = records_from_text(&text, format)?;
    tracing::debug!(
        path = %path.display(),
        ?format,
        records = records.len(),
        "ingested log"
    );
    Ok(records)
}

#[cfg(test)]
mod tests;

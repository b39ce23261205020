//! JSON output format for analysis reports

use crate::analysis::AnalysisReport;
use crate::correlation::{DurationRecord, JitterRecord};
use crate::summary::LatencySummary;
use serde::{Deserialize, Serialize};

/// A record dropped by the parser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSkippedRecord {
    pub position: usize,
    pub field: String,
    pub reason: String,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Timestamp format the log was parsed with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_format: Option<String>,
    pub durations: Vec<DurationRecord>,
    pub jitter: Vec<JitterRecord>,
    pub summary: LatencySummary,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped: Vec<JsonSkippedRecord>,
}

impl JsonOutput {
    /// Build the document for a report
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "seqlat-json-v1".to_string(),
            timestamp_format: report.timestamp_format.map(|f| f.to_string()),
            durations: report.correlation.durations.clone(),
            jitter: report.correlation.jitter.clone(),
            summary: report.summary.clone(),
            skipped: report
                .skipped
                .iter()
                .map(|err| JsonSkippedRecord {
                    position: err.position,
                    field: err.field.to_string(),
                    reason: err.reason.clone(),
                })
                .collect(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::config::AnalysisConfig;
    use crate::event::RawRecord;

    fn report() -> AnalysisReport {
        let records = vec![
            RawRecord::new(1, "2024-10-14 13:40:40.000000", "SAMPLE_START", Some("1".into())),
            RawRecord::new(2, "2024-10-14 13:40:40.000500", "SAMPLE_END", Some("1".into())),
            RawRecord::new(3, "2024-10-14 13:40:40.000600", "SAMPLE_END", None),
        ];
        analyze(&records, &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_json_output_structure() {
        let json = JsonOutput::from_report(&report()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["format"], "seqlat-json-v1");
        assert_eq!(value["timestamp_format"], "date-time");
        assert_eq!(value["durations"][0]["sequence_number"], 1);
        assert_eq!(value["durations"][0]["duration_us"], 500.0);
        assert_eq!(value["jitter"].as_array().unwrap().len(), 0);
        assert_eq!(value["summary"]["durations"]["count"], 1);
        assert!(value["summary"]["jitter"].is_null());
        assert_eq!(value["skipped"][0]["position"], 3);
        assert_eq!(value["skipped"][0]["field"], "sequence number");
    }

    #[test]
    fn test_json_omits_empty_skipped() {
        let mut report = report();
        report.skipped.clear();
        let json = JsonOutput::from_report(&report).to_json().unwrap();
        assert!(!json.contains("\"skipped\""));
    }
}

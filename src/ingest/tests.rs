// Tests across ingestion backends

use super::*;
use std::io::Write;

const DELIMITED: &str = "\
2024-10-14 13:40:40.000000, SAMPLE_START, 1
2024-10-14 13:40:40.000200, NACKFRAG
2024-10-14 13:40:40.000500, SAMPLE_END, 1
";

const LTTNG: &str = r#"[13:40:40.000000000] (+?.?????????) vm w2rp_trace:tracepoint_writer_int: { cpu_id = 0 }, { string_field = "SAMPLE_START, : ", integer_field = 1 }
[13:40:40.000500000] (+0.000500000) vm w2rp_trace:tracepoint_writer_int: { cpu_id = 0 }, { string_field = "SAMPLE_END, : ", integer_field = 1 }
"#;

#[test]
fn test_records_from_text_delimited() {
    let records = records_from_text(DELIMITED, LogFormat::Delimited).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].kind, "NACKFRAG");
}

#[test]
fn test_records_from_text_lttng() {
    let records = records_from_text(LTTNG, LogFormat::Lttng).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].kind, "SAMPLE_END");
}

#[test]
fn test_wrong_format_yields_no_lttng_records() {
    assert!(records_from_text(DELIMITED, LogFormat::Lttng)
        .unwrap()
        .is_empty());
}

#[test]
fn test_read_log_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DELIMITED.as_bytes()).unwrap();

    let records = read_log(file.path(), LogFormat::Delimited).unwrap();
    assert_eq!(records.len(), 3);
}

#[test]
fn test_read_log_missing_file_has_context() {
    let err = read_log(Path::new("/nonexistent/writer.log"), LogFormat::Delimited).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/writer.log"));
}

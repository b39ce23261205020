//! CLI behavior tests
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const WRITER_LOG: &str = "\
2024-10-14 13:40:40.000000, SAMPLE_START, 1
2024-10-14 13:40:40.000200, NACKFRAG, 1
2024-10-14 13:40:40.000500, SAMPLE_END, 1
2024-10-14 13:40:40.000700, SAMPLE_START
2024-10-14 13:40:40.001000, SAMPLE_START, 2
2024-10-14 13:40:40.001800, SAMPLE_END, 2
";

fn log_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn seqlat() -> Command {
    Command::cargo_bin("seqlat").unwrap()
}

#[test]
fn test_text_report() {
    let log = log_file(WRITER_LOG);
    seqlat()
        .arg(log.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Start-End Durations ==="))
        .stdout(predicate::str::contains("800.000"))
        .stdout(predicate::str::contains("=== Start-Start Jitter ==="))
        .stdout(predicate::str::contains("Skipped records:            1"));
}

#[test]
fn test_skipped_record_logged_to_stderr() {
    let log = log_file(WRITER_LOG);
    seqlat()
        .arg(log.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping malformed record"));
}

#[test]
fn test_abort_policy_reports_position_and_field() {
    let log = log_file(WRITER_LOG);
    seqlat()
        .args(["--on-error", "abort"])
        .arg(log.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 4"))
        .stderr(predicate::str::contains("sequence number"));
}

#[test]
fn test_json_output() {
    let log = log_file(WRITER_LOG);
    let output = seqlat()
        .args(["--output", "json"])
        .arg(log.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["durations"].as_array().unwrap().len(), 2);
    assert_eq!(value["jitter"][0]["start_diff_us"], 1000.0);
    assert_eq!(value["summary"]["quality"]["skipped_records"], 1);
}

#[test]
fn test_csv_output() {
    let log = log_file(WRITER_LOG);
    seqlat()
        .args(["--output", "csv"])
        .arg(log.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "sequence_number,start_time,end_time,duration_us",
        ))
        .stdout(predicate::str::contains(",800\n"))
        .stdout(predicate::str::contains("sequence_number,start_time,start_diff_us"));
}

#[test]
fn test_summary_only() {
    let log = log_file(WRITER_LOG);
    seqlat()
        .arg("--summary")
        .arg(log.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Start-End Duration Statistics"))
        .stdout(predicate::str::contains("=== Start-End Durations ===").not());
}

#[test]
fn test_summary_with_csv_rejected() {
    let log = log_file(WRITER_LOG);
    seqlat()
        .args(["--summary", "--output", "csv"])
        .arg(log.path())
        .assert()
        .failure();
}

#[test]
fn test_config_file_sets_policy() {
    let log = log_file(WRITER_LOG);
    let config = log_file("on_error = \"abort\"\n");
    seqlat()
        .arg("--config")
        .arg(config.path())
        .arg(log.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 4"));
}

#[test]
fn test_cli_flag_overrides_config_file() {
    let log = log_file(WRITER_LOG);
    let config = log_file("on_error = \"abort\"\n");
    seqlat()
        .arg("--config")
        .arg(config.path())
        .args(["--on-error", "skip"])
        .arg(log.path())
        .assert()
        .success();
}

#[test]
fn test_missing_log_file() {
    seqlat()
        .arg("/nonexistent/writer.log")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read log file"));
}

#[test]
fn test_debug_flag_emits_tracing() {
    let log = log_file(WRITER_LOG);
    seqlat()
        .arg("--debug")
        .arg(log.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("correlated events"));
}

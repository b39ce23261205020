// babeltrace text output of the w2rp tracepoints
//
//   [13:40:40.123456789] (+0.000012345) host w2rp_trace:tracepoint_writer_int:
//     { cpu_id = 3 }, { string_field = "SAMPLE_START, : ", integer_field = 42 }

use crate::event::RawRecord;
use regex::Regex;
use std::sync::OnceLock;

const RECORD_PATTERN: &str =
    r#"\[(.*?)\] .+\{ string_field = "(.*?)", integer_field = (\d+) \}"#;

fn record_pattern() -> Result<&'static Regex, regex::Error> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(RECORD_PATTERN))
        .as_ref()
        .map_err(Clone::clone)
}

/// Reduce tracepoint string payloads like `"SAMPLE_START, : "` to the kind
fn kind_text(payload: &str) -> String {
    payload
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '_')
        .collect()
}

/// Extract tracepoint records from babeltrace text
///
/// Lines that do not match the tracepoint pattern are not records. Positions
/// are 1-based line numbers.
pub fn parse_lttng(text: &str) -> Result<Vec<RawRecord>, regex::Error> {
    let pattern = record_pattern()?;
    let records = text
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let caps = pattern.captures(line)?;
            Some(RawRecord::new(
                index + 1,
                &caps[1],
                kind_text(&caps[2]),
                Some(caps[3].to_string()),
            ))
        })
        .collect();
    Ok(records)
}

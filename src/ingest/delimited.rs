// Comma-delimited application log: `TIMESTAMP, KIND[, SEQ]`

use crate::event::RawRecord;

/// Parse delimited log text, one record per non-blank line
///
/// Positions are 1-based line numbers, blank lines included. A line without
/// a kind field still yields a record with an empty kind so the parser can
/// report it.
pub fn parse_delimited(text: &str) -> Vec<RawRecord> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_line(index + 1, line))
        .collect()
}

fn parse_line(position: usize, line: &str) -> RawRecord {
    let mut fields = line.splitn(3, ',');
    let timestamp = fields.next().unwrap_or_default().trim();
    let kind = fields.next().unwrap_or_default().trim();
    let sequence_number = fields
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    RawRecord::new(position, timestamp, kind, sequence_number)
}

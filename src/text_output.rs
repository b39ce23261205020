//! Human-readable tables for analysis reports

use crate::analysis::AnalysisReport;
use crate::summary::{DataQuality, DescriptiveStats, LatencySummary};
use std::fmt::Write;

const TIMESTAMP_LAYOUT: &str = "%H:%M:%S%.6f";

/// Render durations and jitter tables followed by the summary
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Start-End Durations ===");
    let _ = writeln!(
        out,
        "{:>10} {:>17} {:>17} {:>14}",
        "seq", "start", "end", "duration_us"
    );
    for d in &report.correlation.durations {
        let _ = writeln!(
            out,
            "{:>10} {:>17} {:>17} {:>14.3}",
            d.sequence_number,
            d.start_time.format(TIMESTAMP_LAYOUT),
            d.end_time.format(TIMESTAMP_LAYOUT),
            d.duration_us
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "=== Start-Start Jitter ===");
    let _ = writeln!(out, "{:>10} {:>17} {:>14}", "seq", "start", "start_diff_us");
    for j in &report.correlation.jitter {
        let _ = writeln!(
            out,
            "{:>10} {:>17} {:>14.3}",
            j.sequence_number,
            j.start_time.format(TIMESTAMP_LAYOUT),
            j.start_diff_us
        );
    }
    let _ = writeln!(out);

    out.push_str(&render_summary(&report.summary));
    out
}

/// Render the statistical summary only
pub fn render_summary(summary: &LatencySummary) -> String {
    let mut out = String::new();
    render_stats(&mut out, "Start-End Duration", summary.durations.as_ref());
    render_stats(&mut out, "Start-Start Jitter", summary.jitter.as_ref());
    render_quality(&mut out, &summary.quality);
    out
}

fn render_stats(out: &mut String, title: &str, stats: Option<&DescriptiveStats>) {
    let _ = writeln!(out, "=== {} Statistics ===", title);
    let Some(stats) = stats else {
        let _ = writeln!(out, "  No samples.");
        let _ = writeln!(out);
        return;
    };
    let _ = writeln!(out, "  Count:        {}", stats.count);
    let _ = writeln!(out, "  Mean:         {:.2} μs", stats.mean);
    let _ = writeln!(out, "  Std Dev:      {:.2} μs", stats.stddev);
    let _ = writeln!(out, "  Min:          {:.2} μs", stats.min);
    let _ = writeln!(out, "  Max:          {:.2} μs", stats.max);
    for (p, value) in &stats.percentiles {
        let label = format!("P{}:", p);
        let _ = writeln!(out, "  {:<13} {:.2} μs", label, value);
    }
    let _ = writeln!(out);
}

fn render_quality(out: &mut String, quality: &DataQuality) {
    let _ = writeln!(out, "=== Data Quality ===");
    let _ = writeln!(out, "  Negative durations:         {}", quality.negative_durations);
    let _ = writeln!(
        out,
        "  Duplicate sequence numbers: {}",
        quality.duplicate_sequence_numbers
    );
    let _ = writeln!(
        out,
        "  Non-monotonic sequence:     {}",
        quality.non_monotonic_sequence_numbers
    );
    let _ = writeln!(out, "  Skipped records:            {}", quality.skipped_records);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::Correlation;

    #[test]
    fn test_render_summary_empty() {
        let summary = LatencySummary::from_correlation(&Correlation::default(), &[50.0]);
        let text = render_summary(&summary);
        assert!(text.contains("Start-End Duration Statistics"));
        assert!(text.contains("No samples."));
        assert!(text.contains("Skipped records:            0"));
    }

    #[test]
    fn test_render_stats_percentile_labels() {
        let stats = DescriptiveStats::from_values(&[100.0, 200.0], &[50.0, 99.5]).unwrap();
        let mut out = String::new();
        render_stats(&mut out, "Test", Some(&stats));
        assert!(out.contains("P50:"));
        assert!(out.contains("P99.5:"));
        assert!(out.contains("Mean:         150.00 μs"));
    }
}

//! Correlation engine throughput benchmark
//!
//! Measures pairing, jitter and summary cost over synthetic multi-hour logs.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench correlation_throughput
//! ```

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seqlat::config::AnalysisConfig;
use seqlat::correlation::CorrelationEngine;
use seqlat::event::Event;
use seqlat::ingest::parse_delimited;
use seqlat::parser::EventParser;
use seqlat::summary::LatencySummary;

fn at_us(us: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, 14)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + TimeDelta::microseconds(us)
}

/// One START/END pair per 33ms frame, ENDs 5-15ms after their START
fn synthetic_events(samples: u64) -> Vec<Event> {
    let mut events = Vec::with_capacity(samples as usize * 2);
    for seq in 0..samples {
        let start = seq as i64 * 33_333;
        events.push(Event::sample_start(0, at_us(start), seq));
        events.push(Event::sample_end(0, at_us(start + 5_000 + (seq % 10) as i64 * 1_000), seq));
    }
    events
}

fn synthetic_log(samples: u64) -> String {
    synthetic_events(samples)
        .iter()
        .map(|e| {
            format!(
                "{}, {}, {}\n",
                e.timestamp.format("%Y-%m-%d %H:%M:%S%.6f"),
                e.kind,
                e.sequence_number.unwrap_or_default()
            )
        })
        .collect()
}

fn bench_correlate(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlate");
    let engine = CorrelationEngine::new();

    for samples in [1_000u64, 10_000, 100_000] {
        let events = synthetic_events(samples);
        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &events, |b, events| {
            b.iter(|| black_box(engine.correlate(black_box(events))));
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let log = synthetic_log(10_000);
    let parser = EventParser::default();

    c.bench_function("parse_delimited_10k_samples", |b| {
        b.iter(|| {
            let records = parse_delimited(black_box(&log));
            black_box(parser.parse_all(&records))
        });
    });
}

fn bench_summary(c: &mut Criterion) {
    let correlation = CorrelationEngine::new().correlate(&synthetic_events(100_000));
    let config = AnalysisConfig::default();

    c.bench_function("summary_100k_samples", |b| {
        b.iter(|| {
            black_box(LatencySummary::from_correlation(
                black_box(&correlation),
                &config.percentiles,
            ))
        });
    });
}

criterion_group!(benches, bench_correlate, bench_parse, bench_summary);
criterion_main!(benches);

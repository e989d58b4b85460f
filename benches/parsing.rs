//! Benchmarks for chatlens parsing, analytics and export.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- parse_transcript`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatlens::Entry;
use chatlens::analytics::{
    Selection, SentimentAnalyzer, StopWords, activity_heatmap, analyze_sentiment, chat_stats,
    conversation_starters, most_common_words, response_times, summary_report,
};
use chatlens::config::ParserConfig;
use chatlens::core::output::{to_csv, to_jsonl};
use chatlens::core::{FilterConfig, OutputConfig, apply_filters};
use chatlens::parser::TranscriptParser;
use chatlens::parsing::{locate, resolve_timestamp};

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_transcript(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let author = ["Alice", "Bob", "Carol"][i % 3];
        let day = (i / 1440) % 28 + 1;
        let hour = (i / 60) % 24;
        let minute = i % 60;
        let body = match i % 10 {
            0 => "<Media omitted>".to_string(),
            1 => format!("see https://example.com/{}", i),
            2 => "great news, love it 🎉".to_string(),
            3 => "Alice added Bob".to_string(),
            _ => format!("message number {} about the meeting", i),
        };
        if i % 10 == 3 {
            lines.push(format!("{}/3/24, {:02}:{:02} - {}", day, hour, minute, body));
        } else {
            lines.push(format!(
                "{}/3/24, {:02}:{:02} - {}: {}",
                day, hour, minute, author, body
            ));
        }
    }
    lines.join("\n")
}

fn generate_entries(count: usize) -> Vec<Entry> {
    TranscriptParser::new()
        .parse_str(&generate_transcript(count))
        .into_entries()
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate_markers");

    for size in [1_000_usize, 10_000, 100_000] {
        let text = generate_transcript(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(locate(black_box(text))).len());
        });
    }
    group.finish();
}

fn bench_resolve_timestamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_timestamp");
    for literal in ["1/2/23, 10:00 - ", "12/31/2023, 11:59\u{202f}PM - ", "31/31/23, 10:00 - "] {
        group.bench_with_input(BenchmarkId::from_parameter(literal.trim()), &literal, |b, l| {
            b.iter(|| black_box(resolve_timestamp(black_box(l))));
        });
    }
    group.finish();
}

fn bench_parse_transcript(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_transcript");
    let sequential = TranscriptParser::with_config(ParserConfig::new().with_parallel(false));
    let parallel = TranscriptParser::with_config(ParserConfig::new().with_parallel(true));

    for size in [1_000_usize, 10_000, 100_000] {
        let text = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("sequential", size), &text, |b, text| {
            b.iter(|| black_box(sequential.parse_str(black_box(text))));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &text, |b, text| {
            b.iter(|| black_box(parallel.parse_str(black_box(text))));
        });
    }
    group.finish();
}

// =============================================================================
// Analytics Benchmarks
// =============================================================================

fn bench_analytics(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics");
    let analyzer = SentimentAnalyzer::new();
    let stop_words = StopWords::from_words(["the", "about"]);

    for size in [1_000_usize, 10_000] {
        let entries = generate_entries(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("chat_stats", size), &entries, |b, e| {
            b.iter(|| black_box(chat_stats(&Selection::Overall, black_box(e))));
        });
        group.bench_with_input(BenchmarkId::new("common_words", size), &entries, |b, e| {
            b.iter(|| black_box(most_common_words(&Selection::Overall, e, &stop_words, 20)));
        });
        group.bench_with_input(BenchmarkId::new("heatmap", size), &entries, |b, e| {
            b.iter(|| black_box(activity_heatmap(&Selection::Overall, e)));
        });
        group.bench_with_input(BenchmarkId::new("sentiment", size), &entries, |b, e| {
            b.iter(|| black_box(analyze_sentiment(&Selection::Overall, e, &analyzer)));
        });
        group.bench_with_input(BenchmarkId::new("turn_taking", size), &entries, |b, e| {
            b.iter(|| {
                let times = response_times(e, 720);
                let starters = conversation_starters(e, 120);
                black_box((times, starters))
            });
        });
    }
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_filter_by_author(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_author");
    let config = FilterConfig::new().with_author("Alice");

    for size in [1_000_usize, 10_000] {
        let entries = generate_entries(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| black_box(apply_filters(black_box(entries.clone()), &config)));
        });
    }
    group.finish();
}

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let config = OutputConfig::new().with_derived();

    for size in [1_000_usize, 10_000] {
        let entries = generate_entries(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("csv", size), &entries, |b, e| {
            b.iter(|| black_box(to_csv(black_box(e), &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("jsonl", size), &entries, |b, e| {
            b.iter(|| black_box(to_jsonl(black_box(e), &config).unwrap()));
        });
    }
    group.finish();
}

// =============================================================================
// End-to-End Pipeline Benchmark
// =============================================================================

fn bench_full_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_report");
    let parser = TranscriptParser::new();
    let analyzer = SentimentAnalyzer::new();
    let stop_words = StopWords::new();

    for size in [1_000_usize, 10_000] {
        let text = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                // parse -> report
                let transcript = parser.parse_str(black_box(text));
                let report =
                    summary_report(&Selection::Overall, &transcript.entries, &analyzer, &stop_words);
                black_box(report)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_locate,
    bench_resolve_timestamp,
    bench_parse_transcript,
    bench_analytics,
    bench_filter_by_author,
    bench_output,
    bench_full_report,
);

criterion_main!(benches);

//! Benchmarks for the logging pipeline
//!
//! Run with: cargo bench -p tinylog-core
//!
//! These benchmarks establish performance baselines for:
//! - Layout formatting
//! - Filtered-out records (the cost of a disabled log call)
//! - Writing through a file sink
//! - Banner generation

use std::io;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::TempDir;
use tinylog_core::sink::{FileSink, WriterSink};
use tinylog_core::title::title;
use tinylog_core::{logf, DefaultLayout, Layout, Level, Logger, Record};

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_layout(c: &mut Criterion) {
    let layout = DefaultLayout::new();
    let record = Record::new(Level::Info, "user 42 logged in from 10.0.0.7");

    c.bench_function("layout_gen_record_msg", |b| {
        b.iter(|| black_box(layout.gen_record_msg(black_box(&record))))
    });
}

fn bench_title(c: &mut Criterion) {
    c.bench_function("title_banner", |b| b.iter(|| black_box(title(black_box("TinyLog")))));
}

// ============================================================================
// Delivery Benchmarks
// ============================================================================

fn bench_delivery(c: &mut Criterion) {
    let mut group = c.benchmark_group("delivery");

    let filtered = std::sync::Arc::new(Logger::with_level("filtered", Level::Error));
    filtered.create_sink(WriterSink::from_writer(io::sink()));
    group.bench_function("filtered_out", |b| {
        b.iter(|| logf!(target: &filtered, Level::Debug, "value {}", black_box(7)))
    });

    let to_sink = std::sync::Arc::new(Logger::new("io-sink"));
    to_sink.create_sink(WriterSink::from_writer(io::sink()));
    group.bench_function("writer_sink", |b| {
        b.iter(|| logf!(target: &to_sink, Level::Info, "value {}", black_box(7)))
    });

    let temp_dir = TempDir::new().unwrap();
    let to_file = std::sync::Arc::new(Logger::new("file"));
    to_file.create_sink(
        FileSink::builder(temp_dir.path().join("bench.log"))
            .max_file_size(1 << 20)
            .build(),
    );
    group.bench_function("rotating_file_sink", |b| {
        b.iter(|| to_file.log(Level::Info, black_box("a typical log line of moderate length")))
    });

    group.finish();
}

criterion_group!(benches, bench_layout, bench_title, bench_delivery);
criterion_main!(benches);

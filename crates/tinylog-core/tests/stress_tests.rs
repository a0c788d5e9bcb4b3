//! Concurrency tests
//!
//! Many threads logging through shared loggers and sinks: per-sink writes
//! must never interleave, and thread ids must be stable and distinct.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

use tempfile::TempDir;
use tinylog_core::layout::Field;
use tinylog_core::record::current_thread_id;
use tinylog_core::sink::{FileSink, Utf8FileSink};
use tinylog_core::{DefaultLayout, Level, Logger, Registry};

const THREADS: usize = 8;
const PER_THREAD: usize = 200;

#[test]
fn test_concurrent_writes_never_interleave() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stress.log");
    let logger = Arc::new(Logger::new("stress"));
    logger.create_sink(
        Utf8FileSink::open(&path)
            .with_layout(DefaultLayout::new().with_fields([Field::ThreadId, Field::Message])),
    );

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    logger.log(Level::Info, format!("worker-{t} seq-{i} {}", "x".repeat(64)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    // Each line is whole, and each worker's lines appear in its own order.
    let mut next_seq: HashMap<String, usize> = HashMap::new();
    for line in lines {
        let parts: Vec<&str> = line.split(' ').collect();
        assert_eq!(parts.len(), 4, "mangled line {line:?}");
        assert_eq!(parts[3].len(), 64);
        let worker = parts[1].to_string();
        let seq: usize = parts[2].trim_start_matches("seq-").parse().unwrap();
        let expected = next_seq.entry(worker).or_insert(0);
        assert_eq!(seq, *expected);
        *expected += 1;
    }
}

#[test]
fn test_thread_ids_stable_and_distinct() {
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let first = current_thread_id();
                for _ in 0..100 {
                    assert_eq!(current_thread_id(), first);
                }
                first
            })
        })
        .collect();

    let ids: HashSet<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ids.len(), THREADS);
    assert!(!ids.contains(&0));
}

#[test]
fn test_concurrent_rotation_keeps_records_whole() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rotate.log");
    let logger = Arc::new(Logger::new("rotate-stress"));
    logger.create_sink(
        FileSink::builder(&path)
            .max_file_size(4096)
            .build()
            .with_layout(DefaultLayout::new().with_fields([Field::Message])),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.log(Level::Warn, format!("t{t}-{i:04}-{}", "y".repeat(40)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let live = fs::read_to_string(&path).unwrap();
    let backup = fs::read_to_string(temp_dir.path().join("rotate.log.bak")).unwrap();
    assert!(live.len() < 4096);
    assert!(backup.len() < 4096);
    for line in live.lines().chain(backup.lines()) {
        assert!(line.ends_with(&"y".repeat(40)), "torn line {line:?}");
    }
}

#[test]
fn test_concurrent_registry_creation_is_unique() {
    let registry = Arc::new(Registry::new());
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                registry.create_logger("contended").is_ok()
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();
    assert_eq!(winners, 1);
}

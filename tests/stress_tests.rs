//! Stress tests for concurrent registry and formatter access
//!
//! These tests verify:
//! - Concurrent first requests for one name construct a single logger
//! - A shared formatter renders correct lines under contention
//! - Concurrent records never interleave within a line
//! - Scoped muting is safe alongside concurrent logging

use eazy_logging::prelude::*;
use eazy_logging::{LoggerIdentity, LoggerRegistry, RecordFormatter};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;

#[test]
fn test_concurrent_get_or_create_yields_one_instance() {
    let registry = Arc::new(LoggerRegistry::new(Arc::new(LoggerConfiguration::new([(
        "hot.LEVEL", "DEBUG",
    )]))));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..200)
                    .map(|i| {
                        let name = format!("hot.Logger{}", i % 10);
                        Arc::as_ptr(&registry.get_or_create(&name)) as usize
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut identities = HashSet::new();
    for handle in handles {
        identities.extend(handle.join().expect("worker panicked"));
    }

    assert_eq!(registry.len(), 10);
    assert_eq!(identities.len(), 10, "each name must map to exactly one instance");
    for name in registry.logger_names() {
        assert_eq!(registry.get(&name).map(|l| l.level()), Some(LogLevel::Debug));
    }
}

#[test]
fn test_shared_formatter_under_contention() {
    let formatter = Arc::new(RecordFormatter::new(
        FormatterConfig::new().with_zone(TimeZoneSpec::Utc),
    ));
    let identity = Arc::new(LoggerIdentity::new("ab.eazy.logging.LogTest", LogLevel::Info, false));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let formatter = Arc::clone(&formatter);
            let identity = Arc::clone(&identity);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..500i64 {
                    // Alternate between two seconds to churn the cache.
                    let millis = 1_581_966_695_563 + (i % 2) * 1000 + t as i64;
                    let line = formatter.render(
                        &identity,
                        &LogEvent::new(LogLevel::Info, "n={}")
                            .with_timestamp(millis)
                            .with_thread("w")
                            .with_arg(i),
                    );
                    let expected_prefix = if i % 2 == 0 {
                        "2020-02-17 19:11:35."
                    } else {
                        "2020-02-17 19:11:36."
                    };
                    assert!(line.starts_with(expected_prefix), "bad line {}", line);
                    assert!(line.ends_with(&format!(":INFO :ael.LogTest:w: n={}", i)));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
}

#[test]
fn test_concurrent_records_stay_whole() {
    let memory = Arc::new(MemoryAppender::new());
    let backend = Arc::new(
        LoggingBackend::builder()
            .configuration(LoggerConfiguration::new([("ROOT.LEVEL", "TRACE")]))
            .shared_appender(memory.clone())
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let backend = Arc::clone(&backend);
            thread::Builder::new()
                .name(format!("writer-{}", t))
                .spawn(move || {
                    let logger = backend.get_logger(&format!("load.Worker{}", t));
                    for i in 0..250 {
                        logger.debug("item {} of worker {}", &[i.into(), t.into()]);
                    }
                })
                .expect("spawn failed")
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let records = memory.take();
    assert_eq!(records.len(), THREADS * 250);
    for record in &records {
        let thread = record
            .split(':')
            .nth(5)
            .expect("thread field present");
        let worker = thread.trim_start_matches("writer-");
        assert!(record.ends_with(&format!(" of worker {}", worker)), "mixed record {}", record);
    }
}

#[test]
fn test_stackless_scope_with_concurrent_logging() {
    let memory = Arc::new(MemoryAppender::new());
    let backend = Arc::new(
        LoggingBackend::builder()
            .shared_appender(memory.clone())
            .build(),
    );
    let logger = backend.get_logger("noisy.Driver");

    let writer = {
        let logger = logger.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                logger.warn("retry", &[ErrorRecord::new("refused").with_frame("net::dial").into()]);
            }
        })
    };

    for _ in 0..50 {
        let _quiet = backend.stackless(&["noisy"]);
    }
    writer.join().expect("writer panicked");

    assert!(!logger.identity().is_hide_stacks());
    for record in memory.take() {
        assert!(
            record.ends_with(" retry: refused") || record.ends_with(" retry\nrefused\n\tat net::dial"),
            "unexpected record {}",
            record
        );
    }
}

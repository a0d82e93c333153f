//! Integration tests for the leveled logger
//!
//! These tests verify:
//! - Template rendering through the public API
//! - Level gating
//! - Color handling on primary and filtered destinations
//! - Destination registration and cancellation
//! - File destinations
//! - Singleton construction
//! - Fatal handling through a callback

use leveled_logger::core::color_filter::strip_colors;
use leveled_logger::prelude::*;
use leveled_logger::{error, info, log, warning};
use std::fs;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

const TIMESTAMP_LEN: usize = "2025/01/08 10:30:45.123456 ".len();

fn plain_logger(level: Severity) -> (Logger, MemorySink) {
    let primary = MemorySink::new();
    let logger = Logger::builder()
        .level(level)
        .color_enabled(false)
        .primary(primary.clone())
        .on_fatal(Arc::new(|_| {}))
        .build();
    (logger, primary)
}

/// Strip the leading timestamp from every line.
fn bodies(text: &str) -> Vec<String> {
    text.lines().map(|line| line[TIMESTAMP_LEN..].to_string()).collect()
}

#[test]
fn test_render_examples() {
    assert_eq!(render("Value: {0}", &[100.into()]), "Value: 100");
    assert_eq!(render("Padded: {0:05}", &[100.into()]), "Padded: 00100");
    assert_eq!(render("Float: {0:.2f}", &[3.14156.into()]), "Float: 3.14");
    assert_eq!(render("Str: {0}", &["example".into()]), "Str: example");
    assert_eq!(render("Missing: {5}", &[1.into(), 2.into()]), "Missing: ");
    assert_eq!(render("Broken: {0", &[1.into()]), "Broken: {0");
}

#[test]
fn test_demo_sequence() {
    let (logger, primary) = plain_logger(Severity::Info);

    info!(logger, "Logging an integer value: {0}\n", 100);
    info!(logger, "Logging a string message: {0}\n", "example string");
    info!(logger, "Logging a hexadecimal value: {0}\n", 0x10A);
    info!(logger, "Logging a number with leading zeros: {0:05}\n", 100);
    warning!(logger, "Logging a float rounded to two decimal places: {0:.2f}\n", 3.14156);
    error!(
        logger,
        "Logging multiple values: {0:.2f}, {1:05}, {2}, {3}\n",
        3.14156,
        100,
        0x10A,
        "example string"
    );

    assert_eq!(
        bodies(&primary.contents_string()),
        vec![
            "[info] Logging an integer value: 100",
            "[info] Logging a string message: example string",
            "[info] Logging a hexadecimal value: 266",
            "[info] Logging a number with leading zeros: 00100",
            "[warning] Logging a float rounded to two decimal places: 3.14",
            "[error] Logging multiple values: 3.14, 00100, 266, example string",
        ]
    );
}

#[test]
fn test_log_levels() {
    let (logger, primary) = plain_logger(Severity::Warning);

    logger.info("Info message\n", &[]);
    logger.warning("Warning message\n", &[]);
    logger.error("Error message\n", &[]);

    let content = primary.contents_string();
    assert!(!content.contains("Info message"));
    assert!(content.contains("Warning message"));
    assert!(content.contains("Error message"));
    assert_eq!(logger.metrics().records_filtered(), 1);
    assert_eq!(logger.metrics().records_logged(), 2);
}

#[test]
fn test_level_change_at_runtime() {
    let (logger, primary) = plain_logger(Severity::Error);
    logger.warning("dropped\n", &[]);
    logger.set_level(Severity::Info);
    logger.info("kept\n", &[]);

    let content = primary.contents_string();
    assert!(!content.contains("dropped"));
    assert!(content.contains("kept"));
}

#[test]
fn test_primary_colored_filtered_plain() {
    let primary = MemorySink::new();
    let logger = Logger::builder()
        .color_enabled(true)
        .primary(primary.clone())
        .build();
    let mirror = MemorySink::new();
    logger.add_writer(mirror.clone());

    log!(logger, Severity::Warning, "disk at {0}%\n", 93);

    let colored = primary.contents();
    let plain = mirror.contents();
    assert!(colored.windows(2).any(|w| w == b"\x1b["));
    assert!(!plain.contains(&0x1b));

    // Same record modulo color
    assert_eq!(&*strip_colors(&colored), plain.as_slice());
    assert!(mirror.contents_string().ends_with("[warning] disk at 93%\n"));
}

#[test]
fn test_filtered_destination_plain_even_with_colored_message() {
    let (logger, _primary) = plain_logger(Severity::Info);
    let mirror = MemorySink::new();
    logger.add_writer(mirror.clone());
    logger.set_color_enabled(true);

    // Color sequences passed in as message text are stripped too.
    logger.info("{0}\n", &["\x1b[31mred\x1b[0m".into()]);
    assert!(mirror.contents_string().ends_with("[info] red\n"));
}

#[test]
fn test_multiple_file_destinations() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file1 = temp_dir.path().join("multi1.log");
    let log_file2 = temp_dir.path().join("multi2.log");

    let (logger, _primary) = plain_logger(Severity::Info);
    logger.add_writer(FileSink::open(&log_file1).expect("Failed to open sink"));
    let second = logger.add_writer(FileSink::open(&log_file2).expect("Failed to open sink"));

    logger.info("to both\n", &[]);
    assert!(logger.cancel_writer(second));
    logger.info("to first only\n", &[]);
    logger.flush().expect("Failed to flush");

    let content1 = fs::read_to_string(&log_file1).expect("Failed to read log file");
    let content2 = fs::read_to_string(&log_file2).expect("Failed to read log file");
    assert_eq!(content1.lines().count(), 2);
    assert_eq!(bodies(&content2), vec!["[info] to both"]);
}

#[test]
fn test_add_writer_twice_duplicates_output() {
    let (logger, _primary) = plain_logger(Severity::Info);
    let mirror = MemorySink::new();
    let first = logger.add_writer(mirror.clone());
    let second = logger.add_writer(mirror.clone());
    assert_eq!(logger.writer_count(), 3);

    logger.info("dup\n", &[]);
    assert_eq!(mirror.contents_string().lines().count(), 2);

    // Cancelling one registration leaves the other in place.
    assert!(logger.cancel_writer(first));
    mirror.clear();
    logger.info("single\n", &[]);
    assert_eq!(mirror.contents_string().lines().count(), 1);
    assert!(logger.is_writer_registered(second));
}

#[test]
fn test_cancel_primary() {
    let (logger, primary) = plain_logger(Severity::Info);
    let mirror = MemorySink::new();
    logger.add_writer(mirror.clone());

    assert!(logger.cancel_writer(SinkId::PRIMARY));
    logger.info("mirror only\n", &[]);
    assert!(primary.is_empty());
    assert!(mirror.contents_string().contains("mirror only"));
}

#[test]
fn test_singleton_cell() {
    let cell = LoggerCell::new();
    let first_primary = MemorySink::new();
    let first = cell.get_or_init(Severity::Info, false, first_primary.clone());
    let second = cell.get_or_init(Severity::Fatal, true, MemorySink::new());

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.level(), Some(Severity::Info));
    assert!(!second.color_enabled());

    let mirror = MemorySink::new();
    first.add_writer(mirror.clone());
    assert_eq!(second.writer_count(), 2);
}

#[test]
fn test_global_logger_first_call_wins() {
    let first = Logger::new(Severity::Error, false, MemorySink::new());
    let second = Logger::new(Severity::Info, true, MemorySink::new());

    assert!(Arc::ptr_eq(&first, &second));
    let global = Logger::global().expect("global logger initialized");
    assert!(Arc::ptr_eq(&first, &global));
    assert_eq!(global.level(), Some(Severity::Error));
}

#[test]
fn test_fatal_callback_receives_exit_code() {
    let seen = Arc::new(AtomicI32::new(-1));
    let seen_clone = Arc::clone(&seen);
    let primary = MemorySink::new();
    let logger = Logger::builder()
        .primary(primary.clone())
        .color_enabled(false)
        .fatal_exit_code(70)
        .on_fatal(Arc::new(move |code| seen_clone.store(code, Ordering::SeqCst)))
        .build();

    logger.fatal("unrecoverable: {0}\n", &["disk full".into()]);

    assert_eq!(seen.load(Ordering::SeqCst), 70);
    assert!(logger.is_terminated());
    assert_eq!(bodies(&primary.contents_string()), vec!["[fatal] unrecoverable: disk full"]);
}

#[test]
fn test_fatal_below_threshold_impossible() {
    let (logger, primary) = plain_logger(Severity::Fatal);
    logger.error("filtered\n", &[]);
    assert!(primary.is_empty());
    assert!(!logger.is_terminated());
}

#[test]
fn test_builder_from_config() {
    let config = LoggerConfig::from_json(
        r#"{"level":"error","color":false,"exit_code":4,"timestamp":"Iso8601Micros"}"#,
    )
    .expect("valid config");
    let primary = MemorySink::new();
    let logger = LoggerBuilder::from_config(&config)
        .primary(primary.clone())
        .build();

    assert_eq!(logger.level(), Some(Severity::Error));
    assert!(!logger.color_enabled());

    logger.error("configured\n", &[]);
    let line = primary.contents_string();
    assert!(line.contains('T'));
    assert!(line.ends_with(" [error] configured\n"));
}

#[test]
fn test_write_errors_do_not_propagate() {
    struct Closed;
    impl std::io::Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let (logger, primary) = plain_logger(Severity::Info);
    logger.add_writer(Closed);
    for i in 0..3 {
        logger.info("message {0}\n", &[i.into()]);
    }

    assert_eq!(logger.metrics().write_failures(), 3);
    assert_eq!(primary.contents_string().lines().count(), 3);
}

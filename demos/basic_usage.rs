//! Basic logger usage example
//!
//! Creates the process-wide logger on stdout with colors, mirrors every
//! record into a plain-text file and issues a few formatted records.
//!
//! Run with: cargo run --example basic_usage

use leveled_logger::prelude::*;
use leveled_logger::{error, info, warning};

fn main() -> Result<()> {
    let console = Logger::new(Severity::Info, true, ConsoleSink::stdout());

    let log_path = std::env::temp_dir().join("leveled_logger_demo.log");
    let file = console.add_writer(FileSink::open(&log_path)?);

    info!(console, "Logging an integer value: {0}\n", 100);
    info!(console, "Logging a string message: {0}\n", "example string");
    info!(console, "Logging a hexadecimal value: {0}\n", 0x10A);
    info!(console, "Logging a number with leading zeros: {0:05}\n", 100);
    warning!(console, "Logging a float rounded to two decimal places: {0:.2f}\n", 3.14156);
    error!(
        console,
        "Logging multiple values: {0:.2f}, {1:05}, {2}, {3}\n",
        3.14156,
        100,
        0x10A,
        "example string"
    );

    assert!(console.cancel_writer(file), "file sink was registered");
    info!(console, "Plain copy written to {0}\n", log_path.display().to_string());

    Ok(())
}

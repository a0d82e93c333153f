//! # Leveled Logger
//!
//! A small leveled logger: messages are built from `{index}` /
//! `{index:spec}` templates, tagged with a microsecond timestamp and a
//! severity label, and written to every registered destination.
//!
//! ## Features
//!
//! - **Positional interpolation**: `{0:05}`, `{1:.2f}`, `{2}`; malformed
//!   placeholders degrade to text instead of failing
//! - **Colored tags**: on the primary sink only; other sinks get plain text
//! - **Dynamic destinations**: add and cancel sinks at runtime
//! - **Thread Safe**: one reader/writer lock guards level, color flag and sinks
//!
//! ```
//! use leveled_logger::prelude::*;
//!
//! let capture = MemorySink::new();
//! let logger = Logger::builder().primary(capture.clone()).color_enabled(false).build();
//! leveled_logger::info!(logger, "Padded: {0:05}\n", 100);
//! assert!(capture.contents_string().ends_with("[info] Padded: 00100\n"));
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        render, FatalCallback, Logger, LoggerBuilder, LoggerCell, LoggerConfig, LoggerError,
        LoggerMetrics, Result, Severity, SinkId, TimestampFormat, Value,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
}

pub use crate::core::{
    render, strip_colors, ColorFilterWriter, FatalCallback, Logger, LoggerBuilder, LoggerCell,
    LoggerConfig, LoggerError, LoggerMetrics, Result, Severity, Sink, SinkId, TimestampFormat,
    Value, DEFAULT_FATAL_EXIT_CODE,
};
pub use sinks::{ConsoleSink, ConsoleTarget, FileSink, MemorySink};

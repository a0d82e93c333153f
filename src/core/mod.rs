//! Core logger types

pub mod cell;
pub mod color_filter;
pub mod config;
pub mod error;
pub mod format;
pub mod logger;
pub mod metrics;
pub mod severity;
pub mod tag;
pub mod timestamp;
pub mod value;

pub use cell::LoggerCell;
pub use color_filter::{strip_colors, ColorFilterWriter};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use format::render;
pub use logger::{
    FatalCallback, Logger, LoggerBuilder, Sink, SinkId, DEFAULT_FATAL_EXIT_CODE,
};
pub use metrics::LoggerMetrics;
pub use severity::Severity;
pub use timestamp::TimestampFormat;
pub use value::Value;

//! Timestamp formatting for record tags
//!
//! Every record starts with a timestamp in microsecond precision. The
//! default layout is fixed and locale-independent:
//! `2025/01/08 10:30:45.123456 ` (trailing space included).

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout used in the record tag
///
/// # Examples
///
/// ```
/// use leveled_logger::core::TimestampFormat;
///
/// let format = TimestampFormat::default();
/// let text = format.now();
/// assert!(text.ends_with(' '));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025/01/08 10:30:45.123456 `
    #[default]
    Classic,

    /// ISO 8601 with microseconds and offset: `2025-01-08T10:30:45.123456+00:00 `
    Iso8601Micros,

    /// Custom strftime format; no separator is appended.
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Classic => datetime.format("%Y/%m/%d %H:%M:%S%.6f ").to_string(),
            TimestampFormat::Iso8601Micros => {
                datetime.format("%Y-%m-%dT%H:%M:%S%.6f%:z ").to_string()
            }
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Format the current local time.
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }
}

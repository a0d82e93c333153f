//! Logging macros that convert their arguments into [`Value`](crate::Value)s.
//!
//! Templates use the logger's own `{index[:spec]}` syntax, not `format!`
//! syntax; each trailing argument becomes one positional value.
//!
//! # Examples
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::{info, warning};
//!
//! let capture = MemorySink::new();
//! let logger = Logger::builder().primary(capture.clone()).color_enabled(false).build();
//!
//! info!(logger, "Server started\n");
//! warning!(logger, "Retry {0} of {1}\n", 3, 5);
//! assert!(capture.contents_string().contains("[warning] Retry 3 of 5"));
//! ```

/// Log a message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder().primary(MemorySink::new()).build();
/// use leveled_logger::log;
/// log!(logger, Severity::Info, "Simple message\n");
/// log!(logger, Severity::Error, "Error code: {0}, ratio {1:.1f}\n", 500, 0.25);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, $template, &[$($crate::Value::from($arg)),*])
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder().primary(MemorySink::new()).build();
/// use leveled_logger::error;
/// error!(logger, "Failed to connect to {0}:{1}\n", "db.internal", 5432);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a fatal-level message. Terminates the process unless the logger was
/// built with an `on_fatal` callback.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}

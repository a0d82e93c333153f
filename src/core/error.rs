//! Error types for the logger system
//!
//! The logging path itself never fails: malformed templates degrade to
//! literal text and sink write failures are only counted. These errors
//! surface from configuration, level parsing and opening sinks.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown severity name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel(name.into())
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

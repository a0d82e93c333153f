//! Loadable logger configuration
//!
//! A `LoggerConfig` can come from JSON or from the environment and is
//! turned into a logger with [`LoggerBuilder::from_config`](super::LoggerBuilder::from_config).
//!
//! | Variable              | Meaning                              |
//! |-----------------------|--------------------------------------|
//! | `LOG_LEVEL`           | `info`, `warning`, `error`, `fatal`  |
//! | `LOG_COLOR`           | `true/false`, `1/0`, `yes/no`, `on/off` |
//! | `LOG_FATAL_EXIT_CODE` | integer exit code for fatal records  |

use super::error::{LoggerError, Result};
use super::logger::DEFAULT_FATAL_EXIT_CODE;
use super::severity::Severity;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

pub const ENV_LEVEL: &str = "LOG_LEVEL";
pub const ENV_COLOR: &str = "LOG_COLOR";
pub const ENV_FATAL_EXIT_CODE: &str = "LOG_FATAL_EXIT_CODE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: Severity,
    pub color: bool,
    pub exit_code: i32,
    pub timestamp: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Severity::Info,
            color: true,
            exit_code: DEFAULT_FATAL_EXIT_CODE,
            timestamp: TimestampFormat::default(),
        }
    }
}

impl LoggerConfig {
    /// Parse a JSON document; missing keys keep their defaults.
    ///
    /// ```
    /// use leveled_logger::{LoggerConfig, Severity};
    ///
    /// let config = LoggerConfig::from_json(r#"{"level":"warning","color":false}"#).unwrap();
    /// assert_eq!(config.level, Severity::Warning);
    /// assert!(!config.color);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(ENV_LEVEL) {
            config.level = level.parse()?;
        }
        if let Some(color) = lookup(ENV_COLOR) {
            config.color = parse_bool(&color)
                .ok_or_else(|| LoggerError::config(ENV_COLOR, format!("not a boolean: '{color}'")))?;
        }
        if let Some(code) = lookup(ENV_FATAL_EXIT_CODE) {
            config.exit_code = code.trim().parse().map_err(|_| {
                LoggerError::config(ENV_FATAL_EXIT_CODE, format!("not an integer: '{code}'"))
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, Severity::Info);
        assert!(config.color);
        assert_eq!(config.exit_code, 0);
        assert_eq!(config.timestamp, TimestampFormat::Classic);
    }

    #[test]
    fn test_from_json_partial() {
        let config = LoggerConfig::from_json(r#"{"exit_code": 1}"#).unwrap();
        assert_eq!(config.exit_code, 1);
        assert_eq!(config.level, Severity::Info);
    }

    #[test]
    fn test_from_json_rejects_unknown_level() {
        let err = LoggerConfig::from_json(r#"{"level": "verbose"}"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_from_lookup() {
        let config = LoggerConfig::from_lookup(lookup_from(&[
            (ENV_LEVEL, "ERROR"),
            (ENV_COLOR, "off"),
            (ENV_FATAL_EXIT_CODE, " 2 "),
        ]))
        .unwrap();

        assert_eq!(config.level, Severity::Error);
        assert!(!config.color);
        assert_eq!(config.exit_code, 2);
    }

    #[test]
    fn test_from_lookup_errors() {
        let err = LoggerConfig::from_lookup(lookup_from(&[(ENV_LEVEL, "loud")])).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(_)));

        let err = LoggerConfig::from_lookup(lookup_from(&[(ENV_COLOR, "maybe")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration for LOG_COLOR: not a boolean: 'maybe'"
        );

        let err =
            LoggerConfig::from_lookup(lookup_from(&[(ENV_FATAL_EXIT_CODE, "x")])).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}

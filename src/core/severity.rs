//! Severity level definitions

use super::error::LoggerError;
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info = 0,
    Warning = 1,
    Error = 2,
    Fatal = 3,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    #[inline]
    pub const fn rank(self) -> i32 {
        self as i32
    }

    pub const fn from_rank(rank: i32) -> Option<Self> {
        match rank {
            0 => Some(Severity::Info),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            3 => Some(Severity::Fatal),
            _ => None,
        }
    }

    /// Out-of-range ranks are logged as `Info` rather than rejected.
    pub const fn from_rank_or_info(rank: i32) -> Self {
        match Self::from_rank(rank) {
            Some(level) => level,
            None => Severity::Info,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Bracketed tag written after the timestamp, trailing space included.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "[info] ",
            Severity::Warning => "[warning] ",
            Severity::Error => "[error] ",
            Severity::Fatal => "[fatal] ",
        }
    }

    pub fn timestamp_color(&self) -> Color {
        match self {
            Severity::Info => Color::TrueColor { r: 82, g: 116, b: 67 },
            Severity::Warning => Color::TrueColor { r: 205, g: 192, b: 0 },
            Severity::Error | Severity::Fatal => Color::TrueColor { r: 188, g: 19, b: 26 },
        }
    }

    pub fn label_color(&self) -> Color {
        match self {
            Severity::Info => Color::TrueColor { r: 169, g: 193, b: 157 },
            Severity::Warning => Color::TrueColor { r: 254, g: 242, b: 120 },
            Severity::Error | Severity::Fatal => Color::TrueColor { r: 246, g: 126, b: 115 },
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        *self == Severity::Fatal
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

//! Log severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::XlogError;
use crate::palette::contains;

/// Ordered severity used to filter payloads at a sink.
///
/// The declaration order is the severity order: `Debug < Info < Warn < Error < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Fine-grained diagnostic output
    Debug,
    /// Normal operational messages
    Info,
    /// Something unexpected that does not stop the process
    #[serde(alias = "warning")]
    Warn,
    /// A failed operation
    Error,
    /// The process cannot continue
    Fatal,
}

/// Order in which [`LogLevel::detect`] looks for level tokens.
const DETECT_ORDER: [LogLevel; 5] = [
    LogLevel::Warn,
    LogLevel::Error,
    LogLevel::Fatal,
    LogLevel::Debug,
    LogLevel::Info,
];

impl LogLevel {
    /// All levels, lowest severity first.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Upper-case token as it appears inside log lines (e.g. `"WARN"`).
    pub fn token(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Find the level tag embedded in a raw line.
    ///
    /// Tokens are tried in the same order the stdout sink colorizes them
    /// (WARN, ERROR, FATAL, DEBUG), with INFO last. Returns `None` when the
    /// line carries no tag.
    pub fn detect(payload: &[u8]) -> Option<LogLevel> {
        DETECT_ORDER
            .into_iter()
            .find(|level| contains(payload, level.token().as_bytes()))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for LogLevel {
    type Err = XlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(XlogError::InvalidLevel(s.to_string())),
        }
    }
}

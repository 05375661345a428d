use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Severity levels, ordered from most verbose to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Finer,
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Map a raw numeric level onto a severity. Anything past the known range
    /// is treated as `Error`.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Severity::Finer,
            1 => Severity::Debug,
            2 => Severity::Info,
            3 => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Bracketed label as written into log lines, padded to a fixed width.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Finer => "[FINER] ",
            Severity::Debug => "[DEBUG] ",
            Severity::Info => "[INFO]  ",
            Severity::Warning => "[WARN]  ",
            Severity::Error => "[ERROR] ",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().trim_end())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Severity::Finer,
            log::Level::Debug => Severity::Debug,
            log::Level::Info => Severity::Info,
            log::Level::Warn => Severity::Warning,
            log::Level::Error => Severity::Error,
        }
    }
}

/// Errors raised while building or driving a sink
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Cannot open file at {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("Cannot re-open file at {}: {source}", path.display())]
    Reopen { path: PathBuf, source: io::Error },
    #[error("Cannot write to file at {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown logging backend type {0:?}")]
    UnknownBackend(String),
}

impl LogError {
    /// True for every failure that originates in the operating system.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            LogError::Open { .. } | LogError::Reopen { .. } | LogError::Write { .. } | LogError::Io(_)
        )
    }
}

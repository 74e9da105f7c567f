//! Store configuration

use crate::error::{HistoryError, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Days of history kept after every write
pub const DEFAULT_RETENTION_DAYS: u32 = 90;
/// Longest window a single query may ask for
pub const DEFAULT_MAX_QUERY_DAYS: u32 = 30;
/// Default busy timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// `SQLite` journal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    /// Write-ahead log; lets other processes read the file during a write
    #[default]
    Wal,
    /// Rollback journal
    Delete,
}

impl JournalMode {
    /// Returns the `SQLite` pragma value
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// Configuration for the history store.
///
/// Only `path` is required when deserializing; every other field falls back
/// to its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Path to the `SQLite` database file
    pub path: PathBuf,
    /// Observations older than this many days are evicted on write
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Upper bound applied to the `days` argument of queries
    #[serde(default = "default_max_query_days")]
    pub max_query_days: u32,
    /// Busy timeout in milliseconds
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode
    #[serde(default)]
    pub journal_mode: JournalMode,
}

const fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

const fn default_max_query_days() -> u32 {
    DEFAULT_MAX_QUERY_DAYS
}

const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("cache/history.db")
    }
}

impl StoreConfig {
    /// Defaults for a database at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            retention_days: DEFAULT_RETENTION_DAYS,
            max_query_days: DEFAULT_MAX_QUERY_DAYS,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: JournalMode::default(),
        }
    }

    /// Parse a JSON document and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| HistoryError::InvalidParameter(format!("store config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configured limits
    pub fn validate(&self) -> Result<()> {
        if self.retention_days == 0 {
            return Err(HistoryError::InvalidParameter(
                "retention_days must be at least 1".to_string(),
            ));
        }
        if self.max_query_days == 0 {
            return Err(HistoryError::InvalidParameter(
                "max_query_days must be at least 1".to_string(),
            ));
        }
        if self.max_query_days > self.retention_days {
            return Err(HistoryError::InvalidParameter(format!(
                "max_query_days ({}) exceeds retention_days ({})",
                self.max_query_days, self.retention_days
            )));
        }
        if self.path.is_dir() {
            return Err(HistoryError::InvalidParameter(
                "store path must be a file, not a directory".to_string(),
            ));
        }
        Ok(())
    }
}

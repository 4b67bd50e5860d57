//! Process configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve database path and logging settings for FFI/CLI entry points.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Resolution never fails; every setting has a default.

use crate::logging::{default_log_level, init_logging};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CLINIC_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CLINIC_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CLINIC_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "clinic.sqlite3";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicConfig {
    /// SQLite database file backing all record stores.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl ClinicConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Starts file logging with the configured level and directory.
    ///
    /// Returns `Ok(false)` without touching the logger when no log directory
    /// is configured.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = self.log_dir.as_deref() else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("{LOG_DIR_ENV} is not valid UTF-8: `{}`", log_dir.display()))?;
        init_logging(&self.log_level, log_dir).map(|()| true)
    }
}

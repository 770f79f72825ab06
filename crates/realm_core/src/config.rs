//! Core runtime configuration.
//!
//! # Responsibility
//! - Describe where logs and the SQLite database live for one app instance.
//! - Normalize and validate log levels and directories before use.
//!
//! # Invariants
//! - All configured paths are absolute.
//! - Log levels are one of `trace|debug|info|warn|error`.
//! - The core never reads environment variables; callers supply every value.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_DIR_NAME: &str = "logs";
const DB_FILE_NAME: &str = "realm.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedLevel(String),
    EmptyPath,
    RelativePath(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyPath => write!(f, "path cannot be empty"),
            Self::RelativePath(path) => {
                write!(f, "path must be absolute, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: &'static str,
    log_dir: PathBuf,
}

impl LoggingConfig {
    pub fn new(level: &str, log_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: absolute_path(log_dir.as_ref())?,
        })
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Paths and levels for one application data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub logging: LoggingConfig,
    pub db_path: PathBuf,
}

impl CoreConfig {
    /// Lays out `logs/` and the database file under `app_dir`.
    pub fn for_app_dir(app_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let app_dir = absolute_path(app_dir.as_ref())?;
        Ok(Self {
            logging: LoggingConfig::new(default_log_level(), app_dir.join(LOG_DIR_NAME))?,
            db_path: app_dir.join(DB_FILE_NAME),
        })
    }

    pub fn with_log_level(mut self, level: &str) -> Result<Self, ConfigError> {
        self.logging.level = normalize_level(level)?;
        Ok(self)
    }
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, ConfigError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(ConfigError::UnsupportedLevel(other.to_string())),
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyPath);
    }
    if !path.is_absolute() {
        return Err(ConfigError::RelativePath(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

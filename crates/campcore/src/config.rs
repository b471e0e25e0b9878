//! Runtime configuration read from the environment.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "CAMPCORE_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "CAMPCORE_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "CAMPCORE_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "campcore.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, message } => write!(f, "invalid `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings shared by executables built on the core crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    /// Normalized level name accepted by `logging::init_logging`.
    pub log_level: &'static str,
    /// `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = read(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(value) => normalize_level(&value).map_err(|message| ConfigError::InvalidValue {
                key: LOG_LEVEL_VAR,
                message,
            })?,
            None => default_log_level(),
        };

        let log_dir = read(LOG_DIR_VAR)
            .map(|value| normalize_log_dir(&value))
            .transpose()
            .map_err(|message| ConfigError::InvalidValue {
                key: LOG_DIR_VAR,
                message,
            })?;

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

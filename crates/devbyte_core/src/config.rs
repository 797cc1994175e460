//! Environment-driven configuration for hosts embedding the core.
//!
//! # Invariants
//! - Unset variables fall back to documented defaults.
//! - Set but unparsable variables are errors, never silently defaulted.

use crate::logging::default_log_level;
use crate::network::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_PLAYLIST_URL: &str = "DEVBYTE_PLAYLIST_URL";
pub const ENV_DB_PATH: &str = "DEVBYTE_DB_PATH";
pub const ENV_FETCH_TIMEOUT_MS: &str = "DEVBYTE_FETCH_TIMEOUT_MS";
pub const ENV_USER_AGENT: &str = "DEVBYTE_USER_AGENT";
pub const ENV_LOG_LEVEL: &str = "DEVBYTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "DEVBYTE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "devbyte_videos.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    Empty(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative integer, got `{value}`")
            }
            Self::Empty(key) => write!(f, "{key} is set but empty"),
        }
    }
}

impl Error for ConfigError {}

/// Runtime settings for the video data layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Base URL; the playlist document is `{playlist_base_url}/devbytes.json`.
    pub playlist_base_url: String,
    pub db_path: PathBuf,
    pub fetch_timeout_ms: u64,
    pub user_agent: String,
    pub log_level: String,
    /// File logging is skipped when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            playlist_base_url: DEFAULT_BASE_URL.to_string(),
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            fetch_timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let text = |key: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                None => Ok(None),
                Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(key)),
                Some(value) => Ok(Some(value.trim().to_string())),
            }
        };

        let fetch_timeout_ms = match text(ENV_FETCH_TIMEOUT_MS)? {
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: ENV_FETCH_TIMEOUT_MS,
                    value,
                })?,
            None => defaults.fetch_timeout_ms,
        };

        Ok(Self {
            playlist_base_url: text(ENV_PLAYLIST_URL)?.unwrap_or(defaults.playlist_base_url),
            db_path: text(ENV_DB_PATH)?.map_or(defaults.db_path, PathBuf::from),
            fetch_timeout_ms,
            user_agent: text(ENV_USER_AGENT)?.unwrap_or(defaults.user_agent),
            log_level: text(ENV_LOG_LEVEL)?.unwrap_or(defaults.log_level),
            log_dir: text(ENV_LOG_DIR)?.map(PathBuf::from),
        })
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

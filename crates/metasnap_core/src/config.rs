//! Snapshot runtime configuration.
//!
//! # Keys
//! - `METASNAP_LOG_LEVEL`: `trace|debug|info|warn|error`, default from
//!   [`default_log_level`].
//! - `METASNAP_LOG_DIR`: absolute directory for rolling logs; unset keeps
//!   file logging off.
//! - `METASNAP_PROPERTY_PREFIX`: prefix for the configuration-properties
//!   view, default `dubbo.`.

use crate::env::{Environment, MapEnvironment};
use crate::logging::{default_log_level, normalize_level, normalize_log_dir, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const LOG_LEVEL_KEY: &str = "METASNAP_LOG_LEVEL";
pub const LOG_DIR_KEY: &str = "METASNAP_LOG_DIR";
pub const PROPERTY_PREFIX_KEY: &str = "METASNAP_PROPERTY_PREFIX";
pub const DEFAULT_PROPERTY_PREFIX: &str = "dubbo.";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, source: LoggingError },
    EmptyPropertyPrefix,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, source } => write!(f, "invalid `{key}`: {source}"),
            Self::EmptyPropertyPrefix => {
                write!(f, "`{PROPERTY_PREFIX_KEY}` must not be empty")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidValue { source, .. } => Some(source),
            Self::EmptyPropertyPrefix => None,
        }
    }
}

/// Resolved snapshot settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotConfig {
    /// Normalized log level.
    pub log_level: &'static str,
    /// Rolling log directory, when file logging is wanted.
    pub log_dir: Option<PathBuf>,
    /// Prefix selecting the configuration properties to expose.
    pub property_prefix: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            property_prefix: DEFAULT_PROPERTY_PREFIX.to_string(),
        }
    }
}

impl SnapshotConfig {
    /// Reads settings from `environment`, applying defaults for unset keys.
    ///
    /// Blank values count as unset.
    pub fn from_environment(environment: &dyn Environment) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(level) = non_blank(environment, LOG_LEVEL_KEY) {
            config.log_level = normalize_level(&level).map_err(|source| {
                ConfigError::InvalidValue {
                    key: LOG_LEVEL_KEY,
                    source,
                }
            })?;
        }

        if let Some(dir) = non_blank(environment, LOG_DIR_KEY) {
            config.log_dir = Some(normalize_log_dir(&dir).map_err(|source| {
                ConfigError::InvalidValue {
                    key: LOG_DIR_KEY,
                    source,
                }
            })?);
        }

        if let Some(raw) = environment.get_property(PROPERTY_PREFIX_KEY) {
            let prefix = raw.trim();
            if prefix.is_empty() {
                return Err(ConfigError::EmptyPropertyPrefix);
            }
            config.property_prefix = prefix.to_string();
        }

        Ok(config)
    }

    /// Reads settings from the process environment.
    pub fn from_process_env() -> Result<Self, ConfigError> {
        Self::from_environment(&MapEnvironment::from_process_env())
    }
}

fn non_blank(environment: &dyn Environment, key: &str) -> Option<String> {
    environment
        .get_property(key)
        .filter(|value| !value.trim().is_empty())
}

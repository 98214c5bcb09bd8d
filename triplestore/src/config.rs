//! Store configuration module.
//!
//! This module provides configuration loading for the triple store from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `TRIPLESTORE_DATA_DIRECTORY`: Directory holding the store file (default: `./data`)
//! - `TRIPLESTORE_SEQUENCE_BANDWIDTH`: IDs reserved per sequence lease (default: `10`)
//! - `TRIPLESTORE_MAX_WRITE_RETRIES`: Extra attempts for a conflicting write (default: `3`)
//! - `TRIPLESTORE_RETRY_BASE_DELAY_MS`: Initial retry backoff in milliseconds (default: `5`)
//!
//! # Invariants
//!
//! - `data_directory` is always a valid path (may not exist yet)
//! - `sequence_bandwidth` is always at least 1

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::DEFAULT_SEQUENCE_BANDWIDTH;

const DATA_DIRECTORY_VAR: &str = "TRIPLESTORE_DATA_DIRECTORY";
const SEQUENCE_BANDWIDTH_VAR: &str = "TRIPLESTORE_SEQUENCE_BANDWIDTH";
const MAX_WRITE_RETRIES_VAR: &str = "TRIPLESTORE_MAX_WRITE_RETRIES";
const RETRY_BASE_DELAY_VAR: &str = "TRIPLESTORE_RETRY_BASE_DELAY_MS";

/// Store configuration.
///
/// # Post-conditions
///
/// When constructed via `from_env()`:
/// - `sequence_bandwidth` is at least 1
/// - `data_directory` is a valid path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the store.
    /// The redb file is at `{data_directory}/triples.redb`.
    pub data_directory: PathBuf,
    /// Number of IDs reserved each time the sequence lease is advanced.
    pub sequence_bandwidth: u64,
    /// Extra attempts made when a write hits a conflict.
    pub max_write_retries: u32,
    /// Backoff before the first retry. Doubles with each retry.
    pub retry_base_delay: Duration,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from(Self::DEFAULT_DATA_DIRECTORY),
            sequence_bandwidth: DEFAULT_SEQUENCE_BANDWIDTH,
            max_write_retries: Self::DEFAULT_MAX_WRITE_RETRIES,
            retry_base_delay: Duration::from_millis(Self::DEFAULT_RETRY_BASE_DELAY_MS),
        }
    }
}

impl StoreConfig {
    /// Default data directory.
    pub const DEFAULT_DATA_DIRECTORY: &'static str = "./data";
    /// Default number of retries after a write conflict.
    pub const DEFAULT_MAX_WRITE_RETRIES: u32 = 3;
    /// Default initial retry backoff.
    pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 5;
    /// Name of the store file inside the data directory.
    pub const DATABASE_FILE_NAME: &'static str = "triples.redb";

    /// Default configuration rooted at `data_directory`.
    #[must_use]
    pub fn with_data_directory(data_directory: impl Into<PathBuf>) -> Self {
        Self {
            data_directory: data_directory.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but does not parse, or
    /// if `TRIPLESTORE_SEQUENCE_BANDWIDTH` is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable source.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_directory = lookup(DATA_DIRECTORY_VAR)
            .map_or_else(|| PathBuf::from(Self::DEFAULT_DATA_DIRECTORY), PathBuf::from);

        let sequence_bandwidth =
            parse_var(&lookup, SEQUENCE_BANDWIDTH_VAR)?.unwrap_or(DEFAULT_SEQUENCE_BANDWIDTH);
        if sequence_bandwidth == 0 {
            return Err(ConfigError::InvalidValue {
                name: SEQUENCE_BANDWIDTH_VAR.to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let max_write_retries =
            parse_var(&lookup, MAX_WRITE_RETRIES_VAR)?.unwrap_or(Self::DEFAULT_MAX_WRITE_RETRIES);
        let retry_base_delay = Duration::from_millis(
            parse_var(&lookup, RETRY_BASE_DELAY_VAR)?.unwrap_or(Self::DEFAULT_RETRY_BASE_DELAY_MS),
        );

        Ok(Self {
            data_directory,
            sequence_bandwidth,
            max_write_retries,
            retry_base_delay,
        })
    }

    /// Path of the redb file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_directory.join(Self::DATABASE_FILE_NAME)
    }
}

/// Parse an optional numeric variable.
///
/// # Errors
///
/// Returns an error if the value is set but is not a non-negative integer.
fn parse_var<F, N>(lookup: &F, name: &str) -> Result<Option<N>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    N: std::str::FromStr,
{
    lookup(name)
        .map(|value| {
            value.trim().parse::<N>().map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                message: format!("'{value}' is not a valid non-negative integer"),
            })
        })
        .transpose()
}

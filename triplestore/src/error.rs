//! Crate-wide error type.

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::types::ValueError;

/// Errors returned by store operations.
#[derive(Debug)]
pub enum Error {
    /// A value could not be encoded to, or decoded from, its canonical form.
    Encoding(ValueError),
    /// A dictionary lookup found nothing.
    NotFound(String),
    /// The engine aborted a write because of a concurrent conflict.
    WriteConflict,
    /// A stored record could not be interpreted.
    CorruptRecord(String),
    /// Any other engine failure.
    Engine(EngineError),
    /// A lookup pattern had fewer than two bound positions.
    UnderconstrainedPattern { bound: usize },
    /// The shared ID counter ran past the range of direct IDs.
    IdSpaceExhausted,
    /// Invalid configuration.
    Config(ConfigError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encoding(e) => write!(f, "encoding error: {e}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::WriteConflict => write!(f, "write conflict"),
            Self::CorruptRecord(msg) => write!(f, "corrupt record: {msg}"),
            Self::Engine(e) => write!(f, "engine error: {e}"),
            Self::UnderconstrainedPattern { bound } => write!(
                f,
                "pattern binds {bound} of 3 positions; lookups need at least 2 (use a triple scan instead)"
            ),
            Self::IdSpaceExhausted => write!(f, "surrogate ID space exhausted"),
            Self::Config(e) => write!(f, "configuration error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValueError> for Error {
    fn from(e: ValueError) -> Self {
        Self::Encoding(e)
    }
}

impl From<EngineError> for Error {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Conflict => Self::WriteConflict,
            other => Self::Engine(other),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl Error {
    /// Whether retrying the whole transaction may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::WriteConflict)
    }
}

//! Error types for the windfield core.

use thiserror::Error;

/// Errors produced by track loading, configuration, and grid operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A configuration value failed fail-fast validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A track had fewer than two observations.
    #[error("track too short: {0} observation(s), need at least 2")]
    TrackTooShort(usize),

    /// Observation times were not strictly increasing.
    #[error("track times not strictly increasing at observation {index}")]
    NonMonotonicTrack { index: usize },

    /// An observation field carried the -999 missing sentinel.
    #[error("missing value for '{field}' at observation {index}")]
    MissingValue { field: &'static str, index: usize },

    /// A storm name was not found in the loaded file.
    #[error("storm not found: {0}")]
    StormNotFound(String),

    /// A model name was not recognized.
    #[error("unknown model: {0} (expected one of: holland, nws23)")]
    UnknownModel(String),

    /// An I/O failure while reading a track file or writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),

    /// A storm file could not be parsed as JSON.
    #[error("malformed storm file: {0}")]
    MalformedStormFile(String),
}

impl From<std::io::Error> for ModelError {
    fn from(e: std::io::Error) -> Self {
        ModelError::Io(e.to_string())
    }
}

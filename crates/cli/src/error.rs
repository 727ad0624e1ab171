//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: model error (bad config, unknown model, malformed storm data)
//! - 11: I/O error (track file read, snapshot write)
//! - 12: input error (bad JSON params, bad flag combination)
//! - 13: serialization error

use std::fmt;
use windfield_core::error::ModelError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A model-level error (bad config, unknown model, malformed storm data).
    Model(ModelError),
    /// An I/O error (track file read, snapshot write).
    Io(String),
    /// A user input error (bad JSON params, bad flag combination).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Model(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Model(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<ModelError> for CliError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Io(msg) => CliError::Io(msg),
            other => CliError::Model(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::client::ClientError;

/// Errors that can occur during configuration loading, validation and
/// client assembly.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Timeout string could not be parsed as seconds.
    #[error("failed to parse timeout '{value}': {source}")]
    TimeoutParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Neither a server URL nor a model path is configured.
    #[error(
        "no scoring mode configured: set CROSSRANK_SERVER_URL for online scoring \
         or CROSSRANK_MODEL_PATH for local scoring"
    )]
    ModeUnconfigured,

    /// Assembling the client from this configuration failed.
    #[error("client construction failed: {0}")]
    Construction(#[from] ClientError),
}

//! Media layer error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from probing or encoding media files.
#[derive(Error, Debug)]
pub enum MediaError {
    /// The file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The tool ran but the resource could not be probed.
    #[error("Failed to probe '{path}': {message}")]
    ProbeFailed { path: PathBuf, message: String },

    /// An external command exited with a failure status.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The tool could not be spawned at all.
    #[error("Failed to run {tool}: {source}")]
    SpawnFailed {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// Tool output was not the JSON we expected.
    #[error("Failed to parse tool output: {0}")]
    Json(#[from] serde_json::Error),
}

impl MediaError {
    pub fn probe_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ProbeFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }
}

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

//! Error types for the assembly pipeline.
//!
//! Errors carry context that chains through layers:
//! Run -> Step -> Operation -> Detail
//!
//! The step-level taxonomy is deliberately small: input validation,
//! media probing, clip compatibility, and the final encode. Nothing is
//! swallowed; each step fails fast and the run aborts.

use std::io;

use thiserror::Error;

/// Top-level pipeline error with run context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed during execution.
    #[error("Run '{run_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        run_name: String,
        step_name: String,
        #[source]
        source: AssemblyError,
    },

    /// Pipeline was cancelled.
    #[error("Run '{run_name}' was cancelled")]
    Cancelled { run_name: String },

    /// Failed to set up the run (logger, directories).
    #[error("Run '{run_name}' setup failed: {message}")]
    SetupFailed { run_name: String, message: String },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(
        run_name: impl Into<String>,
        step_name: impl Into<String>,
        source: AssemblyError,
    ) -> Self {
        Self::StepFailed {
            run_name: run_name.into(),
            step_name: step_name.into(),
            source,
        }
    }

    /// Create a cancelled error.
    pub fn cancelled(run_name: impl Into<String>) -> Self {
        Self::Cancelled {
            run_name: run_name.into(),
        }
    }

    /// Create a setup failed error.
    pub fn setup_failed(run_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            run_name: run_name.into(),
            message: message.into(),
        }
    }
}

/// Error from an assembly step.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// Input validation failed (empty script, empty clip list, bad
    /// parameters). Raised before any media resource is touched.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// A media resource could not be probed (unreadable, corrupt, or no
    /// determinable duration).
    #[error("Failed to probe '{path}': {message}")]
    Probe { path: String, message: String },

    /// Clip stream parameters are incompatible for concatenation.
    #[error("Cannot concatenate clips: {0}")]
    Concatenation(String),

    /// The encode/mux invocation failed.
    #[error("ffmpeg failed with exit code {exit_code}: {message}")]
    Muxing { exit_code: i32, message: String },

    /// File I/O error around the external tools.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// A precondition from an earlier step was not met.
    #[error("Precondition not met: {0}")]
    PreconditionFailed(String),
}

impl AssemblyError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a probe error.
    pub fn probe(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Probe {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a concatenation error.
    pub fn concatenation(message: impl Into<String>) -> Self {
        Self::Concatenation(message.into())
    }

    /// Create a muxing error.
    pub fn muxing(exit_code: i32, message: impl Into<String>) -> Self {
        Self::Muxing {
            exit_code,
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a precondition failed error.
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }
}

/// Result type for step operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

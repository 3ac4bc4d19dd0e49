//! Caption error types.

/// Errors from caption timing estimation.
#[derive(Debug, thiserror::Error)]
pub enum CaptionError {
    /// The script contained no words after cleanup.
    #[error("Script contains no words; cannot estimate caption timing")]
    EmptyScript,

    /// The audio duration was not a positive finite number.
    #[error("Audio duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    /// Block size of zero would loop forever.
    #[error("Caption block size must be at least 1")]
    InvalidBlockSize,
}

/// Errors from SRT parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Invalid or malformed time format.
    #[error("Invalid time format at line {line}: '{value}'")]
    InvalidTime { line: usize, value: String },

    /// A block had no timing line at all.
    #[error("Missing timing line in block starting at line {line}")]
    MissingTiming { line: usize },
}

impl ParseError {
    pub fn invalid_time(line: usize, value: impl Into<String>) -> Self {
        Self::InvalidTime {
            line,
            value: value.into(),
        }
    }
}

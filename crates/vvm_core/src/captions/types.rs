//! Core caption types.
//!
//! Timing is stored as `f64` seconds; conversion to integer milliseconds
//! happens only at SRT write time.

use serde::{Deserialize, Serialize};

/// One timed caption block.
///
/// Blocks produced by the estimator are contiguous and non-overlapping:
/// block `i`'s end equals block `i + 1`'s start, and the first block
/// starts at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionBlock {
    /// 1-based sequence number.
    pub index: usize,
    /// Start offset in seconds.
    pub start_secs: f64,
    /// End offset in seconds.
    pub end_secs: f64,
    /// Caption text (a run of consecutive script words).
    pub text: String,
}

impl CaptionBlock {
    pub fn new(index: usize, start_secs: f64, end_secs: f64, text: impl Into<String>) -> Self {
        Self {
            index,
            start_secs,
            end_secs,
            text: text.into(),
        }
    }

    /// Start offset in milliseconds.
    pub fn start_ms(&self) -> f64 {
        self.start_secs * 1000.0
    }

    /// End offset in milliseconds.
    pub fn end_ms(&self) -> f64 {
        self.end_secs * 1000.0
    }

    /// Block duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

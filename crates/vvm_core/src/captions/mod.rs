//! Caption timing estimation and SRT encoding.
//!
//! The voiceover is synthesized without word-level timestamps, so caption
//! timing is estimated from a uniform words-per-second rate over the
//! measured audio duration. Blocks are encoded to SubRip and burned into
//! the final video by the mux step.

pub mod error;
pub mod parser;
pub mod timing;
pub mod types;
pub mod writer;

pub use error::{CaptionError, ParseError};
pub use parser::parse_srt;
pub use timing::estimate_captions;
pub use types::CaptionBlock;
pub use writer::{encode_srt, format_srt_time};

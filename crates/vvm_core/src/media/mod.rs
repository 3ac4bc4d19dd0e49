//! ffprobe/ffmpeg wrappers.
//!
//! All interaction with media files goes through external tools: ffprobe
//! for stream inspection and ffmpeg for the single assembly encode. The
//! command lines are built by pure functions so they can be tested
//! without the tools installed.

pub mod error;
pub mod mux;
pub mod probe;

pub use error::{MediaError, MediaResult};
pub use mux::{run_ffmpeg, FfmpegArgsBuilder};
pub use probe::{probe_duration, probe_video_params, VideoParams};

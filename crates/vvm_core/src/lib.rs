//! VVM Core - Backend logic for Viral Video Maker
//!
//! This crate contains the final assembly stage of the content pipeline:
//! caption timing estimation, SRT encoding, and ffmpeg-based muxing.
//! It has zero UI dependencies and can be driven by the CLI or embedded.
//!
//! The upstream generative stages (topic discovery, script generation,
//! voice synthesis, clip generation) are modeled as collaborator traits
//! in [`pipeline::driver`]; this crate never talks to their APIs itself.

pub mod captions;
pub mod config;
pub mod logging;
pub mod media;
pub mod models;
pub mod pipeline;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}

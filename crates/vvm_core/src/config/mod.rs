//! Configuration: TOML-backed settings with atomic save.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{CaptionSettings, EncoderSettings, PathSettings, Settings};

//! Settings struct with TOML-based sections.
//!
//! Settings carry every path and knob the assembly stage needs, scoped
//! per invocation. Nothing in the core falls back to fixed well-known
//! filenames; callers wanting history supply distinct output paths.

use serde::{Deserialize, Serialize};

use crate::captions::timing::DEFAULT_BLOCK_SIZE;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Encoder settings for the final mux.
    #[serde(default)]
    pub encoder: EncoderSettings,

    /// Caption timing and styling.
    #[serde(default)]
    pub captions: CaptionSettings,
}

/// Path configuration for output, scratch, and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Final output video file.
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Per-run scratch directory (subtitle track, temp output).
    #[serde(default = "default_work_dir")]
    pub work_dir: String,

    /// Folder for run log files.
    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,
}

fn default_output_file() -> String {
    "final_video.mp4".to_string()
}

fn default_work_dir() -> String {
    ".vvm_work".to_string()
}

fn default_logs_dir() -> String {
    ".vvm_logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
            work_dir: default_work_dir(),
            logs_dir: default_logs_dir(),
        }
    }
}

/// Target codecs and quality for the assembled video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderSettings {
    /// Video codec (H.264-class by default).
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Audio codec (AAC-class by default).
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// x264 preset.
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Constant rate factor.
    #[serde(default = "default_crf")]
    pub crf: u32,
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_preset() -> String {
    "medium".to_string()
}

fn default_crf() -> u32 {
    23
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            preset: default_preset(),
            crf: default_crf(),
        }
    }
}

/// Caption block sizing and burn-in style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSettings {
    /// Words per caption block.
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// libass force_style string applied at burn-in.
    #[serde(default = "default_force_style")]
    pub force_style: String,
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

fn default_force_style() -> String {
    "Fontsize=24,Outline=2,Shadow=0".to_string()
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            force_style: default_force_style(),
        }
    }
}

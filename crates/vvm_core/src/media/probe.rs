//! File probing using ffprobe.
//!
//! Duration comes from the container (`-show_format`); stream parameters
//! come from the first video stream (`-show_streams`). Both go through
//! ffprobe's JSON output.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

use super::error::{MediaError, MediaResult};

/// Stream parameters relevant to concatenation compatibility.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoParams {
    pub width: u32,
    pub height: u32,
    /// Frames per second, parsed from ffprobe's rational form.
    pub fps: f64,
}

impl VideoParams {
    /// Whether two clips can be fed to the concat filter without
    /// reconciliation. Frame rates are compared with a small tolerance
    /// to absorb rational-vs-decimal representations of the same rate.
    pub fn is_compatible_with(&self, other: &VideoParams) -> bool {
        self.width == other.width
            && self.height == other.height
            && (self.fps - other.fps).abs() < 0.01
    }
}

impl std::fmt::Display for VideoParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} @ {:.3} fps", self.width, self.height, self.fps)
    }
}

/// Get the duration of a media file in seconds.
///
/// Fails if the file is missing, unreadable, or carries no positive
/// duration in its container metadata.
pub fn probe_duration(path: &Path) -> MediaResult<f64> {
    let json = run_ffprobe(path, &["-show_format"])?;

    let duration = json
        .get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| MediaError::probe_failed(path, "no determinable duration"))?;

    if !duration.is_finite() || duration <= 0.0 {
        return Err(MediaError::probe_failed(
            path,
            format!("non-positive duration {duration}"),
        ));
    }

    tracing::debug!(path = %path.display(), duration_secs = duration, "probed duration");
    Ok(duration)
}

/// Get the first video stream's parameters.
pub fn probe_video_params(path: &Path) -> MediaResult<VideoParams> {
    let json = run_ffprobe(path, &["-show_streams", "-select_streams", "v:0"])?;

    let stream = json
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|s| s.first())
        .ok_or_else(|| MediaError::probe_failed(path, "no video stream"))?;

    let width = stream
        .get("width")
        .and_then(|w| w.as_u64())
        .ok_or_else(|| MediaError::probe_failed(path, "video stream has no width"))?;
    let height = stream
        .get("height")
        .and_then(|h| h.as_u64())
        .ok_or_else(|| MediaError::probe_failed(path, "video stream has no height"))?;

    let fps = stream
        .get("r_frame_rate")
        .and_then(|r| r.as_str())
        .and_then(parse_frame_rate)
        .ok_or_else(|| MediaError::probe_failed(path, "video stream has no frame rate"))?;

    Ok(VideoParams {
        width: width as u32,
        height: height as u32,
        fps,
    })
}

/// Run ffprobe with JSON output and the given selector args.
fn run_ffprobe(path: &Path, selector: &[&str]) -> MediaResult<Value> {
    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    let output = Command::new("ffprobe")
        .args(["-v", "error", "-of", "json"])
        .args(selector)
        .arg(path)
        .output()
        .map_err(|e| MediaError::SpawnFailed {
            tool: "ffprobe".to_string(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(MediaError::command_failed(
            "ffprobe",
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }

    Ok(serde_json::from_slice(&output.stdout)?)
}

/// Parse a frame rate string like "24000/1001" into a float.
fn parse_frame_rate(rate: &str) -> Option<f64> {
    let parts: Vec<&str> = rate.split('/').collect();
    if parts.len() == 2 {
        let num: f64 = parts[0].parse().ok()?;
        let den: f64 = parts[1].parse().ok()?;
        if den != 0.0 {
            return Some(num / den);
        }
    }
    rate.parse().ok()
}

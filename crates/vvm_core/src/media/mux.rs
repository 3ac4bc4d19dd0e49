//! ffmpeg command builder and runner for final assembly.
//!
//! One ffmpeg invocation does the whole job: concatenate the clips,
//! extend the tail frame if the video runs short, burn in the subtitle
//! track, attach the voiceover, and pin the output duration to the audio
//! duration.
//!
//! The builder produces argument tokens only; it never touches the
//! filesystem, so command construction is fully testable.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::EncoderSettings;

use super::error::{MediaError, MediaResult};

/// Builder for the assembly ffmpeg command line.
pub struct FfmpegArgsBuilder<'a> {
    clips: &'a [PathBuf],
    audio: &'a Path,
    subtitles: &'a Path,
    duration_secs: f64,
    encoder: &'a EncoderSettings,
    force_style: &'a str,
    output: &'a Path,
}

impl<'a> FfmpegArgsBuilder<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        clips: &'a [PathBuf],
        audio: &'a Path,
        subtitles: &'a Path,
        duration_secs: f64,
        encoder: &'a EncoderSettings,
        force_style: &'a str,
        output: &'a Path,
    ) -> Self {
        Self {
            clips,
            audio,
            subtitles,
            duration_secs,
            encoder,
            force_style,
            output,
        }
    }

    /// Build the complete ffmpeg argument tokens (without the program
    /// name itself).
    pub fn build(&self) -> Vec<String> {
        let mut tokens: Vec<String> = vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-y".into(),
        ];

        // Clip inputs first, voiceover last; the filter graph and the
        // audio map below rely on this ordering.
        for clip in self.clips {
            tokens.push("-i".into());
            tokens.push(clip.to_string_lossy().into_owned());
        }
        tokens.push("-i".into());
        tokens.push(self.audio.to_string_lossy().into_owned());

        tokens.push("-filter_complex".into());
        tokens.push(self.filter_graph());

        tokens.push("-map".into());
        tokens.push("[vout]".into());
        tokens.push("-map".into());
        tokens.push(format!("{}:a:0", self.clips.len()));

        tokens.push("-c:v".into());
        tokens.push(self.encoder.video_codec.clone());
        tokens.push("-preset".into());
        tokens.push(self.encoder.preset.clone());
        tokens.push("-crf".into());
        tokens.push(self.encoder.crf.to_string());
        tokens.push("-c:a".into());
        tokens.push(self.encoder.audio_codec.clone());

        // Total duration equals the voiceover duration: longer video is
        // trimmed here, shorter video was already padded by tpad.
        tokens.push("-t".into());
        tokens.push(format!("{:.3}", self.duration_secs));

        tokens.push(self.output.to_string_lossy().into_owned());

        tokens
    }

    /// Build the filter graph: concat -> freeze-frame pad -> burn-in.
    fn filter_graph(&self) -> String {
        let inputs: String = (0..self.clips.len()).map(|i| format!("[{i}:v]")).collect();

        format!(
            "{inputs}concat=n={n}:v=1:a=0[cat];\
             [cat]tpad=stop=-1:stop_mode=clone[padded];\
             [padded]subtitles=filename='{srt}':force_style='{style}'[vout]",
            n = self.clips.len(),
            srt = escape_filter_path(&self.subtitles.to_string_lossy()),
            style = self.force_style,
        )
    }
}

/// Escape a path for embedding in a single-quoted filter argument.
///
/// Backslashes, colons, and quotes all have meaning inside filter
/// strings (Windows drive letters are the usual offender).
fn escape_filter_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if matches!(c, '\\' | ':' | '\'') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Run ffmpeg with the given arguments.
///
/// Returns captured stderr on success (ffmpeg writes its progress there)
/// so callers can log it; maps a non-zero exit to a typed failure
/// carrying the diagnostic output.
pub fn run_ffmpeg(args: &[String]) -> MediaResult<String> {
    tracing::debug!(command = %format!("ffmpeg {}", args.join(" ")), "running ffmpeg");

    let output = Command::new("ffmpeg")
        .args(args)
        .output()
        .map_err(|e| MediaError::SpawnFailed {
            tool: "ffmpeg".to_string(),
            source: e,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        return Err(MediaError::command_failed(
            "ffmpeg",
            output.status.code().unwrap_or(-1),
            stderr,
        ));
    }

    Ok(stderr)
}

//! Mux step: concatenate clips, burn in captions, attach the voiceover.
//!
//! Clip compatibility is checked up front: the concat filter cannot
//! reconcile mismatched resolutions or frame rates, and the mismatch is
//! surfaced as a typed failure instead of a cryptic ffmpeg error.
//!
//! ffmpeg writes to a staging path inside the work directory; the final
//! output path is only written by the rename on full success, so a
//! failed run never leaves a truncated artifact there.

use std::fs;
use std::io;
use std::path::Path;

use crate::media::{self, FfmpegArgsBuilder, MediaError};
use crate::pipeline::errors::{AssemblyError, AssemblyResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, MuxOutput, RunState};

use super::probe::map_probe_error;

/// Runs the single ffmpeg invocation that produces the assembled video.
pub struct MuxStep;

impl PipelineStep for MuxStep {
    fn name(&self) -> &str {
        "Mux"
    }

    fn validate_input(&self, ctx: &Context) -> AssemblyResult<()> {
        if ctx.inputs.clips.is_empty() {
            return Err(AssemblyError::invalid_input("no video clips supplied"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> AssemblyResult<()> {
        let duration = state
            .audio_duration_secs()
            .ok_or_else(|| AssemblyError::precondition_failed("audio duration not probed"))?;
        let srt_path = state
            .srt_path()
            .ok_or_else(|| AssemblyError::precondition_failed("subtitle track not written"))?
            .to_path_buf();

        check_clip_compatibility(ctx)?;

        fs::create_dir_all(&ctx.work_dir)
            .map_err(|e| AssemblyError::io("create work directory", e))?;
        if let Some(parent) = ctx.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| AssemblyError::io("create output directory", e))?;
            }
        }

        let staging = ctx.staging_path();
        let args = FfmpegArgsBuilder::new(
            &ctx.inputs.clips,
            &ctx.inputs.audio,
            &srt_path,
            duration,
            &ctx.settings.encoder,
            &ctx.settings.captions.force_style,
            &staging,
        )
        .build();

        let command = format!("ffmpeg {}", args.join(" "));
        ctx.logger.command(&command);

        match media::run_ffmpeg(&args) {
            Ok(stderr) => {
                for line in stderr.lines() {
                    ctx.logger.output_line(line);
                }
            }
            Err(e) => {
                // Remove whatever partial file ffmpeg left in staging.
                let _ = fs::remove_file(&staging);
                return Err(map_mux_error(ctx, e));
            }
        }

        move_into_place(&staging, &ctx.output_path)
            .map_err(|e| AssemblyError::io("move output into place", e))?;

        ctx.logger.info(&format!(
            "Assembled video written to {}",
            ctx.output_path.display()
        ));

        state.mux = Some(MuxOutput {
            output_path: ctx.output_path.clone(),
            command,
        });
        Ok(())
    }

    fn validate_output(&self, ctx: &Context, state: &RunState) -> AssemblyResult<()> {
        let Some(output) = &state.mux else {
            return Err(AssemblyError::precondition_failed("mux output not recorded"));
        };
        if !output.output_path.exists() {
            return Err(AssemblyError::io(
                "verify assembled video",
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    output.output_path.display().to_string(),
                ),
            ));
        }
        if ctx.staging_path().exists() {
            return Err(AssemblyError::precondition_failed(
                "staging file left behind after rename",
            ));
        }
        Ok(())
    }
}

/// Move the finished encode from staging to the final output path.
///
/// The work dir and the output path may sit on different filesystems,
/// where rename fails with EXDEV; fall back to copy-then-remove.
fn move_into_place(staging: &Path, output: &Path) -> io::Result<()> {
    if fs::rename(staging, output).is_ok() {
        return Ok(());
    }
    copy_then_remove(staging, output)
}

fn copy_then_remove(staging: &Path, output: &Path) -> io::Result<()> {
    fs::copy(staging, output)?;
    fs::remove_file(staging)
}

/// Probe every clip and reject mismatched stream parameters.
fn check_clip_compatibility(ctx: &Context) -> AssemblyResult<()> {
    let mut reference: Option<(usize, media::VideoParams)> = None;

    for (i, clip) in ctx.inputs.clips.iter().enumerate() {
        let params = media::probe_video_params(clip).map_err(|e| map_probe_error(clip, e))?;

        match &reference {
            None => reference = Some((i, params)),
            Some((ref_idx, ref_params)) => {
                if !ref_params.is_compatible_with(&params) {
                    return Err(AssemblyError::concatenation(format!(
                        "clip {} is {} but clip {} is {}",
                        ref_idx + 1,
                        ref_params,
                        i + 1,
                        params
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Map an ffmpeg failure into the muxing taxonomy, replaying the
/// diagnostic tail into the run log.
fn map_mux_error(ctx: &Context, err: MediaError) -> AssemblyError {
    match err {
        MediaError::CommandFailed {
            exit_code, message, ..
        } => {
            for line in message.lines() {
                ctx.logger.output_line(line);
            }
            ctx.logger.show_tail("ffmpeg");

            // Keep only the tail of ffmpeg's stderr in the error itself.
            let tail: Vec<&str> = message.lines().rev().take(5).collect();
            let tail: Vec<&str> = tail.into_iter().rev().collect();
            AssemblyError::muxing(exit_code, tail.join("\n"))
        }
        MediaError::SpawnFailed { tool, source } => {
            AssemblyError::muxing(-1, format!("{tool} unavailable: {source}"))
        }
        other => AssemblyError::muxing(-1, other.to_string()),
    }
}

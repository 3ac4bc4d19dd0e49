//! Captions step: estimate block timing and write the scratch SRT.

use std::fs;

use crate::captions::{self, CaptionError};
use crate::pipeline::errors::{AssemblyError, AssemblyResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{CaptionsOutput, Context, RunState};

/// Derives caption timing from the script and the measured duration,
/// then encodes the subtitle track for the mux step to burn in.
pub struct CaptionsStep;

impl PipelineStep for CaptionsStep {
    fn name(&self) -> &str {
        "Captions"
    }

    fn validate_input(&self, ctx: &Context) -> AssemblyResult<()> {
        if ctx.inputs.script.is_empty() {
            return Err(AssemblyError::invalid_input(
                "script contains no words after cleanup",
            ));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> AssemblyResult<()> {
        let duration = state
            .audio_duration_secs()
            .ok_or_else(|| AssemblyError::precondition_failed("audio duration not probed"))?;

        let blocks = captions::estimate_captions(
            &ctx.inputs.script,
            duration,
            ctx.settings.captions.block_size,
        )
        .map_err(map_caption_error)?;

        fs::create_dir_all(&ctx.work_dir)
            .map_err(|e| AssemblyError::io("create work directory", e))?;

        let srt_path = ctx.srt_path();
        captions::writer::write_srt_file(&blocks, &srt_path)
            .map_err(|e| AssemblyError::io("write subtitle track", e))?;

        ctx.logger.info(&format!(
            "Wrote {} caption blocks to {}",
            blocks.len(),
            srt_path.display()
        ));

        state.captions = Some(CaptionsOutput {
            srt_path,
            block_count: blocks.len(),
        });
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> AssemblyResult<()> {
        let Some(output) = &state.captions else {
            return Err(AssemblyError::precondition_failed(
                "captions output not recorded",
            ));
        };
        if !output.srt_path.exists() {
            return Err(AssemblyError::io(
                "verify subtitle track",
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    output.srt_path.display().to_string(),
                ),
            ));
        }
        Ok(())
    }
}

fn map_caption_error(err: CaptionError) -> AssemblyError {
    // All caption estimation failures are bad inputs to the run.
    AssemblyError::invalid_input(err.to_string())
}

//! Probe step: validate inputs and measure the voiceover duration.
//!
//! Input validation lives here so that structurally bad input (empty
//! clip list, empty script) fails before any media resource is touched.

use crate::media::{self, MediaError};
use crate::pipeline::errors::{AssemblyError, AssemblyResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, ProbeOutput, RunState};

/// Measures the audio duration that fixes the output length.
pub struct ProbeStep;

impl PipelineStep for ProbeStep {
    fn name(&self) -> &str {
        "Probe"
    }

    fn validate_input(&self, ctx: &Context) -> AssemblyResult<()> {
        if ctx.inputs.clips.is_empty() {
            return Err(AssemblyError::invalid_input("no video clips supplied"));
        }
        if ctx.inputs.script.is_empty() {
            return Err(AssemblyError::invalid_input(
                "script contains no words after cleanup",
            ));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> AssemblyResult<()> {
        let audio = &ctx.inputs.audio;
        let duration = media::probe_duration(audio).map_err(|e| map_probe_error(audio, e))?;

        ctx.logger.info(&format!(
            "Voiceover duration: {:.3}s ({} clips, {} words)",
            duration,
            ctx.inputs.clips.len(),
            ctx.inputs.script.word_count()
        ));

        state.probe = Some(ProbeOutput {
            audio_duration_secs: duration,
        });
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> AssemblyResult<()> {
        match state.audio_duration_secs() {
            Some(d) if d > 0.0 => Ok(()),
            Some(d) => Err(AssemblyError::probe(
                "voiceover",
                format!("non-positive duration {d}"),
            )),
            None => Err(AssemblyError::precondition_failed(
                "probe output not recorded",
            )),
        }
    }
}

/// Map a media-layer failure on `path` into the probe taxonomy.
pub(super) fn map_probe_error(path: &std::path::Path, err: MediaError) -> AssemblyError {
    match err {
        MediaError::FileNotFound(p) => {
            AssemblyError::probe(p.to_string_lossy(), "file not found")
        }
        MediaError::ProbeFailed { path, message } => {
            AssemblyError::probe(path.to_string_lossy(), message)
        }
        MediaError::CommandFailed {
            exit_code, message, ..
        } => AssemblyError::probe(
            path.to_string_lossy(),
            format!("ffprobe exited with code {exit_code}: {message}"),
        ),
        MediaError::SpawnFailed { tool, source } => {
            AssemblyError::probe(path.to_string_lossy(), format!("{tool} unavailable: {source}"))
        }
        MediaError::Json(e) => {
            AssemblyError::probe(path.to_string_lossy(), format!("unparseable probe output: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::logging::{LogConfig, RunLogger};
    use crate::models::{AssemblyInputs, Script};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn context(clips: Vec<PathBuf>, script: Script, dir: &std::path::Path) -> Context {
        let logger =
            RunLogger::new("probe_test", dir.join("logs"), LogConfig::default(), None).unwrap();
        Context::new(
            AssemblyInputs::new(clips, dir.join("voiceover.mp3"), script),
            Settings::default(),
            "probe_test",
            dir.join("work"),
            dir.join("final_video.mp4"),
            Arc::new(logger),
        )
    }

    #[test]
    fn empty_clip_list_fails_validation_before_probing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(vec![], Script::from_words(["hello"]), dir.path());

        let err = ProbeStep.validate_input(&ctx).unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidInput(_)));
    }

    #[test]
    fn empty_script_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(
            vec![PathBuf::from("clip.mp4")],
            Script::from_narration("[music only]"),
            dir.path(),
        );

        let err = ProbeStep.validate_input(&ctx).unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidInput(_)));
    }

    #[test]
    fn missing_audio_fails_as_probe_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(
            vec![PathBuf::from("clip.mp4")],
            Script::from_words(["hello"]),
            dir.path(),
        );
        let mut state = RunState::new("probe_test");

        // Audio path does not exist in the temp dir.
        let err = ProbeStep.execute(&ctx, &mut state).unwrap_err();
        assert!(matches!(err, AssemblyError::Probe { .. }));

        // Nothing downstream was produced.
        assert!(!state.has_probe());
        assert!(!ctx.srt_path().exists());
        assert!(!ctx.output_path.exists());
    }
}

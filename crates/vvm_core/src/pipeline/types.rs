//! Core types for the assembly pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::logging::RunLogger;
use crate::models::AssemblyInputs;

/// Progress callback type for reporting pipeline progress.
///
/// Arguments: (step_name, percent_complete, message)
pub type ProgressCallback = Box<dyn Fn(&str, u32, &str) + Send + Sync>;

/// Read-only context passed to pipeline steps.
///
/// Contains the assembly inputs and shared resources that steps can read
/// but not modify. Mutable state goes in [`RunState`].
pub struct Context {
    /// Assembly inputs (clips, audio, script).
    pub inputs: AssemblyInputs,
    /// Application settings.
    pub settings: Settings,
    /// Run name/identifier.
    pub run_name: String,
    /// Per-run scratch directory (subtitle track, temp output).
    pub work_dir: PathBuf,
    /// Final output path; written only on full success.
    pub output_path: PathBuf,
    /// Per-run logger.
    pub logger: Arc<RunLogger>,
    /// Optional progress callback.
    progress_callback: Option<ProgressCallback>,
}

impl Context {
    /// Create a new context for an assembly run.
    pub fn new(
        inputs: AssemblyInputs,
        settings: Settings,
        run_name: impl Into<String>,
        work_dir: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        logger: Arc<RunLogger>,
    ) -> Self {
        Self {
            inputs,
            settings,
            run_name: run_name.into(),
            work_dir: work_dir.into(),
            output_path: output_path.into(),
            logger,
            progress_callback: None,
        }
    }

    /// Set the progress callback.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Report progress to callback (if set).
    pub fn report_progress(&self, step_name: &str, percent: u32, message: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback(step_name, percent, message);
        }
    }

    /// Path of the scratch subtitle track for this run.
    pub fn srt_path(&self) -> PathBuf {
        self.work_dir.join("captions.srt")
    }

    /// Path ffmpeg writes to before the final rename.
    pub fn staging_path(&self) -> PathBuf {
        let file_name = self
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output.mp4".to_string());
        self.work_dir.join(format!("{file_name}.part"))
    }
}

/// Mutable run state that accumulates results from pipeline steps.
///
/// This is the write-once manifest: steps add their own section and do
/// not overwrite earlier ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    /// Unique run identifier.
    pub run_id: String,
    /// When the run started.
    pub started_at: Option<String>,
    /// Probe results (from Probe step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeOutput>,
    /// Caption results (from Captions step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captions: Option<CaptionsOutput>,
    /// Mux results (from Mux step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mux: Option<MuxOutput>,
}

impl RunState {
    /// Create a new run state with the given ID.
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// Check if the probe step has completed.
    pub fn has_probe(&self) -> bool {
        self.probe.is_some()
    }

    /// The measured audio duration (if the probe step completed).
    pub fn audio_duration_secs(&self) -> Option<f64> {
        self.probe.as_ref().map(|p| p.audio_duration_secs)
    }

    /// The scratch subtitle track (if the captions step completed).
    pub fn srt_path(&self) -> Option<&Path> {
        self.captions.as_ref().map(|c| c.srt_path.as_path())
    }
}

/// Output from the Probe step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutput {
    /// Measured voiceover duration in seconds. Fixes the output duration.
    pub audio_duration_secs: f64,
}

/// Output from the Captions step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionsOutput {
    /// Path to the scratch SRT file.
    pub srt_path: PathBuf,
    /// Number of caption blocks written.
    pub block_count: usize,
}

/// Output from the Mux step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuxOutput {
    /// Path to the final assembled video.
    pub output_path: PathBuf,
    /// ffmpeg command that was run.
    pub command: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_state_tracks_completion() {
        let mut state = RunState::new("assembly_test");
        assert!(!state.has_probe());
        assert!(state.audio_duration_secs().is_none());

        state.probe = Some(ProbeOutput {
            audio_duration_secs: 30.5,
        });

        assert!(state.has_probe());
        assert!((state.audio_duration_secs().unwrap() - 30.5).abs() < f64::EPSILON);
    }

    #[test]
    fn run_state_serializes() {
        let state = RunState::new("assembly_456");
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"run_id\":\"assembly_456\""));
        assert!(!json.contains("probe"));
    }

    #[test]
    fn staging_path_derives_from_output_name() {
        use crate::logging::{LogConfig, RunLogger};
        use crate::models::{AssemblyInputs, Script};

        let dir = tempfile::tempdir().unwrap();
        let logger =
            RunLogger::new("t", dir.path().join("logs"), LogConfig::default(), None).unwrap();
        let ctx = Context::new(
            AssemblyInputs::new(vec![], "a.mp3", Script::from_words(["hi"])),
            Settings::default(),
            "t",
            dir.path().join("work"),
            dir.path().join("out/final_video.mp4"),
            Arc::new(logger),
        );

        assert_eq!(
            ctx.staging_path(),
            dir.path().join("work").join("final_video.mp4.part")
        );
        assert_eq!(ctx.srt_path(), dir.path().join("work").join("captions.srt"));
    }
}

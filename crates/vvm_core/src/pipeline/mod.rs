//! Orchestrated assembly pipeline.
//!
//! The assembly call is a short, strictly ordered pipeline:
//! Probe (audio duration) -> Captions (timing + SRT) -> Mux (ffmpeg).
//! Each step validates before and after execution; any failure aborts
//! the run with step context attached. There is no partial or resumable
//! assembly and no internal retry.

pub mod driver;
pub mod errors;
pub mod runner;
pub mod step;
pub mod steps;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use crate::config::Settings;
use crate::logging::{LogConfig, RunLogger};
use crate::models::AssemblyInputs;

pub use errors::{AssemblyError, AssemblyResult, PipelineError, PipelineResult};
pub use runner::{CancelHandle, Pipeline};
pub use step::PipelineStep;
pub use types::{CaptionsOutput, Context, MuxOutput, ProbeOutput, RunState};

use steps::{CaptionsStep, MuxStep, ProbeStep};

/// Run a complete assembly: probe, captions, mux.
///
/// Paths (output file, scratch dir, log dir) come from `settings`; the
/// run is synchronous and blocking, and the final output path is only
/// written on full success.
pub fn assemble(inputs: AssemblyInputs, settings: &Settings) -> PipelineResult<MuxOutput> {
    let run_name = format!("assembly_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"));

    let logger = RunLogger::new(
        &run_name,
        Path::new(&settings.paths.logs_dir),
        LogConfig::default(),
        None,
    )
    .map_err(|e| PipelineError::setup_failed(&run_name, format!("create run logger: {e}")))?;

    let ctx = Context::new(
        inputs,
        settings.clone(),
        &run_name,
        Path::new(&settings.paths.work_dir),
        Path::new(&settings.paths.output_file),
        Arc::new(logger),
    );

    let pipeline = Pipeline::new()
        .with_step(ProbeStep)
        .with_step(CaptionsStep)
        .with_step(MuxStep);

    let mut state = RunState::new(&run_name);
    pipeline.run(&ctx, &mut state)?;

    // The mux step's output validation guarantees this is populated.
    state
        .mux
        .take()
        .ok_or_else(|| PipelineError::setup_failed(&run_name, "mux output missing after run"))
}

//! Pipeline runner that executes steps in sequence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::errors::{AssemblyResult, PipelineError, PipelineResult};
use super::step::PipelineStep;
use super::types::{Context, RunState};

/// Pipeline that runs a sequence of steps.
///
/// Steps execute strictly in order, with validation before and after
/// each one. Every step must succeed; the first failure aborts the
/// remaining steps with step context attached. Completed work is not
/// rolled back (it lives in the scratch directory and is cheap to
/// recompute). Cancellation is checked at step boundaries.
pub struct Pipeline {
    /// Steps to execute in order.
    steps: Vec<Box<dyn PipelineStep>>,
    /// Cancellation flag.
    cancelled: Arc<AtomicBool>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Add a step to the pipeline.
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Get a cancellation handle.
    ///
    /// Call `cancel()` on the returned handle to stop the pipeline at
    /// the next step boundary.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancelled),
        }
    }

    /// Check if pipeline has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Run the pipeline with the given context and state.
    pub fn run(&self, ctx: &Context, state: &mut RunState) -> PipelineResult<()> {
        let total_steps = self.steps.len();

        for (i, step) in self.steps.iter().enumerate() {
            if self.is_cancelled() {
                ctx.logger
                    .warn(&format!("Pipeline cancelled before step '{}'", step.name()));
                return Err(PipelineError::cancelled(&ctx.run_name));
            }

            let step_name = step.name();
            ctx.logger.phase(step_name);

            let percent = ((i * 100) / total_steps) as u32;
            ctx.report_progress(step_name, percent, &format!("Starting {}", step_name));

            run_step(step.as_ref(), ctx, state).map_err(|e| {
                ctx.logger.error(&format!("{} failed: {}", step_name, e));
                PipelineError::step_failed(&ctx.run_name, step_name, e)
            })?;

            ctx.logger.success(&format!("{} completed", step_name));
        }

        ctx.report_progress("Complete", 100, "Assembly finished");
        ctx.logger.success("Pipeline completed successfully");

        Ok(())
    }

    /// Get the number of steps in the pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one step: validate input, execute, validate output.
fn run_step(step: &dyn PipelineStep, ctx: &Context, state: &mut RunState) -> AssemblyResult<()> {
    step.validate_input(ctx)?;
    step.execute(ctx, state)?;
    step.validate_output(ctx, state)
}

/// Handle for cancelling a running pipeline.
#[derive(Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Cancel the pipeline.
    ///
    /// The pipeline will stop at the next step boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::logging::{LogConfig, RunLogger};
    use crate::models::{AssemblyInputs, Script};
    use crate::pipeline::errors::AssemblyError;
    use parking_lot::Mutex;
    use std::path::PathBuf;

    fn test_context(dir: &std::path::Path) -> Context {
        let logger =
            RunLogger::new("test_run", dir.join("logs"), LogConfig::default(), None).unwrap();
        Context::new(
            AssemblyInputs::new(
                vec![PathBuf::from("clip_1.mp4")],
                "voiceover.mp3",
                Script::from_words(["one", "two"]),
            ),
            Settings::default(),
            "test_run",
            dir.join("work"),
            dir.join("final_video.mp4"),
            Arc::new(logger),
        )
    }

    struct RecordingStep {
        name: &'static str,
        executed: Arc<Mutex<Vec<&'static str>>>,
    }

    impl PipelineStep for RecordingStep {
        fn name(&self) -> &str {
            self.name
        }

        fn validate_input(&self, _ctx: &Context) -> Result<(), AssemblyError> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut RunState) -> Result<(), AssemblyError> {
            self.executed.lock().push(self.name);
            Ok(())
        }

        fn validate_output(&self, _ctx: &Context, _state: &RunState) -> Result<(), AssemblyError> {
            Ok(())
        }
    }

    struct FailingStep;

    impl PipelineStep for FailingStep {
        fn name(&self) -> &str {
            "Failing"
        }

        fn validate_input(&self, _ctx: &Context) -> Result<(), AssemblyError> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut RunState) -> Result<(), AssemblyError> {
            Err(AssemblyError::invalid_input("intentional failure"))
        }

        fn validate_output(&self, _ctx: &Context, _state: &RunState) -> Result<(), AssemblyError> {
            Ok(())
        }
    }

    struct BadOutputStep;

    impl PipelineStep for BadOutputStep {
        fn name(&self) -> &str {
            "BadOutput"
        }

        fn validate_input(&self, _ctx: &Context) -> Result<(), AssemblyError> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut RunState) -> Result<(), AssemblyError> {
            Ok(())
        }

        fn validate_output(&self, _ctx: &Context, _state: &RunState) -> Result<(), AssemblyError> {
            Err(AssemblyError::precondition_failed("output never recorded"))
        }
    }

    #[test]
    fn pipeline_builds_correctly() {
        let executed = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .with_step(RecordingStep {
                name: "Step1",
                executed: executed.clone(),
            })
            .with_step(RecordingStep {
                name: "Step2",
                executed: executed.clone(),
            });

        assert_eq!(pipeline.step_count(), 2);
        assert_eq!(pipeline.step_names(), vec!["Step1", "Step2"]);
    }

    #[test]
    fn runs_steps_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let mut state = RunState::new("test_run");

        let executed = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .with_step(RecordingStep {
                name: "Step1",
                executed: executed.clone(),
            })
            .with_step(RecordingStep {
                name: "Step2",
                executed: executed.clone(),
            });

        pipeline.run(&ctx, &mut state).unwrap();

        assert_eq!(*executed.lock(), vec!["Step1", "Step2"]);
    }

    #[test]
    fn failure_aborts_remaining_steps() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let mut state = RunState::new("test_run");

        let executed = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new().with_step(FailingStep).with_step(RecordingStep {
            name: "Never",
            executed: executed.clone(),
        });

        let err = pipeline.run(&ctx, &mut state).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::StepFailed { ref step_name, .. } if step_name == "Failing"
        ));
        assert!(executed.lock().is_empty());
    }

    #[test]
    fn output_validation_failure_carries_step_context() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let mut state = RunState::new("test_run");

        let pipeline = Pipeline::new().with_step(BadOutputStep);
        let err = pipeline.run(&ctx, &mut state).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::StepFailed { ref step_name, .. } if step_name == "BadOutput"
        ));
    }

    #[test]
    fn cancelled_pipeline_stops_before_first_step() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let mut state = RunState::new("test_run");

        let executed = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new().with_step(RecordingStep {
            name: "Step1",
            executed: executed.clone(),
        });

        pipeline.cancel_handle().cancel();
        let err = pipeline.run(&ctx, &mut state).unwrap_err();

        assert!(matches!(err, PipelineError::Cancelled { .. }));
        assert!(executed.lock().is_empty());
    }

    #[test]
    fn cancel_handle_works() {
        let pipeline = Pipeline::new();
        let handle = pipeline.cancel_handle();

        assert!(!pipeline.is_cancelled());
        assert!(!handle.is_cancelled());

        handle.cancel();

        assert!(pipeline.is_cancelled());
        assert!(handle.is_cancelled());
    }
}

//! Pipeline step trait definition.
//!
//! All pipeline steps implement this trait, providing a consistent
//! interface for validation and execution.

use super::errors::AssemblyResult;
use super::types::{Context, RunState};

/// Trait for pipeline steps.
///
/// The pipeline runner calls these methods in order:
///
/// 1. `validate_input` - check preconditions against the context
/// 2. `execute` - perform the step's work, recording results in `state`
/// 3. `validate_output` - verify the step produced valid output
pub trait PipelineStep: Send + Sync {
    /// Get the step name (for logging and error context).
    fn name(&self) -> &str;

    /// Validate inputs before execution.
    fn validate_input(&self, ctx: &Context) -> AssemblyResult<()>;

    /// Execute the step's main work.
    fn execute(&self, ctx: &Context, state: &mut RunState) -> AssemblyResult<()>;

    /// Validate outputs after execution.
    fn validate_output(&self, ctx: &Context, state: &RunState) -> AssemblyResult<()>;
}

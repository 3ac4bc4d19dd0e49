//! Pipeline driver and collaborator interfaces.
//!
//! The upstream generative stages are hosted services: topic discovery,
//! script generation, voice synthesis, and clip generation. They are
//! modeled here as traits only; implementations live with the embedding
//! application and this crate never performs their HTTP calls.
//!
//! The driver sequences them linearly, the way the full product pipeline
//! runs: topic -> script/keywords -> voiceover -> clips -> assembly.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Settings;
use crate::models::{AssemblyInputs, Script};

use super::errors::PipelineError;
use super::types::MuxOutput;

/// A failure reported by an external generative service.
#[derive(Error, Debug)]
#[error("{stage} collaborator failed: {message}")]
pub struct CollaboratorError {
    pub stage: String,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

/// Script plus the visual keywords that drive clip generation.
#[derive(Debug, Clone)]
pub struct GeneratedScript {
    /// Raw narration text (cleaned into a [`Script`] before captioning).
    pub narration: String,
    /// Descriptive phrases, one clip generated per keyword. Clip order
    /// follows keyword order.
    pub visual_keywords: Vec<String>,
}

/// Supplies a trending topic seed.
pub trait TopicSource {
    fn trending_topic(&self) -> Result<String, CollaboratorError>;
}

/// Turns a topic into narration text and visual keywords.
pub trait ScriptGenerator {
    fn generate(&self, topic: &str) -> Result<GeneratedScript, CollaboratorError>;
}

/// Synthesizes a voiceover and returns the materialized audio path.
pub trait VoiceSynthesizer {
    fn synthesize(&self, narration: &str) -> Result<PathBuf, CollaboratorError>;
}

/// Generates one clip per keyword and returns the materialized paths.
pub trait ClipGenerator {
    fn generate_clips(&self, keywords: &[String]) -> Result<Vec<PathBuf>, CollaboratorError>;
}

/// Errors from a full driver run.
#[derive(Error, Debug)]
pub enum DriverError {
    /// An upstream generative stage failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// A collaborator returned structurally unusable output.
    #[error("{stage} returned unusable output: {message}")]
    UnusableOutput { stage: String, message: String },

    /// The final assembly stage failed.
    #[error(transparent)]
    Assembly(#[from] PipelineError),
}

/// Sequences the generative stages and hands their artifacts to assembly.
pub struct Driver<T, S, V, C> {
    topic_source: T,
    script_generator: S,
    voice_synthesizer: V,
    clip_generator: C,
}

impl<T, S, V, C> Driver<T, S, V, C>
where
    T: TopicSource,
    S: ScriptGenerator,
    V: VoiceSynthesizer,
    C: ClipGenerator,
{
    pub fn new(topic_source: T, script_generator: S, voice_synthesizer: V, clip_generator: C) -> Self {
        Self {
            topic_source,
            script_generator,
            voice_synthesizer,
            clip_generator,
        }
    }

    /// Run the generative stages and return the materialized assembly
    /// inputs, without assembling.
    pub fn produce_inputs(&self) -> Result<AssemblyInputs, DriverError> {
        let topic = self.topic_source.trending_topic()?;
        tracing::info!(topic = %topic, "trending topic selected");

        let generated = self.script_generator.generate(&topic)?;
        if generated.visual_keywords.is_empty() {
            return Err(DriverError::UnusableOutput {
                stage: "script generation".to_string(),
                message: "no visual keywords produced".to_string(),
            });
        }

        let script = Script::from_narration(&generated.narration);
        if script.is_empty() {
            return Err(DriverError::UnusableOutput {
                stage: "script generation".to_string(),
                message: "narration empty after cleanup".to_string(),
            });
        }

        let audio = self.voice_synthesizer.synthesize(&generated.narration)?;
        tracing::info!(audio = %audio.display(), "voiceover materialized");

        let clips = self.clip_generator.generate_clips(&generated.visual_keywords)?;
        if clips.is_empty() {
            return Err(DriverError::UnusableOutput {
                stage: "clip generation".to_string(),
                message: "no clips produced".to_string(),
            });
        }
        tracing::info!(count = clips.len(), "clips materialized");

        Ok(AssemblyInputs::new(clips, audio, script))
    }

    /// Run the whole pipeline end to end: generative stages + assembly.
    pub fn run(&self, settings: &Settings) -> Result<MuxOutput, DriverError> {
        let inputs = self.produce_inputs()?;
        Ok(super::assemble(inputs, settings)?)
    }
}

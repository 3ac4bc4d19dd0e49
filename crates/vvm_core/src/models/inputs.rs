//! Assembly inputs.
//!
//! All paths are carried explicitly per invocation; nothing in the core
//! reads from fixed well-known filenames.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Script;

/// Everything the assembly stage consumes.
///
/// The upstream collaborators materialize the clips and the voiceover on
/// local storage before this struct is built; assembly never fetches
/// anything remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyInputs {
    /// Video clips, in the order the keyword list produced them.
    /// Concatenation preserves this order.
    pub clips: Vec<PathBuf>,
    /// Voiceover audio track. Its measured duration fixes the output
    /// duration.
    pub audio: PathBuf,
    /// Cleaned narration script for caption timing.
    pub script: Script,
}

impl AssemblyInputs {
    pub fn new(clips: Vec<PathBuf>, audio: impl Into<PathBuf>, script: Script) -> Self {
        Self {
            clips,
            audio: audio.into(),
            script,
        }
    }
}

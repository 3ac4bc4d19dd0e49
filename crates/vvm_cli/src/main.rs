//! Command-line assembler: clips + voiceover + script -> final video.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vvm_core::config::ConfigManager;
use vvm_core::models::{AssemblyInputs, Script};
use vvm_core::pipeline::{self, PipelineError};

/// Assemble a short-form video from generated clips, a voiceover, and
/// the narration script that produced it.
#[derive(Parser, Debug)]
#[command(name = "vvm", version, about)]
struct Args {
    /// Video clips, in playback order
    #[arg(required = true)]
    clips: Vec<PathBuf>,

    /// Voiceover audio file
    #[arg(short, long)]
    audio: PathBuf,

    /// Narration script (plain text)
    #[arg(short, long)]
    script: PathBuf,

    /// Output video path (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Scratch directory for intermediate files (overrides config)
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Config file path
    #[arg(short, long, default_value = "vvm.toml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut manager = ConfigManager::new(&args.config);
    manager
        .load_or_create()
        .with_context(|| format!("load config from {}", args.config.display()))?;

    let settings = manager.settings_mut();
    if let Some(output) = &args.output {
        settings.paths.output_file = output.display().to_string();
    }
    if let Some(work_dir) = &args.work_dir {
        settings.paths.work_dir = work_dir.display().to_string();
    }

    let narration = fs::read_to_string(&args.script)
        .with_context(|| format!("read script from {}", args.script.display()))?;
    let script = Script::from_narration(&narration);
    if script.is_empty() {
        bail!(
            "script {} contains no words after cleanup",
            args.script.display()
        );
    }

    tracing::info!(
        clips = args.clips.len(),
        words = script.word_count(),
        "starting assembly"
    );

    let inputs = AssemblyInputs::new(args.clips, args.audio, script);
    match pipeline::assemble(inputs, manager.settings()) {
        Ok(output) => {
            tracing::info!(path = %output.output_path.display(), "assembly complete");
            println!("{}", output.output_path.display());
            Ok(())
        }
        Err(PipelineError::StepFailed {
            step_name, source, ..
        }) => {
            bail!("assembly failed at {step_name}: {source}")
        }
        Err(e) => bail!("assembly failed: {e}"),
    }
}

//! Replay driver for the reflex platformer agent.
//!
//! Plays one episode of the canonical rule-table agent against a recorded
//! frame sequence and writes the outcome to disk.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (path from the first argument, default
//!    `reflex-config.yaml`)
//! 2. Initialize structured logging (tracing)
//! 3. Load the recorded frames
//! 4. Run the agent loop until the frames run out or the step limit hits
//! 5. Write `<results_dir>/results.json`

mod error;
mod replay;
mod results;

use std::path::{Path, PathBuf};

use chrono::Utc;
use reflex_core::agent::AgentLoop;
use reflex_core::config::ReflexConfig;
use reflex_types::EpisodeId;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::RunnerError;
use crate::replay::ReplayEmulator;
use crate::results::EpisodeRecord;

/// Config file read when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "reflex-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration or frames cannot be loaded, or
/// the result cannot be written.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = load_config(&config_path)?;

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("reflex-runner starting");
    if !config_path.exists() {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        ticks_per_action = config.agent.ticks_per_action,
        max_steps = ?config.agent.max_steps,
        frames_path = config.replay.frames_path,
        results_dir = config.replay.results_dir,
        "Configuration loaded"
    );

    let path = run(&config)?;
    info!(path = %path.display(), "reflex-runner finished");
    Ok(())
}

/// Load the configuration, applying `REFLEX_*` environment overrides.
fn load_config(path: &Path) -> Result<ReflexConfig, RunnerError> {
    ReflexConfig::load(path).map_err(RunnerError::from)
}

/// Play one episode and persist its record, returning the result path.
fn run(config: &ReflexConfig) -> Result<PathBuf, RunnerError> {
    let mut emulator = ReplayEmulator::from_file(Path::new(&config.replay.frames_path))?;
    let frame_count = emulator.frame_count();
    info!(frame_count, "Frames loaded");

    let agent = AgentLoop::with_rule_table(config.agent.ticks_per_action)
        .with_max_steps(config.agent.max_steps);

    let episode_id = EpisodeId::new();
    let started_at = Utc::now();
    let summary = agent.run_episode(&mut emulator);
    let finished_at = Utc::now();

    let record = EpisodeRecord {
        episode_id,
        started_at,
        finished_at,
        ticks_per_action: config.agent.ticks_per_action,
        frame_count,
        summary,
        inputs: emulator.into_inputs(),
    };
    let path = results::write_results(Path::new(&config.replay.results_dir), &record)?;
    info!(
        %episode_id,
        steps = record.summary.steps,
        inputs = record.inputs.len(),
        "Episode result written"
    );
    Ok(path)
}

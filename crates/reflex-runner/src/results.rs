//! Episode result persistence.
//!
//! One run produces one [`EpisodeRecord`], written as pretty-printed JSON
//! to `<results_dir>/results.json`. The directory is created if needed and
//! an existing file is replaced.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use reflex_core::agent::EpisodeSummary;
use reflex_types::EpisodeId;
use serde::{Deserialize, Serialize};

use crate::error::RunnerError;
use crate::replay::InputEvent;

/// File name of the result inside the results directory.
pub const RESULTS_FILE_NAME: &str = "results.json";

/// Everything recorded about one episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Identifier of this run.
    pub episode_id: EpisodeId,
    /// When the first step began.
    pub started_at: DateTime<Utc>,
    /// When the loop stopped.
    pub finished_at: DateTime<Utc>,
    /// Action length the executor ran with.
    pub ticks_per_action: u64,
    /// Frames available in the replayed recording.
    pub frame_count: usize,
    /// Counters from the agent loop.
    pub summary: EpisodeSummary,
    /// Every button transition, in order.
    pub inputs: Vec<InputEvent>,
}

/// Write `record` to `dir`, returning the path of the written file.
pub fn write_results(dir: &Path, record: &EpisodeRecord) -> Result<PathBuf, RunnerError> {
    std::fs::create_dir_all(dir).map_err(|source| RunnerError::ResultsWrite {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(RESULTS_FILE_NAME);
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(&path, json).map_err(|source| RunnerError::ResultsWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

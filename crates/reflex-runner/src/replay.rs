//! An emulator stand-in that replays recorded frames.
//!
//! The frames file is a JSON array of tile grids, each grid an array of
//! rows. Every emulator tick moves playback one frame forward, and the
//! episode is over once the last frame has been passed. Button presses
//! cannot influence what is shown; they are recorded with the tick they
//! happened on so a run can be inspected or replayed against a real
//! emulator later.

use std::path::Path;

use reflex_core::agent::Emulator;
use reflex_core::executor::InputSink;
use reflex_types::{Button, TileGrid};
use serde::{Deserialize, Serialize};

use crate::error::RunnerError;

/// Whether a button went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// The button was pressed.
    Press,
    /// The button was released.
    Release,
}

/// One recorded button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Ticks advanced before the transition.
    pub tick: u64,
    /// Press or release.
    pub kind: InputKind,
    /// The button involved.
    pub button: Button,
}

/// Replays a fixed frame sequence and records the agent's inputs.
#[derive(Debug, Clone)]
pub struct ReplayEmulator {
    frames: Vec<TileGrid>,
    tick: u64,
    cursor: usize,
    inputs: Vec<InputEvent>,
}

impl ReplayEmulator {
    /// Replay the given frames from the first one.
    pub const fn from_frames(frames: Vec<TileGrid>) -> Self {
        Self {
            frames,
            tick: 0,
            cursor: 0,
            inputs: Vec::new(),
        }
    }

    /// Load frames from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, RunnerError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RunnerError::FramesRead {
            path: path.to_path_buf(),
            source,
        })?;
        let frames: Vec<TileGrid> =
            serde_json::from_str(&contents).map_err(|source| RunnerError::FramesParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_frames(frames))
    }

    /// Number of frames in the recording.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Consume the emulator, returning the recorded inputs in order.
    pub fn into_inputs(self) -> Vec<InputEvent> {
        self.inputs
    }

    fn record(&mut self, kind: InputKind, button: Button) {
        self.inputs.push(InputEvent {
            tick: self.tick,
            kind,
            button,
        });
    }
}

impl InputSink for ReplayEmulator {
    fn press(&mut self, button: Button) {
        self.record(InputKind::Press, button);
    }

    fn release(&mut self, button: Button) {
        self.record(InputKind::Release, button);
    }

    fn advance_tick(&mut self) {
        self.tick = self.tick.saturating_add(1);
        self.cursor = self.cursor.saturating_add(1);
    }
}

impl Emulator for ReplayEmulator {
    /// The frame at the playback cursor. Past the end, the last frame
    /// stays on screen; an empty recording shows an empty grid.
    fn current_tile_grid(&mut self) -> TileGrid {
        self.frames
            .get(self.cursor)
            .or_else(|| self.frames.last())
            .cloned()
            .unwrap_or_default()
    }

    fn is_episode_over(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

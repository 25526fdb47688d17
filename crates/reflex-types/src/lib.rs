//! Shared type definitions for the reflex platformer agent.
//!
//! Every stage of the per-tick pipeline (scene parsing, rule evaluation,
//! action execution) exchanges the values defined here. They are plain
//! data: no type in this crate owns behavior beyond construction,
//! lookup, and code conversion.
//!
//! # Modules
//!
//! - [`enums`] -- Tile kinds and virtual gamepad buttons
//! - [`grid`] -- The [`TileGrid`] frame snapshot and grid [`Position`]s
//! - [`perception`] -- The [`EntitySnapshot`] extracted from one frame
//! - [`actions`] -- The discrete [`Action`] set and its integer codes
//! - [`ids`] -- Episode identifiers

pub mod actions;
pub mod enums;
pub mod grid;
pub mod ids;
pub mod perception;

// Re-export all public types at crate root for convenience.
pub use actions::{Action, ActionError};
pub use enums::{Button, TileKind};
pub use grid::{GAME_AREA_HEIGHT, GAME_AREA_WIDTH, GridError, Position, TileCode, TileGrid};
pub use ids::EpisodeId;
pub use perception::{Enemy, EntitySnapshot};

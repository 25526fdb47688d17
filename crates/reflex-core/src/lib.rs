//! Perception, decision, and action execution for the reflex platformer agent.
//!
//! Each step runs the same pipeline against a fresh frame:
//!
//! ```text
//! TileGrid --> scene::parse --> EntitySnapshot --> rule table --> Action --> executor
//! ```
//!
//! Parsing and deciding are pure functions of the frame. Only the executor
//! touches the emulator, and it does so synchronously.
//!
//! # Modules
//!
//! - [`scene`] -- Entity extraction from a tile grid.
//! - [`rules`] -- The ordered guard/action decision table.
//! - [`decision`] -- [`DecisionSource`] trait and the rule-table engine.
//! - [`executor`] -- Timed press/hold/release sequences per action.
//! - [`agent`] -- The step loop and emulator collaborator traits.
//! - [`config`] -- Configuration loading from `reflex-config.yaml`.
//!
//! [`DecisionSource`]: decision::DecisionSource

pub mod agent;
pub mod config;
pub mod decision;
pub mod executor;
pub mod rules;
pub mod scene;

//! The entity snapshot extracted from one frame.
//!
//! An [`EntitySnapshot`] is recomputed from scratch every step. Nothing in
//! it refers to earlier frames.

use serde::{Deserialize, Serialize};

use crate::enums::TileKind;
use crate::grid::Position;

/// The nearest enemy found by the scene parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enemy {
    /// Where the enemy tile was found.
    pub position: Position,
    /// Which of the four enemy kinds it is.
    pub kind: TileKind,
}

/// Positions of the character and the entities the rules react to.
///
/// The character is mandatory; every other entity is optional and is
/// `None` when the frame does not contain it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// The controlled character.
    pub character: Position,
    /// Nearest enemy at or past the character's column.
    pub enemy: Option<Enemy>,
    /// First mushroom in row order.
    pub mushroom: Option<Position>,
    /// First question box in column order.
    pub question_box: Option<Position>,
    /// Lowest coin in the first column that holds one.
    pub coin: Option<Position>,
}

impl EntitySnapshot {
    /// A snapshot holding only the character.
    pub const fn with_character(character: Position) -> Self {
        Self {
            character,
            enemy: None,
            mushroom: None,
            question_box: None,
            coin: None,
        }
    }
}

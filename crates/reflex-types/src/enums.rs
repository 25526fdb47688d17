//! Enumeration types shared across the agent pipeline.
//!
//! Tile codes are the values the emulator reports in its game-area
//! snapshot. Only the codes the agent reasons about have a [`TileKind`];
//! every other code is carried through the grid untouched.

use serde::{Deserialize, Serialize};

use crate::grid::TileCode;

// ---------------------------------------------------------------------------
// Tile kinds
// ---------------------------------------------------------------------------

/// A recognized tile in the game-area snapshot.
///
/// Enemy kinds occupy the contiguous code range `15..=18`. Only
/// [`TileKind::EnemyFlying`] can move vertically on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum TileKind {
    /// Open space. Probed at ground level it marks a hole.
    Empty = 0,
    /// The controlled character.
    Character = 1,
    /// A collectible coin.
    Coin = 5,
    /// A power-up mushroom.
    Mushroom = 6,
    /// Raised terrain.
    Hill = 10,
    /// A breakable block.
    Block = 12,
    /// A question box that releases an item when hit from below.
    Box = 13,
    /// A pipe segment.
    Pipe = 14,
    /// Ground walker.
    EnemyA = 15,
    /// Shelled walker.
    EnemyB = 16,
    /// Hopping enemy.
    EnemyC = 17,
    /// Flying enemy.
    EnemyFlying = 18,
}

impl TileKind {
    /// Lowest tile code in the enemy range.
    pub const FIRST_ENEMY_CODE: TileCode = 15;

    /// Highest tile code in the enemy range.
    pub const LAST_ENEMY_CODE: TileCode = 18;

    /// Resolve a raw tile code. Unrecognized codes return `None`.
    pub const fn from_code(code: TileCode) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Character),
            5 => Some(Self::Coin),
            6 => Some(Self::Mushroom),
            10 => Some(Self::Hill),
            12 => Some(Self::Block),
            13 => Some(Self::Box),
            14 => Some(Self::Pipe),
            15 => Some(Self::EnemyA),
            16 => Some(Self::EnemyB),
            17 => Some(Self::EnemyC),
            18 => Some(Self::EnemyFlying),
            _ => None,
        }
    }

    /// The raw tile code for this kind.
    pub const fn code(self) -> TileCode {
        self as TileCode
    }

    /// Whether `code` is the code of this kind.
    pub const fn matches(self, code: TileCode) -> bool {
        self.code() == code
    }

    /// Whether a raw code falls in the enemy range.
    pub const fn is_enemy_code(code: TileCode) -> bool {
        code >= Self::FIRST_ENEMY_CODE && code <= Self::LAST_ENEMY_CODE
    }

    /// Whether this kind can fly.
    pub const fn is_flying(self) -> bool {
        matches!(self, Self::EnemyFlying)
    }
}

// ---------------------------------------------------------------------------
// Gamepad buttons
// ---------------------------------------------------------------------------

/// A virtual button on the emulated gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Button {
    /// D-pad down.
    Down,
    /// D-pad left.
    Left,
    /// D-pad right.
    Right,
    /// D-pad up.
    Up,
    /// The A button (jump).
    A,
    /// The B button (run).
    B,
}

impl Button {
    /// Label used in logs and recorded input traces.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::A => "a",
            Self::B => "b",
        }
    }
}

impl core::fmt::Display for Button {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

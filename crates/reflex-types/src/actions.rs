//! The discrete action set chosen once per step.
//!
//! Each [`Action`] is a fully specified input maneuver. Actions carry a
//! stable integer code so that externally supplied choices (replays,
//! scripted inputs) can be validated before they reach the input sink.

use serde::{Deserialize, Serialize};

/// Errors that can occur when converting external values into actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The code does not name any action.
    #[error("invalid action code {code}")]
    InvalidCode {
        /// The rejected code.
        code: u8,
    },
}

/// One discrete maneuver.
///
/// Actions have no ordering relation. Each maps to exactly one timed
/// press/hold/release routine in the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    /// Press down. Also the neutral "wait" choice.
    Down = 0,
    /// Walk left.
    Left = 1,
    /// Walk right.
    Right = 2,
    /// Press up.
    Up = 3,
    /// Jump in place (or stomp).
    ButtonA = 4,
    /// Press the run button alone.
    ButtonB = 5,
    /// Short jump while moving right.
    RunJump = 6,
    /// Jump while moving right, held three times as long.
    LongJump = 7,
    /// Jump while running right.
    AcceleratingJump = 8,
}

impl Action {
    /// Every action, in code order.
    pub const ALL: [Self; 9] = [
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::ButtonA,
        Self::ButtonB,
        Self::RunJump,
        Self::LongJump,
        Self::AcceleratingJump,
    ];

    /// The stable integer code of this action.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Resolve an integer code.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidCode`] for codes above 8.
    pub const fn from_code(code: u8) -> Result<Self, ActionError> {
        match code {
            0 => Ok(Self::Down),
            1 => Ok(Self::Left),
            2 => Ok(Self::Right),
            3 => Ok(Self::Up),
            4 => Ok(Self::ButtonA),
            5 => Ok(Self::ButtonB),
            6 => Ok(Self::RunJump),
            7 => Ok(Self::LongJump),
            8 => Ok(Self::AcceleratingJump),
            _ => Err(ActionError::InvalidCode { code }),
        }
    }

    /// Label used in logs and episode summaries.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::ButtonA => "button_a",
            Self::ButtonB => "button_b",
            Self::RunJump => "run_jump",
            Self::LongJump => "long_jump",
            Self::AcceleratingJump => "accelerating_jump",
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = ActionError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Timed execution of actions against the emulator's input sink.
//!
//! Every action expands to the same shape of routine: press a set of
//! buttons, hold them for some ticks, release them in the same order, then
//! let the emulator run for a settle period with nothing held. Presses
//! always precede the hold ticks, which precede the releases. An action
//! runs to completion before the call returns; actions never overlap.
//!
//! With `N` ticks per action:
//!
//! | Action              | Buttons           | Hold | Settle            |
//! |---------------------|-------------------|------|-------------------|
//! | Down/Left/Right/Up  | the one button    | N    | 0                 |
//! | `ButtonA`           | A                 | N    | 1                 |
//! | `ButtonB`           | B                 | N    | 0                 |
//! | `RunJump`           | Right, A          | N    | N                 |
//! | `LongJump`          | Right, A          | 3N   | N                 |
//! | `AcceleratingJump`  | Right, B, A       | N    | N                 |

use reflex_types::{Action, Button};
use tracing::warn;

/// The emulator's input side.
///
/// `advance_tick` is blocking and advances exactly one emulation step.
pub trait InputSink {
    /// Start holding a button.
    fn press(&mut self, button: Button);
    /// Stop holding a button.
    fn release(&mut self, button: Button);
    /// Run the emulator for one tick.
    fn advance_tick(&mut self);
}

/// How many action lengths a long jump is held for.
const LONG_JUMP_HOLD_FACTOR: u64 = 3;

/// Extra tick after releasing A so the game registers the jump.
const BUTTON_A_SETTLE_TICKS: u64 = 1;

/// The press/hold/release shape of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Maneuver {
    /// Buttons pressed together, in press (and release) order.
    pub buttons: &'static [Button],
    /// Ticks advanced while the buttons are held.
    pub hold_ticks: u64,
    /// Ticks advanced after release.
    pub settle_ticks: u64,
}

impl Maneuver {
    const fn new(buttons: &'static [Button], hold_ticks: u64, settle_ticks: u64) -> Self {
        Self {
            buttons,
            hold_ticks,
            settle_ticks,
        }
    }

    /// Total ticks the maneuver takes.
    pub const fn total_ticks(&self) -> u64 {
        self.hold_ticks.saturating_add(self.settle_ticks)
    }
}

/// Runs actions as timed button sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionExecutor {
    ticks_per_action: u64,
}

impl ActionExecutor {
    /// An executor holding simple actions for `ticks_per_action` ticks.
    pub const fn new(ticks_per_action: u64) -> Self {
        Self { ticks_per_action }
    }

    /// The configured action length in ticks.
    pub const fn ticks_per_action(self) -> u64 {
        self.ticks_per_action
    }

    /// The maneuver an action expands to under this executor's timing.
    pub const fn maneuver(self, action: Action) -> Maneuver {
        let n = self.ticks_per_action;
        match action {
            Action::Down => Maneuver::new(&[Button::Down], n, 0),
            Action::Left => Maneuver::new(&[Button::Left], n, 0),
            Action::Right => Maneuver::new(&[Button::Right], n, 0),
            Action::Up => Maneuver::new(&[Button::Up], n, 0),
            Action::ButtonA => Maneuver::new(&[Button::A], n, BUTTON_A_SETTLE_TICKS),
            Action::ButtonB => Maneuver::new(&[Button::B], n, 0),
            Action::RunJump => Maneuver::new(&[Button::Right, Button::A], n, n),
            Action::LongJump => Maneuver::new(
                &[Button::Right, Button::A],
                n.saturating_mul(LONG_JUMP_HOLD_FACTOR),
                n,
            ),
            Action::AcceleratingJump => {
                Maneuver::new(&[Button::Right, Button::B, Button::A], n, n)
            }
        }
    }

    /// Run `action` to completion. Returns the number of ticks advanced.
    pub fn execute<S: InputSink + ?Sized>(self, sink: &mut S, action: Action) -> u64 {
        let maneuver = self.maneuver(action);
        for &button in maneuver.buttons {
            sink.press(button);
        }
        advance(sink, maneuver.hold_ticks);
        for &button in maneuver.buttons {
            sink.release(button);
        }
        advance(sink, maneuver.settle_ticks);
        maneuver.total_ticks()
    }

    /// Run the action named by an integer code.
    ///
    /// Unknown codes are logged and dropped without touching the sink;
    /// the step then advances zero ticks.
    pub fn execute_code<S: InputSink + ?Sized>(self, sink: &mut S, code: u8) -> u64 {
        match Action::try_from(code) {
            Ok(action) => self.execute(sink, action),
            Err(err) => {
                warn!(code, %err, "Ignoring invalid action code");
                0
            }
        }
    }
}

fn advance<S: InputSink + ?Sized>(sink: &mut S, ticks: u64) {
    for _ in 0..ticks {
        sink.advance_tick();
    }
}

//! Decision source trait and the rule-table engine.
//!
//! Each step the agent loop hands the current frame to a [`DecisionSource`]
//! and receives one [`Decision`]. The production source is the
//! [`DecisionEngine`], which parses the frame and walks an ordered rule
//! table. Parsing and deciding hold no state between calls: the same frame
//! always produces the same decision.
//!
//! A frame without the character cannot be decided on. Instead of failing
//! the step, the engine answers with [`PARSE_MISS_ACTION`] and the next
//! frame is tried as usual.

use reflex_types::{Action, EntitySnapshot, TileGrid};
use tracing::debug;

use crate::rules::{CANONICAL_RULES, Rule, RuleContext};
use crate::scene::{self, SceneError};

/// Action taken when no rule fires.
pub const DEFAULT_ACTION: Action = Action::Right;

/// Action taken when the frame holds no character.
pub const PARSE_MISS_ACTION: Action = Action::Down;

/// Why a decision was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionBasis {
    /// The named rule fired.
    Rule(&'static str),
    /// No rule fired.
    Default,
    /// The character was not found in the frame.
    ParseMiss,
}

impl DecisionBasis {
    /// Label for logging and summaries.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rule(name) => name,
            Self::Default => "default",
            Self::ParseMiss => "parse_miss",
        }
    }
}

/// The action chosen for one step and the reason it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// The action to execute.
    pub action: Action,
    /// What produced the action.
    pub basis: DecisionBasis,
}

/// A source of per-step decisions.
///
/// Implementations receive the raw frame and must always answer; frames
/// they cannot interpret get a neutral action rather than an error.
pub trait DecisionSource {
    /// Choose the action for the given frame.
    fn choose(&self, grid: &TileGrid) -> Decision;
}

/// First-match evaluation of `rules` over a parsed frame.
pub fn evaluate_rules(rules: &[Rule], grid: &TileGrid, scene: &EntitySnapshot) -> Decision {
    let ctx = RuleContext { grid, scene };
    rules.iter().find(|rule| rule.fires(&ctx)).map_or(
        Decision {
            action: DEFAULT_ACTION,
            basis: DecisionBasis::Default,
        },
        |rule| Decision {
            action: rule.action,
            basis: DecisionBasis::Rule(rule.name),
        },
    )
}

/// Decide on a parsed frame with the canonical rule table.
pub fn decide(grid: &TileGrid, scene: &EntitySnapshot) -> Action {
    evaluate_rules(CANONICAL_RULES, grid, scene).action
}

/// Parse a frame and decide on it with the canonical rule table.
///
/// Returns [`PARSE_MISS_ACTION`] when the frame holds no character.
pub fn choose_action(grid: &TileGrid) -> Action {
    match scene::parse(grid) {
        Ok(scene) => decide(grid, &scene),
        Err(err) => parse_miss(err).action,
    }
}

fn parse_miss(err: SceneError) -> Decision {
    debug!(
        %err,
        action = %PARSE_MISS_ACTION,
        "Character not found, using neutral action"
    );
    Decision {
        action: PARSE_MISS_ACTION,
        basis: DecisionBasis::ParseMiss,
    }
}

/// Rule-table decision source.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    rules: Vec<Rule>,
}

impl DecisionEngine {
    /// An engine running [`CANONICAL_RULES`].
    pub fn new() -> Self {
        Self::with_rules(CANONICAL_RULES.to_vec())
    }

    /// An engine running a custom table, highest priority first.
    pub const fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Decide on an already parsed frame.
    pub fn evaluate(&self, grid: &TileGrid, scene: &EntitySnapshot) -> Decision {
        evaluate_rules(&self.rules, grid, scene)
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionSource for DecisionEngine {
    fn choose(&self, grid: &TileGrid) -> Decision {
        let scene = match scene::parse(grid) {
            Ok(scene) => scene,
            Err(err) => return parse_miss(err),
        };
        let decision = self.evaluate(grid, &scene);
        debug!(
            rule = decision.basis.as_str(),
            action = %decision.action,
            "Rule table evaluated"
        );
        decision
    }
}

//! The agent step loop and its emulator collaborator.
//!
//! [`AgentLoop`] is a thin orchestrator. Each step it reads the current
//! frame from the [`Emulator`], asks its [`DecisionSource`] for an action,
//! and runs that action to completion through the [`ActionExecutor`]. The
//! loop ends when the emulator reports the episode over, or when the
//! optional step limit is reached.
//!
//! Nothing is carried between steps except the counters that make up the
//! final [`EpisodeSummary`].

use std::collections::BTreeMap;

use reflex_types::{Action, TileGrid};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::decision::{Decision, DecisionBasis, DecisionEngine, DecisionSource};
use crate::executor::{ActionExecutor, InputSink};

/// An emulator the agent can observe and drive.
pub trait Emulator: InputSink {
    /// The tile grid for the frame currently on screen.
    fn current_tile_grid(&mut self) -> TileGrid;

    /// Whether the environment has reached a terminal state.
    fn is_episode_over(&self) -> bool;
}

/// Why an episode stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeEnd {
    /// The emulator reported a terminal state.
    EpisodeOver,
    /// The configured step limit was reached first.
    StepLimit,
}

/// What happened during a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// The decision taken for the frame.
    pub decision: Decision,
    /// Emulator ticks the action advanced.
    pub ticks: u64,
}

/// Counters collected over one episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Steps taken.
    pub steps: u64,
    /// Emulator ticks advanced across all steps.
    pub ticks: u64,
    /// Steps whose frame held no character.
    pub parse_misses: u64,
    /// Times each action was chosen, keyed by action label.
    pub actions: BTreeMap<String, u64>,
    /// Times each decision basis applied, keyed by rule name.
    pub rules: BTreeMap<String, u64>,
    /// Why the episode stopped.
    pub end: EpisodeEnd,
}

impl EpisodeSummary {
    const fn new() -> Self {
        Self {
            steps: 0,
            ticks: 0,
            parse_misses: 0,
            actions: BTreeMap::new(),
            rules: BTreeMap::new(),
            end: EpisodeEnd::EpisodeOver,
        }
    }

    fn record(&mut self, report: &StepReport) {
        self.steps = self.steps.saturating_add(1);
        self.ticks = self.ticks.saturating_add(report.ticks);
        if report.decision.basis == DecisionBasis::ParseMiss {
            self.parse_misses = self.parse_misses.saturating_add(1);
        }
        bump(&mut self.actions, report.decision.action.as_str());
        bump(&mut self.rules, report.decision.basis.as_str());
    }

    /// How many times `action` was chosen.
    pub fn action_count(&self, action: Action) -> u64 {
        self.actions.get(action.as_str()).copied().unwrap_or(0)
    }
}

fn bump(counts: &mut BTreeMap<String, u64>, key: &str) {
    let count = counts.entry(key.to_owned()).or_insert(0);
    *count = count.saturating_add(1);
}

/// Reads frames, decides, and executes until the episode ends.
#[derive(Debug, Clone)]
pub struct AgentLoop<D = DecisionEngine> {
    decisions: D,
    executor: ActionExecutor,
    max_steps: Option<u64>,
}

impl AgentLoop<DecisionEngine> {
    /// A loop running the canonical rule table.
    pub fn with_rule_table(ticks_per_action: u64) -> Self {
        Self::new(DecisionEngine::new(), ActionExecutor::new(ticks_per_action))
    }
}

impl<D: DecisionSource> AgentLoop<D> {
    /// A loop over the given decision source and executor, without a step
    /// limit.
    pub const fn new(decisions: D, executor: ActionExecutor) -> Self {
        Self {
            decisions,
            executor,
            max_steps: None,
        }
    }

    /// Stop after `max_steps` steps even if the episode is not over.
    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Run one observe/decide/act step.
    pub fn step<E: Emulator + ?Sized>(&self, env: &mut E) -> StepReport {
        let grid = env.current_tile_grid();
        let decision = self.decisions.choose(&grid);
        let ticks = self.executor.execute(env, decision.action);
        StepReport { decision, ticks }
    }

    /// Step until the emulator reports the episode over or the step limit
    /// is reached.
    ///
    /// The terminal check happens before every step, so an emulator that
    /// starts in a terminal state produces an empty summary.
    pub fn run_episode<E: Emulator + ?Sized>(&self, env: &mut E) -> EpisodeSummary {
        info!(
            ticks_per_action = self.executor.ticks_per_action(),
            max_steps = ?self.max_steps,
            "Episode started"
        );

        let mut summary = EpisodeSummary::new();
        loop {
            if env.is_episode_over() {
                summary.end = EpisodeEnd::EpisodeOver;
                break;
            }
            if self.max_steps.is_some_and(|max| summary.steps >= max) {
                summary.end = EpisodeEnd::StepLimit;
                break;
            }
            let report = self.step(env);
            summary.record(&report);
            debug!(
                step = summary.steps,
                action = %report.decision.action,
                ticks = report.ticks,
                "Step completed"
            );
        }

        info!(
            steps = summary.steps,
            ticks = summary.ticks,
            parse_misses = summary.parse_misses,
            end = ?summary.end,
            "Episode ended"
        );
        summary
    }
}

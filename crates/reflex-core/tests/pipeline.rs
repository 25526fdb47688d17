//! End-to-end tests of the frame -> decision -> input pipeline.
//!
//! These drive the public API only: frames are built with
//! [`TileGrid::with`], decided with the canonical table, and executed
//! against a recording emulator.

#![allow(clippy::unwrap_used)]

use reflex_core::agent::{AgentLoop, Emulator, EpisodeEnd};
use reflex_core::decision::{self, DecisionBasis, DecisionEngine, DecisionSource};
use reflex_core::executor::{ActionExecutor, InputSink};
use reflex_core::rules::{CANONICAL_RULES, RuleContext};
use reflex_core::scene::{self, SceneError};
use reflex_types::{Action, Button, Position, TileGrid, TileKind};

fn frame(tiles: &[(usize, usize, TileKind)]) -> TileGrid {
    tiles
        .iter()
        .try_fold(TileGrid::default(), |grid, &(row, column, kind)| {
            grid.with(row, column, kind)
        })
        .unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Press(Button),
    Release(Button),
    Tick,
}

/// Plays a fixed list of frames, one per step, and records every input.
struct Playback {
    frames: Vec<TileGrid>,
    step: usize,
    inputs: Vec<Input>,
}

impl Playback {
    fn new(frames: Vec<TileGrid>) -> Self {
        Self {
            frames,
            step: 0,
            inputs: Vec::new(),
        }
    }

    fn presses(&self) -> Vec<Button> {
        self.inputs
            .iter()
            .filter_map(|input| match input {
                Input::Press(button) => Some(*button),
                _ => None,
            })
            .collect()
    }
}

impl InputSink for Playback {
    fn press(&mut self, button: Button) {
        self.inputs.push(Input::Press(button));
    }

    fn release(&mut self, button: Button) {
        self.inputs.push(Input::Release(button));
    }

    fn advance_tick(&mut self) {
        self.inputs.push(Input::Tick);
    }
}

impl Emulator for Playback {
    fn current_tile_grid(&mut self) -> TileGrid {
        let grid = self.frames.get(self.step).cloned().unwrap_or_default();
        self.step = self.step.saturating_add(1);
        grid
    }

    fn is_episode_over(&self) -> bool {
        self.step >= self.frames.len()
    }
}

// ---------------------------------------------------------------------------
// Scene parsing
// ---------------------------------------------------------------------------

#[test]
fn single_character_is_found_anywhere() {
    for row in [0, 5, 12, 15] {
        for column in [0, 7, 19] {
            let grid = frame(&[(row, column, TileKind::Character)]);
            let scene = scene::parse(&grid).unwrap();
            assert_eq!(
                scene.character,
                Position::from_indices(row, column).unwrap(),
                "({row}, {column})"
            );
        }
    }
}

#[test]
fn missing_character_falls_back_to_down() {
    let grid = frame(&[(12, 8, TileKind::EnemyA), (6, 4, TileKind::Box)]);
    assert_eq!(scene::parse(&grid), Err(SceneError::CharacterNotFound));
    assert_eq!(decision::choose_action(&grid), Action::Down);
    let decision = DecisionEngine::new().choose(&grid);
    assert_eq!(decision.basis, DecisionBasis::ParseMiss);
}

#[test]
fn parsing_twice_gives_the_same_snapshot() {
    let grid = frame(&[
        (12, 4, TileKind::Character),
        (12, 9, TileKind::EnemyB),
        (3, 2, TileKind::Mushroom),
        (7, 11, TileKind::Box),
        (9, 13, TileKind::Coin),
    ]);
    let first = scene::parse(&grid).unwrap();
    let second = scene::parse(&grid).unwrap();
    assert_eq!(first, second);
    assert_eq!(decision::choose_action(&grid), decision::choose_action(&grid));
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

#[test]
fn flying_enemy_two_ahead_is_long_jumped() {
    let grid = frame(&[(12, 5, TileKind::Character), (12, 7, TileKind::EnemyFlying)]);
    let decision = DecisionEngine::new().choose(&grid);
    assert_eq!(decision.action, Action::LongJump);
    assert_eq!(decision.basis, DecisionBasis::Rule("flying_enemy"));
}

#[test]
fn grounded_enemy_three_ahead_is_stomped() {
    let grid = frame(&[(12, 5, TileKind::Character), (12, 8, TileKind::EnemyB)]);
    let decision = DecisionEngine::new().choose(&grid);
    assert_eq!(decision.action, Action::ButtonA);
    assert_eq!(decision.basis, DecisionBasis::Rule("stomp_enemy"));
}

#[test]
fn pipe_below_two_ahead_is_run_jumped() {
    let grid = frame(&[(12, 5, TileKind::Character), (13, 7, TileKind::Pipe)]);
    assert_eq!(decision::choose_action(&grid), Action::RunJump);
}

#[test]
fn falling_enemy_outranks_hill() {
    let hill_only = frame(&[(10, 5, TileKind::Character), (10, 7, TileKind::Hill)]);
    assert_eq!(decision::choose_action(&hill_only), Action::LongJump);

    let both = frame(&[
        (10, 5, TileKind::Character),
        (10, 7, TileKind::Hill),
        (8, 7, TileKind::EnemyA),
    ]);
    let decision = DecisionEngine::new().choose(&both);
    assert_eq!(decision.action, Action::Left);
    assert_eq!(decision.basis, DecisionBasis::Rule("falling_enemy"));
}

#[test]
fn accelerating_jump_is_never_chosen_by_the_table() {
    assert!(
        CANONICAL_RULES
            .iter()
            .all(|rule| rule.action != Action::AcceleratingJump)
    );
}

// ---------------------------------------------------------------------------
// Rule priority on overlapping guards
// ---------------------------------------------------------------------------

/// Names of every canonical rule whose guard holds for the frame.
fn guards_holding(grid: &TileGrid) -> Vec<&'static str> {
    let scene = scene::parse(grid).unwrap();
    let ctx = RuleContext {
        grid,
        scene: &scene,
    };
    CANONICAL_RULES
        .iter()
        .filter(|rule| rule.fires(&ctx))
        .map(|rule| rule.name)
        .collect()
}

fn assert_earlier_wins(grid: &TileGrid, earlier: &'static str, later: &'static str) {
    let holding = guards_holding(grid);
    assert!(holding.contains(&earlier), "{earlier} should hold: {holding:?}");
    assert!(holding.contains(&later), "{later} should hold: {holding:?}");
    let decision = DecisionEngine::new().choose(grid);
    assert_eq!(decision.basis, DecisionBasis::Rule(earlier));
}

#[test]
fn ground_hole_outranks_box_behind() {
    let grid = frame(&[(12, 6, TileKind::Character), (9, 6, TileKind::Box)]);
    assert_earlier_wins(&grid, "ground_hole", "box_behind");
    assert_eq!(decision::choose_action(&grid), Action::LongJump);
}

#[test]
fn ground_hole_outranks_box_above() {
    let grid = frame(&[(12, 6, TileKind::Character), (10, 7, TileKind::Box)]);
    assert_earlier_wins(&grid, "ground_hole", "box_above");
    assert_eq!(decision::choose_action(&grid), Action::LongJump);
}

#[test]
fn coin_below_back_outranks_mushroom_behind() {
    let grid = frame(&[
        (5, 6, TileKind::Character),
        (10, 7, TileKind::Coin),
        (3, 2, TileKind::Mushroom),
    ]);
    assert_earlier_wins(&grid, "coin_below_back", "mushroom_behind");
}

#[test]
fn blocked_tunnel_outranks_hill() {
    let grid = frame(&[
        (11, 4, TileKind::Character),
        (11, 6, TileKind::Hill),
        (10, 5, TileKind::Hill),
    ]);
    assert_earlier_wins(&grid, "blocked_tunnel", "hill");
    assert_eq!(decision::choose_action(&grid), Action::Left);
}

#[test]
fn block_outranks_ground_hole() {
    let grid = frame(&[(12, 5, TileKind::Character), (12, 7, TileKind::Block)]);
    assert_earlier_wins(&grid, "block", "ground_hole");
    assert_eq!(decision::choose_action(&grid), Action::ButtonA);
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

#[test]
fn long_jump_input_sequence() {
    let n = 5;
    let mut sink = Playback::new(Vec::new());
    let ticks = ActionExecutor::new(n).execute(&mut sink, Action::LongJump);
    assert_eq!(ticks, 20);

    let mut expected = vec![Input::Press(Button::Right), Input::Press(Button::A)];
    expected.extend(std::iter::repeat_n(Input::Tick, 15));
    expected.extend([Input::Release(Button::Right), Input::Release(Button::A)]);
    expected.extend(std::iter::repeat_n(Input::Tick, 5));
    assert_eq!(sink.inputs, expected);
}

#[test]
fn out_of_range_code_is_dropped() {
    let mut sink = Playback::new(Vec::new());
    let executor = ActionExecutor::new(3);
    assert_eq!(executor.execute_code(&mut sink, 42), 0);
    assert!(sink.inputs.is_empty());
}

// ---------------------------------------------------------------------------
// Agent loop
// ---------------------------------------------------------------------------

#[test]
fn episode_acts_on_each_frame_in_turn() {
    let frames = vec![
        frame(&[(12, 5, TileKind::Character), (12, 7, TileKind::EnemyFlying)]),
        TileGrid::default(),
        frame(&[(12, 5, TileKind::Character), (13, 7, TileKind::Pipe)]),
    ];
    let agent = AgentLoop::with_rule_table(2);
    let mut env = Playback::new(frames);
    let summary = agent.run_episode(&mut env);

    assert_eq!(summary.steps, 3);
    assert_eq!(summary.end, EpisodeEnd::EpisodeOver);
    assert_eq!(summary.parse_misses, 1);
    assert_eq!(summary.action_count(Action::LongJump), 1);
    assert_eq!(summary.action_count(Action::Down), 1);
    assert_eq!(summary.action_count(Action::RunJump), 1);
    // LongJump 6+2, Down 2, RunJump 2+2.
    assert_eq!(summary.ticks, 14);
    assert_eq!(
        env.presses(),
        vec![
            Button::Right,
            Button::A,
            Button::Down,
            Button::Right,
            Button::A
        ]
    );
}

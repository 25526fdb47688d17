//! The ordered decision table.
//!
//! Each [`Rule`] pairs a guard over the current frame with the action to
//! take when the guard holds. The table is evaluated top to bottom and the
//! first rule whose guard holds decides the step, so a rule's position in
//! [`CANONICAL_RULES`] is part of its meaning.
//!
//! Guards read the character position `(cx, cy)` from the snapshot, where
//! `cx` is the character's row and `cy` its column, and probe tiles at
//! offsets from it. Probes that fall off the grid never match.
//!
//! # Rules (in priority order)
//!
//! 1. **`flying_enemy`**: flying enemy in the character's row, 1-3 columns ahead -- long jump
//! 2. **`stomp_enemy`**: grounded enemy in the character's row or the next, 0-4 columns ahead -- jump
//! 3. **`falling_enemy`**: enemy 1-3 rows up and 1-4 columns ahead -- retreat left
//! 4. **`long_pipe`**: pipe two rows up, 1-2 columns ahead -- long jump
//! 5. **`pipe`**: pipe one row down, two columns ahead -- run jump
//! 6. **`blocked_tunnel`**: hill walls around an open tile ahead -- retreat left
//! 7. **`hill`**: hill two columns ahead -- long jump
//! 8. **`block`**: block two columns ahead -- jump
//! 9. **`ground_hole`**: character on the ground row and a hole in the ground probe -- long jump
//! 10. **`coin_below_drop`**: coin further down, two columns ahead -- press down
//! 11. **`coin_below_back`**: coin further down, at most one column ahead -- walk left
//! 12. **`elevated_hole`**: character raised, a hole in the ground probe, path clear -- long jump
//! 13. **`box_behind`**: question box 1-3 rows up at or behind, open tile behind underfoot -- walk left
//! 14. **`box_above`**: question box 1-3 rows up, one column ahead -- jump
//! 15. **`mushroom_behind`**: mushroom in an earlier column -- walk left
//!
//! When nothing fires the engine walks right.

use reflex_types::{Action, EntitySnapshot, Position, TileGrid, TileKind};

// ---------------------------------------------------------------------------
// Probe constants
// ---------------------------------------------------------------------------

/// Row sampled by the hole probes; the top row of the ground.
pub const GROUND_PROBE_ROW: i32 = 14;

/// Row the character occupies when standing on the ground.
pub const GROUND_LEVEL_ROW: i32 = 12;

/// Last character row for which obstacle probes run.
const OBSTACLE_MAX_ROW: i32 = 14;

/// Last character column for which obstacle probes run.
const OBSTACLE_MAX_COLUMN: i32 = 16;

/// Last character column for which the ground hole probe runs.
const GROUND_HOLE_MAX_COLUMN: i32 = 15;

/// Last character column for which the elevated hole probe runs.
const ELEVATED_HOLE_MAX_COLUMN: i32 = 12;

// ---------------------------------------------------------------------------
// Rule types
// ---------------------------------------------------------------------------

/// What a guard can see: the raw frame and the entities parsed from it.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The frame being decided on, for local tile probes.
    pub grid: &'a TileGrid,
    /// Entities extracted from the same frame.
    pub scene: &'a EntitySnapshot,
}

impl RuleContext<'_> {
    /// The character's `(row, column)`.
    const fn character(&self) -> (i32, i32) {
        (self.scene.character.x, self.scene.character.y)
    }

    /// Whether the tile at `(row, column)` is of `kind`.
    fn is(&self, row: i32, column: i32, kind: TileKind) -> bool {
        self.grid.is(Position::new(row, column), kind)
    }

    /// Whether the tile at `(row, column)` exists and is not of `kind`.
    fn is_not(&self, row: i32, column: i32, kind: TileKind) -> bool {
        self.grid
            .at(Position::new(row, column))
            .is_some_and(|code| !kind.matches(code))
    }

    /// Whether the character stands where obstacle probes apply.
    const fn in_obstacle_window(&self) -> bool {
        let (cx, cy) = self.character();
        cx <= OBSTACLE_MAX_ROW && cy <= OBSTACLE_MAX_COLUMN
    }

    /// Whether `kind` sits two columns ahead, in the character's row or
    /// the row below.
    fn two_ahead(&self, kind: TileKind) -> bool {
        let (cx, cy) = self.character();
        let column = cy.saturating_add(2);
        self.is(cx, column, kind) || self.is(cx.saturating_add(1), column, kind)
    }
}

/// A guard over one frame.
pub type Guard = fn(&RuleContext<'_>) -> bool;

/// One entry of the decision table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Stable name used in logs and episode summaries.
    pub name: &'static str,
    /// Condition under which this rule fires.
    pub guard: Guard,
    /// Action taken when the guard holds.
    pub action: Action,
}

impl Rule {
    /// Whether this rule's guard holds for the given frame.
    pub fn fires(&self, ctx: &RuleContext<'_>) -> bool {
        (self.guard)(ctx)
    }
}

/// The canonical decision table, highest priority first.
pub const CANONICAL_RULES: &[Rule] = &[
    Rule {
        name: "flying_enemy",
        guard: flying_enemy_ahead,
        action: Action::LongJump,
    },
    Rule {
        name: "stomp_enemy",
        guard: grounded_enemy_in_reach,
        action: Action::ButtonA,
    },
    Rule {
        name: "falling_enemy",
        guard: enemy_falling_toward,
        action: Action::Left,
    },
    Rule {
        name: "long_pipe",
        guard: long_pipe_ahead,
        action: Action::LongJump,
    },
    Rule {
        name: "pipe",
        guard: pipe_ahead,
        action: Action::RunJump,
    },
    Rule {
        name: "blocked_tunnel",
        guard: blocked_tunnel_ahead,
        action: Action::Left,
    },
    Rule {
        name: "hill",
        guard: hill_ahead,
        action: Action::LongJump,
    },
    Rule {
        name: "block",
        guard: block_ahead,
        action: Action::ButtonA,
    },
    Rule {
        name: "ground_hole",
        guard: hole_ahead_on_ground,
        action: Action::LongJump,
    },
    Rule {
        name: "coin_below_drop",
        guard: coin_below_in_drop_column,
        action: Action::Down,
    },
    Rule {
        name: "coin_below_back",
        guard: coin_below_behind_drop_column,
        action: Action::Left,
    },
    Rule {
        name: "elevated_hole",
        guard: hole_ahead_while_elevated,
        action: Action::LongJump,
    },
    Rule {
        name: "box_behind",
        guard: box_reachable_by_backing_up,
        action: Action::Left,
    },
    Rule {
        name: "box_above",
        guard: box_reachable_by_jumping,
        action: Action::ButtonA,
    },
    Rule {
        name: "mushroom_behind",
        guard: mushroom_behind,
        action: Action::Left,
    },
];

// ---------------------------------------------------------------------------
// Enemy guards
// ---------------------------------------------------------------------------

fn flying_enemy_ahead(ctx: &RuleContext<'_>) -> bool {
    let (cx, cy) = ctx.character();
    ctx.scene.enemy.is_some_and(|enemy| {
        let Position { x: ex, y: ey } = enemy.position;
        enemy.kind.is_flying()
            && ex == cx
            && (cy.saturating_add(1)..=cy.saturating_add(3)).contains(&ey)
    })
}

fn grounded_enemy_in_reach(ctx: &RuleContext<'_>) -> bool {
    let (cx, cy) = ctx.character();
    ctx.scene.enemy.is_some_and(|enemy| {
        let Position { x: ex, y: ey } = enemy.position;
        !enemy.kind.is_flying()
            && (ex == cx || ex == cx.saturating_add(1))
            && (cy..=cy.saturating_add(4)).contains(&ey)
    })
}

fn enemy_falling_toward(ctx: &RuleContext<'_>) -> bool {
    let (cx, cy) = ctx.character();
    ctx.scene.enemy.is_some_and(|enemy| {
        let Position { x: ex, y: ey } = enemy.position;
        (ex.saturating_add(1)..=ex.saturating_add(3)).contains(&cx)
            && cy < ey
            && ey <= cy.saturating_add(4)
    })
}

// ---------------------------------------------------------------------------
// Obstacle guards
// ---------------------------------------------------------------------------

fn long_pipe_ahead(ctx: &RuleContext<'_>) -> bool {
    let (cx, cy) = ctx.character();
    let row = cx.saturating_sub(2);
    ctx.in_obstacle_window()
        && (ctx.is(row, cy.saturating_add(1), TileKind::Pipe)
            || ctx.is(row, cy.saturating_add(2), TileKind::Pipe))
}

fn pipe_ahead(ctx: &RuleContext<'_>) -> bool {
    let (cx, cy) = ctx.character();
    ctx.in_obstacle_window() && ctx.is(cx.saturating_add(1), cy.saturating_add(2), TileKind::Pipe)
}

fn blocked_tunnel_ahead(ctx: &RuleContext<'_>) -> bool {
    let (cx, cy) = ctx.character();
    let above = cx.saturating_sub(1);
    let below = cx.saturating_add(1);
    let ahead = cy.saturating_add(2);
    ctx.in_obstacle_window()
        && ctx.two_ahead(TileKind::Hill)
        && (ctx.is(above, cy.saturating_add(1), TileKind::Hill)
            || ctx.is(above, ahead, TileKind::Hill)
            || ctx.is(below, ahead, TileKind::Hill))
        && ctx.is(below, ahead, TileKind::Empty)
}

fn hill_ahead(ctx: &RuleContext<'_>) -> bool {
    ctx.in_obstacle_window() && ctx.two_ahead(TileKind::Hill)
}

fn block_ahead(ctx: &RuleContext<'_>) -> bool {
    ctx.in_obstacle_window() && ctx.two_ahead(TileKind::Block)
}

// ---------------------------------------------------------------------------
// Hole guards
// ---------------------------------------------------------------------------

fn hole_ahead_on_ground(ctx: &RuleContext<'_>) -> bool {
    let (cx, cy) = ctx.character();
    cy <= GROUND_HOLE_MAX_COLUMN
        && cx == GROUND_LEVEL_ROW
        && (ctx.is(GROUND_PROBE_ROW, cy.saturating_add(2), TileKind::Empty)
            || ctx.is(GROUND_PROBE_ROW, cy.saturating_add(3), TileKind::Empty))
}

fn hole_ahead_while_elevated(ctx: &RuleContext<'_>) -> bool {
    let (cx, cy) = ctx.character();
    cy <= ELEVATED_HOLE_MAX_COLUMN
        && cx < GROUND_LEVEL_ROW
        && ctx.is_not(cx.saturating_add(2), cy, TileKind::Empty)
        && (3..=5).any(|ahead| ctx.is(GROUND_PROBE_ROW, cy.saturating_add(ahead), TileKind::Empty))
        && ctx.is(cx.saturating_sub(2), cy.saturating_add(1), TileKind::Empty)
}

// ---------------------------------------------------------------------------
// Collectible guards
// ---------------------------------------------------------------------------

/// The coin, when it lies more than one row below a raised character.
fn coin_below(ctx: &RuleContext<'_>) -> Option<Position> {
    let (cx, _) = ctx.character();
    ctx.scene
        .coin
        .filter(|coin| cx < GROUND_LEVEL_ROW && cx < coin.x.saturating_sub(1))
}

fn coin_below_in_drop_column(ctx: &RuleContext<'_>) -> bool {
    let (_, cy) = ctx.character();
    coin_below(ctx).is_some_and(|coin| cy == coin.y.saturating_sub(2))
}

fn coin_below_behind_drop_column(ctx: &RuleContext<'_>) -> bool {
    let (_, cy) = ctx.character();
    coin_below(ctx).is_some_and(|coin| {
        cy > coin.y.saturating_sub(2)
            && !ctx.is(coin.x.saturating_sub(1), coin.y, TileKind::Hill)
    })
}

/// Whether the box sits one to three rows above the character.
fn box_rows_above(cx: i32, question_box: Position) -> bool {
    cx > question_box.x && cx <= question_box.x.saturating_add(3)
}

fn box_reachable_by_backing_up(ctx: &RuleContext<'_>) -> bool {
    let (cx, cy) = ctx.character();
    ctx.scene.question_box.is_some_and(|question_box| {
        box_rows_above(cx, question_box)
            && ctx.is(cx.saturating_add(1), cy.saturating_sub(1), TileKind::Empty)
            && question_box.y <= cy
    })
}

fn box_reachable_by_jumping(ctx: &RuleContext<'_>) -> bool {
    let (cx, cy) = ctx.character();
    ctx.scene.question_box.is_some_and(|question_box| {
        box_rows_above(cx, question_box)
            && cy < question_box.y
            && question_box.y <= cy.saturating_add(1)
    })
}

fn mushroom_behind(ctx: &RuleContext<'_>) -> bool {
    let (_, cy) = ctx.character();
    ctx.scene.mushroom.is_some_and(|mushroom| mushroom.y < cy)
}

//! Scene parsing: locating the character and nearby entities in a frame.
//!
//! Two scan orders are used. Row scans walk the grid row by row and take
//! the first row holding a match; they find the character and mushrooms.
//! Column scans walk the grid column by column and take the first column
//! holding a match; they find enemies, question boxes, and coins, which
//! the rules treat as vertical features.
//!
//! Only the first match in scan order is reported. When several entities
//! of one kind are on screen, the later ones are ignored.

use reflex_types::{Enemy, EntitySnapshot, Position, TileCode, TileGrid, TileKind};

/// Errors that can occur while parsing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// No row of the grid contains the character tile.
    #[error("character tile not found in grid")]
    CharacterNotFound,
}

/// Which end of a matched column a column scan reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnEnd {
    /// The topmost matching tile.
    First,
    /// The bottommost matching tile.
    Last,
}

/// Find the first row holding a tile that satisfies `matches`, and the
/// first such tile within that row.
pub fn first_by_row(grid: &TileGrid, matches: impl Fn(TileCode) -> bool) -> Option<Position> {
    grid.rows().enumerate().find_map(|(row, tiles)| {
        let column = tiles.iter().position(|&code| matches(code))?;
        Position::from_indices(row, column)
    })
}

/// Find the first column at or after `from_column` holding a tile that
/// satisfies `matches`, and the tile at `end` of that column.
///
/// Returns the tile's position and its code.
pub fn first_by_column(
    grid: &TileGrid,
    from_column: usize,
    end: ColumnEnd,
    matches: impl Fn(TileCode) -> bool,
) -> Option<(Position, TileCode)> {
    (from_column..grid.width()).find_map(|column| {
        let mut tiles = grid.column(column)?;
        let row = match end {
            ColumnEnd::First => tiles.position(|code| matches(code))?,
            ColumnEnd::Last => tiles.rposition(|code| matches(code))?,
        };
        let code = grid.get(row, column)?;
        Some((Position::from_indices(row, column)?, code))
    })
}

/// Extract an [`EntitySnapshot`] from a frame.
///
/// Enemies are only searched from the character's column onward. Coins
/// report the bottommost coin of their column; boxes report the topmost.
///
/// # Errors
///
/// Returns [`SceneError::CharacterNotFound`] when the frame holds no
/// character tile.
pub fn parse(grid: &TileGrid) -> Result<EntitySnapshot, SceneError> {
    let character = first_by_row(grid, |code| TileKind::Character.matches(code))
        .ok_or(SceneError::CharacterNotFound)?;

    let mushroom = first_by_row(grid, |code| TileKind::Mushroom.matches(code));

    let depth = usize::try_from(character.y).unwrap_or_default();
    let enemy = first_by_column(grid, depth, ColumnEnd::First, TileKind::is_enemy_code).and_then(
        |(position, code)| TileKind::from_code(code).map(|kind| Enemy { position, kind }),
    );

    let question_box = first_by_column(grid, 0, ColumnEnd::First, |code| {
        TileKind::Box.matches(code)
    })
    .map(|(position, _)| position);

    let coin = first_by_column(grid, 0, ColumnEnd::Last, |code| TileKind::Coin.matches(code))
        .map(|(position, _)| position);

    Ok(EntitySnapshot {
        character,
        enemy,
        mushroom,
        question_box,
        coin,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn grid(tiles: &[(usize, usize, TileKind)]) -> TileGrid {
        tiles
            .iter()
            .try_fold(TileGrid::default(), |grid, &(row, column, kind)| {
                grid.with(row, column, kind)
            })
            .unwrap()
    }

    #[test]
    fn missing_character_is_a_parse_miss() {
        let frame = grid(&[(3, 3, TileKind::Mushroom)]);
        assert_eq!(parse(&frame), Err(SceneError::CharacterNotFound));
    }

    #[test]
    fn character_position_is_row_then_column() {
        let frame = grid(&[(12, 7, TileKind::Character)]);
        let scene = parse(&frame).unwrap();
        assert_eq!(scene.character, Position::new(12, 7));
        assert_eq!(scene, EntitySnapshot::with_character(Position::new(12, 7)));
    }

    #[test]
    fn character_uses_first_row_then_leftmost_tile() {
        let frame = grid(&[
            (11, 9, TileKind::Character),
            (11, 8, TileKind::Character),
            (12, 2, TileKind::Character),
        ]);
        assert_eq!(parse(&frame).unwrap().character, Position::new(11, 8));
    }

    #[test]
    fn mushroom_uses_row_scan() {
        let frame = grid(&[
            (12, 7, TileKind::Character),
            (4, 15, TileKind::Mushroom),
            (9, 1, TileKind::Mushroom),
        ]);
        assert_eq!(parse(&frame).unwrap().mushroom, Some(Position::new(4, 15)));
    }

    #[test]
    fn enemy_scan_starts_at_character_column() {
        let frame = grid(&[
            (12, 7, TileKind::Character),
            (12, 3, TileKind::EnemyA),
            (5, 11, TileKind::EnemyC),
            (12, 11, TileKind::EnemyB),
        ]);
        let enemy = parse(&frame).unwrap().enemy.unwrap();
        assert_eq!(enemy.position, Position::new(5, 11));
        assert_eq!(enemy.kind, TileKind::EnemyC);
    }

    #[test]
    fn enemy_in_character_column_counts() {
        let frame = grid(&[(12, 7, TileKind::Character), (2, 7, TileKind::EnemyFlying)]);
        let enemy = parse(&frame).unwrap().enemy.unwrap();
        assert_eq!(enemy.position, Position::new(2, 7));
        assert!(enemy.kind.is_flying());
    }

    #[test]
    fn enemy_behind_character_is_ignored() {
        let frame = grid(&[(12, 7, TileKind::Character), (12, 6, TileKind::EnemyA)]);
        assert_eq!(parse(&frame).unwrap().enemy, None);
    }

    #[test]
    fn box_reports_topmost_tile_and_coin_bottommost() {
        let frame = grid(&[
            (12, 1, TileKind::Character),
            (6, 4, TileKind::Box),
            (9, 4, TileKind::Box),
            (3, 8, TileKind::Coin),
            (10, 8, TileKind::Coin),
            (7, 12, TileKind::Coin),
        ]);
        let scene = parse(&frame).unwrap();
        assert_eq!(scene.question_box, Some(Position::new(6, 4)));
        assert_eq!(scene.coin, Some(Position::new(10, 8)));
    }

    #[test]
    fn box_and_coin_scan_the_whole_width() {
        let frame = grid(&[
            (12, 10, TileKind::Character),
            (8, 2, TileKind::Box),
            (9, 0, TileKind::Coin),
        ]);
        let scene = parse(&frame).unwrap();
        assert_eq!(scene.question_box, Some(Position::new(8, 2)));
        assert_eq!(scene.coin, Some(Position::new(9, 0)));
    }

    #[test]
    fn absent_optional_entities_are_none() {
        let scene = parse(&grid(&[(12, 7, TileKind::Character)])).unwrap();
        assert_eq!(scene.enemy, None);
        assert_eq!(scene.mushroom, None);
        assert_eq!(scene.question_box, None);
        assert_eq!(scene.coin, None);
    }

    #[test]
    fn parsing_is_repeatable() {
        let frame = grid(&[
            (12, 7, TileKind::Character),
            (12, 9, TileKind::EnemyA),
            (8, 3, TileKind::Box),
        ]);
        assert_eq!(parse(&frame), parse(&frame));
    }

    #[test]
    fn column_scan_skips_columns_without_match() {
        let frame =
            TileGrid::from_rows(vec![vec![0, 0, 5], vec![0, 0, 0], vec![0, 5, 5]]).unwrap();
        let found = first_by_column(&frame, 0, ColumnEnd::Last, |code| code == 5);
        assert_eq!(found, Some((Position::new(2, 1), 5)));
        let found = first_by_column(&frame, 2, ColumnEnd::First, |code| code == 5);
        assert_eq!(found, Some((Position::new(0, 2), 5)));
        assert_eq!(first_by_column(&frame, 3, ColumnEnd::First, |_| true), None);
    }
}

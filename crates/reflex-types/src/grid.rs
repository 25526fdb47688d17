//! The per-frame tile grid and grid coordinates.
//!
//! A [`TileGrid`] is a rectangular, row-major snapshot of tile codes. It is
//! produced once per step by the emulator, read by the scene parser and the
//! rule guards, and dropped once the step's action is chosen.

use serde::{Deserialize, Serialize};

use crate::enums::TileKind;

/// Raw tile code as reported by the emulator.
pub type TileCode = u16;

/// Number of rows in the emulator's game area.
pub const GAME_AREA_HEIGHT: usize = 16;

/// Number of columns in the emulator's game area.
pub const GAME_AREA_WIDTH: usize = 20;

const GAME_AREA_CELLS: usize = GAME_AREA_HEIGHT * GAME_AREA_WIDTH;

/// Errors that can occur when building or editing a [`TileGrid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The grid has no rows or its rows have no tiles.
    #[error("tile grid has no cells")]
    Empty,

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// A write addressed a cell outside the grid.
    #[error("cell ({row}, {column}) is outside the grid")]
    OutOfBounds {
        /// Row index of the write.
        row: usize,
        /// Column index of the write.
        column: usize,
    },
}

/// A cell address in a [`TileGrid`].
///
/// `x` is the row index (the outer scan), `y` is the index within the row.
/// Coordinates are signed so rule guards can probe relative offsets that
/// fall off the grid; such probes simply miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index.
    pub x: i32,
    /// Column index within the row.
    pub y: i32,
}

impl Position {
    /// Create a position from a row and column index.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position `dx` rows and `dy` columns away.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Build a position from unsigned grid indices, if they fit.
    pub fn from_indices(row: usize, column: usize) -> Option<Self> {
        Some(Self {
            x: i32::try_from(row).ok()?,
            y: i32::try_from(column).ok()?,
        })
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An immutable snapshot of tile codes for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<TileCode>>", into = "Vec<Vec<TileCode>>")]
pub struct TileGrid {
    height: usize,
    width: usize,
    cells: Vec<TileCode>,
}

impl TileGrid {
    /// Build a grid from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Empty`] when there are no cells and
    /// [`GridError::Ragged`] when rows differ in length.
    pub fn from_rows(rows: Vec<Vec<TileCode>>) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, tiles)) = rows.iter().enumerate().find(|(_, tiles)| tiles.len() != width) {
            return Err(GridError::Ragged {
                row,
                expected: width,
                found: tiles.len(),
            });
        }
        let height = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of tiles per row.
    pub const fn width(&self) -> usize {
        self.width
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        if row >= self.height || column >= self.width {
            return None;
        }
        row.checked_mul(self.width)?.checked_add(column)
    }

    /// The tile code at `(row, column)`, or `None` outside the grid.
    pub fn get(&self, row: usize, column: usize) -> Option<TileCode> {
        self.index(row, column)
            .and_then(|i| self.cells.get(i))
            .copied()
    }

    /// The tile code at a signed [`Position`], or `None` outside the grid.
    pub fn at(&self, position: Position) -> Option<TileCode> {
        let row = usize::try_from(position.x).ok()?;
        let column = usize::try_from(position.y).ok()?;
        self.get(row, column)
    }

    /// Whether the tile at `position` is of `kind`. Off-grid probes are `false`.
    pub fn is(&self, position: Position, kind: TileKind) -> bool {
        self.at(position).is_some_and(|code| kind.matches(code))
    }

    /// Overwrite the tile at `(row, column)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the cell is outside the grid.
    pub fn set(&mut self, row: usize, column: usize, code: TileCode) -> Result<(), GridError> {
        let cell = self
            .index(row, column)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(GridError::OutOfBounds { row, column })?;
        *cell = code;
        Ok(())
    }

    /// Builder form of [`TileGrid::set`] taking a [`TileKind`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the cell is outside the grid.
    pub fn with(mut self, row: usize, column: usize, kind: TileKind) -> Result<Self, GridError> {
        self.set(row, column, kind.code())?;
        Ok(self)
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[TileCode]> {
        self.cells.chunks_exact(self.width)
    }

    /// The tiles of one column, top to bottom.
    ///
    /// The iterator is double-ended so a column can be searched from
    /// either end.
    pub fn column(
        &self,
        column: usize,
    ) -> Option<impl DoubleEndedIterator<Item = TileCode> + ExactSizeIterator + '_> {
        (column < self.width).then(|| {
            self.cells
                .iter()
                .skip(column)
                .step_by(self.width)
                .copied()
        })
    }

    /// Copy the grid out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<TileCode>> {
        self.rows().map(<[TileCode]>::to_vec).collect()
    }
}

impl Default for TileGrid {
    /// An all-empty grid with the emulator's game-area dimensions.
    fn default() -> Self {
        Self {
            height: GAME_AREA_HEIGHT,
            width: GAME_AREA_WIDTH,
            cells: vec![TileKind::Empty.code(); GAME_AREA_CELLS],
        }
    }
}

impl TryFrom<Vec<Vec<TileCode>>> for TileGrid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<TileCode>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<TileGrid> for Vec<Vec<TileCode>> {
    fn from(grid: TileGrid) -> Self {
        grid.to_rows()
    }
}

//! Per-cell fire state and grid coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fire state of a single forest cell
///
/// A cell only ever moves forward: `Unburnt` -> `Burning` -> `Burnt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// No fire history, eligible to ignite
    #[default]
    Unburnt,
    /// Currently on fire
    Burning,
    /// Burnt out, never ignites again
    Burnt,
}

impl CellState {
    /// Character used by the text formats (`x` for burning, `.` otherwise)
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            CellState::Burning => 'x',
            CellState::Unburnt | CellState::Burnt => '.',
        }
    }

    /// Check if the cell is currently on fire
    #[inline]
    pub fn is_burning(self) -> bool {
        self == CellState::Burning
    }
}

/// Row/column position of a cell in the forest grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    /// Orthogonal neighbours (up, down, left, right) that fall inside a
    /// `rows` x `cols` grid
    pub fn neighbours(self, rows: usize, cols: usize) -> impl Iterator<Item = Coord> {
        let up = self.row.checked_sub(1).map(|row| Coord::new(row, self.col));
        let down = (self.row + 1 < rows).then_some(Coord::new(self.row + 1, self.col));
        let left = self.col.checked_sub(1).map(|col| Coord::new(self.row, col));
        let right = (self.col + 1 < cols).then_some(Coord::new(self.row, self.col + 1));
        [up, down, left, right].into_iter().flatten()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

//! Immutable full-grid copies recorded by the forest after every step

use crate::core_types::{CellState, Coord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Owned copy of every cell state at one point of a run
///
/// Cells are stored in row-major order: `[row * cols + col]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotData")]
pub struct Snapshot {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

/// Unchecked serialised form, validated into a [`Snapshot`]
#[derive(Deserialize)]
struct SnapshotData {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

/// Serialised snapshot whose shape does not describe a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// A dimension is zero
    EmptyGrid { rows: usize, cols: usize },
    /// Cell count differs from `rows * cols`
    CellCount { expected: usize, found: usize },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::EmptyGrid { rows, cols } => {
                write!(f, "snapshot dimensions {rows}x{cols} must be positive")
            }
            SnapshotError::CellCount { expected, found } => {
                write!(f, "snapshot has {found} cells, expected {expected}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

impl TryFrom<SnapshotData> for Snapshot {
    type Error = SnapshotError;

    fn try_from(data: SnapshotData) -> Result<Self, Self::Error> {
        let SnapshotData { rows, cols, cells } = data;
        if rows == 0 || cols == 0 {
            return Err(SnapshotError::EmptyGrid { rows, cols });
        }
        let expected = rows.saturating_mul(cols);
        if cells.len() != expected {
            return Err(SnapshotError::CellCount {
                expected,
                found: cells.len(),
            });
        }
        Ok(Snapshot { rows, cols, cells })
    }
}

impl Snapshot {
    pub(crate) fn capture(rows: usize, cols: usize, cells: &[CellState]) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Snapshot {
            rows,
            cols,
            cells: cells.to_vec(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// State of a cell, or `None` if `coord` is out of bounds
    pub fn cell(&self, coord: Coord) -> Option<CellState> {
        if coord.row < self.rows && coord.col < self.cols {
            Some(self.cells[coord.row * self.cols + coord.col])
        } else {
            None
        }
    }

    /// One grid row
    ///
    /// # Panics
    /// Panics if `row >= self.rows()`
    pub fn row(&self, row: usize) -> &[CellState] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Iterate over the grid rows from top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.cols)
    }

    /// Number of cells burning in this snapshot
    pub fn burning_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_burning()).count()
    }

    /// Burning/not-burning view of the grid, `[row][col]`
    pub fn fire_map(&self) -> Vec<Vec<bool>> {
        self.iter_rows()
            .map(|row| row.iter().map(|c| c.is_burning()).collect())
            .collect()
    }
}

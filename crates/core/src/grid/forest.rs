//! Forest grid state and the discrete fire transition
//!
//! The forest owns every piece of engine state: the live cell states, the
//! monotonic "has burnt" history, the set of burning coordinates and the log of
//! snapshots. Each call to [`Forest::step`] extinguishes every burning cell and,
//! when the spread gate is open, ignites the never-burnt orthogonal neighbours.

use crate::core_types::{CellState, Coord, SpreadChance};
use crate::grid::Snapshot;
use rustc_hash::FxHashSet;
use std::fmt;
use tracing::{debug, info};

/// Validation failures when constructing a [`Forest`]
#[derive(Debug, Clone, PartialEq)]
pub enum ForestError {
    /// Rows or columns is zero
    InvalidDimensions { rows: usize, cols: usize },
    /// Spread chance is NaN or outside [0, 1]
    SpreadChanceOutOfRange(f64),
    /// Initial fire map has the wrong number of rows
    RowCountMismatch { expected: usize, found: usize },
    /// A row of the initial fire map has the wrong number of cells
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ForestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForestError::InvalidDimensions { rows, cols } => {
                write!(f, "grid dimensions must be positive, got {rows}x{cols}")
            }
            ForestError::SpreadChanceOutOfRange(value) => {
                write!(f, "fire spread chance must be within [0, 1], got {value}")
            }
            ForestError::RowCountMismatch { expected, found } => {
                write!(f, "expected {expected} grid rows, got {found}")
            }
            ForestError::RowLengthMismatch {
                row,
                expected,
                found,
            } => write!(f, "grid row {row} has {found} cells, expected {expected}"),
        }
    }
}

impl std::error::Error for ForestError {}

/// Forest grid with fire state
#[derive(Debug, Clone)]
pub struct Forest {
    rows: usize,
    cols: usize,
    spread_chance: SpreadChance,

    /// Cell states in row-major order: [row * cols + col]
    cells: Vec<CellState>,
    /// Set once a cell ignites and never cleared
    has_burnt: Vec<bool>,
    /// Coordinates whose cell is `Burning`, and only those
    burning: FxHashSet<Coord>,

    /// Index 0 is the initial state, index k the state after k steps
    snapshots: Vec<Snapshot>,
}

impl Forest {
    /// Create a forest from its dimensions, spread chance and initial fire map
    ///
    /// `fire_map[row][col]` is `true` for cells that start on fire.
    ///
    /// # Errors
    /// Returns a [`ForestError`] if a dimension is zero, the spread chance is
    /// outside [0, 1], or `fire_map` is not `rows` x `cols`
    pub fn new(
        rows: usize,
        cols: usize,
        spread_chance: f64,
        fire_map: &[Vec<bool>],
    ) -> Result<Self, ForestError> {
        if rows == 0 || cols == 0 {
            return Err(ForestError::InvalidDimensions { rows, cols });
        }
        let spread_chance = SpreadChance::new(spread_chance)?;
        if fire_map.len() != rows {
            return Err(ForestError::RowCountMismatch {
                expected: rows,
                found: fire_map.len(),
            });
        }
        if let Some((row, line)) = fire_map
            .iter()
            .enumerate()
            .find(|(_, line)| line.len() != cols)
        {
            return Err(ForestError::RowLengthMismatch {
                row,
                expected: cols,
                found: line.len(),
            });
        }

        let mut cells = vec![CellState::Unburnt; rows * cols];
        let mut has_burnt = vec![false; rows * cols];
        let mut burning = FxHashSet::default();

        for (row, line) in fire_map.iter().enumerate() {
            for (col, &on_fire) in line.iter().enumerate() {
                if on_fire {
                    let idx = row * cols + col;
                    cells[idx] = CellState::Burning;
                    has_burnt[idx] = true;
                    burning.insert(Coord::new(row, col));
                }
            }
        }

        info!(
            "Created {}x{} forest, spread chance {}, {} cells on fire",
            rows,
            cols,
            spread_chance,
            burning.len()
        );

        let snapshots = vec![Snapshot::capture(rows, cols, &cells)];

        Ok(Forest {
            rows,
            cols,
            spread_chance,
            cells,
            has_burnt,
            burning,
            snapshots,
        })
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        coord.row * self.cols + coord.col
    }

    /// Check if any cell is burning
    #[inline]
    pub fn is_on_fire(&self) -> bool {
        !self.burning.is_empty()
    }

    /// Advance the fire by one discrete step
    ///
    /// Every burning cell burns out. If the spread gate is open, each in-bounds
    /// orthogonal neighbour that is unburnt and has never burnt ignites. The
    /// resulting grid is appended to the snapshot log.
    ///
    /// Returns the number of cells ignited during this step.
    pub fn step(&mut self) -> usize {
        let spreads = self.spread_chance.allows_spread();
        let burning = std::mem::take(&mut self.burning);
        let extinguished = burning.len();
        let mut next = FxHashSet::default();

        for coord in burning {
            let idx = self.index(coord);
            self.cells[idx] = CellState::Burnt;

            if !spreads {
                continue;
            }

            for neighbour in coord.neighbours(self.rows, self.cols) {
                let n_idx = self.index(neighbour);
                // has_burnt is set on ignition, so cells burnt out earlier in
                // this step (or still burning from the last one) are skipped
                if self.cells[n_idx] == CellState::Unburnt && !self.has_burnt[n_idx] {
                    self.cells[n_idx] = CellState::Burning;
                    self.has_burnt[n_idx] = true;
                    next.insert(neighbour);
                }
            }
        }

        let ignited = next.len();
        self.burning = next;
        self.snapshots
            .push(Snapshot::capture(self.rows, self.cols, &self.cells));

        debug!(
            "Step {}: {} cells burnt out, {} ignited",
            self.steps_taken(),
            extinguished,
            ignited
        );

        ignited
    }

    /// Recorded grid states: index 0 is the initial state, index k the state
    /// after k steps
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Number of steps applied so far
    pub fn steps_taken(&self) -> usize {
        self.snapshots.len() - 1
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn spread_chance(&self) -> SpreadChance {
        self.spread_chance
    }

    /// Current state of a cell, or `None` if `coord` is out of bounds
    pub fn cell(&self, coord: Coord) -> Option<CellState> {
        if coord.row < self.rows && coord.col < self.cols {
            Some(self.cells[self.index(coord)])
        } else {
            None
        }
    }

    /// Whether the cell has ever been on fire (false when out of bounds)
    pub fn has_burnt(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols && self.has_burnt[self.index(coord)]
    }

    /// Coordinates currently burning, in no particular order
    pub fn burning_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.burning.iter().copied()
    }

    /// Number of cells that have ever been on fire
    pub fn burnt_count(&self) -> usize {
        self.has_burnt.iter().filter(|&&b| b).count()
    }

    /// Burning/not-burning view of the live grid, `[row][col]`
    pub fn fire_map(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|c| c.is_burning()).collect())
            .collect()
    }
}

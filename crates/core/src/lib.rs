//! Forest Fire Simulation Core Library
//!
//! Simulates fire spreading across a 2D forest grid. Every cell is unburnt,
//! burning or burnt. Each step burns out the burning cells and, when the fire
//! spread chance is at least 0.5, ignites every orthogonal neighbour that has
//! never burnt. A run continues until nothing is burning.
//!
//! ```
//! use forest_fire_core::{parse_forest, render_transitions, FireSimulator};
//!
//! let forest = parse_forest("1 3\n0.6\nx..\n").unwrap();
//! let mut sim = FireSimulator::new(forest);
//! let summary = sim.run();
//!
//! assert_eq!(summary.steps, 3);
//! assert_eq!(
//!     render_transitions(sim.forest()),
//!     "1 3\n0.6\n\nx..\n\n.x.\n\n..x\n\n...\n\n"
//! );
//! ```

// Core types and utilities
pub mod core_types;

// Forest state, snapshots and input loading
pub mod grid;

// Run driver, transition files and batch processing
pub mod simulation;

// Re-export core types
pub use core_types::{CellState, Coord, SpreadChance, SPREAD_THRESHOLD};

// Re-export grid types
pub use grid::{load_forest, parse_forest, Forest, ForestError, LoadError, Snapshot, SnapshotError};

// Re-export simulation types
pub use simulation::{
    parse_transitions, render_transitions, run_batch, save_transitions, BatchConfig, BatchError,
    BatchReport, FileError, FileOutcome, FireSimulator, PersistenceError, RunSummary,
    TransitionLog,
};

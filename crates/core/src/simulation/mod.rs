//! Fire simulation driver
//!
//! `FireSimulator` steps a [`Forest`] until no cell is burning. The forest keeps
//! a snapshot after every step, so once a run finishes its full history can be
//! written out with [`save_transitions`].

pub mod batch;
pub mod persistence;

pub use batch::{run_batch, BatchConfig, BatchError, BatchReport, FileError, FileOutcome};
pub use persistence::{
    parse_transitions, render_transitions, save_transitions, PersistenceError, TransitionLog,
};

use crate::grid::{Forest, Snapshot};
use tracing::debug;

/// Totals for one completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps applied until the fire went out
    pub steps: usize,
    /// Cells that were on fire at some point, including the initial fire
    pub cells_burnt: usize,
    /// Largest number of cells burning at once during the run
    pub peak_burning: usize,
}

/// Runs a forest until the fire burns out
#[derive(Debug)]
pub struct FireSimulator {
    forest: Forest,
}

impl FireSimulator {
    pub fn new(forest: Forest) -> Self {
        Self { forest }
    }

    /// Step the forest while anything is burning
    ///
    /// Always terminates: each step either ignites cells that have never
    /// burnt or leaves nothing burning, so a run takes at most `rows * cols`
    /// steps.
    pub fn run(&mut self) -> RunSummary {
        let start = self.forest.steps_taken();
        while self.forest.is_on_fire() {
            self.forest.step();
        }

        let summary = RunSummary {
            steps: self.forest.steps_taken() - start,
            cells_burnt: self.forest.burnt_count(),
            peak_burning: self.forest.snapshots()[start..]
                .iter()
                .map(Snapshot::burning_count)
                .max()
                .unwrap_or(0),
        };
        debug!(
            "Fire burnt out after {} steps, {} of {} cells burnt, at most {} at once",
            summary.steps,
            summary.cells_burnt,
            self.forest.rows() * self.forest.cols(),
            summary.peak_burning
        );
        summary
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn into_forest(self) -> Forest {
        self.forest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::parse_forest;

    #[test]
    fn test_run_until_extinguished() {
        let forest = parse_forest("3 3\n1\n...\n.x.\n...\n").unwrap();
        let mut sim = FireSimulator::new(forest);
        let summary = sim.run();

        assert!(!sim.forest().is_on_fire());
        // centre, then the 4 edges, then the 4 corners
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.cells_burnt, 9);
        assert_eq!(summary.peak_burning, 4);
        assert_eq!(sim.forest().snapshots().len(), 4);
    }

    #[test]
    fn test_run_without_fire_takes_no_steps() {
        let forest = parse_forest("2 2\n0.9\n..\n..\n").unwrap();
        let mut sim = FireSimulator::new(forest);
        assert_eq!(
            sim.run(),
            RunSummary {
                steps: 0,
                cells_burnt: 0,
                peak_burning: 0
            }
        );
        assert_eq!(sim.into_forest().snapshots().len(), 1);
    }

    #[test]
    fn test_second_run_is_noop() {
        let forest = parse_forest("1 3\n0.5\nx..\n").unwrap();
        let mut sim = FireSimulator::new(forest);
        assert_eq!(sim.run().steps, 3);
        let again = sim.run();
        assert_eq!(again.steps, 0);
        assert_eq!(again.peak_burning, 0);
    }
}

//! Transition files: the header followed by every recorded snapshot
//!
//! ```text
//! <rows> <columns>
//! <fire spread chance>
//!
//! <snapshot 0: rows lines, 'x' burning, '.' otherwise>
//!
//! <snapshot 1>
//!
//! ...
//! ```
//!
//! Burnt and unburnt cells both render as `.`.

use crate::core_types::SpreadChance;
use crate::grid::Forest;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Transition file contents read back into memory
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionLog {
    pub rows: usize,
    pub cols: usize,
    pub spread_chance: SpreadChance,
    /// Burning view of each snapshot, `[snapshot][row][col]`
    pub frames: Vec<Vec<Vec<bool>>>,
}

impl TransitionLog {
    /// Rebuild forest input text from one recorded frame
    ///
    /// Cells burning in that frame become the initial fire.
    pub fn frame_as_input(&self, index: usize) -> Option<String> {
        let frame = self.frames.get(index)?;
        let mut out = format!("{} {}\n{}\n", self.rows, self.cols, self.spread_chance);
        for row in frame {
            out.extend(row.iter().map(|&on_fire| if on_fire { 'x' } else { '.' }));
            out.push('\n');
        }
        Some(out)
    }
}

/// Render the header and every snapshot of a forest
pub fn render_transitions(forest: &Forest) -> String {
    let snapshots = forest.snapshots();
    let block_len = forest.rows() * (forest.cols() + 1) + 1;
    let mut out = String::with_capacity(block_len * snapshots.len());

    // Writing to a String cannot fail
    let _ = write!(
        out,
        "{} {}\n{}\n\n",
        forest.rows(),
        forest.cols(),
        forest.spread_chance()
    );
    for snapshot in snapshots {
        for row in snapshot.iter_rows() {
            out.extend(row.iter().map(|c| c.symbol()));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Write every snapshot of a forest to `path`
///
/// # Errors
/// Returns [`PersistenceError::SaveFailed`] if the file cannot be written
pub fn save_transitions<P: AsRef<Path>>(
    forest: &Forest,
    path: P,
) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    fs::write(path, render_transitions(forest))
        .map_err(|e| PersistenceError::SaveFailed(format!("{}: {e}", path.display())))
}

/// Read a transition file produced by [`render_transitions`]
///
/// # Errors
/// Returns [`PersistenceError::ParseFailed`] if the text does not follow the
/// transition format
pub fn parse_transitions(text: &str) -> Result<TransitionLog, PersistenceError> {
    let fail =
        |line: usize, msg: &str| PersistenceError::ParseFailed(format!("line {line}: {msg}"));
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (line, header) = lines.next().ok_or_else(|| fail(1, "missing dimensions"))?;
    let dims: Vec<usize> = header
        .split_whitespace()
        .map(str::parse::<usize>)
        .collect::<Result<Vec<usize>, _>>()
        .map_err(|_| fail(line, "dimensions must be integers"))?;
    let [rows, cols] = dims[..] else {
        return Err(fail(line, "expected '<rows> <columns>'"));
    };
    if rows == 0 || cols == 0 {
        return Err(fail(line, "dimensions must be positive"));
    }

    let (line, chance) = lines.next().ok_or_else(|| fail(2, "missing spread chance"))?;
    let spread_chance = chance
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|value| SpreadChance::new(value).ok())
        .ok_or_else(|| fail(line, "spread chance must be a number between 0 and 1"))?;

    match lines.next() {
        Some((_, "")) => {}
        Some((line, _)) => return Err(fail(line, "expected blank line after header")),
        None => return Err(fail(3, "missing blank line after header")),
    }

    let mut frames = Vec::new();
    while let Some((line, first)) = lines.next() {
        // Extra blank lines may follow the last snapshot
        if first.is_empty() {
            if let Some((line, _)) = lines.find(|(_, l)| !l.is_empty()) {
                return Err(fail(line, "unexpected text after blank line"));
            }
            break;
        }
        let mut frame = Vec::with_capacity(rows);
        let mut current = Some((line, first));
        for _ in 0..rows {
            let (line, row_text) = current
                .take()
                .or_else(|| lines.next())
                .ok_or_else(|| fail(line, "snapshot is truncated"))?;
            if row_text.chars().count() != cols {
                return Err(fail(line, "snapshot row has the wrong length"));
            }
            let row = row_text
                .chars()
                .map(|c| match c {
                    'x' => Ok(true),
                    '.' => Ok(false),
                    _ => Err(fail(line, "snapshot cells must be '.' or 'x'")),
                })
                .collect::<Result<Vec<bool>, _>>()?;
            frame.push(row);
        }
        match lines.next() {
            Some((_, "")) | None => {}
            Some((line, _)) => return Err(fail(line, "expected blank line after snapshot")),
        }
        frames.push(frame);
    }

    Ok(TransitionLog {
        rows,
        cols,
        spread_chance,
        frames,
    })
}

/// Transition file errors
#[derive(Debug)]
pub enum PersistenceError {
    /// Failed to parse file contents
    ParseFailed(String),
    /// Failed to save file
    SaveFailed(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            PersistenceError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::parse_forest;
    use crate::simulation::FireSimulator;

    #[test]
    fn test_render_single_snapshot() {
        let forest = parse_forest("1 2\n0.3\nx.\n").unwrap();
        assert_eq!(render_transitions(&forest), "1 2\n0.3\n\nx.\n\n");
    }

    #[test]
    fn test_render_after_run() {
        let mut sim = FireSimulator::new(parse_forest("1 2\n1\nx.\n").unwrap());
        sim.run();
        assert_eq!(
            render_transitions(sim.forest()),
            "1 2\n1.0\n\nx.\n\n.x\n\n..\n\n"
        );
    }

    #[test]
    fn test_parse_rendered_output() {
        let mut sim = FireSimulator::new(parse_forest("2 2\n0.5\nx.\n..\n").unwrap());
        sim.run();
        let log = parse_transitions(&render_transitions(sim.forest())).unwrap();
        assert_eq!(log.rows, 2);
        assert_eq!(log.cols, 2);
        assert_eq!(log.spread_chance.value(), 0.5);
        assert_eq!(log.frames.len(), sim.forest().snapshots().len());
        assert_eq!(log.frames[1], vec![vec![false, true], vec![true, false]]);
    }

    #[test]
    fn test_frame_as_input() {
        let log = parse_transitions("1 3\n0.7\n\n.x.\n\n").unwrap();
        assert_eq!(log.frame_as_input(0).unwrap(), "1 3\n0.7\n.x.\n");
        assert_eq!(log.frame_as_input(1), None);
    }

    #[test]
    fn test_parse_allows_trailing_blank_lines() {
        let log = parse_transitions("1 1\n0.5\n\nx\n\n.\n\n\n").unwrap();
        assert_eq!(log.frames, vec![vec![vec![true]], vec![vec![false]]]);

        let err = parse_transitions("1 1\n0.5\n\nx\n\n\n.\n\n").unwrap_err();
        assert!(matches!(err, PersistenceError::ParseFailed(ref msg) if msg.starts_with("line 7")));
    }

    #[test]
    fn test_parse_rejects_truncated_snapshot() {
        let err = parse_transitions("2 1\n0.5\n\nx\n").unwrap_err();
        assert!(matches!(err, PersistenceError::ParseFailed(_)));
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        assert!(parse_transitions("2\n0.5\n\n").is_err());
        assert!(parse_transitions("1 1\n7\n\n.\n\n").is_err());
        assert!(parse_transitions("1 1\n0.5\n.\n").is_err());
    }
}

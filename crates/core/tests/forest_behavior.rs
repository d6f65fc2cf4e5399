//! Forest transition behaviour on the reference fixture grids
//!
//! Fixtures live in `tests/fixtures/` and use the plain-text input format.

use forest_fire_core::{load_forest, CellState, Coord, Forest, LoadError};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> Forest {
    load_forest(fixture(name)).unwrap_or_else(|e| panic!("{name}: {e}"))
}

#[test]
fn test_forest_with_fire_is_on_fire() {
    assert!(load("2x1onfire.txt").is_on_fire());
}

#[test]
fn test_forest_without_fire_is_not_on_fire() {
    assert!(!load("2x1-not-on-fire.txt").is_on_fire());
}

#[test]
fn test_fire_does_not_spread_below_threshold_2x1() {
    let mut forest = load("2x1onfire.txt");
    forest.step();

    assert_eq!(forest.fire_map(), vec![vec![false], vec![false]]);
    assert!(!forest.is_on_fire());
    assert_eq!(forest.cell(Coord::new(1, 0)), Some(CellState::Unburnt));
}

#[test]
fn test_fire_does_not_spread_below_threshold_1x2() {
    let mut forest = load("1x2-low-chance.txt");
    forest.step();

    assert_eq!(forest.fire_map(), vec![vec![false, false]]);
    assert!(!forest.is_on_fire());
}

#[test]
fn test_fire_spreads_on_1x2() {
    let mut forest = load("1x2.txt");
    forest.step();

    assert_eq!(forest.fire_map(), vec![vec![false, true]]);
    assert!(forest.is_on_fire());
}

#[test]
fn test_fire_spreads_on_4x3() {
    let mut forest = load("4x3.txt");
    assert!(forest.spread_chance().allows_spread());
    forest.step();

    let expected = vec![
        vec![true, true, false],
        vec![false, true, false],
        vec![false, false, false],
        vec![false, true, true],
    ];
    assert_eq!(forest.fire_map(), expected);
    assert!(forest.is_on_fire());
    assert_eq!(forest.snapshots()[1].fire_map(), expected);
}

#[test]
fn test_4x3_initial_fire_is_burnt_after_step() {
    let mut forest = load("4x3.txt");
    let initial: Vec<Coord> = forest.burning_cells().collect();
    forest.step();

    for coord in initial {
        assert_eq!(forest.cell(coord), Some(CellState::Burnt), "{coord}");
        assert!(forest.has_burnt(coord));
    }
}

#[test]
fn test_is_on_fire_does_not_change_state() {
    let forest = load("4x3.txt");
    let before = forest.fire_map();
    for _ in 0..5 {
        assert!(forest.is_on_fire());
    }
    assert_eq!(forest.fire_map(), before);
    assert_eq!(forest.snapshots().len(), 1);
}

#[test]
fn test_snapshot_zero_is_initial_state() {
    let mut forest = load("3x3.txt");
    let initial = forest.fire_map();
    forest.step();
    forest.step();

    assert_eq!(forest.snapshots()[0].fire_map(), initial);
    assert_eq!(forest.snapshots().len(), forest.steps_taken() + 1);
}

#[test]
fn test_invalid_fixture_is_rejected() {
    let err = load_forest(fixture("invalid-cell.txt")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::InvalidCell {
            line: 4,
            column: 2,
            found: '#'
        }
    ));
}

//! Forest loading from the plain-text grid format
//!
//! ```text
//! <rows> <columns>
//! <fire spread chance>
//! <row 0: `columns` characters of '.' or 'x'>
//! ...
//! <row rows-1>
//! ```
//!
//! - Rows and columns are 1-9999 without leading zeros
//! - The spread chance is `0`, `1`, or a decimal such as `0.55` or `1.0`
//! - `x` marks a cell that starts on fire, `.` an unburnt cell
//!
//! Every line is trimmed before validation. Blank lines after the grid are
//! ignored; any other trailing content is rejected.

use crate::grid::{Forest, ForestError};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Largest number of digits accepted for a grid dimension
const MAX_DIMENSION_DIGITS: usize = 4;

/// Reasons a forest file cannot be loaded
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read
    Io { path: PathBuf, source: io::Error },
    /// The input ended before a required line
    MissingLine { line: usize, expected: &'static str },
    /// The first line is not two whitespace-separated values
    InvalidHeader { line: usize, found: String },
    /// A dimension is not an integer between 1 and 9999
    InvalidDimension { name: &'static str, value: String },
    /// The spread chance is not a decimal within [0, 1]
    InvalidSpreadChance { line: usize, value: String },
    /// A grid row holds something other than '.' or 'x'
    InvalidCell {
        line: usize,
        column: usize,
        found: char,
    },
    /// A grid row has the wrong number of cells
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Non-blank content after the last grid row
    UnexpectedTrailingLine { line: usize },
    /// The parsed values were rejected by the forest
    Forest(ForestError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "Failed to read {}: {source}", path.display())
            }
            LoadError::MissingLine { line, expected } => {
                write!(f, "Line {line}: missing {expected}")
            }
            LoadError::InvalidHeader { line, found } => write!(
                f,
                "Line {line}: expected '<rows> <columns>', got '{found}'"
            ),
            LoadError::InvalidDimension { name, value } => write!(
                f,
                "Grid {name} must be an integer between 1 and 9999, got '{value}'"
            ),
            LoadError::InvalidSpreadChance { line, value } => write!(
                f,
                "Line {line}: fire spread chance must be a number between 0 and 1, got '{value}'"
            ),
            LoadError::InvalidCell {
                line,
                column,
                found,
            } => write!(
                f,
                "Line {line}, column {column}: grid cells must be '.' or 'x', got '{found}'"
            ),
            LoadError::RowLength {
                line,
                expected,
                found,
            } => write!(
                f,
                "Line {line}: grid row has {found} cells, expected {expected}"
            ),
            LoadError::UnexpectedTrailingLine { line } => {
                write!(f, "Line {line}: unexpected content after the last grid row")
            }
            LoadError::Forest(err) => write!(f, "Invalid forest: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Forest(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ForestError> for LoadError {
    fn from(err: ForestError) -> Self {
        LoadError::Forest(err)
    }
}

/// Load a forest from a file
///
/// # Errors
/// Returns [`LoadError::Io`] if the file cannot be read, or any validation
/// error from [`parse_forest`]
pub fn load_forest<P: AsRef<Path>>(path: P) -> Result<Forest, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_forest(&text)
}

/// Parse a forest from the text format
///
/// # Errors
/// Returns a [`LoadError`] naming the first violated constraint. No forest is
/// built unless the whole input is valid.
pub fn parse_forest(text: &str) -> Result<Forest, LoadError> {
    // (1-based line number, trimmed line)
    let mut lines = text.lines().map(str::trim).enumerate().map(|(i, l)| (i + 1, l));

    let (line, header) = lines.next().ok_or(LoadError::MissingLine {
        line: 1,
        expected: "grid dimensions",
    })?;
    let mut dims = header.split_whitespace();
    let (Some(rows), Some(cols), None) = (dims.next(), dims.next(), dims.next()) else {
        return Err(LoadError::InvalidHeader {
            line,
            found: header.to_string(),
        });
    };
    let rows = parse_dimension("rows", rows)?;
    let cols = parse_dimension("columns", cols)?;

    let (line, chance) = lines.next().ok_or(LoadError::MissingLine {
        line: 2,
        expected: "fire spread chance",
    })?;
    let spread_chance = parse_spread_chance(line, chance)?;

    let mut fire_map = Vec::with_capacity(rows);
    for row in 0..rows {
        let (line, row_text) = lines.next().ok_or(LoadError::MissingLine {
            line: row + 3,
            expected: "grid row",
        })?;
        fire_map.push(parse_row(line, row_text, cols)?);
    }

    if let Some((line, _)) = lines.find(|(_, l)| !l.is_empty()) {
        return Err(LoadError::UnexpectedTrailingLine { line });
    }

    Ok(Forest::new(rows, cols, spread_chance, &fire_map)?)
}

/// Dimensions match `^[1-9]\d{0,3}$`
fn parse_dimension(name: &'static str, value: &str) -> Result<usize, LoadError> {
    let valid = (1..=MAX_DIMENSION_DIGITS).contains(&value.len())
        && value.bytes().all(|b| b.is_ascii_digit())
        && !value.starts_with('0');
    let invalid = || LoadError::InvalidDimension {
        name,
        value: value.to_string(),
    };
    if !valid {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

/// Accepts `0`, `1`, `0.<digits>` and `1.<zeros>`
fn parse_spread_chance(line: usize, value: &str) -> Result<f64, LoadError> {
    let invalid = || LoadError::InvalidSpreadChance {
        line,
        value: value.to_string(),
    };

    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };
    let fraction_ok = fraction.is_none_or(|digits| {
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    });
    let in_range = match whole {
        "0" => true,
        "1" => fraction.is_none_or(|digits| digits.bytes().all(|b| b == b'0')),
        _ => false,
    };
    if !fraction_ok || !in_range {
        return Err(invalid());
    }

    value.parse().map_err(|_| invalid())
}

fn parse_row(line: usize, text: &str, cols: usize) -> Result<Vec<bool>, LoadError> {
    let row = text
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            'x' => Ok(true),
            '.' => Ok(false),
            found => Err(LoadError::InvalidCell {
                line,
                column: i + 1,
                found,
            }),
        })
        .collect::<Result<Vec<bool>, LoadError>>()?;

    if row.len() != cols {
        return Err(LoadError::RowLength {
            line,
            expected: cols,
            found: row.len(),
        });
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Coord;

    #[test]
    fn test_parse_valid_forest() {
        let forest = parse_forest("2 3\n0.6\nx..\n..x\n").unwrap();
        assert_eq!(forest.rows(), 2);
        assert_eq!(forest.cols(), 3);
        assert!((forest.spread_chance().value() - 0.6).abs() < f64::EPSILON);
        assert_eq!(
            forest.fire_map(),
            vec![vec![true, false, false], vec![false, false, true]]
        );
    }

    #[test]
    fn test_lines_are_trimmed() {
        let forest = parse_forest("  1 2 \r\n 1 \r\n .x  \r\n\r\n").unwrap();
        assert!(forest.cell(Coord::new(0, 1)).unwrap().is_burning());
    }

    #[test]
    fn test_dimension_rules() {
        assert!(parse_dimension("rows", "1").is_ok());
        assert_eq!(parse_dimension("rows", "9999").unwrap(), 9999);
        for bad in ["0", "01", "10000", "-1", "1.5", "a", ""] {
            assert!(
                matches!(
                    parse_dimension("rows", bad),
                    Err(LoadError::InvalidDimension { name: "rows", .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_spread_chance_rules() {
        for good in ["0", "1", "0.5", "0.0", "1.0", "1.000", "0.123456"] {
            assert!(parse_spread_chance(2, good).is_ok(), "{good} should parse");
        }
        for bad in ["1.5", "2", "-0.5", ".5", "0.", "1.01", "0,5", "abc", "", "00.5"] {
            assert!(
                matches!(
                    parse_spread_chance(2, bad),
                    Err(LoadError::InvalidSpreadChance { line: 2, .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_header() {
        let err = parse_forest("3\n0.5\n...\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidHeader { line: 1, .. }));
        let err = parse_forest("1 1 1\n0.5\n.\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidHeader { line: 1, .. }));
    }

    #[test]
    fn test_invalid_cell_character() {
        let err = parse_forest("1 3\n0.5\n.o.\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidCell {
                line: 3,
                column: 2,
                found: 'o'
            }
        ));
    }

    #[test]
    fn test_wrong_row_length() {
        let err = parse_forest("2 2\n0.5\n..\n...\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::RowLength {
                line: 4,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_missing_rows() {
        let err = parse_forest("3 1\n0.5\nx\n.\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingLine {
                line: 5,
                expected: "grid row"
            }
        ));
        let err = parse_forest("").unwrap_err();
        assert!(matches!(err, LoadError::MissingLine { line: 1, .. }));
        let err = parse_forest("1 1\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingLine { line: 2, .. }));
    }

    #[test]
    fn test_extra_rows_rejected() {
        let err = parse_forest("1 1\n0.5\nx\n\n.\n").unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedTrailingLine { line: 5 }));
    }

    #[test]
    fn test_error_messages_name_constraint() {
        let err = parse_forest("1 2\n0.5\n.\n").unwrap_err();
        assert_eq!(err.to_string(), "Line 3: grid row has 1 cells, expected 2");
        let err = parse_forest("0 2\n0.5\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Grid rows must be an integer between 1 and 9999, got '0'"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_forest("definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}

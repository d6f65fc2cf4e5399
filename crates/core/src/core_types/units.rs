//! Validated scalar types shared by the grid and the text formats

use crate::grid::ForestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Spread chance at or above which fire crosses to neighbouring cells.
///
/// The chance is a fixed gate for the whole run: every eligible neighbour
/// ignites when it is open and none do when it is closed. No random draw is
/// made per step or per neighbour.
pub const SPREAD_THRESHOLD: f64 = 0.5;

/// Fire spread chance in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
#[repr(transparent)]
pub struct SpreadChance(f64);

impl SpreadChance {
    /// Create a spread chance, rejecting NaN and values outside [0, 1]
    ///
    /// # Errors
    /// Returns [`ForestError::SpreadChanceOutOfRange`] if `value` is not in [0, 1]
    pub fn new(value: f64) -> Result<Self, ForestError> {
        if (0.0..=1.0).contains(&value) {
            Ok(SpreadChance(value))
        } else {
            Err(ForestError::SpreadChanceOutOfRange(value))
        }
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether burning cells ignite their neighbours under this chance
    #[inline]
    pub fn allows_spread(self) -> bool {
        self.0 >= SPREAD_THRESHOLD
    }
}

impl Deref for SpreadChance {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl TryFrom<f64> for SpreadChance {
    type Error = ForestError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        SpreadChance::new(value)
    }
}

impl From<SpreadChance> for f64 {
    fn from(chance: SpreadChance) -> f64 {
        chance.0
    }
}

impl fmt::Display for SpreadChance {
    // Whole numbers keep one decimal place ("1.0", "0.0") so the header of a
    // transition file always reads back as a decimal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

//! Core types and utilities

pub mod cell;
pub mod units;

pub use cell::*;
pub use units::*;

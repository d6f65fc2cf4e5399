//! Forest grid, snapshot log and input loading

pub mod forest;
pub mod forest_loader;
pub mod snapshot;

// Re-export main types
pub use forest::*;
pub use forest_loader::*;
pub use snapshot::*;

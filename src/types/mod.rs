//! Shared data structures for synthetic pavement traces
//!
//! - `Signal`, `Channel`, `TimeAxis`: the N x 6 trace and its timestamps
//! - `TerrainClass`, `GeneratorKind`: labels, severity ranking, and the
//!   generator types that produce them

mod signal;
mod terrain;

pub use signal::*;
pub use terrain::*;

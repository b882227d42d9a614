//! Board topology and cell occupancy.
//!
//! - `Board`: static per-seat paths, safe cells, inner-path threshold
//! - `Occupancy`: live map of which tokens stand on which cell

pub mod occupancy;
pub mod topology;

pub use occupancy::{Occupancy, Occupants};
pub use topology::{Board, CellId, Transit, HOME, INNER_PATH_SPAN};

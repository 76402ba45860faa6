//! World simulation - grid store, reactions, movement, brush

mod brush;
mod grid;
mod movement;
mod processed;
mod reactions;
pub mod rng;
pub mod stats;
#[allow(clippy::module_inception)]
mod world;

pub use grid::Grid;
pub use processed::ProcessedMask;
pub use rng::SimRng;
pub use stats::{NoopStats, SimStats};
pub use world::{World, WorldError};

//! # Ashfall Core
//!
//! The simulation core of Ashfall: a dense cell grid, per-tick reaction
//! and movement engines, and the step scheduler that drives them.
//!
//! Rendering and input live outside this crate; they interact with the
//! core only through the read-only accessors and brush entry points on
//! [`world::World`].

pub mod config;
pub mod world;

// Re-export the data crate for downstream convenience
pub mod simulation {
    pub use ashfall_simulation::*;
}

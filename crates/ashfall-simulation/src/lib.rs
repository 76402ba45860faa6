//! Material simulation data for Ashfall
//!
//! This crate provides the foundational data types for the falling-sand
//! simulation:
//! - Material definitions (MaterialId, Material, Materials)
//! - Material phases and reactive flags (Phase, Reactivity)
//! - Cell type and grid dimension constants (Cell, GRID_WIDTH, GRID_HEIGHT)

mod cell;
mod materials;

pub use cell::{Cell, GRID_HEIGHT, GRID_WIDTH};
pub use materials::{Material, MaterialId, Materials, Phase, Reactivity};

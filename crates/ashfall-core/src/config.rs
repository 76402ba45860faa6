//! Configuration for simulation construction

use ashfall_simulation::{GRID_HEIGHT, GRID_WIDTH};
use serde::{Deserialize, Serialize};

/// Construction parameters for a [`World`](crate::world::World)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Grid width in cells
    pub width: i32,
    /// Grid height in cells
    pub height: i32,
    /// RNG seed; a fixed seed reproduces a run exactly
    pub seed: u64,
    /// Default brush radius for the input layer
    pub brush_radius: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH as i32,
            height: GRID_HEIGHT as i32,
            seed: 42,
            brush_radius: 3,
        }
    }
}

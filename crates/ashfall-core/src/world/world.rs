//! World - owns the grid and drives the simulation loop

use log::info;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use ashfall_simulation::{Cell, Materials, GRID_HEIGHT, GRID_WIDTH};

use super::brush::Brush;
use super::grid::Grid;
use super::movement::MovementSystem;
use super::processed::ProcessedMask;
use super::reactions::{ReactionOutcome, ReactionSystem};
use super::stats::{NoopStats, SimStats};
use crate::config::SimConfig;

#[derive(thiserror::Error, Debug)]
pub enum WorldError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

/// Simulation world: grid, material table, RNG, and tick state
pub struct World {
    grid: Grid,
    materials: Materials,
    rng: Xoshiro256StarStar,
    processed: ProcessedMask,
    paused: bool,
    particle_count: usize,
}

impl World {
    /// Create a world with the standard grid dimensions
    pub fn new(seed: u64) -> World {
        info!(
            "Creating {}x{} world with seed {}",
            GRID_WIDTH, GRID_HEIGHT, seed
        );
        World {
            grid: Grid::new(GRID_WIDTH, GRID_HEIGHT),
            materials: Materials::new(),
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            processed: ProcessedMask::new(GRID_WIDTH * GRID_HEIGHT),
            paused: false,
            particle_count: 0,
        }
    }

    /// Create a world with custom dimensions
    pub fn with_size(width: i32, height: i32, seed: u64) -> Result<World, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        info!("Creating {}x{} world with seed {}", width, height, seed);
        Ok(World {
            grid: Grid::new(width as usize, height as usize),
            materials: Materials::new(),
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            processed: ProcessedMask::new((width * height) as usize),
            paused: false,
            particle_count: 0,
        })
    }

    pub fn from_config(config: &SimConfig) -> Result<World, WorldError> {
        Self::with_size(config.width, config.height, config.seed)
    }

    /// Advance one tick unless paused
    pub fn update(&mut self) {
        if self.paused {
            return;
        }
        self.step();
    }

    /// Advance one tick unconditionally
    pub fn step(&mut self) {
        self.step_with(&mut NoopStats);
    }

    /// Advance one tick, reporting movement and reaction events to
    /// `stats`. Sweeps bottom row first so falling matter lands before
    /// the matter above it moves, alternating scan direction per row
    /// to keep lateral flow symmetric.
    pub fn step_with(&mut self, stats: &mut dyn SimStats) {
        self.processed.clear();
        let mut count = 0;

        for y in (0..self.grid.height()).rev() {
            let left_to_right = y % 2 == 0;
            for i in 0..self.grid.width() {
                let x = if left_to_right {
                    i
                } else {
                    self.grid.width() - 1 - i
                };
                let cell = self.grid.cell(x, y);
                if cell.is_empty() {
                    continue;
                }
                count += 1;
                if self.processed.contains(self.grid.index(x, y)) {
                    continue;
                }
                self.update_cell(x, y, stats);
            }
        }

        self.particle_count = count;
    }

    fn update_cell(&mut self, x: i32, y: i32, stats: &mut dyn SimStats) {
        self.processed.insert(self.grid.index(x, y));

        // Sampled once; reactions may rewrite the cell underneath, and
        // movement still runs as the sampled material
        let material = self.materials.get(self.grid.get(x, y)).clone();

        let outcome = ReactionSystem::update(
            &mut self.grid,
            x,
            y,
            &material,
            &self.materials,
            stats,
            &mut self.rng,
        );
        if outcome == ReactionOutcome::Settled {
            return;
        }

        MovementSystem::update(
            &mut self.grid,
            x,
            y,
            &material,
            &self.materials,
            &self.processed,
            stats,
            &mut self.rng,
        );
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.grid.clear();
        self.processed.clear();
        self.particle_count = 0;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// Occupied cells counted during the most recent tick
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Material id at (x, y); off-grid reads return the stone sentinel
    pub fn material_at(&self, x: i32, y: i32) -> u16 {
        self.grid.get(x, y)
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        self.grid.cell(x, y)
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    /// Place a single cell of `material_id`, overwriting what is there
    pub fn set_material(&mut self, x: i32, y: i32, material_id: u16) {
        self.grid
            .set(x, y, material_id, &self.materials, &mut self.rng);
    }

    /// Paint a filled disc; painting empty erases
    pub fn paint_disc(&mut self, cx: i32, cy: i32, radius: i32, material_id: u16) {
        Brush::paint_disc(
            &mut self.grid,
            cx,
            cy,
            radius,
            material_id,
            &self.materials,
            &mut self.rng,
        );
    }

    /// Paint a stroke of discs from (x0, y0) to (x1, y1)
    pub fn paint_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, radius: i32, material_id: u16) {
        Brush::paint_line(
            &mut self.grid,
            x0,
            y0,
            x1,
            y1,
            radius,
            material_id,
            &self.materials,
            &mut self.rng,
        );
    }
}

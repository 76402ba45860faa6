//! Movement engine - gravity and buoyancy rules per material class
//!
//! Coordinates are y-down: y + 1 is below a cell, y - 1 above. All
//! movement goes through [`Grid::swap`]; a candidate destination is
//! rejected when the processed mask already claimed it this tick, in
//! which case the mover tries its next candidate or stays put.

use ashfall_simulation::{Material, MaterialId, Materials, Phase};

use super::grid::Grid;
use super::processed::ProcessedMask;
use super::rng::SimRng;
use super::stats::SimStats;

/// Movement updater - handles per-class material movement
pub(crate) struct MovementSystem;

impl MovementSystem {
    /// Move the cell at (x, y) according to its phase rules.
    ///
    /// `material` is the descriptor sampled when the cell entered its
    /// update; reactions earlier in the same visit may already have
    /// rewritten the cell, and whatever now occupies it still moves
    /// under the sampled rules.
    pub fn update<R: SimRng>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        material: &Material,
        materials: &Materials,
        processed: &ProcessedMask,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        if material.is_static {
            return;
        }

        match material.phase {
            Phase::Gas => Self::update_gas(grid, x, y, material, materials, processed, stats, rng),
            Phase::Powder => {
                Self::update_powder(grid, x, y, material, materials, processed, stats, rng)
            }
            Phase::Liquid => {
                Self::update_liquid(grid, x, y, material, materials, processed, stats, rng)
            }
            // Mobile plain solids have no movement rule
            Phase::Solid => {}
        }
    }

    /// Update gas material (rises up, disperses). Gas never falls.
    fn update_gas<R: SimRng>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        material: &Material,
        materials: &Materials,
        processed: &ProcessedMask,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        // Rise straight up, displacing strictly lighter non-gas matter
        let above = materials.get(grid.get(x, y - 1));
        let can_rise = above.id == MaterialId::EMPTY
            || (!above.is_gas() && above.density < material.density);
        if Self::try_swap(grid, processed, x, y, x, y - 1, can_rise, stats) {
            return;
        }

        // Diagonal drift picks one side only; no retry on the other
        let dx = if rng.gen_bool() { -1 } else { 1 };
        let side_up_empty = grid.get(x + dx, y - 1) == MaterialId::EMPTY;
        if Self::try_swap(grid, processed, x, y, x + dx, y - 1, side_up_empty, stats) {
            return;
        }

        // Occasional horizontal drift
        if rng.check_probability(0.3) {
            let side_empty = grid.get(x + dx, y) == MaterialId::EMPTY;
            Self::try_swap(grid, processed, x, y, x + dx, y, side_empty, stats);
        }
    }

    /// Update powder material (falls down, slides diagonally)
    fn update_powder<R: SimRng>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        material: &Material,
        materials: &Materials,
        processed: &ProcessedMask,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        // Fall straight down
        let below = materials.get(grid.get(x, y + 1));
        let can_fall = Self::can_displace_down(material, below);
        if Self::try_swap(grid, processed, x, y, x, y + 1, can_fall, stats) {
            return;
        }

        // Diagonal slide (random side first, then the mirror)
        let dx = if rng.gen_bool() { -1 } else { 1 };
        let can_slide = Self::powder_can_slide(grid, materials, x, y, dx);
        if Self::try_swap(grid, processed, x, y, x + dx, y + 1, can_slide, stats) {
            return;
        }

        let can_slide = Self::powder_can_slide(grid, materials, x, y, -dx);
        Self::try_swap(grid, processed, x, y, x - dx, y + 1, can_slide, stats);
    }

    /// Update liquid material (falls down, flows diagonally and sideways)
    fn update_liquid<R: SimRng>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        material: &Material,
        materials: &Materials,
        processed: &ProcessedMask,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        // Fall straight down
        let below = materials.get(grid.get(x, y + 1));
        let can_fall = Self::can_displace_down(material, below);
        if Self::try_swap(grid, processed, x, y, x, y + 1, can_fall, stats) {
            return;
        }

        // Diagonal down; liquids only ever flow into empty cells here
        let dx = if rng.gen_bool() { -1 } else { 1 };
        for d in [dx, -dx] {
            let diag_empty = grid.get(x + d, y + 1) == MaterialId::EMPTY;
            if Self::try_swap(grid, processed, x, y, x + d, y + 1, diag_empty, stats) {
                return;
            }
        }

        // Lateral spread, fresh direction draw
        let dx = if rng.gen_bool() { -1 } else { 1 };
        for d in [dx, -dx] {
            let side_empty = grid.get(x + d, y) == MaterialId::EMPTY;
            if Self::try_swap(grid, processed, x, y, x + d, y, side_empty, stats) {
                return;
            }
        }
    }

    /// Downward displacement rule shared by powder and liquid: empty,
    /// or a non-static non-gas resident of strictly lower density.
    fn can_displace_down(mover: &Material, below: &Material) -> bool {
        below.id == MaterialId::EMPTY
            || (!below.is_static && !below.is_gas() && below.density < mover.density)
    }

    /// A powder grain slides diagonally when the diagonal cell is empty
    /// and the lateral cell beside it offers no resistance (empty or
    /// liquid).
    fn powder_can_slide(grid: &Grid, materials: &Materials, x: i32, y: i32, dx: i32) -> bool {
        let diag = grid.get(x + dx, y + 1);
        let side = materials.get(grid.get(x + dx, y));
        diag == MaterialId::EMPTY && (side.id == MaterialId::EMPTY || side.is_liquid())
    }

    /// Swap (x, y) into (tx, ty) if `allow` holds and the destination
    /// was not already settled this tick. Returns true on success.
    fn try_swap(
        grid: &mut Grid,
        processed: &ProcessedMask,
        x: i32,
        y: i32,
        tx: i32,
        ty: i32,
        allow: bool,
        stats: &mut dyn SimStats,
    ) -> bool {
        if !allow || !grid.in_bounds(tx, ty) {
            return false;
        }
        if processed.contains(grid.index(tx, ty)) {
            return false;
        }
        grid.swap(x, y, tx, ty);
        stats.record_cell_moved();
        true
    }
}

//! Dense cell grid with sentinel-bounded accessors

use ashfall_simulation::{Cell, MaterialId, Materials};
use log::info;

use super::rng::SimRng;

/// Fixed-size W x H cell store, row-major.
///
/// Out-of-bounds reads resolve to stone (an invisible boundary wall) so
/// physics rules never branch on bounds themselves; out-of-bounds
/// writes are dropped.
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Row-major index of an in-bounds coordinate
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.in_bounds(x, y));
        (y * self.width + x) as usize
    }

    /// Material at (x, y); stone for out-of-bounds coordinates
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> u16 {
        if !self.in_bounds(x, y) {
            return MaterialId::STONE;
        }
        self.cells[self.index(x, y)].material_id
    }

    /// Full cell at (x, y); the stone sentinel for out-of-bounds
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if !self.in_bounds(x, y) {
            return Cell::new(MaterialId::STONE);
        }
        self.cells[self.index(x, y)]
    }

    /// Write a material at (x, y); no-op out of bounds.
    ///
    /// Lifetime-bearing materials start at their configured lifetime
    /// plus up to 20 ticks of jitter so batches don't expire in
    /// lockstep.
    pub fn set<R: SimRng>(
        &mut self,
        x: i32,
        y: i32,
        material_id: u16,
        materials: &Materials,
        rng: &mut R,
    ) {
        if !self.in_bounds(x, y) {
            return;
        }
        let material = materials.get(material_id);
        let lifetime = if material.has_lifetime() {
            material.lifetime + (rng.gen_f32() * 20.0) as i16
        } else {
            0
        };
        let idx = self.index(x, y);
        self.cells[idx] = Cell {
            material_id,
            lifetime,
        };
    }

    /// Exchange material and lifetime between two in-bounds cells.
    /// The only primitive that moves matter.
    pub fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let a = self.index(x1, y1);
        let b = self.index(x2, y2);
        self.cells.swap(a, b);
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        info!("clearing {}x{} grid", self.width, self.height);
        self.cells.fill(Cell::EMPTY);
    }

    /// Decrement the lifetime counter at (x, y) and return the new value
    pub(crate) fn tick_lifetime(&mut self, x: i32, y: i32) -> i16 {
        let idx = self.index(x, y);
        self.cells[idx].lifetime -= 1;
        self.cells[idx].lifetime
    }
}

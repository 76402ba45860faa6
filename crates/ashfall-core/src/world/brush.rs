//! Brush - disc and line painting into the grid

use bresenham::Bresenham;

use ashfall_simulation::{MaterialId, Materials};

use super::grid::Grid;
use super::rng::SimRng;

/// Chance that a disc cell actually receives material, giving painted
/// strokes a grainy edge instead of a solid stamp
const DEPOSIT_PROBABILITY: f32 = 0.7;

/// Painting interface over the grid
pub(crate) struct Brush;

impl Brush {
    /// Stamp a filled disc of `material_id` centered on (cx, cy).
    /// Erasing (painting empty) clears every covered cell; any other
    /// material lands only on empty cells, and only at the deposit
    /// probability.
    pub fn paint_disc<R: SimRng>(
        grid: &mut Grid,
        cx: i32,
        cy: i32,
        radius: i32,
        material_id: u16,
        materials: &Materials,
        rng: &mut R,
    ) {
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if !grid.in_bounds(x, y) {
                    continue;
                }
                if material_id == MaterialId::EMPTY {
                    grid.set(x, y, MaterialId::EMPTY, materials, rng);
                } else if grid.get(x, y) == MaterialId::EMPTY
                    && rng.check_probability(DEPOSIT_PROBABILITY)
                {
                    grid.set(x, y, material_id, materials, rng);
                }
            }
        }
    }

    /// Stamp a disc at every cell of the line from (x0, y0) to
    /// (x1, y1), so fast drags leave a continuous stroke. Bresenham
    /// yields the start but not the end point, which gets its own
    /// stamp.
    pub fn paint_line<R: SimRng>(
        grid: &mut Grid,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        radius: i32,
        material_id: u16,
        materials: &Materials,
        rng: &mut R,
    ) {
        for (x, y) in Bresenham::new((x0 as isize, y0 as isize), (x1 as isize, y1 as isize)) {
            Self::paint_disc(grid, x as i32, y as i32, radius, material_id, materials, rng);
        }
        Self::paint_disc(grid, x1, y1, radius, material_id, materials, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysRng;

    impl SimRng for AlwaysRng {
        fn gen_bool(&mut self) -> bool {
            true
        }

        fn gen_f32(&mut self) -> f32 {
            0.0
        }
    }

    #[test]
    fn test_disc_respects_radius() {
        let materials = Materials::new();
        let mut grid = Grid::new(20, 20);
        let mut rng = AlwaysRng;

        Brush::paint_disc(&mut grid, 10, 10, 2, MaterialId::SAND, &materials, &mut rng);

        assert_eq!(grid.get(10, 10), MaterialId::SAND);
        assert_eq!(grid.get(12, 10), MaterialId::SAND);
        // (2, 2) is outside r^2 = 4
        assert_eq!(grid.get(12, 12), MaterialId::EMPTY);
        assert_eq!(grid.get(13, 10), MaterialId::EMPTY);
    }

    #[test]
    fn test_disc_never_overwrites_occupied_cells() {
        let materials = Materials::new();
        let mut grid = Grid::new(20, 20);
        let mut rng = AlwaysRng;
        grid.set(10, 10, MaterialId::STONE, &materials, &mut rng);

        Brush::paint_disc(&mut grid, 10, 10, 2, MaterialId::SAND, &materials, &mut rng);

        assert_eq!(grid.get(10, 10), MaterialId::STONE);
        assert_eq!(grid.get(11, 10), MaterialId::SAND);
    }

    #[test]
    fn test_eraser_clears_occupied_cells() {
        let materials = Materials::new();
        let mut grid = Grid::new(20, 20);
        let mut rng = AlwaysRng;
        grid.set(10, 10, MaterialId::STONE, &materials, &mut rng);
        grid.set(11, 10, MaterialId::WATER, &materials, &mut rng);

        Brush::paint_disc(&mut grid, 10, 10, 2, MaterialId::EMPTY, &materials, &mut rng);

        assert_eq!(grid.get(10, 10), MaterialId::EMPTY);
        assert_eq!(grid.get(11, 10), MaterialId::EMPTY);
    }

    #[test]
    fn test_disc_clips_at_grid_edges() {
        let materials = Materials::new();
        let mut grid = Grid::new(20, 20);
        let mut rng = AlwaysRng;

        Brush::paint_disc(&mut grid, 0, 0, 3, MaterialId::SAND, &materials, &mut rng);

        assert_eq!(grid.get(0, 0), MaterialId::SAND);
        assert_eq!(grid.get(3, 0), MaterialId::SAND);
        // Off-grid reads come back as the boundary sentinel
        assert_eq!(grid.get(-1, 0), MaterialId::STONE);
    }

    #[test]
    fn test_line_covers_both_endpoints() {
        let materials = Materials::new();
        let mut grid = Grid::new(20, 20);
        let mut rng = AlwaysRng;

        Brush::paint_line(&mut grid, 2, 2, 8, 8, 0, MaterialId::STONE, &materials, &mut rng);

        for i in 2..=8 {
            assert_eq!(grid.get(i, i), MaterialId::STONE, "line at ({i}, {i})");
        }
        assert_eq!(grid.get(1, 1), MaterialId::EMPTY);
        assert_eq!(grid.get(9, 9), MaterialId::EMPTY);
    }

    #[test]
    fn test_degenerate_line_is_single_stamp() {
        let materials = Materials::new();
        let mut grid = Grid::new(20, 20);
        let mut rng = AlwaysRng;

        Brush::paint_line(&mut grid, 5, 5, 5, 5, 1, MaterialId::SAND, &materials, &mut rng);

        assert_eq!(grid.get(5, 5), MaterialId::SAND);
        assert_eq!(grid.get(6, 5), MaterialId::SAND);
        assert_eq!(grid.get(7, 5), MaterialId::EMPTY);
    }
}

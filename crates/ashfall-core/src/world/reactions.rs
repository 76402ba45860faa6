//! Reaction engine - lifetime expiry and neighbor reactions
//!
//! Runs before movement for every occupied, unprocessed cell. The
//! neighbor scan is a fixed nested loop (dx outer, dy inner, each
//! -1..=1), so rules that end the source cell's tick early always
//! trigger on the first qualifying neighbor in that order.

use glam::IVec2;

use ashfall_simulation::{Material, MaterialId, Materials, Reactivity};

use super::grid::Grid;
use super::rng::SimRng;
use super::stats::SimStats;

/// Offsets a watered plant may grow into, relative to the plant
const GROW_DIRS: [IVec2; 3] = [IVec2::new(0, -1), IVec2::new(-1, 0), IVec2::new(1, 0)];

/// Outcome of a cell's reaction pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ReactionOutcome {
    /// Cell survived its reactions; movement may follow
    Continue,
    /// Cell settled this tick (decayed, froze, or corroded); skip movement
    Settled,
}

/// Reaction updater - material-specific neighbor interactions
pub(crate) struct ReactionSystem;

impl ReactionSystem {
    /// Run lifetime expiry and neighbor reactions for the cell at
    /// (x, y). `material` is the descriptor sampled at entry; rules
    /// keep using that sample even when an earlier rule rewrote the
    /// source cell.
    pub fn update<R: SimRng>(
        grid: &mut Grid,
        x: i32,
        y: i32,
        material: &Material,
        materials: &Materials,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> ReactionOutcome {
        // Lifetime expiry pre-empts reactions and movement
        if material.has_lifetime() && grid.tick_lifetime(x, y) <= 0 {
            let is_flame =
                material.id == MaterialId::FIRE || material.id == MaterialId::EMBER;
            let product = if is_flame && rng.check_probability(0.3) {
                MaterialId::SMOKE
            } else {
                MaterialId::EMPTY
            };
            grid.set(x, y, product, materials, rng);
            stats.record_decay();
            return ReactionOutcome::Settled;
        }

        // Heat sources spread fire, quench against water, melt ice
        if material.reactivity.contains(Reactivity::HOT) {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let (nx, ny) = (x + dx, y + dy);
                    let neighbor = materials.get(grid.get(nx, ny));

                    if neighbor.reactivity.contains(Reactivity::FLAMMABLE)
                        && rng.check_probability(0.05)
                    {
                        if neighbor.reactivity.contains(Reactivity::EXPLOSIVE) {
                            Self::explode(grid, nx, ny, materials, rng);
                        } else {
                            let flame = if rng.check_probability(0.7) {
                                MaterialId::FIRE
                            } else {
                                MaterialId::EMBER
                            };
                            grid.set(nx, ny, flame, materials, rng);
                        }
                        stats.record_reaction();
                    }

                    // Lava + water: water flashes to steam, lava may quench
                    if material.id == MaterialId::LAVA && neighbor.id == MaterialId::WATER {
                        grid.set(nx, ny, MaterialId::STEAM, materials, rng);
                        if rng.check_probability(0.3) {
                            grid.set(x, y, MaterialId::STONE, materials, rng);
                        }
                        stats.record_reaction();
                    }

                    // Fire and lava melt ice
                    if (material.id == MaterialId::FIRE || material.id == MaterialId::LAVA)
                        && neighbor.reactivity.contains(Reactivity::COLD)
                    {
                        grid.set(nx, ny, MaterialId::WATER, materials, rng);
                        stats.record_reaction();
                    }
                }
            }
        }

        // Water dissolves salt, freezes next to ice, feeds plants
        if material.id == MaterialId::WATER {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let (nx, ny) = (x + dx, y + dy);
                    let neighbor = materials.get(grid.get(nx, ny));

                    if neighbor.reactivity.contains(Reactivity::DISSOLVES)
                        && rng.check_probability(0.1)
                    {
                        grid.set(nx, ny, MaterialId::WATER, materials, rng);
                        stats.record_reaction();
                    }

                    if neighbor.reactivity.contains(Reactivity::COLD)
                        && rng.check_probability(0.01)
                    {
                        grid.set(x, y, MaterialId::ICE, materials, rng);
                        stats.record_reaction();
                        return ReactionOutcome::Settled;
                    }

                    if neighbor.reactivity.contains(Reactivity::GROWS)
                        && rng.check_probability(0.02)
                    {
                        let dir = GROW_DIRS[rng.gen_index(GROW_DIRS.len())];
                        let (gx, gy) = (nx + dir.x, ny + dir.y);
                        if grid.get(gx, gy) == MaterialId::EMPTY {
                            grid.set(gx, gy, MaterialId::PLANT, materials, rng);
                            // Growth consumes the water half the time,
                            // never the plant
                            if rng.check_probability(0.5) {
                                grid.set(x, y, MaterialId::EMPTY, materials, rng);
                            }
                            stats.record_reaction();
                        }
                    }
                }
            }
        }

        // Acid erodes anything but stone and acid; one corrosion event
        // per tick per acid cell
        if material.reactivity.contains(Reactivity::CORROSIVE) {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let (nx, ny) = (x + dx, y + dy);
                    let neighbor = grid.get(nx, ny);

                    if neighbor != MaterialId::EMPTY
                        && neighbor != MaterialId::ACID
                        && neighbor != MaterialId::STONE
                        && rng.check_probability(0.05)
                    {
                        grid.set(nx, ny, MaterialId::EMPTY, materials, rng);
                        if rng.check_probability(0.3) {
                            grid.set(x, y, MaterialId::SMOKE, materials, rng);
                        }
                        stats.record_reaction();
                        return ReactionOutcome::Settled;
                    }
                }
            }
        }

        ReactionOutcome::Continue
    }

    /// 7x7 blast centered on the detonating cell. Blast writes are
    /// unconditional: each hit overwrites whatever occupies the cell,
    /// including the charge itself.
    fn explode<R: SimRng>(grid: &mut Grid, cx: i32, cy: i32, materials: &Materials, rng: &mut R) {
        for ex in -3..=3 {
            for ey in -3..=3 {
                if rng.check_probability(0.7) {
                    let product = if rng.check_probability(0.5) {
                        MaterialId::FIRE
                    } else {
                        MaterialId::EMBER
                    };
                    grid.set(cx + ex, cy + ey, product, materials, rng);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::stats::NoopStats;

    /// Test RNG with a fixed uniform draw; 0.0 passes every
    /// probability gate, 0.99 fails all the rule gates
    struct FixedRng(f32);

    impl SimRng for FixedRng {
        fn gen_bool(&mut self) -> bool {
            true
        }

        fn gen_f32(&mut self) -> f32 {
            self.0
        }
    }

    fn make_grid(cells: &[(i32, i32, u16)]) -> (Grid, Materials) {
        let materials = Materials::new();
        let mut grid = Grid::new(12, 12);
        let mut rng = FixedRng(0.0);
        for &(x, y, id) in cells {
            grid.set(x, y, id, &materials, &mut rng);
        }
        (grid, materials)
    }

    fn react(
        grid: &mut Grid,
        materials: &Materials,
        x: i32,
        y: i32,
        rng: &mut FixedRng,
    ) -> ReactionOutcome {
        let material = materials.get(grid.get(x, y)).clone();
        ReactionSystem::update(grid, x, y, &material, materials, &mut NoopStats, rng)
    }

    #[test]
    fn test_fire_decays_to_smoke_when_lifetime_expires() {
        let (mut grid, materials) = make_grid(&[(5, 5, MaterialId::FIRE)]);
        // Force the counter to the edge of expiry
        for _ in 0..29 {
            grid.tick_lifetime(5, 5);
        }

        let mut rng = FixedRng(0.0); // 0.0 < 0.3: smoke branch
        let outcome = react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(outcome, ReactionOutcome::Settled);
        assert_eq!(grid.get(5, 5), MaterialId::SMOKE);
    }

    #[test]
    fn test_steam_decays_straight_to_empty() {
        let (mut grid, materials) = make_grid(&[(5, 5, MaterialId::STEAM)]);
        for _ in 0..99 {
            grid.tick_lifetime(5, 5);
        }

        // Smoke branch would pass at 0.0, but steam is not a flame
        let mut rng = FixedRng(0.0);
        let outcome = react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(outcome, ReactionOutcome::Settled);
        assert_eq!(grid.get(5, 5), MaterialId::EMPTY);
    }

    #[test]
    fn test_no_decay_before_expiry() {
        let (mut grid, materials) = make_grid(&[(5, 5, MaterialId::SMOKE)]);

        let mut rng = FixedRng(0.99);
        let outcome = react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(outcome, ReactionOutcome::Continue);
        assert_eq!(grid.get(5, 5), MaterialId::SMOKE);
        assert_eq!(grid.cell(5, 5).lifetime, 79);
    }

    #[test]
    fn test_fire_ignites_wood() {
        let (mut grid, materials) =
            make_grid(&[(5, 5, MaterialId::FIRE), (6, 5, MaterialId::WOOD)]);

        let mut rng = FixedRng(0.0); // ignition and flame branch both pass
        react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(grid.get(6, 5), MaterialId::FIRE);
    }

    #[test]
    fn test_ignition_gated_by_probability() {
        let (mut grid, materials) =
            make_grid(&[(5, 5, MaterialId::FIRE), (6, 5, MaterialId::WOOD)]);

        let mut rng = FixedRng(0.99);
        react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(grid.get(6, 5), MaterialId::WOOD);
    }

    #[test]
    fn test_gunpowder_detonates_and_blast_overwrites() {
        let (mut grid, materials) = make_grid(&[
            (5, 5, MaterialId::FIRE),
            (6, 5, MaterialId::GUNPOWDER),
            // Stone inside the blast radius gets overwritten too
            (8, 5, MaterialId::STONE),
        ]);

        let mut rng = FixedRng(0.0); // every blast cell hit, fire branch
        react(&mut grid, &materials, 5, 5, &mut rng);

        // 7x7 centered on the charge at (6, 5)
        for ex in -3..=3 {
            for ey in -3..=3 {
                let (x, y) = (6 + ex, 5 + ey);
                if grid.in_bounds(x, y) {
                    assert_eq!(grid.get(x, y), MaterialId::FIRE, "blast at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_lava_turns_water_to_steam() {
        let (mut grid, materials) =
            make_grid(&[(5, 5, MaterialId::LAVA), (5, 4, MaterialId::WATER)]);

        let mut rng = FixedRng(0.0); // quench branch passes too
        react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(grid.get(5, 4), MaterialId::STEAM);
        assert_eq!(grid.get(5, 5), MaterialId::STONE);
    }

    #[test]
    fn test_lava_survives_quench_roll() {
        let (mut grid, materials) =
            make_grid(&[(5, 5, MaterialId::LAVA), (5, 4, MaterialId::WATER)]);

        let mut rng = FixedRng(0.99); // steam is unconditional, quench is not
        react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(grid.get(5, 4), MaterialId::STEAM);
        assert_eq!(grid.get(5, 5), MaterialId::LAVA);
    }

    #[test]
    fn test_fire_melts_ice_unconditionally() {
        let (mut grid, materials) =
            make_grid(&[(5, 5, MaterialId::FIRE), (6, 6, MaterialId::ICE)]);

        let mut rng = FixedRng(0.99); // no probability gate on melting
        react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(grid.get(6, 6), MaterialId::WATER);
    }

    #[test]
    fn test_water_dissolves_salt() {
        let (mut grid, materials) =
            make_grid(&[(5, 5, MaterialId::WATER), (6, 5, MaterialId::SALT)]);

        let mut rng = FixedRng(0.0);
        react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(grid.get(6, 5), MaterialId::WATER);
    }

    #[test]
    fn test_water_freezes_next_to_ice_and_settles() {
        let (mut grid, materials) =
            make_grid(&[(5, 5, MaterialId::WATER), (6, 5, MaterialId::ICE)]);

        let mut rng = FixedRng(0.0);
        let outcome = react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(outcome, ReactionOutcome::Settled);
        assert_eq!(grid.get(5, 5), MaterialId::ICE);
        assert_eq!(grid.get(6, 5), MaterialId::ICE);
    }

    #[test]
    fn test_water_grows_plant_into_empty_cell() {
        let (mut grid, materials) =
            make_grid(&[(5, 5, MaterialId::WATER), (6, 5, MaterialId::PLANT)]);

        // gen_index draws 0: growth goes up from the plant
        let mut rng = FixedRng(0.0);
        let outcome = react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(grid.get(6, 4), MaterialId::PLANT);
        // Consumption roll passed: the water is spent in place
        assert_eq!(grid.get(5, 5), MaterialId::EMPTY);
        // Growth never ends the pass early
        assert_eq!(outcome, ReactionOutcome::Continue);
    }

    #[test]
    fn test_growth_blocked_by_occupied_target() {
        let (mut grid, materials) = make_grid(&[
            (5, 5, MaterialId::WATER),
            (6, 5, MaterialId::PLANT),
            (6, 4, MaterialId::STONE),
        ]);

        let mut rng = FixedRng(0.0);
        react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(grid.get(6, 4), MaterialId::STONE);
        assert_eq!(grid.get(5, 5), MaterialId::WATER);
    }

    #[test]
    fn test_acid_corrodes_and_settles() {
        let (mut grid, materials) =
            make_grid(&[(5, 5, MaterialId::ACID), (6, 5, MaterialId::WOOD)]);

        let mut rng = FixedRng(0.0);
        let outcome = react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(outcome, ReactionOutcome::Settled);
        assert_eq!(grid.get(6, 5), MaterialId::EMPTY);
        // Fizzle roll passed: acid spent itself as smoke
        assert_eq!(grid.get(5, 5), MaterialId::SMOKE);
    }

    #[test]
    fn test_acid_spares_stone_and_acid() {
        let (mut grid, materials) = make_grid(&[
            (5, 5, MaterialId::ACID),
            (6, 5, MaterialId::STONE),
            (4, 5, MaterialId::ACID),
        ]);

        let mut rng = FixedRng(0.0);
        let outcome = react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(outcome, ReactionOutcome::Continue);
        assert_eq!(grid.get(6, 5), MaterialId::STONE);
        assert_eq!(grid.get(4, 5), MaterialId::ACID);
    }

    #[test]
    fn test_corrosion_hits_first_neighbor_in_scan_order() {
        // Two targets; only the first in the fixed dx-outer dy-inner
        // scan order is corroded before the early exit
        let (mut grid, materials) = make_grid(&[
            (5, 5, MaterialId::ACID),
            (4, 4, MaterialId::WOOD), // dx=-1, dy=-1: scanned first
            (6, 6, MaterialId::WOOD), // dx=1, dy=1: scanned last
        ]);

        let mut rng = FixedRng(0.0);
        react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(grid.get(4, 4), MaterialId::EMPTY);
        assert_eq!(grid.get(6, 6), MaterialId::WOOD);
    }

    #[test]
    fn test_inert_materials_have_no_reactions() {
        let (mut grid, materials) =
            make_grid(&[(5, 5, MaterialId::SAND), (6, 5, MaterialId::WOOD)]);

        let mut rng = FixedRng(0.0);
        let outcome = react(&mut grid, &materials, 5, 5, &mut rng);

        assert_eq!(outcome, ReactionOutcome::Continue);
        assert_eq!(grid.get(6, 5), MaterialId::WOOD);
    }
}

//! Headless terminal front-end: runs a canned scene and renders
//! ASCII frames to stdout.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;

use ashfall_core::config::SimConfig;
use ashfall_core::simulation::MaterialId;
use ashfall_core::world::World;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Scene to run
    #[arg(short, long, value_enum, default_value_t = Scenario::Rain)]
    scenario: Scenario,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 240)]
    ticks: u32,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Grid width in cells
    #[arg(long, default_value_t = 120)]
    width: i32,

    /// Grid height in cells
    #[arg(long, default_value_t = 48)]
    height: i32,

    /// Brush radius for the scenario's material deposits
    #[arg(long, default_value_t = 3)]
    brush_radius: i32,

    /// Print a frame every N ticks (0 prints only the final frame)
    #[arg(long, default_value_t = 0)]
    frame_every: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    /// Water raining onto a stone basin
    Rain,
    /// Lava welling up under a water pool
    Volcano,
    /// Plants growing from a watered dirt bed
    Garden,
    /// A gunpowder cache with a burning fuse
    PowderKeg,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SimConfig {
        width: args.width,
        height: args.height,
        seed: args.seed,
        brush_radius: args.brush_radius,
    };
    let mut world = World::from_config(&config)?;
    setup_scenario(&mut world, args.scenario, config.brush_radius);

    info!(
        "running {:?} for {} ticks on a {}x{} grid",
        args.scenario, args.ticks, args.width, args.height
    );

    for tick in 1..=args.ticks {
        drive_scenario(&mut world, args.scenario, tick);
        world.update();
        if args.frame_every > 0 && tick % args.frame_every == 0 {
            print_frame(&world, tick);
        }
    }

    print_frame(&world, args.ticks);
    println!("{} particles after {} ticks", world.particle_count(), args.ticks);
    Ok(())
}

fn setup_scenario(world: &mut World, scenario: Scenario, brush_radius: i32) {
    let (w, h) = (world.width(), world.height());
    match scenario {
        Scenario::Rain => {
            // Stone basin along the floor and lower walls
            world.paint_line(0, h - 1, w - 1, h - 1, 1, MaterialId::STONE);
            world.paint_line(w / 4, h - 1, w / 4, h - 10, 0, MaterialId::STONE);
            world.paint_line(3 * w / 4, h - 1, 3 * w / 4, h - 10, 0, MaterialId::STONE);
        }
        Scenario::Volcano => {
            world.paint_line(0, h - 1, w - 1, h - 1, 1, MaterialId::STONE);
            // Water pool over the vent
            for x in w / 3..2 * w / 3 {
                for y in h - 8..h - 2 {
                    world.set_material(x, y, MaterialId::WATER);
                }
            }
        }
        Scenario::Garden => {
            // Salt bed with plant seeds and an ice block to melt later
            world.paint_line(0, h - 1, w - 1, h - 1, 1, MaterialId::STONE);
            world.paint_line(0, h - 3, w - 1, h - 3, 1, MaterialId::SALT);
            for x in (4..w - 4).step_by(8) {
                world.set_material(x, h - 5, MaterialId::PLANT);
            }
            world.paint_disc(w / 2, h - 12, brush_radius, MaterialId::ICE);
        }
        Scenario::PowderKeg => {
            world.paint_line(0, h - 1, w - 1, h - 1, 1, MaterialId::STONE);
            world.paint_disc(w / 2, h - 6, brush_radius, MaterialId::GUNPOWDER);
            // Wooden fuse running in from the left, touching the cache
            world.paint_line(8, h - 6, w / 2 - brush_radius - 1, h - 6, 0, MaterialId::WOOD);
        }
    }
}

/// Per-tick material sources that keep a scene alive
fn drive_scenario(world: &mut World, scenario: Scenario, tick: u32) {
    let (w, h) = (world.width(), world.height());
    match scenario {
        Scenario::Rain => {
            if tick % 2 == 0 {
                let x = w / 4 + (tick as i32 * 13) % (w / 2);
                world.set_material(x, 0, MaterialId::WATER);
            }
        }
        Scenario::Volcano => {
            if tick % 3 == 0 {
                world.set_material(w / 2, h - 2, MaterialId::LAVA);
            }
        }
        Scenario::Garden => {
            if tick % 4 == 0 {
                let x = 4 + (tick as i32 * 7) % (w - 8);
                world.set_material(x, 0, MaterialId::WATER);
            }
        }
        Scenario::PowderKeg => {
            if tick == 1 {
                world.set_material(6, h - 6, MaterialId::FIRE);
            } else if tick < 60 {
                // Keep the fuse end lit until the flame takes
                if world.material_at(6, h - 6) == MaterialId::EMPTY {
                    world.set_material(6, h - 6, MaterialId::FIRE);
                }
            }
        }
    }
}

fn glyph(id: u16) -> char {
    match id {
        MaterialId::EMPTY => ' ',
        MaterialId::SAND => '.',
        MaterialId::WATER => '~',
        MaterialId::STONE => '#',
        MaterialId::FIRE => '^',
        MaterialId::WOOD => '=',
        MaterialId::OIL => 'o',
        MaterialId::SALT => ',',
        MaterialId::GUNPOWDER => '%',
        MaterialId::LAVA => '&',
        MaterialId::ICE => '*',
        MaterialId::STEAM => '\'',
        MaterialId::SMOKE => '`',
        MaterialId::ACID => 'a',
        MaterialId::PLANT => '"',
        MaterialId::EMBER => '+',
        _ => '?',
    }
}

fn print_frame(world: &World, tick: u32) {
    let mut out = String::with_capacity(((world.width() + 1) * world.height()) as usize);
    for y in 0..world.height() {
        for x in 0..world.width() {
            out.push(glyph(world.material_at(x, y)));
        }
        out.push('\n');
    }
    println!("--- tick {tick} ---");
    print!("{out}");
}

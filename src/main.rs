//! Bouncing Balls entry point
//!
//! Native builds run a headless frame driver: spawn balls, tick a fixed number
//! of frames, log diagnostics once per simulated second and print the final
//! ball state as JSON. The browser build is driven from JavaScript through
//! `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::f32::consts::TAU;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use clap::Parser;
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use bouncing_balls::consts::{MAX_AIM_SPEED, TICK_RATE_HZ};
    use bouncing_balls::{Settings, Simulation, Variant, polar_to_cartesian};

    /// Headless bouncing-balls simulation
    #[derive(Parser, Debug)]
    #[command(version, about)]
    struct Args {
        /// Settings JSON file (defaults are used when omitted)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Ball variant: free or grounded
        #[arg(long, value_parser = parse_variant)]
        variant: Option<Variant>,

        /// Number of balls to spawn
        #[arg(long, default_value_t = 10)]
        balls: usize,

        /// Number of ticks to run (60 per simulated second)
        #[arg(long, default_value_t = 600)]
        ticks: u64,

        /// Seed for spawns and collision nudges
        #[arg(long)]
        seed: Option<u64>,

        /// Disable ball/ball collisions
        #[arg(long)]
        no_collisions: bool,
    }

    fn parse_variant(s: &str) -> Result<Variant, String> {
        Variant::from_str(s).ok_or_else(|| format!("unknown variant '{s}' (expected free or grounded)"))
    }

    fn load_settings(path: Option<&Path>) -> Result<Settings> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Settings::from_json(&json).with_context(|| format!("failed to load settings from {}", path.display()))
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let mut settings = load_settings(args.settings.as_deref())?;
        if let Some(variant) = args.variant {
            settings.variant = variant;
        }
        if let Some(seed) = args.seed {
            settings.seed = seed;
        }
        if args.no_collisions {
            settings.collisions = false;
        }

        log::info!(
            "Bouncing balls (native) starting: {} variant, {} balls, {} ticks",
            settings.variant.as_str(),
            args.balls,
            args.ticks
        );

        let mut sim = Simulation::new(settings);

        // Own stream so the spawn layout doesn't shift the simulation's RNG
        let mut spawn_rng = Pcg32::seed_from_u64(sim.settings.seed ^ 0x5eed);
        for _ in 0..args.balls {
            let pos = Vec2::new(
                spawn_rng.random_range(0.0..sim.arena.width),
                spawn_rng.random_range(0.0..sim.arena.height),
            );
            let aim = polar_to_cartesian(
                spawn_rng.random_range(0.0..MAX_AIM_SPEED),
                spawn_rng.random_range(0.0..TAU),
            );
            sim.spawn_ball(pos, aim);
        }

        let ticks_per_second = u64::from(TICK_RATE_HZ);
        for _ in 0..args.ticks {
            sim.tick();
            if sim.time_ticks % ticks_per_second == 0 {
                log::info!(
                    "t={}s energy={:.5} momentum={:?} resting={}/{}",
                    sim.time_ticks / ticks_per_second,
                    sim.kinetic_energy(),
                    sim.total_momentum(),
                    sim.resting_count(),
                    sim.balls().len()
                );
            }
        }

        let json = serde_json::to_string_pretty(sim.balls()).context("failed to serialize final state")?;
        println!("{json}");
        Ok(())
    }
}

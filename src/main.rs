//! Brickfall entry point
//!
//! Runs a level headless with the autopilot steering the paddle and reports
//! how it went.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use brickfall::Settings;
    use brickfall::sim::{Level, LevelSpec, TickInput, TickOutcome};

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Headless brickfall simulation", long_about = None)]
    struct Args {
        /// Seed for the demo level layout
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Maximum number of ticks to simulate
        #[arg(long, default_value_t = 60 * 60 * 10)]
        ticks: u64,
        /// Settings JSON (defaults are used for missing fields)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Level JSON; the seeded demo level is used when absent
        #[arg(long)]
        level: Option<PathBuf>,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let settings = match &args.settings {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };
        let spec = match &args.level {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("read level {}", path.display()))?;
                LevelSpec::from_json(&json)
                    .with_context(|| format!("parse level {}", path.display()))?
            }
            None => LevelSpec::demo(args.seed),
        };

        let dt = settings.sim_dt();
        let mut level = Level::new(spec, settings);
        level.start_turn();

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let mut outcome = TickOutcome::Running;
        for _ in 0..args.ticks {
            outcome = level.tick(&input, dt);
            match outcome {
                TickOutcome::TurnLost | TickOutcome::Idle => level.start_turn(),
                TickOutcome::LevelCleared | TickOutcome::GameOver => break,
                TickOutcome::Running => {}
            }
        }

        let counters = level.counters();
        log::info!(
            "Finished '{}' after {} ticks: {:?}",
            level.spec().name,
            level.ticks(),
            outcome
        );
        println!(
            "{}: {:?} after {} ticks | score {} | lives {} | blocks left {}",
            level.spec().name,
            outcome,
            level.ticks(),
            counters.score,
            counters.lives,
            counters.blocks_remaining
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Brickfall (headless) starting...");
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the only wasm surface
}

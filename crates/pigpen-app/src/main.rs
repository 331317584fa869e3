use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use pigpen_app::logging;
use pigpen_app::session::{self, AppError};
use pigpen_app::state::AppState;
use pigpen_core::commands::PlayerCommand;
use pigpen_core::enums::KillCause;
use pigpen_core::events::SimEvent;
use pigpen_core::state::SimSnapshot;
use pigpen_core::types::PointerCoord;
use pigpen_sim::SimConfig;

/// Headless arcade shooting session: targets walk the pen, random clicks fire.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON simulation config
    #[arg(long)]
    config: Option<PathBuf>,

    /// How long to run the session
    #[arg(long, default_value_t = 10)]
    duration_secs: u64,

    /// Delay between simulated clicks (0 disables firing)
    #[arg(long, default_value_t = 250)]
    fire_every_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Printed as JSON when the session ends.
#[derive(Debug, Serialize)]
struct SessionSummary {
    seed: u64,
    ticks: u64,
    shots: u32,
    direct_hits: u32,
    projectile_kills: u32,
    score: u32,
    targets_alive: usize,
}

fn load_config(cli: &Cli) -> Result<SimConfig, pigpen_sim::SimError> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

/// Kill tallies taken from the events delivered with each poll.
#[derive(Debug, Default)]
struct KillTally {
    direct_hits: u32,
    projectile_kills: u32,
}

impl KillTally {
    fn record(&mut self, snapshot: &SimSnapshot) {
        for event in &snapshot.events {
            match event {
                SimEvent::Kill {
                    cause: KillCause::DirectHit,
                    ..
                } => self.direct_hits += 1,
                SimEvent::Kill {
                    cause: KillCause::Projectile,
                    ..
                } => self.projectile_kills += 1,
                _ => {}
            }
        }
    }
}

fn run(cli: &Cli, config: SimConfig) -> Result<SessionSummary, AppError> {
    let state = AppState::new();
    let seed = config.seed;
    session::start_session(&state, config)?;

    // Separate stream so clicks never perturb the simulation's own RNG.
    let mut clicks = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let fire_every = Duration::from_millis(cli.fire_every_ms);
    let deadline = Instant::now() + Duration::from_secs(cli.duration_secs);
    let mut shots = 0u32;
    let mut tally = KillTally::default();

    while Instant::now() < deadline {
        if session::has_stopped(&state)? {
            warn!("game loop exited early");
            break;
        }
        if let Some(snapshot) = session::latest_snapshot(&state)? {
            tally.record(&snapshot);
        }
        if fire_every.is_zero() {
            std::thread::sleep(Duration::from_millis(50));
            continue;
        }
        std::thread::sleep(fire_every);
        let pointer = PointerCoord::new(clicks.gen_range(-1.0..=1.0), clicks.gen_range(-1.0..=1.0));
        session::send_command(&state, PlayerCommand::fire_at(pointer))?;
        shots += 1;
    }

    let score = session::stop_session(&state)?;
    // The loop has stopped, so this poll holds the rest of the events.
    let last = session::latest_snapshot(&state)?;
    if let Some(snapshot) = &last {
        tally.record(snapshot);
    }
    Ok(SessionSummary {
        seed,
        ticks: last.as_ref().map_or(0, |s| s.time.tick),
        shots,
        direct_hits: tally.direct_hits,
        projectile_kills: tally.projectile_kills,
        score,
        targets_alive: last.as_ref().map_or(0, |s| s.targets.len()),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "running for {}s, seed {}, firing every {}ms",
        cli.duration_secs, config.seed, cli.fire_every_ms
    );

    match run(&cli, config) {
        Ok(summary) => {
            info!("final score {}", summary.score);
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{json}"),
                Err(err) => error!("failed to encode summary: {err}"),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("session failed: {err}");
            ExitCode::FAILURE
        }
    }
}

//! Game loop thread. Runs the simulation engine at 60Hz and stores snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Commands arrive via `mpsc` channel. Each frame's snapshot
//! replaces the previous one for polling while its events are queued until a
//! poller takes them. Spawning follows the wall clock, frames follow
//! `TICK_DURATION`.

use std::io;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use pigpen_core::constants::TICK_RATE;
use pigpen_core::state::SimSnapshot;
use pigpen_sim::{SimConfig, SimError, SimulationEngine};

use crate::state::{GameLoopCommand, LoopResult, Published, SharedPublished};

/// Nominal duration of one frame.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Undelivered events kept for pollers; the oldest are dropped beyond this.
pub const MAX_PENDING_EVENTS: usize = 16_384;

/// Whether the loop keeps running after a batch of commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread's join handle.
pub fn spawn_game_loop(
    config: SimConfig,
    published: SharedPublished,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopResult>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("pigpen-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, &published))?;

    Ok((cmd_tx, handle))
}

/// Apply every pending command to the engine.
///
/// A fire action that fails stops the session; the error is returned.
pub fn drain_commands(
    engine: &mut SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
) -> Result<LoopControl, SimError> {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::Player(cmd)) => {
                if let Some(outcome) = engine.handle_command(cmd)? {
                    debug!("fire: {outcome:?}");
                }
            }
            Ok(GameLoopCommand::Shutdown) => return Ok(LoopControl::Stop),
            Err(mpsc::TryRecvError::Empty) => return Ok(LoopControl::Continue),
            Err(mpsc::TryRecvError::Disconnected) => return Ok(LoopControl::Stop),
        }
    }
}

/// Hand a frame to pollers: the snapshot replaces the previous one, its
/// events join the queue.
pub fn publish(published: &Mutex<Published>, snapshot: SimSnapshot) {
    let Ok(mut lock) = published.lock() else {
        return;
    };
    let was_full = lock.pending_events.len() >= MAX_PENDING_EVENTS;
    lock.pending_events.extend(snapshot.events.iter().cloned());
    let overflow = lock.pending_events.len().saturating_sub(MAX_PENDING_EVENTS);
    if overflow > 0 {
        if !was_full {
            warn!("events are not being polled, dropping the oldest");
        }
        lock.pending_events.drain(..overflow);
    }
    lock.snapshot = Some(snapshot);
}

/// The game loop. Runs until Shutdown, channel disconnect, or a fatal error.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    published: &Mutex<Published>,
) -> LoopResult {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    let mut last_clock = next_tick_time;
    info!("game loop started, seed {}", engine.config().seed);

    loop {
        // 1. Drain all pending commands
        match drain_commands(&mut engine, &cmd_rx) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Stop) => break,
            Err(err) => {
                error!("game loop stopped: {err}");
                return Err(err);
            }
        }

        // 2. Spawn cadence runs on wall-clock time
        let now = Instant::now();
        engine.advance_spawn_clock(now - last_clock);
        last_clock = now;

        // 3. Advance one frame (the engine handles inactive semantics)
        let snapshot = engine.tick();

        // 4. Publish the frame for polling
        publish(published, snapshot);

        // 5. Sleep until the next frame
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }

    info!(
        "game loop finished after {} ticks, score {}",
        engine.time().tick,
        engine.score()
    );
    Ok(engine.score())
}

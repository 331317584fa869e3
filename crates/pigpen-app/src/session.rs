//! Session API: start, drive and stop the game loop through `AppState`.

use std::io;

use log::info;
use thiserror::Error;

use pigpen_core::commands::PlayerCommand;
use pigpen_core::state::SimSnapshot;
use pigpen_sim::{SimConfig, SimError};

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop is no longer receiving commands")]
    ChannelClosed,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] io::Error),
    #[error("game loop thread panicked")]
    LoopPanicked,
    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_session(state: &AppState, config: SimConfig) -> Result<(), AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::Poisoned)?;
    if *running {
        return Err(AppError::AlreadyRunning);
    }

    config.validate()?;
    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.published.clone())?;

    *state.command_tx.lock().map_err(|_| AppError::Poisoned)? = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|_| AppError::Poisoned)? = Some(handle);
    *running = true;
    info!("session started");
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::Player(command))
            .map_err(|_| AppError::ChannelClosed),
        None => Err(AppError::NotStarted),
    }
}

/// Latest snapshot published by the game loop, if any.
///
/// Its `events` hold everything emitted since the previous call, across
/// however many frames ran in between.
pub fn latest_snapshot(state: &AppState) -> Result<Option<SimSnapshot>, AppError> {
    let mut lock = state.published.lock().map_err(|_| AppError::Poisoned)?;
    let Some(mut snapshot) = lock.snapshot.clone() else {
        return Ok(None);
    };
    snapshot.events = std::mem::take(&mut lock.pending_events);
    Ok(Some(snapshot))
}

/// True once the game loop thread has exited on its own (fatal error).
pub fn has_stopped(state: &AppState) -> Result<bool, AppError> {
    let lock = state.loop_handle.lock().map_err(|_| AppError::Poisoned)?;
    Ok(lock.as_ref().is_some_and(|h| h.is_finished()))
}

/// Shut down the game loop and wait for it. Returns the final score, or the
/// error that stopped the loop early.
pub fn stop_session(state: &AppState) -> Result<u32, AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::Poisoned)?;
    if !*running {
        return Err(AppError::NotStarted);
    }

    if let Some(tx) = state.command_tx.lock().map_err(|_| AppError::Poisoned)?.take() {
        // The loop may already be gone after a fatal error.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    let handle = state
        .loop_handle
        .lock()
        .map_err(|_| AppError::Poisoned)?
        .take()
        .ok_or(AppError::NotStarted)?;
    *running = false;

    let score = handle.join().map_err(|_| AppError::LoopPanicked)??;
    info!("session stopped, final score {score}");
    Ok(score)
}

//! Application state shared between the session API and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use pigpen_core::commands::PlayerCommand;
use pigpen_core::events::SimEvent;
use pigpen_core::state::SimSnapshot;
use pigpen_sim::SimError;

/// Commands sent from the session layer to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// What the game loop thread returns: the final score, or the fatal error
/// that stopped it.
pub type LoopResult = Result<u32, SimError>;

/// What the game loop hands over to pollers.
#[derive(Debug, Default)]
pub struct Published {
    /// Snapshot of the most recent frame.
    pub snapshot: Option<SimSnapshot>,
    /// Events of every frame since the last poll, oldest first.
    pub pending_events: Vec<SimEvent>,
}

/// `Published` shared between the game loop and the session layer.
pub type SharedPublished = Arc<Mutex<Published>>;

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in a `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` holds state that does not exist before `start_session`
/// - `Arc<Mutex<...>>` shares published frames with the game loop thread
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    /// `None` before `start_session` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot and undelivered events. Updated by the game loop after each tick.
    pub published: SharedPublished,
    /// Whether the game loop is currently running.
    pub running: Mutex<bool>,
    /// Join handle of the game loop thread.
    pub loop_handle: Mutex<Option<JoinHandle<LoopResult>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            published: Arc::new(Mutex::new(Published::default())),
            running: Mutex::new(false),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

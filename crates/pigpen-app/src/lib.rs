//! PIGPEN headless application.
//!
//! Runs the simulation engine on a dedicated game-loop thread and exposes
//! a small session API for drivers (the CLI binary, tests).

pub mod game_loop;
pub mod logging;
pub mod session;
pub mod state;

pub use pigpen_core as core;

//! Simulation engine for PIGPEN.
//!
//! Owns the hecs ECS world, runs systems once per frame,
//! and produces SimSnapshots for the frontend.

pub mod aim;
pub mod config;
pub mod engine;
pub mod error;
pub mod score;
pub mod store;
pub mod systems;

pub use config::SimConfig;
pub use engine::SimulationEngine;
pub use error::SimError;
pub use pigpen_core as core;
pub use systems::combat::FireOutcome;

#[cfg(test)]
mod tests;

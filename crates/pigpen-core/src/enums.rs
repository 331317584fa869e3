//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Simulation run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Spawning, ticking and accepting fire actions.
    #[default]
    Active,
    /// Everything frozen in place; fire actions are ignored.
    Inactive,
}

/// Logical kind of an entity that owns render surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Target,
    Projectile,
    Particle,
}

/// How a target was killed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillCause {
    /// Picked directly by the aim ray at fire time.
    DirectHit,
    /// Struck by a projectile during a tick.
    Projectile,
}

/// Burst fragment color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    Pink,
    White,
}

/// Why a fire action did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The simulation is inactive.
    Inactive,
    /// Pointer was outside normalized device space.
    OutOfBounds,
}

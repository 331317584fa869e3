//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, ParticleTint};
use crate::types::RenderHandle;

/// A walking target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target {
    /// Walk-cycle phase (radians). Drives the vertical bob.
    pub phase: f64,
    /// Yaw in radians; local +x maps to (cos, 0, -sin).
    pub facing: f64,
    /// Monotonic insertion number, used for FIFO eviction.
    pub spawn_seq: u64,
}

/// Marks an entity as a projectile in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// One fragment of a hit burst.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    /// Remaining ticks before the fragment disappears.
    pub life: u32,
    pub tint: ParticleTint,
}

/// Render surfaces owned by an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Renderable {
    pub kind: EntityKind,
    pub handles: Vec<RenderHandle>,
}

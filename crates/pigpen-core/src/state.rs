//! Game state snapshot: the complete visible state handed to the frontend each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::{ParticleTint, SimPhase};
use crate::events::SimEvent;
use crate::types::{EntityId, SimTime};

/// Complete simulation state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub score: u32,
    /// Live targets, oldest first.
    pub targets: Vec<TargetView>,
    pub projectiles: Vec<ProjectileView>,
    pub particles: Vec<ParticleView>,
    /// Events raised since the previous snapshot.
    pub events: Vec<SimEvent>,
}

/// A live target for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: EntityId,
    pub spawn_seq: u64,
    pub position: DVec3,
    pub velocity: DVec3,
    /// Yaw in radians.
    pub facing: f64,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub position: DVec3,
    pub velocity: DVec3,
}

/// A burst fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: DVec3,
    pub life: u32,
    pub tint: ParticleTint,
}

//! Snapshot system: reads the world and builds a complete SimSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use pigpen_core::components::{Particle, Projectile, Target};
use pigpen_core::enums::SimPhase;
use pigpen_core::events::SimEvent;
use pigpen_core::state::*;
use pigpen_core::types::{Position, SimTime, Velocity};

use crate::store::{entity_id, EntityStore};

/// Build a complete SimSnapshot from the current store.
pub fn build_snapshot(
    store: &EntityStore,
    time: &SimTime,
    phase: SimPhase,
    score: u32,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        phase,
        score,
        targets: build_targets(store),
        projectiles: build_projectiles(store.world()),
        particles: build_particles(store.world()),
        events,
    }
}

/// Targets oldest first.
fn build_targets(store: &EntityStore) -> Vec<TargetView> {
    let world = store.world();
    store
        .targets_in_order()
        .filter_map(|entity| {
            let mut query = world
                .query_one::<(&Position, &Velocity, &Target)>(entity)
                .ok()?;
            let (pos, vel, target) = query.get()?;
            Some(TargetView {
                id: entity_id(entity),
                spawn_seq: target.spawn_seq,
                position: pos.0,
                velocity: vel.0,
                facing: target.facing,
            })
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Position, &Velocity, &Projectile)>()
        .iter()
        .map(|(entity, (pos, vel, _))| ProjectileView {
            id: entity_id(entity),
            position: pos.0,
            velocity: vel.0,
        })
        .collect()
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    world
        .query::<(&Position, &Particle)>()
        .iter()
        .map(|(_, (pos, particle))| ParticleView {
            position: pos.0,
            life: particle.life,
            tint: particle.tint,
        })
        .collect()
}

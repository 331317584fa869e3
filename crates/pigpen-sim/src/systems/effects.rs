//! Hit effects: particle bursts spawned on kills and advanced once per frame.

use glam::DVec3;
use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use pigpen_core::components::Particle;
use pigpen_core::constants::*;
use pigpen_core::enums::ParticleTint;
use pigpen_core::types::{Position, Velocity};

use crate::store::EntityStore;

/// Spawn a burst of `PARTICLE_COUNT` fragments at a kill position.
pub fn emit_burst(store: &mut EntityStore, rng: &mut ChaCha8Rng, position: DVec3) {
    let origin = position + DVec3::new(0.0, CENTER_MASS_OFFSET, 0.0);
    for _ in 0..PARTICLE_COUNT {
        let velocity = DVec3::new(
            (rng.gen::<f64>() - 0.5) * PARTICLE_SPREAD,
            rng.gen::<f64>() * PARTICLE_LIFT,
            (rng.gen::<f64>() - 0.5) * PARTICLE_SPREAD,
        );
        let tint = if rng.gen::<f64>() > 0.5 {
            ParticleTint::Pink
        } else {
            ParticleTint::White
        };
        store.insert_particle(origin, velocity, PARTICLE_LIFE, tint);
    }
}

/// Advance every live particle by one step. Returns how many burned out.
pub fn run(store: &mut EntityStore, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, (pos, vel, particle)) in store
        .world_mut()
        .query_mut::<(&mut Position, &mut Velocity, &mut Particle)>()
    {
        pos.0 += vel.0;
        vel.0.y -= PARTICLE_GRAVITY;
        particle.life = particle.life.saturating_sub(1);
        if particle.life == 0 {
            despawn_buffer.push(entity);
        }
    }

    let expired = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        store.remove(entity);
    }
    expired
}

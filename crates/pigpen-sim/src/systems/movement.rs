//! Kinematic integration for targets and projectiles.
//!
//! Velocities are per tick: position += velocity each frame.

use glam::DVec3;
use hecs::{Entity, World};

use pigpen_core::components::{Projectile, Target};
use pigpen_core::constants::*;
use pigpen_core::types::{CameraRig, Position, Velocity};

use crate::store::EntityStore;

/// Walk every target one step: integrate, bob, and bounce off the pen edges.
pub fn update_targets(world: &mut World) {
    for (_entity, (pos, vel, target)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut Target)>()
    {
        pos.0 += vel.0;

        // Height is recomputed from the phase every tick, never accumulated.
        target.phase += WALK_PHASE_STEP;
        pos.0.y = target.phase.sin().abs() * WALK_AMPLITUDE;

        if pos.0.x.abs() > LATERAL_BOUNDARY {
            vel.0.x = -vel.0.x;
            target.facing += std::f64::consts::PI;
        }
        if pos.0.z > DEPTH_BAND_MAX || pos.0.z < DEPTH_BAND_MIN {
            vel.0.z = -vel.0.z;
        }
    }
}

/// True when a projectile has left the volume it may travel in: behind the
/// camera eye, past the far field along the view direction, or outside the
/// world's height band.
pub fn outside_travel_volume(pos: &Position, camera: &CameraRig) -> bool {
    let p = pos.0;
    if p.y < PROJECTILE_MIN_Y || p.y > PROJECTILE_MAX_Y {
        return true;
    }
    let forward = (camera.look_at - camera.eye)
        .try_normalize()
        .unwrap_or(DVec3::NEG_Z);
    let depth = (p - camera.eye).dot(forward);
    !(0.0..=PROJECTILE_MAX_DEPTH).contains(&depth)
}

/// Fly every projectile one step and discard the ones that left the travel volume.
/// Returns how many were discarded.
pub fn update_projectiles(
    store: &mut EntityStore,
    camera: &CameraRig,
    despawn_buffer: &mut Vec<Entity>,
) -> usize {
    despawn_buffer.clear();

    for (entity, (pos, vel, _projectile)) in store
        .world_mut()
        .query_mut::<(&mut Position, &Velocity, &Projectile)>()
    {
        pos.0 += vel.0;
        if outside_travel_volume(pos, camera) {
            despawn_buffer.push(entity);
        }
    }

    let expired = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        store.remove(entity);
    }
    expired
}

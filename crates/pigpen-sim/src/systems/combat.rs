//! Fire control: hit-test along the aim ray, otherwise launch a projectile.

use glam::DVec3;
use hecs::Entity;
use log::debug;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use pigpen_core::components::{Renderable, Target};
use pigpen_core::constants::*;
use pigpen_core::enums::{EntityKind, IgnoreReason, KillCause};
use pigpen_core::events::SimEvent;
use pigpen_core::types::{CameraRig, EntityId, PointerCoord, Position};

use crate::aim::{self, Surface};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::score::ScoreTracker;
use crate::store::{entity_id, EntityStore};
use crate::systems::effects;

/// What a single fire action did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FireOutcome {
    /// The aim ray picked a target; it was killed on the spot.
    DirectHit { target: EntityId, position: DVec3 },
    /// Nothing under the pointer; a projectile is now in flight.
    ProjectileFired { projectile: EntityId, velocity: DVec3 },
    /// Nothing happened.
    Ignored(IgnoreReason),
}

/// Mutable engine state a fire action touches.
pub struct FireContext<'a> {
    pub store: &'a mut EntityStore,
    pub score: &'a mut ScoreTracker,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<SimEvent>,
}

/// Muzzle position in world space.
pub fn muzzle_position() -> DVec3 {
    DVec3::from_array(MUZZLE_POSITION)
}

/// Run one fire action for a pointer click.
pub fn fire(
    ctx: FireContext<'_>,
    camera: &CameraRig,
    config: &SimConfig,
    pointer: PointerCoord,
) -> Result<FireOutcome, SimError> {
    let Some(solution) = aim::resolve(camera, pointer, config.aim_distance) else {
        debug!("fire ignored, pointer ({}, {}) out of bounds", pointer.x, pointer.y);
        return Ok(FireOutcome::Ignored(IgnoreReason::OutOfBounds));
    };

    let muzzle = muzzle_position();
    let surfaces = live_target_surfaces(ctx.store);
    let hits = aim::intersect_surfaces(&solution.ray, &surfaces);

    if let Some(nearest) = hits.first() {
        let owner = ctx
            .store
            .owner_of(nearest.handle)
            .filter(|o| o.kind == EntityKind::Target)
            .ok_or(SimError::OrphanSurface {
                handle: nearest.handle,
            })?;
        let position = ctx
            .store
            .position(owner.entity)
            .ok_or(SimError::OrphanSurface {
                handle: nearest.handle,
            })?;
        debug!("direct hit at distance {:.2}", nearest.distance);
        ctx.events.push(muzzle_flash(muzzle));
        kill_target(
            ctx.store,
            ctx.score,
            ctx.rng,
            ctx.events,
            owner.entity,
            position,
            KillCause::DirectHit,
        );
        return Ok(FireOutcome::DirectHit {
            target: entity_id(owner.entity),
            position,
        });
    }

    ctx.events.push(muzzle_flash(muzzle));
    let velocity = (solution.far_point - muzzle).normalize_or_zero() * config.projectile_speed;
    let projectile = ctx.store.insert_projectile(muzzle, velocity);
    debug!("projectile launched toward {:?}", solution.far_point);
    Ok(FireOutcome::ProjectileFired {
        projectile: entity_id(projectile),
        velocity,
    })
}

fn muzzle_flash(muzzle: DVec3) -> SimEvent {
    SimEvent::MuzzleFlash {
        position: muzzle - DVec3::new(0.0, 0.0, MUZZLE_FLASH_FORWARD),
        duration_ms: MUZZLE_FLASH_MS,
    }
}

/// Remove a target, credit the kill and throw a burst where it stood.
pub(crate) fn kill_target(
    store: &mut EntityStore,
    score: &mut ScoreTracker,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
    target: Entity,
    position: DVec3,
    cause: KillCause,
) {
    store.remove(target);
    let total = score.increment();
    effects::emit_burst(store, rng, position);
    events.push(SimEvent::Kill { cause, position });
    events.push(SimEvent::ScoreChanged { score: total });
}

/// Hit surfaces of every live target.
fn live_target_surfaces(store: &EntityStore) -> Vec<Surface> {
    store
        .world()
        .query::<(&Position, &Target, &Renderable)>()
        .iter()
        .flat_map(|(_e, (pos, target, renderable))| {
            aim::target_surfaces(pos.0, target.facing, &renderable.handles)
        })
        .collect()
}

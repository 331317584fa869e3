//! Broad-phase projectile/target collision.
//!
//! Every projectile is checked against every target (O(P × T)). Projectiles
//! are visited in world order and targets oldest first; a projectile is
//! credited with the first live target inside the hit radius, and a target
//! can only be consumed once per tick.

use glam::DVec3;
use hecs::Entity;
use log::debug;
use rand_chacha::ChaCha8Rng;

use pigpen_core::components::Projectile;
use pigpen_core::constants::CENTER_MASS_OFFSET;
use pigpen_core::enums::KillCause;
use pigpen_core::events::SimEvent;
use pigpen_core::types::Position;

use crate::score::ScoreTracker;
use crate::store::EntityStore;
use crate::systems::combat::kill_target;

/// Run collision checks for one tick. Returns the number of kills.
pub fn run(
    store: &mut EntityStore,
    score: &mut ScoreTracker,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
    hit_radius: f64,
) -> u32 {
    let projectiles: Vec<(Entity, DVec3)> = store
        .world()
        .query::<(&Position, &Projectile)>()
        .iter()
        .map(|(e, (pos, _))| (e, pos.0))
        .collect();
    if projectiles.is_empty() {
        return 0;
    }

    let targets: Vec<(Entity, DVec3)> = store
        .targets_in_order()
        .filter_map(|e| store.position(e).map(|p| (e, p)))
        .collect();
    let mut consumed = vec![false; targets.len()];
    let mut pairs: Vec<(Entity, Entity, DVec3)> = Vec::new();

    let center_mass = DVec3::new(0.0, CENTER_MASS_OFFSET, 0.0);
    for &(projectile, shot) in &projectiles {
        let hit = targets
            .iter()
            .enumerate()
            .find(|(i, (_, pos))| !consumed[*i] && shot.distance(*pos + center_mass) < hit_radius);
        if let Some((i, &(target, pos))) = hit {
            consumed[i] = true;
            pairs.push((projectile, target, pos));
        }
    }

    let kills = pairs.len() as u32;
    for (projectile, target, pos) in pairs {
        store.remove(projectile);
        kill_target(store, score, rng, events, target, pos, KillCause::Projectile);
        debug!("projectile kill at ({:.2}, {:.2})", pos.x, pos.z);
    }
    kills
}

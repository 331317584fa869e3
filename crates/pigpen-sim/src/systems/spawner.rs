//! Target spawning: one new target per wall-clock interval, capped population.

use std::time::Duration;

use glam::DVec3;
use hecs::Entity;
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use pigpen_core::components::Target;
use pigpen_core::constants::*;
use pigpen_core::events::SimEvent;

use crate::config::SimConfig;
use crate::store::EntityStore;

/// Wall-clock spawn cadence, independent of the frame rate.
#[derive(Debug, Clone)]
pub struct SpawnClock {
    interval: Duration,
    accumulated: Duration,
}

impl SpawnClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Feed elapsed wall-clock time; returns how many spawn intervals came due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulated += elapsed;
        let mut due = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            due += 1;
        }
        due
    }
}

/// Spawn one target at a random edge of the pen, walking inward.
/// Evicts the oldest target if the population cap is exceeded.
pub fn run(
    store: &mut EntityStore,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
    events: &mut Vec<SimEvent>,
) -> Entity {
    let side: f64 = if rng.gen::<f64>() > 0.5 { 1.0 } else { -1.0 };

    let x = side * (SPAWN_LATERAL_MIN + rng.gen::<f64>() * SPAWN_LATERAL_SPREAD);
    let z = (rng.gen::<f64>() - 0.5) * SPAWN_DEPTH_SPREAD + SPAWN_DEPTH_CENTER;
    let drift = (rng.gen::<f64>() - 0.5) * SPAWN_DRIFT_SPREAD;
    let phase = rng.gen_range(0.0..std::f64::consts::TAU);
    let facing = if side > 0.0 { FACING_WEST } else { FACING_EAST };

    let entity = store.insert_target(
        DVec3::new(x, 0.0, z),
        DVec3::new(-side * config.target_speed, 0.0, drift),
        phase,
        facing,
    );
    debug!("spawned target at ({x:.2}, {z:.2}), live = {}", store.target_count());

    while store.target_count() > config.max_targets {
        let Some(oldest) = store.targets_in_order().next() else {
            break;
        };
        let spawn_seq = store
            .world()
            .get::<&Target>(oldest)
            .map(|t| t.spawn_seq)
            .ok();
        store.evict_oldest_target();
        if let Some(spawn_seq) = spawn_seq {
            debug!("population cap reached, evicted target #{spawn_seq}");
            events.push(SimEvent::TargetEvicted { spawn_seq });
        }
    }

    entity
}

//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the entity store, handles fire actions, runs all
//! per-frame systems, and produces `SimSnapshot`s. Completely headless, so a
//! fixed seed gives a reproducible session for tests.

use std::time::Duration;

use hecs::Entity;
use log::{debug, info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pigpen_core::commands::PlayerCommand;
use pigpen_core::enums::{IgnoreReason, SimPhase};
use pigpen_core::events::SimEvent;
use pigpen_core::state::SimSnapshot;
use pigpen_core::types::{CameraRig, PointerCoord, SimTime};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::score::ScoreTracker;
use crate::store::EntityStore;
use crate::systems;
use crate::systems::combat::{FireContext, FireOutcome};
use crate::systems::spawner::SpawnClock;

/// The simulation engine. Owns the entity store and all sim state.
pub struct SimulationEngine {
    store: EntityStore,
    time: SimTime,
    phase: SimPhase,
    config: SimConfig,
    camera: CameraRig,
    rng: ChaCha8Rng,
    score: ScoreTracker,
    spawn_clock: SpawnClock,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            store: EntityStore::new(),
            time: SimTime::default(),
            phase: SimPhase::default(),
            camera: CameraRig::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            score: ScoreTracker::default(),
            spawn_clock: SpawnClock::new(config.spawn_interval()),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Advance the simulation by one frame and return the resulting snapshot.
    /// While inactive nothing moves; the snapshot still carries pending events.
    pub fn tick(&mut self) -> SimSnapshot {
        if self.phase == SimPhase::Active {
            self.run_systems();
            self.time.advance();
        }
        self.snapshot()
    }

    /// Snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> SimSnapshot {
        let mut events = std::mem::take(&mut self.events);
        events.extend(self.store.drain_scene_events());
        systems::snapshot::build_snapshot(
            &self.store,
            &self.time,
            self.phase,
            self.score.current(),
            events,
        )
    }

    /// Handle a pointer click. Mutates the store and score immediately.
    ///
    /// An error means a render surface had no owning target; the caller
    /// must treat the session as corrupt.
    pub fn fire(&mut self, pointer: PointerCoord) -> Result<FireOutcome, SimError> {
        if self.phase == SimPhase::Inactive {
            return Ok(FireOutcome::Ignored(IgnoreReason::Inactive));
        }
        let ctx = FireContext {
            store: &mut self.store,
            score: &mut self.score,
            rng: &mut self.rng,
            events: &mut self.events,
        };
        systems::combat::fire(ctx, &self.camera, &self.config, pointer)
    }

    /// Feed elapsed wall-clock time to the spawn cadence.
    /// Returns how many targets were spawned.
    pub fn advance_spawn_clock(&mut self, elapsed: Duration) -> u32 {
        let due = self.spawn_clock.advance(elapsed);
        if self.phase == SimPhase::Inactive {
            if due > 0 {
                trace!("dropped {due} spawn(s) while inactive");
            }
            return 0;
        }
        for _ in 0..due {
            self.spawn_target();
        }
        due
    }

    /// One spawn-scheduler invocation. No-op while inactive.
    pub fn spawn_target(&mut self) -> Option<Entity> {
        if self.phase == SimPhase::Inactive {
            return None;
        }
        Some(systems::spawner::run(
            &mut self.store,
            &mut self.rng,
            &self.config,
            &mut self.events,
        ))
    }

    /// Switch between active and inactive. Repeated calls with the same value do nothing.
    pub fn set_active(&mut self, active: bool) {
        let next = if active {
            SimPhase::Active
        } else {
            SimPhase::Inactive
        };
        if self.phase != next {
            info!("simulation {:?} -> {:?} at tick {}", self.phase, next, self.time.tick);
            self.phase = next;
        }
    }

    /// Apply a command from a channel-based driver.
    /// Fire commands return their outcome.
    pub fn handle_command(&mut self, command: PlayerCommand) -> Result<Option<FireOutcome>, SimError> {
        match command {
            PlayerCommand::Fire { x, y } => self.fire(PointerCoord::new(x, y)).map(Some),
            PlayerCommand::SetActive { active } => {
                self.set_active(active);
                Ok(None)
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == SimPhase::Active
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Current kill count.
    pub fn score(&self) -> u32 {
        self.score.current()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Replace the camera transform (e.g. after a viewport resize).
    pub fn set_camera(&mut self, camera: CameraRig) {
        self.camera = camera;
    }

    /// Read-only access to the entity store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Insert a target with explicit kinematics (for tests).
    #[cfg(test)]
    pub fn spawn_test_target(
        &mut self,
        position: glam::DVec3,
        velocity: glam::DVec3,
        phase: f64,
        facing: f64,
    ) -> Entity {
        self.store.insert_target(position, velocity, phase, facing)
    }

    /// Insert a projectile with explicit kinematics (for tests).
    #[cfg(test)]
    pub fn spawn_test_projectile(&mut self, position: glam::DVec3, velocity: glam::DVec3) -> Entity {
        self.store.insert_projectile(position, velocity)
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Targets walk and bounce
        systems::movement::update_targets(self.store.world_mut());
        // 2. Projectiles fly, out-of-volume ones are dropped
        let expired = systems::movement::update_projectiles(
            &mut self.store,
            &self.camera,
            &mut self.despawn_buffer,
        );
        // 3. Projectile/target collisions
        let kills = systems::collision::run(
            &mut self.store,
            &mut self.score,
            &mut self.rng,
            &mut self.events,
            self.config.hit_radius,
        );
        // 4. Hit-effect particles
        systems::effects::run(&mut self.store, &mut self.despawn_buffer);

        if expired > 0 || kills > 0 {
            debug!(
                "tick {}: {expired} projectile(s) expired, {kills} kill(s)",
                self.time.tick
            );
        }
        trace!(
            "tick {}: {} targets, {} projectiles, {} particles",
            self.time.tick,
            self.store.target_count(),
            self.store.projectile_count(),
            self.store.particle_count()
        );
    }
}

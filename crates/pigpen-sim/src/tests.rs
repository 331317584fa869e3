//! Tests for the simulation engine: lifecycle, fire actions, collisions and run state.

use std::time::Duration;

use glam::DVec3;

use pigpen_core::commands::PlayerCommand;
use pigpen_core::components::Target;
use pigpen_core::constants::*;
use pigpen_core::enums::*;
use pigpen_core::events::SimEvent;
use pigpen_core::types::{CameraRig, PointerCoord, Position, Velocity};

use crate::aim;
use crate::config::SimConfig;
use crate::engine::SimulationEngine;
use crate::systems::combat::{muzzle_position, FireOutcome};

fn engine() -> SimulationEngine {
    SimulationEngine::new(SimConfig::default())
}

fn pointer_at(engine: &SimulationEngine, point: DVec3) -> PointerCoord {
    let ndc = aim::view_projection(engine.camera()).project_point3(point);
    PointerCoord::new(ndc.x, ndc.y)
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);

    for i in 0..600 {
        if i % 60 == 0 {
            engine_a.advance_spawn_clock(Duration::from_secs(2));
            engine_b.advance_spawn_clock(Duration::from_secs(2));
        }
        if i % 25 == 0 {
            let p = PointerCoord::new(((i % 7) as f64 - 3.0) / 4.0, -0.2);
            engine_a.fire(p).unwrap();
            engine_b.fire(p).unwrap();
        }
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

// ---- Walking ----

#[test]
fn test_walk_scenario_from_edge() {
    let mut engine = engine();
    let e = engine.spawn_test_target(
        DVec3::new(10.0, 0.0, 0.0),
        DVec3::new(-0.03, 0.0, 0.0),
        0.0,
        FACING_WEST,
    );

    let n = 150;
    for _ in 0..n {
        engine.tick();
    }

    let pos = engine.store().world().get::<&Position>(e).unwrap().0;
    let expected_x = 10.0 - 0.03 * n as f64;
    let expected_y = (0.1 * n as f64).sin().abs() * 0.1;
    assert!((pos.x - expected_x).abs() < 1e-9, "x = {}", pos.x);
    assert!((pos.y - expected_y).abs() < 1e-9, "y = {}", pos.y);
    assert_eq!(pos.z, 0.0);
}

#[test]
fn test_height_always_derived_from_phase() {
    let mut engine = engine();
    engine.advance_spawn_clock(Duration::from_secs(20));
    assert_eq!(engine.store().target_count(), MAX_TARGETS);

    let mut last_phase: Vec<f64> = Vec::new();
    for _ in 0..500 {
        engine.tick();
        let world = engine.store().world();
        let phases: Vec<f64> = engine
            .store()
            .targets_in_order()
            .map(|e| {
                let pos = world.get::<&Position>(e).unwrap().0;
                let target = world.get::<&Target>(e).unwrap();
                assert_eq!(pos.y, target.phase.sin().abs() * WALK_AMPLITUDE);
                target.phase
            })
            .collect();
        for (old, new) in last_phase.iter().zip(&phases) {
            assert!(new > old, "phase must strictly increase");
        }
        last_phase = phases;
    }
}

#[test]
fn test_lateral_flip_iff_boundary_crossed() {
    let mut engine = engine();
    let e = engine.spawn_test_target(
        DVec3::new(14.0, 0.0, -3.0),
        DVec3::new(0.03, 0.0, 0.0),
        0.0,
        FACING_EAST,
    );

    let mut flips = 0;
    for _ in 0..200 {
        let (vx_before, facing_before) = {
            let world = engine.store().world();
            let vx = world.get::<&Velocity>(e).unwrap().0.x;
            let facing = world.get::<&Target>(e).unwrap().facing;
            (vx, facing)
        };
        engine.tick();
        let world = engine.store().world();
        let x = world.get::<&Position>(e).unwrap().0.x;
        let vx = world.get::<&Velocity>(e).unwrap().0.x;
        let facing = world.get::<&Target>(e).unwrap().facing;

        let crossed = x.abs() > LATERAL_BOUNDARY;
        let flipped = vx.signum() != vx_before.signum();
        assert_eq!(crossed, flipped, "flip must coincide with crossing at x = {x}");
        if flipped {
            flips += 1;
            assert_eq!(facing - facing_before, std::f64::consts::PI);
        } else {
            assert_eq!(facing, facing_before);
        }
    }
    assert_eq!(flips, 1);
}

#[test]
fn test_depth_band_bounce() {
    let mut engine = engine();
    let e = engine.spawn_test_target(
        DVec3::new(0.0, 0.0, -9.99),
        DVec3::new(0.0, 0.0, -0.005),
        0.0,
        FACING_EAST,
    );
    for _ in 0..3 {
        engine.tick();
    }
    let world = engine.store().world();
    assert!(world.get::<&Velocity>(e).unwrap().0.z > 0.0);
    assert_eq!(world.get::<&Target>(e).unwrap().facing, FACING_EAST);
}

// ---- Spawning ----

#[test]
fn test_population_cap_fifo() {
    let mut engine = engine();
    let spawned = engine.advance_spawn_clock(Duration::from_secs(60));
    assert_eq!(spawned, 30);
    assert_eq!(engine.store().target_count(), MAX_TARGETS);

    let snap = engine.tick();
    let seqs: Vec<u64> = snap.targets.iter().map(|t| t.spawn_seq).collect();
    assert_eq!(seqs, (20..30).collect::<Vec<u64>>());
    let evicted = snap
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::TargetEvicted { .. }))
        .count();
    assert_eq!(evicted, 20);
}

#[test]
fn test_spawn_cadence_is_wall_clock() {
    let mut engine = engine();
    assert_eq!(engine.advance_spawn_clock(Duration::from_millis(1000)), 0);
    // Frames do not spawn anything on their own.
    for _ in 0..600 {
        engine.tick();
    }
    assert_eq!(engine.store().target_count(), 0);
    assert_eq!(engine.advance_spawn_clock(Duration::from_millis(1000)), 1);
    assert_eq!(engine.store().target_count(), 1);
}

#[test]
fn test_spawn_emits_scene_additions() {
    let mut engine = engine();
    engine.spawn_target();
    let snap = engine.tick();
    let added = snap
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::Added { kind: EntityKind::Target, .. }))
        .count();
    assert_eq!(added, TARGET_SURFACES.len());
    assert!(engine.tick().events.is_empty());
}

// ---- Fire actions ----

#[test]
fn test_direct_hit_via_engine() {
    let mut engine = engine();
    let root = DVec3::new(-3.0, 0.0, -4.0);
    engine.spawn_test_target(root, DVec3::new(0.03, 0.0, 0.0), 0.0, FACING_EAST);
    engine.spawn_test_target(DVec3::new(12.0, 0.0, -8.0), DVec3::ZERO, 0.0, FACING_WEST);

    let pointer = pointer_at(&engine, root + DVec3::new(0.0, 0.6, 0.0));
    let outcome = engine.fire(pointer).unwrap();

    assert!(matches!(outcome, FireOutcome::DirectHit { .. }));
    assert_eq!(engine.store().target_count(), 1);
    assert_eq!(engine.store().projectile_count(), 0);
    assert_eq!(engine.score(), 1);

    let snap = engine.tick();
    assert_eq!(snap.score, 1);
    assert!(snap.events.contains(&SimEvent::ScoreChanged { score: 1 }));
    assert!(snap.projectiles.is_empty());
}

#[test]
fn test_miss_fires_one_projectile() {
    let mut engine = engine();
    let pointer = PointerCoord::new(-0.4, 0.3);
    let solution = aim::resolve(engine.camera(), pointer, AIM_DISTANCE).unwrap();

    let outcome = engine.fire(pointer).unwrap();
    let FireOutcome::ProjectileFired { velocity, .. } = outcome else {
        panic!("expected a projectile, got {outcome:?}");
    };
    let expected_dir = (solution.far_point - muzzle_position()).normalize();
    assert!((velocity.normalize() - expected_dir).length() < 1e-12);
    assert!((velocity.length() - PROJECTILE_SPEED).abs() < 1e-12);
    assert_eq!(engine.store().projectile_count(), 1);
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_fire_scenario_far_point_down_the_axis() {
    let mut engine = engine();
    engine.set_camera(CameraRig {
        eye: DVec3::ZERO,
        look_at: DVec3::NEG_Z,
        ..CameraRig::default()
    });

    let outcome = engine.fire(PointerCoord::new(0.0, 0.0)).unwrap();
    let FireOutcome::ProjectileFired { velocity, .. } = outcome else {
        panic!("expected a projectile, got {outcome:?}");
    };
    let expected = DVec3::new(-0.6, -1.3, -28.3).normalize() * 0.8;
    assert!((velocity - expected).length() < 1e-9, "velocity = {velocity:?}");

    let snap = engine.snapshot();
    assert_eq!(snap.projectiles.len(), 1);
    assert_eq!(snap.projectiles[0].position, DVec3::new(0.6, 1.3, 8.3));
}

#[test]
fn test_malformed_pointer_is_noop() {
    let mut engine = engine();
    for p in [
        PointerCoord::new(1.2, 0.0),
        PointerCoord::new(0.0, -7.0),
        PointerCoord::new(f64::NAN, f64::NAN),
    ] {
        assert_eq!(
            engine.fire(p).unwrap(),
            FireOutcome::Ignored(IgnoreReason::OutOfBounds)
        );
    }
    assert_eq!(engine.store().projectile_count(), 0);
    assert!(engine.snapshot().events.is_empty());
}

#[test]
fn test_fire_command_through_handle_command() {
    let mut engine = engine();
    let outcome = engine
        .handle_command(PlayerCommand::Fire { x: 0.0, y: 0.0 })
        .unwrap();
    assert!(matches!(outcome, Some(FireOutcome::ProjectileFired { .. })));
    let none = engine
        .handle_command(PlayerCommand::SetActive { active: false })
        .unwrap();
    assert!(none.is_none());
    assert!(!engine.is_active());
}

// ---- Projectiles in flight ----

#[test]
fn test_projectile_kill_during_tick() {
    let mut engine = engine();
    let target = engine.spawn_test_target(DVec3::new(0.0, 0.0, -2.0), DVec3::ZERO, 0.0, FACING_EAST);
    // One step away from the target's center mass.
    engine.spawn_test_projectile(DVec3::new(0.0, 0.6, -1.0), DVec3::new(0.0, 0.0, -0.8));

    let snap = engine.tick();
    assert!(!engine.store().contains(target));
    assert_eq!(engine.store().projectile_count(), 0);
    assert_eq!(snap.score, 1);
    // The kill lands where the target stood after this tick's step.
    let kill = snap.events.iter().find_map(|e| match e {
        SimEvent::Kill { cause, position } => Some((*cause, *position)),
        _ => None,
    });
    let (cause, position) = kill.expect("kill event");
    assert_eq!(cause, KillCause::Projectile);
    assert_eq!(position.z, -2.0);
    assert_eq!(position.y, 0.1_f64.sin() * WALK_AMPLITUDE);
    assert_eq!(snap.particles.len(), PARTICLE_COUNT);
}

#[test]
fn test_projectile_far_from_targets_survives() {
    let mut engine = engine();
    engine.spawn_test_target(DVec3::new(10.0, 0.0, -2.0), DVec3::ZERO, 0.0, FACING_WEST);
    let shot = engine.spawn_test_projectile(DVec3::new(0.0, 1.0, 0.0), DVec3::new(0.0, 0.0, -0.8));

    engine.tick();
    assert!(engine.store().contains(shot));
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_missed_projectile_eventually_expires() {
    let mut engine = engine();
    engine.fire(PointerCoord::new(0.0, 0.9)).unwrap();
    assert_eq!(engine.store().projectile_count(), 1);
    for _ in 0..200 {
        engine.tick();
    }
    assert_eq!(engine.store().projectile_count(), 0);
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_particles_clear_after_burst() {
    let mut engine = engine();
    let root = DVec3::new(0.0, 0.0, -3.0);
    engine.spawn_test_target(root, DVec3::ZERO, 0.0, FACING_EAST);
    let pointer = pointer_at(&engine, root + DVec3::new(0.0, 0.6, 0.0));
    engine.fire(pointer).unwrap();
    assert_eq!(engine.store().particle_count(), PARTICLE_COUNT);

    for _ in 0..PARTICLE_LIFE {
        engine.tick();
    }
    assert_eq!(engine.store().particle_count(), 0);
}

// ---- Active / inactive ----

#[test]
fn test_set_inactive_is_idempotent() {
    let mut engine = engine();
    engine.set_active(false);
    engine.set_active(false);
    assert_eq!(engine.phase(), SimPhase::Inactive);

    engine.set_active(true);
    assert_eq!(engine.phase(), SimPhase::Active);
    engine.set_active(true);
    assert_eq!(engine.phase(), SimPhase::Active);
}

#[test]
fn test_inactive_freezes_everything() {
    let mut engine = engine();
    let target = engine.spawn_test_target(DVec3::new(5.0, 0.0, -2.0), DVec3::new(0.03, 0.0, 0.0), 0.0, FACING_EAST);
    let shot = engine.spawn_test_projectile(DVec3::new(-5.0, 1.0, 0.0), DVec3::new(0.0, 0.0, -0.8));
    engine.tick();

    let before_target = engine.store().position(target).unwrap();
    let before_shot = engine.store().position(shot).unwrap();
    let before_tick = engine.time().tick;

    engine.set_active(false);
    for _ in 0..30 {
        let snap = engine.tick();
        assert_eq!(snap.phase, SimPhase::Inactive);
    }
    assert_eq!(engine.store().position(target), Some(before_target));
    assert_eq!(engine.store().position(shot), Some(before_shot));
    assert_eq!(engine.time().tick, before_tick);

    assert_eq!(
        engine.fire(PointerCoord::new(0.0, 0.0)).unwrap(),
        FireOutcome::Ignored(IgnoreReason::Inactive)
    );
    assert_eq!(engine.spawn_target(), None);
    assert_eq!(engine.store().projectile_count(), 1);
}

#[test]
fn test_reactivation_waits_for_next_interval() {
    let mut engine = engine();
    engine.set_active(false);
    engine.set_active(false);
    assert_eq!(engine.advance_spawn_clock(Duration::from_millis(2500)), 0);
    assert_eq!(engine.store().target_count(), 0);

    engine.set_active(true);
    assert_eq!(engine.store().target_count(), 0, "no spawn on reactivation");
    assert_eq!(engine.advance_spawn_clock(Duration::from_millis(1499)), 0);
    assert_eq!(engine.advance_spawn_clock(Duration::from_millis(1)), 1);
    assert_eq!(engine.store().target_count(), 1);
}

// ---- Snapshots ----

#[test]
fn test_snapshot_lists_live_entities() {
    let mut engine = engine();
    engine.advance_spawn_clock(Duration::from_secs(6));
    engine.fire(PointerCoord::new(0.0, 0.95)).unwrap();
    let snap = engine.tick();

    assert_eq!(snap.targets.len(), 3);
    assert_eq!(snap.projectiles.len(), 1);
    assert_eq!(snap.time.tick, 1);
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"MuzzleFlash\""));
}

//! Simulation constants and tuning parameters.

use std::f64::consts::PI;

/// Render-loop tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Spawning ---

/// Wall-clock interval between target spawns (milliseconds).
pub const SPAWN_INTERVAL_MS: u64 = 2000;

/// Maximum simultaneous live targets. Oldest is evicted beyond this.
pub const MAX_TARGETS: usize = 10;

/// Inner edge of the lateral spawn band (|x|).
pub const SPAWN_LATERAL_MIN: f64 = 10.0;

/// Width of the lateral spawn band.
pub const SPAWN_LATERAL_SPREAD: f64 = 5.0;

/// Width of the forward/back spawn band, centered on `SPAWN_DEPTH_CENTER`.
pub const SPAWN_DEPTH_SPREAD: f64 = 10.0;

/// Center of the forward/back spawn band.
pub const SPAWN_DEPTH_CENTER: f64 = -5.0;

/// Maximum magnitude of the spawn z drift is half of this.
pub const SPAWN_DRIFT_SPREAD: f64 = 0.01;

// --- Targets ---

/// Lateral walking speed (units per tick).
pub const TARGET_SPEED: f64 = 0.03;

/// Walk phase advance per tick (radians).
pub const WALK_PHASE_STEP: f64 = 0.1;

/// Height of the walk bob.
pub const WALK_AMPLITUDE: f64 = 0.1;

/// Targets turn around once |x| exceeds this.
pub const LATERAL_BOUNDARY: f64 = 15.0;

/// Near edge of the forward/back band (toward the camera).
pub const DEPTH_BAND_MAX: f64 = 5.0;

/// Far edge of the forward/back band.
pub const DEPTH_BAND_MIN: f64 = -10.0;

/// Facing for a target walking toward -x.
pub const FACING_WEST: f64 = PI;

/// Facing for a target walking toward +x.
pub const FACING_EAST: f64 = 0.0;

/// Vertical offset from a target's root to its center of mass.
pub const CENTER_MASS_OFFSET: f64 = 0.6;

/// Hit surfaces of a target in its local frame: (offset, radius).
/// Local +x is the snout direction. Order: body, head, snout.
pub const TARGET_SURFACES: [([f64; 3], f64); 3] = [
    ([0.0, 0.6, 0.0], 0.7),
    ([0.7, 0.7, 0.0], 0.35),
    ([1.0, 0.65, 0.0], 0.18),
];

// --- Projectiles ---

/// Projectile speed (units per tick).
pub const PROJECTILE_SPEED: f64 = 0.8;

/// Player anchor on the ground.
pub const PLAYER_ANCHOR: [f64; 3] = [0.0, 0.0, 8.0];

/// Gun offset relative to the player anchor.
pub const GUN_OFFSET: [f64; 3] = [0.6, 1.3, 0.3];

/// World-space emission point of every projectile.
pub const MUZZLE_POSITION: [f64; 3] = [
    PLAYER_ANCHOR[0] + GUN_OFFSET[0],
    PLAYER_ANCHOR[1] + GUN_OFFSET[1],
    PLAYER_ANCHOR[2] + GUN_OFFSET[2],
];

/// Muzzle flash is drawn this far in front of the muzzle (along -z).
pub const MUZZLE_FLASH_FORWARD: f64 = 0.5;

/// How long the renderer keeps a muzzle flash on screen (milliseconds).
pub const MUZZLE_FLASH_MS: u64 = 50;

/// Projectile/target collision radius.
pub const HIT_RADIUS: f64 = 1.2;

/// Travel volume: projectiles past these bounds are discarded.
/// Depth is measured from the camera eye along the view direction.
pub const PROJECTILE_MAX_DEPTH: f64 = 42.0;
pub const PROJECTILE_MIN_Y: f64 = -5.0;
pub const PROJECTILE_MAX_Y: f64 = 30.0;

// --- Aiming ---

/// Distance along the aim ray used as the projectile's aim point.
pub const AIM_DISTANCE: f64 = 20.0;

pub const CAMERA_EYE: [f64; 3] = [0.0, 5.0, 12.0];
pub const CAMERA_LOOK_AT: [f64; 3] = [0.0, 2.0, 0.0];
pub const CAMERA_FOV_Y_DEG: f64 = 60.0;
pub const CAMERA_ASPECT: f64 = 16.0 / 9.0;
pub const CAMERA_NEAR: f64 = 0.1;
pub const CAMERA_FAR: f64 = 1000.0;

// --- Hit effects ---

/// Particles per kill burst.
pub const PARTICLE_COUNT: usize = 10;

/// Initial life budget of a particle (ticks).
pub const PARTICLE_LIFE: u32 = 30;

/// Horizontal spread of particle velocity (full width).
pub const PARTICLE_SPREAD: f64 = 0.2;

/// Maximum initial upward particle velocity.
pub const PARTICLE_LIFT: f64 = 0.2;

/// Downward acceleration applied to particles each tick.
pub const PARTICLE_GRAVITY: f64 = 0.01;

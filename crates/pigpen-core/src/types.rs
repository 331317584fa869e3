//! Fundamental geometric and simulation types.
//!
//! World axes follow the scene: x = right, y = up, z = toward the camera.
//! Distances are scene units, velocities are scene units per tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// World-space position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// Per-tick displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// A pointer location in normalized device space.
///
/// Both axes span [-1, 1] with the origin at the viewport center and y up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerCoord {
    pub x: f64,
    pub y: f64,
}

/// Camera transform handed over by the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub eye: DVec3,
    pub look_at: DVec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f64,
    /// Viewport width / height.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

/// Opaque handle to one renderable surface owned by a logical entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenderHandle(pub u32);

/// Stable identifier for a live entity, as seen from outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Euclidean distance to a world point.
    pub fn range_to(&self, point: DVec3) -> f64 {
        self.0.distance(point)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Speed magnitude (units per tick).
    pub fn speed(&self) -> f64 {
        self.0.length()
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

impl PointerCoord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both axes are finite and inside [-1, 1].
    pub fn is_normalized(&self) -> bool {
        let in_range = |v: f64| v.is_finite() && (-1.0..=1.0).contains(&v);
        in_range(self.x) && in_range(self.y)
    }

    /// Convert a pixel location inside a viewport of the given size.
    pub fn from_viewport(px: f64, py: f64, width: f64, height: f64) -> Self {
        Self {
            x: (px / width) * 2.0 - 1.0,
            y: -(py / height) * 2.0 + 1.0,
        }
    }
}

impl Default for CameraRig {
    /// Third-person view over the pen, looking slightly down at the field.
    fn default() -> Self {
        Self {
            eye: DVec3::from_array(CAMERA_EYE),
            look_at: DVec3::from_array(CAMERA_LOOK_AT),
            fov_y_deg: CAMERA_FOV_Y_DEG,
            aspect: CAMERA_ASPECT,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

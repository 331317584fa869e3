//! Aim resolution: pointer coordinate → world-space ray.
//!
//! Everything here is a pure function of the camera and the pointer.

use glam::{DMat4, DQuat, DVec3};

use pigpen_core::constants::TARGET_SURFACES;
use pigpen_core::types::{CameraRig, PointerCoord, RenderHandle};

/// A half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

/// Result of resolving a pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimSolution {
    pub ray: Ray,
    /// Point at the configured aim distance along the ray.
    pub far_point: DVec3,
}

/// A spherical hit surface belonging to some entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub handle: RenderHandle,
    pub center: DVec3,
    pub radius: f64,
}

/// One ray/surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub handle: RenderHandle,
    /// Distance from the ray origin.
    pub distance: f64,
    pub point: DVec3,
}

impl Ray {
    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Nearest non-negative hit distance against a sphere.
    pub fn intersect_sphere(&self, center: DVec3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let near = -b - root;
        if near >= 0.0 {
            return Some(near);
        }
        // Origin inside the sphere.
        let far = -b + root;
        (far >= 0.0).then_some(far)
    }
}

/// Combined view-projection matrix for a camera rig.
pub fn view_projection(camera: &CameraRig) -> DMat4 {
    let proj = DMat4::perspective_rh(
        camera.fov_y_deg.to_radians(),
        camera.aspect,
        camera.near,
        camera.far,
    );
    let view = DMat4::look_at_rh(camera.eye, camera.look_at, DVec3::Y);
    proj * view
}

/// Turn a pointer coordinate into an aim ray and far point.
///
/// Returns `None` when the pointer is outside normalized device space or the
/// camera is degenerate.
pub fn resolve(camera: &CameraRig, pointer: PointerCoord, aim_distance: f64) -> Option<AimSolution> {
    if !pointer.is_normalized() {
        return None;
    }
    let inverse = view_projection(camera).inverse();
    // glam's right-handed projection maps the far plane to NDC z = 1.
    let on_far_plane = inverse.project_point3(DVec3::new(pointer.x, pointer.y, 1.0));
    let direction = (on_far_plane - camera.eye).try_normalize()?;

    let ray = Ray {
        origin: camera.eye,
        direction,
    };
    Some(AimSolution {
        ray,
        far_point: ray.at(aim_distance),
    })
}

/// Intersect a ray with a set of surfaces, nearest first.
pub fn intersect_surfaces(ray: &Ray, surfaces: &[Surface]) -> Vec<SurfaceHit> {
    let mut hits: Vec<SurfaceHit> = surfaces
        .iter()
        .filter_map(|s| {
            ray.intersect_sphere(s.center, s.radius).map(|distance| SurfaceHit {
                handle: s.handle,
                distance,
                point: ray.at(distance),
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// World-space hit surfaces of a target rooted at `position` with yaw `facing`.
///
/// `handles` pairs up with the parts of `TARGET_SURFACES` in order.
pub fn target_surfaces(position: DVec3, facing: f64, handles: &[RenderHandle]) -> Vec<Surface> {
    let yaw = DQuat::from_rotation_y(facing);
    handles
        .iter()
        .zip(TARGET_SURFACES.iter())
        .map(|(&handle, &(offset, radius))| Surface {
            handle,
            center: position + yaw * DVec3::from_array(offset),
            radius,
        })
        .collect()
}

/// Unit direction a target with the given yaw is looking along.
pub fn facing_direction(facing: f64) -> DVec3 {
    DQuat::from_rotation_y(facing) * DVec3::X
}

//! Screen-space-invariant tolerances.
//!
//! Hit zones and markers are sized in pixels but tested in world units, so
//! the world radius has to be recomputed per point: it grows with camera
//! distance and shrinks as the user zooms in.

use glam::Vec3;

use crate::camera::CameraState;

/// Convert an on-screen pixel radius to the equivalent world-space radius
/// at `point`.
pub fn world_radius(camera: &CameraState, point: Vec3, pixel_radius: f32) -> f32 {
    if camera.viewport.y <= 0.0 {
        return 0.0;
    }
    let distance = (point - camera.eye).length();
    (pixel_radius / camera.viewport.y) * distance * (camera.fov * 0.5).tan()
}

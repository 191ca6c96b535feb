use glam::{Vec2, Vec3};

use crate::camera::CameraState;

/// Unconstrained pointer delta to a world delta at `reference`.
///
/// The scale uses the camera distance to the drag's reference point (grab
/// point or object center), so off-center objects track the pointer at the
/// correct speed. The vertical world component is discarded: a planar drag
/// must not lift ground objects.
pub fn unconstrained_delta(camera: &CameraState, pointer_delta: Vec2, reference: Vec3) -> Vec3 {
    let right = camera.right_vector();
    let up = camera.up_vector();
    if right == Vec3::ZERO || up == Vec3::ZERO {
        // Degenerate view angle: no movement this frame
        return Vec3::ZERO;
    }

    let distance = (reference - camera.eye).length();
    if camera.viewport.y <= 0.0 {
        return Vec3::ZERO;
    }
    let pixel_to_world = 2.0 * (camera.fov * 0.5).tan() * distance / camera.viewport.y;

    // Screen y grows downward, world up does not
    let mut delta = right * (pointer_delta.x * pixel_to_world)
        - up * (pointer_delta.y * pixel_to_world);
    delta.y = 0.0;
    delta
}

/// Scalar displacement along `normal` for a face-anchored drag.
///
/// Projects the anchor and `anchor + normal` to the screen; the dominant
/// screen axis of that direction decides whether horizontal or vertical
/// mouse motion drives the drag, and its sign keeps "toward the face's
/// screen direction" positive. Degenerate projections yield zero motion.
pub fn constrained_scalar(
    camera: &CameraState,
    anchor: Vec3,
    normal: Vec3,
    pointer_delta: Vec2,
    sensitivity: f32,
) -> f32 {
    let (Some(p0), Some(p1)) = (camera.project(anchor), camera.project(anchor + normal)) else {
        return 0.0;
    };

    let screen_axis = p1 - p0;
    if screen_axis.length_squared() < 1e-6 {
        // Normal points straight at the camera
        return 0.0;
    }

    let along = if screen_axis.x.abs() >= screen_axis.y.abs() {
        pointer_delta.x * screen_axis.x.signum()
    } else {
        pointer_delta.y * screen_axis.y.signum()
    };

    along * sensitivity
}

/// Constrained-mode world delta: the scalar times the face normal
pub fn constrained_delta(
    camera: &CameraState,
    anchor: Vec3,
    normal: Vec3,
    pointer_delta: Vec2,
    sensitivity: f32,
) -> Vec3 {
    normal * constrained_scalar(camera, anchor, normal, pointer_delta, sensitivity)
}

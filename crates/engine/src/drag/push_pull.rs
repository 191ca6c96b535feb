//! Face extrusion.
//!
//! Only the grabbed face's side moves: the dimension change is paired with
//! a half-sized position shift along the face direction so the opposite
//! face never displaces.

use glam::{Vec2, Vec3};
use shared::DimAxis;

use super::session::{DragMode, DragSession, SolidSnapshot, MIN_DIMENSION};
use crate::geometry;
use crate::scene::SceneState;

/// Map a world face normal to the solid's local dimension axis and the
/// exact outward world direction of that face.
fn face_axis(rotation: glam::Quat, world_normal: Vec3) -> (DimAxis, Vec3) {
    let local = rotation.inverse() * world_normal;
    let a = local.abs();
    let (axis, local_dir) = if a.x >= a.y && a.x >= a.z {
        (DimAxis::X, Vec3::X * local.x.signum())
    } else if a.y >= a.z {
        (DimAxis::Y, Vec3::Y * local.y.signum())
    } else {
        (DimAxis::Z, Vec3::Z * local.z.signum())
    };
    (axis, rotation * local_dir)
}

/// Open a push/pull session on the given face.
///
/// Flat kinds (plane, disc) are promoted to their thin solid counterpart
/// first; the pre-promotion snapshot is what cancel restores.
pub fn begin(
    scene: &mut SceneState,
    target: &str,
    face_normal: Vec3,
    face_anchor: Vec3,
    pointer: Vec2,
) -> Option<DragSession> {
    let solid = scene.get_solid(target)?;
    if !solid.primitive.is_manipulable() {
        return None;
    }

    let snapshot = SolidSnapshot {
        id: solid.id.clone(),
        primitive: solid.primitive.clone(),
        transform: solid.transform.clone(),
    };

    let promoted = if solid.primitive.needs_depth_promotion() {
        solid.primitive.promoted(MIN_DIMENSION)
    } else {
        solid.primitive.clone()
    };

    let (axis, world_dir) = face_axis(geometry::rotation(&solid.transform), face_normal);
    // Bail before mutating anything if this face has no extrudable dimension
    let initial_dimension = promoted.dimension_along(axis)?;

    let target_id = solid.id.clone();
    let needs_promotion = promoted != solid.primitive;
    if needs_promotion {
        if let Some(solid) = scene.get_solid_mut(target) {
            solid.primitive = promoted;
        }
        scene.notify_mutated();
    }

    Some(DragSession {
        mode: DragMode::PushPull {
            target: target_id,
            axis,
            world_dir,
            face_anchor,
            initial_dimension,
        },
        snapshots: vec![snapshot],
        start_pointer: pointer,
        grab_point: None,
        current_delta: Vec3::ZERO,
        snap_target: None,
    })
}

/// Re-derive dimension and position from the snapshot and the current
/// drag scalar. Positive scalar extrudes outward along the grabbed face.
pub fn apply(session: &DragSession, scene: &mut SceneState, mouse_delta: f32) {
    let DragMode::PushPull {
        target,
        axis,
        world_dir,
        initial_dimension,
        ..
    } = &session.mode
    else {
        return;
    };
    let Some(snapshot) = session.snapshots.first() else {
        return;
    };
    let Some(solid) = scene.get_solid_mut(target) else {
        return;
    };

    let new_dim = (initial_dimension + mouse_delta as f64).max(MIN_DIMENSION);
    if !solid.primitive.set_dimension_along(*axis, new_dim) {
        return;
    }

    // Anchor the opposite face: the center absorbs half the growth
    let half_growth = (new_dim - initial_dimension) * 0.5;
    let p = &snapshot.transform.position;
    solid.transform.position = [
        p[0] + world_dir.x as f64 * half_growth,
        p[1] + world_dir.y as f64 * half_growth,
        p[2] + world_dir.z as f64 * half_growth,
    ];
    scene.notify_mutated();
}

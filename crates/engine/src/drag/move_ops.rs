//! Whole-object and face-constrained moves.
//!
//! Every selected solid receives the same world delta on top of its
//! snapshot position. Snap alignment is anchored at the grabbed feature:
//! dragging by a corner lands that corner on the target, not the object's
//! center.

use glam::{Vec2, Vec3};
use shared::ObjectId;

use super::session::{DragMode, DragSession, SolidSnapshot};
use crate::geometry;
use crate::scene::SceneState;
use crate::snap::SnapCandidate;

fn snapshots_for(scene: &SceneState, ids: &[ObjectId]) -> Option<Vec<SolidSnapshot>> {
    let mut snapshots = Vec::with_capacity(ids.len());
    for id in ids {
        let solid = scene.get_solid(id)?;
        snapshots.push(SolidSnapshot {
            id: solid.id.clone(),
            primitive: solid.primitive.clone(),
            transform: solid.transform.clone(),
        });
    }
    if snapshots.is_empty() {
        None
    } else {
        Some(snapshots)
    }
}

/// Open an unconstrained move, optionally anchored at a grabbed corner/edge
pub fn begin_free(
    scene: &SceneState,
    ids: &[ObjectId],
    grab_point: Option<Vec3>,
    pointer: Vec2,
) -> Option<DragSession> {
    Some(DragSession {
        mode: DragMode::MoveFree,
        snapshots: snapshots_for(scene, ids)?,
        start_pointer: pointer,
        grab_point,
        current_delta: Vec3::ZERO,
        snap_target: None,
    })
}

/// Open a move constrained to the grabbed face's normal axis
pub fn begin_axis(
    scene: &SceneState,
    ids: &[ObjectId],
    normal: Vec3,
    face_anchor: Vec3,
    pointer: Vec2,
) -> Option<DragSession> {
    Some(DragSession {
        mode: DragMode::MoveAxis {
            normal,
            face_anchor,
        },
        snapshots: snapshots_for(scene, ids)?,
        start_pointer: pointer,
        grab_point: None,
        current_delta: Vec3::ZERO,
        snap_target: None,
    })
}

/// Set every dragged solid's position to snapshot + delta
pub fn apply_delta(session: &DragSession, scene: &mut SceneState, delta: Vec3) {
    for snap in &session.snapshots {
        if let Some(solid) = scene.get_solid_mut(&snap.id) {
            let p = &snap.transform.position;
            solid.transform.position = [
                p[0] + delta.x as f64,
                p[1] + delta.y as f64,
                p[2] + delta.z as f64,
            ];
        }
    }
    scene.notify_mutated();
}

/// The moving point snap candidates are measured against: the projected
/// face anchor for axis moves, else the grabbed feature (or the primary
/// solid's center when the grab was not feature-anchored).
pub fn probe_point(session: &DragSession, delta: Vec3) -> Vec3 {
    match &session.mode {
        DragMode::MoveAxis { face_anchor, .. } => *face_anchor + delta,
        _ => match session.grab_point {
            Some(grab) => grab + delta,
            None => session
                .snapshots
                .first()
                .map(|s| geometry::position(&s.transform))
                .unwrap_or(Vec3::ZERO)
                + delta,
        },
    }
}

/// Offset that lands the probe exactly on the snap point. Axis moves stay
/// on their axis: the offset is projected onto the constrained normal.
pub fn snap_offset(session: &DragSession, delta: Vec3, candidate: &SnapCandidate) -> Vec3 {
    let raw = candidate.point - probe_point(session, delta);
    match &session.mode {
        DragMode::MoveAxis { normal, .. } => *normal * raw.dot(*normal),
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Primitive, Transform};
    use crate::snap::SnapKind;

    fn scene_with_cubes() -> (SceneState, ObjectId, ObjectId) {
        let mut scene = SceneState::default();
        let a = scene.create_solid(
            "a".to_string(),
            Primitive::Cube {
                width: 2.0,
                height: 2.0,
                depth: 2.0,
            },
            Transform::new(),
        );
        let b = scene.create_solid(
            "b".to_string(),
            Primitive::Cube {
                width: 2.0,
                height: 2.0,
                depth: 2.0,
            },
            Transform::at(5.0, 0.0, 0.0),
        );
        (scene, a, b)
    }

    #[test]
    fn test_uniform_delta_over_selection() {
        let (mut scene, a, b) = scene_with_cubes();
        let session = begin_free(
            &scene,
            &[a.clone(), b.clone()],
            None,
            Vec2::ZERO,
        )
        .unwrap();

        apply_delta(&session, &mut scene, Vec3::new(1.0, 0.0, -2.0));
        assert_eq!(scene.get_solid(&a).unwrap().transform.position, [1.0, 0.0, -2.0]);
        assert_eq!(scene.get_solid(&b).unwrap().transform.position, [6.0, 0.0, -2.0]);

        // Deltas are not cumulative: each application starts from snapshots
        apply_delta(&session, &mut scene, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(scene.get_solid(&a).unwrap().transform.position, [0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_probe_prefers_grab_point() {
        let (scene, a, _) = scene_with_cubes();
        let grabbed = Vec3::new(1.0, 1.0, 1.0);
        let session = begin_free(&scene, &[a], Some(grabbed), Vec2::ZERO).unwrap();
        let probe = probe_point(&session, Vec3::new(0.25, 0.0, 0.0));
        assert!((probe - Vec3::new(1.25, 1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_probe_falls_back_to_center() {
        let (scene, a, _) = scene_with_cubes();
        let session = begin_free(&scene, &[a], None, Vec2::ZERO).unwrap();
        let probe = probe_point(&session, Vec3::new(0.5, 0.0, 0.0));
        assert!((probe - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_axis_snap_offset_stays_on_axis() {
        let (scene, a, _) = scene_with_cubes();
        let session = begin_axis(
            &scene,
            &[a],
            Vec3::X,
            Vec3::new(1.0, 0.0, 0.0),
            Vec2::ZERO,
        )
        .unwrap();

        // Candidate off to the side: only the X component may apply
        let candidate = SnapCandidate {
            kind: SnapKind::Corner,
            point: Vec3::new(2.0, 0.7, 0.3),
            source: Some("b".to_string()),
            error: 0.4,
        };
        let offset = snap_offset(&session, Vec3::ZERO, &candidate);
        assert!((offset - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_missing_solid_in_selection_aborts_begin() {
        let (scene, a, _) = scene_with_cubes();
        assert!(begin_free(&scene, &[a, "ghost".to_string()], None, Vec2::ZERO).is_none());
    }
}

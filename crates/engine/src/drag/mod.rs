//! Drag state machines.
//!
//! One controller owns the `Idle ↔ Dragging` state machine for all three
//! manipulation modes. Every transition takes its context (scene, camera,
//! selection, settings) as explicit parameters; cancel is a pure function
//! of the session's snapshots.
//!
//! The host must suspend camera orbit/pan while `is_dragging()` and
//! re-enable it unconditionally on pointer-up or Escape.

pub mod move_ops;
pub mod push_pull;
mod session;

pub use session::{DragMode, DragSession, SolidSnapshot, MIN_DIMENSION};

use glam::{Vec2, Vec3};
use shared::ObjectId;

use crate::camera::CameraState;
use crate::geometry;
use crate::hit::{self, FeatureHit, Tool};
use crate::pick::PickResult;
use crate::projector;
use crate::scene::SceneState;
use crate::selection::Selection;
use crate::settings::EngineSettings;
use crate::snap;

/// The drag FSM: idle, or exactly one open session
pub enum DragState {
    Idle,
    Dragging(DragSession),
}

/// Owns the drag lifecycle for one viewport
pub struct DragController {
    state: DragState,
    tool: Tool,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            tool: Tool::Select,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switching tools implicitly cancels any open session
    pub fn set_tool(&mut self, scene: &mut SceneState, tool: Tool) {
        if tool != self.tool {
            self.cancel(scene);
            self.tool = tool;
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(s) => Some(s),
            DragState::Idle => None,
        }
    }

    /// Pointer-down: classify the picked feature and open a session if it
    /// qualifies under the active tool. Returns whether a drag started; on
    /// false, the pointer-down is the host's (camera, selection).
    pub fn pointer_down(
        &mut self,
        scene: &mut SceneState,
        selection: &Selection,
        camera: &CameraState,
        pick: &PickResult,
        pointer: Vec2,
        settings: &EngineSettings,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }

        let Some(feature) = hit::classify(&scene.scene, camera, pick, self.tool, settings) else {
            return false;
        };

        let session = match (self.tool, feature) {
            (Tool::PushPull, FeatureHit::Face { normal, anchor }) => {
                push_pull::begin(scene, &pick.solid_id, normal, anchor, pointer)
            }
            (Tool::Move, FeatureHit::Face { normal, anchor }) => move_ops::begin_axis(
                scene,
                &move_targets(selection, &pick.solid_id),
                normal,
                anchor,
                pointer,
            ),
            (Tool::Move, FeatureHit::Corner { position, .. }) => move_ops::begin_free(
                scene,
                &move_targets(selection, &pick.solid_id),
                Some(position),
                pointer,
            ),
            (Tool::Move, FeatureHit::Edge { closest, .. }) => move_ops::begin_free(
                scene,
                &move_targets(selection, &pick.solid_id),
                Some(closest),
                pointer,
            ),
            _ => None,
        };

        match session {
            Some(session) => {
                tracing::info!(
                    "drag begin: {} on {}",
                    mode_name(&session.mode),
                    pick.solid_id
                );
                self.state = DragState::Dragging(session);
                true
            }
            None => false,
        }
    }

    /// Pointer-move: recompute the displacement from the gesture start,
    /// apply it, and refresh the snap preview.
    pub fn pointer_move(
        &mut self,
        scene: &mut SceneState,
        camera: &CameraState,
        pointer: Vec2,
        settings: &EngineSettings,
    ) {
        let DragState::Dragging(session) = &mut self.state else {
            return;
        };

        // A dragged solid vanished mid-drag: discard the session without
        // attempting further mutation
        if session.snapshots.iter().any(|s| !scene.contains(&s.id)) {
            tracing::warn!("drag target removed mid-drag, session discarded");
            self.state = DragState::Idle;
            return;
        }

        let pointer_delta = pointer - session.start_pointer;

        match session.mode.clone() {
            DragMode::PushPull {
                face_anchor,
                world_dir,
                ..
            } => {
                let scalar = projector::constrained_scalar(
                    camera,
                    face_anchor,
                    world_dir,
                    pointer_delta,
                    settings.move_sensitivity,
                );
                push_pull::apply(session, scene, scalar);
            }
            DragMode::MoveFree => {
                let reference = session.grab_point.unwrap_or_else(|| {
                    session
                        .snapshots
                        .first()
                        .map(|s| geometry::position(&s.transform))
                        .unwrap_or(Vec3::ZERO)
                });
                let delta = projector::unconstrained_delta(camera, pointer_delta, reference);
                Self::move_and_resnap(session, scene, delta, settings);
            }
            DragMode::MoveAxis {
                normal,
                face_anchor,
            } => {
                let delta = projector::constrained_delta(
                    camera,
                    face_anchor,
                    normal,
                    pointer_delta,
                    settings.move_sensitivity,
                );
                Self::move_and_resnap(session, scene, delta, settings);
            }
        }
    }

    /// Pointer-up: commit, applying the active snap if one is held.
    /// Returns the ids whose geometry changed, for the layout collaborator.
    pub fn pointer_up(&mut self, scene: &mut SceneState) -> Vec<ObjectId> {
        let DragState::Dragging(session) = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return Vec::new();
        };

        if let Some(candidate) = &session.snap_target {
            let offset = move_ops::snap_offset(&session, session.current_delta, candidate);
            move_ops::apply_delta(&session, scene, session.current_delta + offset);
        }

        let ids = session.solid_ids();
        tracing::info!("drag commit: {} solid(s)", ids.len());
        ids
    }

    /// Escape (or any implicit cancel): restore every snapshot verbatim
    pub fn cancel(&mut self, scene: &mut SceneState) {
        let DragState::Dragging(session) = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return;
        };

        for snap in &session.snapshots {
            if let Some(solid) = scene.get_solid_mut(&snap.id) {
                solid.primitive = snap.primitive.clone();
                solid.transform = snap.transform.clone();
            }
        }
        scene.notify_mutated();
        tracing::info!("drag cancelled, pre-drag state restored");
    }

    fn move_and_resnap(
        session: &mut DragSession,
        scene: &mut SceneState,
        delta: Vec3,
        settings: &EngineSettings,
    ) {
        move_ops::apply_delta(session, scene, delta);
        session.current_delta = delta;

        let probe = move_ops::probe_point(session, delta);
        let ids = session.solid_ids();
        let next = snap::resolve(&scene.scene, &ids, probe, &settings.snap);

        match (&session.snap_target, &next) {
            (None, Some(c)) => tracing::debug!("snap acquired: {:?} err={:.3}", c.kind, c.error),
            (Some(_), None) => tracing::debug!("snap lost"),
            _ => {}
        }
        session.snap_target = next;
    }
}

/// A move applies to the whole selection when the grabbed solid is part of
/// it; a grab outside the selection moves just that solid.
fn move_targets(selection: &Selection, picked: &str) -> Vec<ObjectId> {
    if selection.is_selected(picked) {
        selection.all().to_vec()
    } else {
        vec![picked.to_string()]
    }
}

fn mode_name(mode: &DragMode) -> &'static str {
    match mode {
        DragMode::PushPull { .. } => "push/pull",
        DragMode::MoveFree => "move",
        DragMode::MoveAxis { .. } => "axis move",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Primitive, Transform};

    fn cube_scene() -> (SceneState, ObjectId) {
        let mut scene = SceneState::default();
        let id = scene.create_solid(
            "cube".to_string(),
            Primitive::Cube {
                width: 2.0,
                height: 2.0,
                depth: 2.0,
            },
            Transform::new(),
        );
        (scene, id)
    }

    fn front_camera() -> CameraState {
        CameraState::new(
            Vec3::new(0.0, 0.0, 8.0),
            Vec3::ZERO,
            45.0_f32.to_radians(),
            Vec2::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_select_tool_never_starts_a_drag() {
        let (mut scene, id) = cube_scene();
        let mut controller = DragController::new();
        let selection = Selection::default();
        let pick = PickResult {
            solid_id: id,
            point: Vec3::new(0.0, 1.0, 0.0),
            normal: Vec3::Y,
        };
        let started = controller.pointer_down(
            &mut scene,
            &selection,
            &front_camera(),
            &pick,
            Vec2::ZERO,
            &EngineSettings::default(),
        );
        assert!(!started);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_face_grab_under_push_pull_opens_session() {
        let (mut scene, id) = cube_scene();
        let mut controller = DragController::new();
        controller.set_tool(&mut scene, Tool::PushPull);
        let pick = PickResult {
            solid_id: id,
            point: Vec3::new(0.0, 1.0, 0.0),
            normal: Vec3::Y,
        };
        let started = controller.pointer_down(
            &mut scene,
            &Selection::default(),
            &front_camera(),
            &pick,
            Vec2::ZERO,
            &EngineSettings::default(),
        );
        assert!(started);
        assert!(controller.is_dragging());
    }

    #[test]
    fn test_second_pointer_down_is_ignored() {
        let (mut scene, id) = cube_scene();
        let mut controller = DragController::new();
        controller.set_tool(&mut scene, Tool::PushPull);
        let pick = PickResult {
            solid_id: id,
            point: Vec3::new(0.0, 1.0, 0.0),
            normal: Vec3::Y,
        };
        let settings = EngineSettings::default();
        assert!(controller.pointer_down(
            &mut scene,
            &Selection::default(),
            &front_camera(),
            &pick,
            Vec2::ZERO,
            &settings,
        ));
        assert!(!controller.pointer_down(
            &mut scene,
            &Selection::default(),
            &front_camera(),
            &pick,
            Vec2::ZERO,
            &settings,
        ));
    }

    #[test]
    fn test_tool_switch_cancels_open_session() {
        let (mut scene, id) = cube_scene();
        let mut controller = DragController::new();
        controller.set_tool(&mut scene, Tool::PushPull);
        let pick = PickResult {
            solid_id: id.clone(),
            point: Vec3::new(1.0, 0.0, 0.0),
            normal: Vec3::X,
        };
        let settings = EngineSettings::default();
        let camera = front_camera();
        controller.pointer_down(
            &mut scene,
            &Selection::default(),
            &camera,
            &pick,
            Vec2::ZERO,
            &settings,
        );
        controller.pointer_move(&mut scene, &camera, Vec2::new(100.0, 0.0), &settings);
        assert!(controller.is_dragging());

        controller.set_tool(&mut scene, Tool::Move);
        assert!(!controller.is_dragging());
        // Geometry rolled back
        let solid = scene.get_solid(&id).unwrap();
        assert_eq!(
            solid.primitive,
            Primitive::Cube {
                width: 2.0,
                height: 2.0,
                depth: 2.0,
            }
        );
        assert_eq!(solid.transform.position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mid_drag_deletion_discards_session() {
        let (mut scene, id) = cube_scene();
        let mut controller = DragController::new();
        controller.set_tool(&mut scene, Tool::PushPull);
        let pick = PickResult {
            solid_id: id.clone(),
            point: Vec3::new(1.0, 0.0, 0.0),
            normal: Vec3::X,
        };
        let settings = EngineSettings::default();
        let camera = front_camera();
        controller.pointer_down(
            &mut scene,
            &Selection::default(),
            &camera,
            &pick,
            Vec2::ZERO,
            &settings,
        );

        scene.remove_solid(&id);
        controller.pointer_move(&mut scene, &camera, Vec2::new(50.0, 0.0), &settings);
        assert!(!controller.is_dragging());
        assert!(controller.pointer_up(&mut scene).is_empty());
    }
}

//! Headless harness for programmatic manipulation.
//!
//! Owns a scene, camera, selection, settings, and the drag controller, and
//! drives full pointer gestures without a window. Integration tests and the
//! wasm host both sit on top of this.

use glam::{Vec2, Vec3};
use shared::{ObjectId, Primitive, SceneDescription, Solid, Transform};

use crate::camera::CameraState;
use crate::drag::DragController;
use crate::hit::{self, FeatureHit, Tool};
use crate::overlay::{self, OverlayFrame};
use crate::pick::{self, PickResult};
use crate::scene::SceneState;
use crate::selection::Selection;
use crate::settings::EngineSettings;

/// Headless harness: scene, camera, selection, settings, drag controller
pub struct TestHarness {
    pub scene: SceneState,
    pub selection: Selection,
    pub camera: CameraState,
    pub settings: EngineSettings,
    pub controller: DragController,
    /// Last pointer position fed to the controller
    pointer: Vec2,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            scene: SceneState::default(),
            selection: Selection::default(),
            camera: CameraState::default(),
            settings: EngineSettings::default(),
            controller: DragController::new(),
            pointer: Vec2::ZERO,
        }
    }

    // ── Scene setup ───────────────────────────────────────────

    /// Create a cube solid and return its id
    pub fn create_cube(&mut self, name: &str, w: f64, h: f64, d: f64) -> ObjectId {
        self.scene.create_solid(
            name.to_string(),
            Primitive::Cube {
                width: w,
                height: h,
                depth: d,
            },
            Transform::new(),
        )
    }

    /// Create a cube at a position and return its id
    pub fn create_cube_at(
        &mut self,
        name: &str,
        w: f64,
        h: f64,
        d: f64,
        x: f64,
        y: f64,
        z: f64,
    ) -> ObjectId {
        self.scene.create_solid(
            name.to_string(),
            Primitive::Cube {
                width: w,
                height: h,
                depth: d,
            },
            Transform::at(x, y, z),
        )
    }

    pub fn create_plane(&mut self, name: &str, w: f64, d: f64) -> ObjectId {
        self.scene.create_solid(
            name.to_string(),
            Primitive::Plane { width: w, depth: d },
            Transform::new(),
        )
    }

    pub fn create_cylinder(&mut self, name: &str, r: f64, h: f64) -> ObjectId {
        self.scene.create_solid(
            name.to_string(),
            Primitive::Cylinder {
                radius: r,
                height: h,
            },
            Transform::new(),
        )
    }

    pub fn create_disc(&mut self, name: &str, r: f64) -> ObjectId {
        self.scene
            .create_solid(name.to_string(), Primitive::Disc { radius: r }, Transform::new())
    }

    pub fn create_sphere(&mut self, name: &str, r: f64) -> ObjectId {
        self.scene
            .create_solid(name.to_string(), Primitive::Sphere { radius: r }, Transform::new())
    }

    pub fn solid(&self, id: &str) -> Option<&Solid> {
        self.scene.get_solid(id)
    }

    // ── Camera / tool ─────────────────────────────────────────

    pub fn look_from(&mut self, eye: Vec3, target: Vec3) {
        self.camera.eye = eye;
        self.camera.target = target;
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.controller.set_tool(&mut self.scene, tool);
    }

    // ── Gesture driving ───────────────────────────────────────

    /// Pointer-down with an explicit pick result (tests aim precisely)
    pub fn press(&mut self, pick: PickResult, pointer: Vec2) -> bool {
        self.pointer = pointer;
        self.controller.pointer_down(
            &mut self.scene,
            &self.selection,
            &self.camera,
            &pick,
            pointer,
            &self.settings,
        )
    }

    /// Pointer-down at a viewport position, picking through the camera
    pub fn press_at(&mut self, x: f32, y: f32) -> bool {
        let pointer = Vec2::new(x, y);
        let ray = self.camera.screen_ray(pointer);
        let Some(result) = pick::pick_solid(&self.scene.scene, &ray) else {
            return false;
        };
        self.press(result, pointer)
    }

    /// Drag the pointer to a new viewport position
    pub fn drag_to(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
        self.controller
            .pointer_move(&mut self.scene, &self.camera, self.pointer, &self.settings);
    }

    /// Release: commit and return the changed solid ids
    pub fn release(&mut self) -> Vec<ObjectId> {
        self.controller.pointer_up(&mut self.scene)
    }

    /// Escape: roll back to the pre-drag snapshots
    pub fn press_escape(&mut self) {
        self.controller.cancel(&mut self.scene);
    }

    /// What the pointer currently hovers, under the active tool
    pub fn hover(&self, pick: &PickResult) -> Option<FeatureHit> {
        hit::classify(
            &self.scene.scene,
            &self.camera,
            pick,
            self.controller.tool(),
            &self.settings,
        )
    }

    /// Overlay data for the current frame
    pub fn overlay(&self, hover: Option<&FeatureHit>) -> OverlayFrame {
        overlay::frame(
            &self.camera,
            hover,
            self.controller.session().and_then(|s| s.snap_target.as_ref()),
        )
    }

    // ── Persistence ───────────────────────────────────────────

    /// Load a scene from JSON (replaces the current one)
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let scene: SceneDescription =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.press_escape();
        self.selection.clear();
        self.scene.set_scene(scene);
        Ok(())
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(&self.scene.scene).unwrap_or_default()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

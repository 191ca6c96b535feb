use glam::{Vec2, Vec3};
use wasm_bindgen::prelude::*;

use formcad_engine::camera::CameraState;
use formcad_engine::drag::DragController;
use formcad_engine::hit::{self, FeatureHit, Tool};
use formcad_engine::overlay::{self, OverlayFrame};
use formcad_engine::pick;
use formcad_engine::scene::SceneState;
use formcad_engine::selection::Selection;
use formcad_engine::settings::EngineSettings;
use formcad_engine::snap::SnapKind;
use shared::{Primitive, SceneDescription, Transform};

#[wasm_bindgen(start)]
pub fn start() {
    web_sys::console::log_1(&"formcad manipulation engine loaded".into());
}

/// Browser-side manipulation session: the JS host feeds pointer and camera
/// events, renders the scene itself, and reads overlay/change feedback as
/// JSON strings.
#[wasm_bindgen]
pub struct ManipApp {
    scene: SceneState,
    selection: Selection,
    camera: CameraState,
    settings: EngineSettings,
    controller: DragController,
}

#[wasm_bindgen]
impl ManipApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ManipApp {
        ManipApp {
            scene: SceneState::default(),
            selection: Selection::default(),
            camera: CameraState::default(),
            settings: EngineSettings::default(),
            controller: DragController::new(),
        }
    }

    // ── Scene ─────────────────────────────────────────────────

    /// Load a scene from JSON (replaces the current one)
    pub fn load_scene(&mut self, scene_json: &str) -> Result<(), JsError> {
        let scene: SceneDescription =
            serde_json::from_str(scene_json).map_err(|e| JsError::new(&e.to_string()))?;
        self.controller.cancel(&mut self.scene);
        self.selection.clear();
        self.scene.set_scene(scene);
        Ok(())
    }

    /// Export the current scene as JSON
    pub fn scene_json(&self) -> String {
        serde_json::to_string(&self.scene.scene).unwrap_or_default()
    }

    /// Scene version counter; bumps whenever geometry changes, so the host
    /// knows when to rebuild display meshes
    pub fn scene_version(&self) -> f64 {
        self.scene.version() as f64
    }

    pub fn create_cube(&mut self, name: &str, w: f64, h: f64, d: f64, x: f64, y: f64, z: f64) -> String {
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

    pub fn remove_solid(&mut self, id: &str) -> bool {
        self.scene.remove_solid(id)
    }

    // ── Settings / camera / tool ──────────────────────────────

    pub fn load_settings(&mut self, settings_json: &str) -> Result<(), JsError> {
        self.settings =
            serde_json::from_str(settings_json).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(())
    }

    pub fn settings_json(&self) -> String {
        serde_json::to_string(&self.settings).unwrap_or_default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_camera(
        &mut self,
        eye_x: f32,
        eye_y: f32,
        eye_z: f32,
        target_x: f32,
        target_y: f32,
        target_z: f32,
        fov_radians: f32,
        viewport_w: f32,
        viewport_h: f32,
    ) {
        self.camera = CameraState::new(
            Vec3::new(eye_x, eye_y, eye_z),
            Vec3::new(target_x, target_y, target_z),
            fov_radians,
            Vec2::new(viewport_w, viewport_h),
        );
    }

    /// "select" | "move" | "push_pull". Switching cancels any open drag.
    pub fn set_tool(&mut self, tool: &str) -> Result<(), JsError> {
        let tool = match tool {
            "select" => Tool::Select,
            "move" => Tool::Move,
            "push_pull" => Tool::PushPull,
            other => return Err(JsError::new(&format!("Unknown tool '{other}'"))),
        };
        self.controller.set_tool(&mut self.scene, tool);
        Ok(())
    }

    pub fn select(&mut self, id: &str) {
        self.selection.select(id.to_string());
    }

    pub fn toggle_select(&mut self, id: &str) {
        self.selection.toggle(id.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Pointer events ────────────────────────────────────────

    /// Pointer-down at viewport pixel coordinates. Returns true when a drag
    /// started; the host must suspend camera controls until release/cancel.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        let pointer = Vec2::new(x, y);
        let ray = self.camera.screen_ray(pointer);
        let Some(result) = pick::pick_solid(&self.scene.scene, &ray) else {
            return false;
        };
        self.controller.pointer_down(
            &mut self.scene,
            &self.selection,
            &self.camera,
            &result,
            pointer,
            &self.settings,
        )
    }

    /// Pointer-move. Returns overlay feedback (hover markers while idle,
    /// snap indicator while dragging) as JSON.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> String {
        let pointer = Vec2::new(x, y);

        if self.controller.is_dragging() {
            self.controller
                .pointer_move(&mut self.scene, &self.camera, pointer, &self.settings);
            let snap = self
                .controller
                .session()
                .and_then(|s| s.snap_target.as_ref());
            return overlay_json(
                &overlay::frame(&self.camera, None, snap),
                self.controller.is_dragging(),
            );
        }

        let hover = self.hover_at(pointer);
        overlay_json(&overlay::frame(&self.camera, hover.as_ref(), None), false)
    }

    /// Pointer-up: commit. Returns the changed solid ids as a JSON array;
    /// the host forwards them to its layout pass.
    pub fn pointer_up(&mut self) -> String {
        let changed = self.controller.pointer_up(&mut self.scene);
        serde_json::to_string(&changed).unwrap_or_default()
    }

    /// Escape: roll back the open drag, if any
    pub fn cancel_drag(&mut self) {
        self.controller.cancel(&mut self.scene);
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }
}

impl ManipApp {
    fn hover_at(&self, pointer: Vec2) -> Option<FeatureHit> {
        let ray = self.camera.screen_ray(pointer);
        let result = pick::pick_solid(&self.scene.scene, &ray)?;
        hit::classify(
            &self.scene.scene,
            &self.camera,
            &result,
            self.controller.tool(),
            &self.settings,
        )
    }
}

impl Default for ManipApp {
    fn default() -> Self {
        Self::new()
    }
}

fn overlay_json(frame: &OverlayFrame, dragging: bool) -> String {
    let markers: Vec<serde_json::Value> = frame
        .markers
        .iter()
        .map(|m| {
            serde_json::json!({
                "kind": match m.kind {
                    formcad_engine::overlay::MarkerKind::Corner => "corner",
                    formcad_engine::overlay::MarkerKind::Edge => "edge",
                },
                "position": m.position.to_array(),
                "radius": m.radius,
            })
        })
        .collect();

    let snap = frame.snap.as_ref().map(|s| {
        serde_json::json!({
            "kind": match s.kind {
                SnapKind::Corner => "corner",
                SnapKind::Edge => "edge",
                SnapKind::Face => "face",
                SnapKind::Grid => "grid",
            },
            "point": s.point.to_array(),
            "radius": s.radius,
        })
    });

    serde_json::json!({
        "dragging": dragging,
        "markers": markers,
        "snap": snap,
    })
    .to_string()
}

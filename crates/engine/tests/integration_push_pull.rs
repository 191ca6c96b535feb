//! Integration tests for the push/pull (extrusion) drag mode.
//!
//! Drives full pointer gestures through the headless harness with a known
//! camera, so pixel deltas map to predictable world deltas.

use glam::{Vec2, Vec3};
use formcad_engine::harness::TestHarness;
use formcad_engine::hit::Tool;
use formcad_engine::pick::PickResult;
use shared::{DimAxis, Primitive};

/// Camera straight down the -Z axis: +X faces read horizontal mouse motion
fn front_view(h: &mut TestHarness) {
    h.look_from(Vec3::new(0.0, 0.0, 8.0), Vec3::ZERO);
    h.camera.viewport = Vec2::new(800.0, 600.0);
}

fn face_pick(id: &str, point: Vec3, normal: Vec3) -> PickResult {
    PickResult {
        solid_id: id.to_string(),
        point,
        normal,
    }
}

#[test]
fn test_extrude_right_face_keeps_left_face_anchored() {
    let mut h = TestHarness::new();
    front_view(&mut h);
    h.set_tool(Tool::PushPull);
    let id = h.create_cube("c", 2.0, 2.0, 2.0);

    assert!(h.press(face_pick(&id, Vec3::new(1.0, 0.0, 0.0), Vec3::X), Vec2::ZERO));
    // 100 px at 0.01 world/px extrudes by +1 along +x
    h.drag_to(100.0, 0.0);
    h.release();

    let solid = h.solid(&id).unwrap();
    let width = solid.primitive.dimension_along(DimAxis::X).unwrap();
    assert!((width - 3.0).abs() < 1e-5);

    // The left face must not have moved; the right face took all the growth
    let left = solid.transform.position[0] - width / 2.0;
    let right = solid.transform.position[0] + width / 2.0;
    assert!((left - (-1.0)).abs() < 1e-9);
    assert!((right - 2.0).abs() < 1e-5);
}

#[test]
fn test_pull_inward_clamps_at_epsilon() {
    let mut h = TestHarness::new();
    front_view(&mut h);
    h.set_tool(Tool::PushPull);
    let id = h.create_cube("c", 2.0, 2.0, 2.0);

    assert!(h.press(face_pick(&id, Vec3::new(1.0, 0.0, 0.0), Vec3::X), Vec2::ZERO));
    // Way past the opposite face
    h.drag_to(-1000.0, 0.0);
    h.release();

    let solid = h.solid(&id).unwrap();
    let width = solid.primitive.dimension_along(DimAxis::X).unwrap();
    assert_eq!(width, 0.01);
    // Still anchored on the left
    let left = solid.transform.position[0] - width / 2.0;
    assert!((left - (-1.0)).abs() < 1e-9);
}

#[test]
fn test_cancel_restores_snapshot_exactly() {
    let mut h = TestHarness::new();
    front_view(&mut h);
    h.set_tool(Tool::PushPull);
    let id = h.create_cube("c", 2.0, 2.0, 2.0);
    let before = h.solid(&id).unwrap().clone();

    assert!(h.press(face_pick(&id, Vec3::new(1.0, 0.0, 0.0), Vec3::X), Vec2::ZERO));
    h.drag_to(40.0, 10.0);
    h.drag_to(-200.0, 0.0);
    h.drag_to(73.0, -20.0);
    h.press_escape();

    assert_eq!(*h.solid(&id).unwrap(), before);
    assert!(!h.controller.is_dragging());
}

#[test]
fn test_extrude_top_face_with_vertical_mouse() {
    let mut h = TestHarness::new();
    front_view(&mut h);
    h.set_tool(Tool::PushPull);
    let id = h.create_cube("c", 2.0, 2.0, 2.0);

    assert!(h.press(face_pick(&id, Vec3::new(0.0, 1.0, 0.0), Vec3::Y), Vec2::ZERO));
    // +Y reads vertical mouse motion; up on screen is negative dy
    h.drag_to(0.0, -50.0);
    h.release();

    let solid = h.solid(&id).unwrap();
    let height = solid.primitive.dimension_along(DimAxis::Y).unwrap();
    assert!((height - 2.5).abs() < 1e-5);
    // Bottom face anchored at y = -1
    let bottom = solid.transform.position[1] - height / 2.0;
    assert!((bottom - (-1.0)).abs() < 1e-9);
}

#[test]
fn test_plane_promotes_to_cube_and_cancel_restores_plane() {
    let mut h = TestHarness::new();
    front_view(&mut h);
    h.set_tool(Tool::PushPull);
    let id = h.create_plane("p", 2.0, 3.0);
    let before = h.solid(&id).unwrap().clone();

    assert!(h.press(face_pick(&id, Vec3::ZERO, Vec3::Y), Vec2::ZERO));
    assert!(matches!(
        h.solid(&id).unwrap().primitive,
        Primitive::Cube { .. }
    ));

    h.drag_to(0.0, -100.0);
    let height = h
        .solid(&id)
        .unwrap()
        .primitive
        .dimension_along(DimAxis::Y)
        .unwrap();
    assert!((height - 1.01).abs() < 1e-5);

    // Escape undoes the promotion along with everything else
    h.press_escape();
    assert_eq!(*h.solid(&id).unwrap(), before);
}

#[test]
fn test_disc_promotes_to_cylinder() {
    let mut h = TestHarness::new();
    front_view(&mut h);
    h.set_tool(Tool::PushPull);
    let id = h.create_disc("d", 1.5);

    assert!(h.press(face_pick(&id, Vec3::ZERO, Vec3::Y), Vec2::ZERO));
    h.drag_to(0.0, -200.0);
    let committed = h.release();
    assert_eq!(committed, vec![id.clone()]);

    match h.solid(&id).unwrap().primitive {
        Primitive::Cylinder { radius, height } => {
            assert_eq!(radius, 1.5);
            assert!((height - 2.01).abs() < 1e-5);
        }
        ref other => panic!("expected cylinder, got {other:?}"),
    }
}

#[test]
fn test_sphere_face_never_opens_a_session() {
    let mut h = TestHarness::new();
    front_view(&mut h);
    h.set_tool(Tool::PushPull);
    let id = h.create_sphere("s", 1.0);

    assert!(!h.press(face_pick(&id, Vec3::new(0.0, 1.0, 0.0), Vec3::Y), Vec2::ZERO));
    assert!(!h.controller.is_dragging());
}

#[test]
fn test_release_reports_geometry_changed() {
    let mut h = TestHarness::new();
    front_view(&mut h);
    h.set_tool(Tool::PushPull);
    let id = h.create_cube("c", 2.0, 2.0, 2.0);
    let version_before = h.scene.version();

    assert!(h.press(face_pick(&id, Vec3::new(1.0, 0.0, 0.0), Vec3::X), Vec2::ZERO));
    h.drag_to(50.0, 0.0);
    let changed = h.release();

    assert_eq!(changed, vec![id]);
    assert!(h.scene.version() > version_before);
}

//! Feature hit-testing.
//!
//! Classifies a pick result as corner, edge, or face with strict
//! corner > edge > face precedence: near a corner all three tests pass at
//! once, and the corner is the most specific target. The hit radius is a
//! pixel tolerance converted to world units at the hit point, so zones feel
//! the same size at any zoom level.

use glam::Vec3;
use shared::SceneDescription;

use crate::camera::CameraState;
use crate::geometry::{self, SolidFeatures};
use crate::pick::PickResult;
use crate::settings::EngineSettings;
use crate::tolerance;

/// Active manipulation tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    Move,
    PushPull,
}

/// The single feature a pointer position resolves to
#[derive(Debug, Clone)]
pub enum FeatureHit {
    Corner {
        index: usize,
        position: Vec3,
    },
    Edge {
        index: usize,
        start: Vec3,
        end: Vec3,
        /// Point on the segment closest to the pick point
        closest: Vec3,
    },
    Face {
        normal: Vec3,
        anchor: Vec3,
    },
}

/// Distance from a point to a segment, with the clamped closest point.
/// Zero-length segments degenerate to point distance.
pub fn distance_to_segment(point: Vec3, start: Vec3, end: Vec3) -> (f32, Vec3) {
    let d = end - start;
    let len_sq = d.length_squared();
    if len_sq <= f32::EPSILON {
        return ((point - start).length(), start);
    }
    let t = ((point - start).dot(d) / len_sq).clamp(0.0, 1.0);
    let closest = start + d * t;
    ((point - closest).length(), closest)
}

/// Classify the picked position as exactly one of corner/edge/face/nothing.
pub fn classify(
    scene: &SceneDescription,
    camera: &CameraState,
    pick: &PickResult,
    tool: Tool,
    settings: &EngineSettings,
) -> Option<FeatureHit> {
    let solid = scene.solids.iter().find(|s| s.id == pick.solid_id)?;
    if !solid.primitive.is_manipulable() {
        return None;
    }

    let features = geometry::solid_features(solid);
    let radius = tolerance::world_radius(camera, pick.point, settings.hit_area_px);

    if let Some(hit) = nearest_corner(&features, pick.point, radius) {
        return Some(hit);
    }
    if let Some(hit) = nearest_edge(&features, pick.point, radius) {
        return Some(hit);
    }

    // Faces only matter to tools that grab them
    if !matches!(tool, Tool::Move | Tool::PushPull) {
        return None;
    }
    nearest_face(&features, pick.normal)
}

fn nearest_corner(features: &SolidFeatures, point: Vec3, radius: f32) -> Option<FeatureHit> {
    let mut best: Option<(usize, f32)> = None;
    for (i, corner) in features.corners.iter().enumerate() {
        let dist = (*corner - point).length();
        if dist < radius && best.is_none_or(|(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    best.map(|(index, _)| FeatureHit::Corner {
        index,
        position: features.corners[index],
    })
}

fn nearest_edge(features: &SolidFeatures, point: Vec3, radius: f32) -> Option<FeatureHit> {
    let mut best: Option<(usize, f32, Vec3)> = None;
    for (i, edge) in features.edges.iter().enumerate() {
        if (edge.end - edge.start).length_squared() <= f32::EPSILON {
            continue;
        }
        let (dist, closest) = distance_to_segment(point, edge.start, edge.end);
        if dist < radius && best.is_none_or(|(_, d, _)| dist < d) {
            best = Some((i, dist, closest));
        }
    }
    best.map(|(index, _, closest)| FeatureHit::Edge {
        index,
        start: features.edges[index].start,
        end: features.edges[index].end,
        closest,
    })
}

/// Face whose outward normal best matches the picked face normal
fn nearest_face(features: &SolidFeatures, pick_normal: Vec3) -> Option<FeatureHit> {
    let mut best: Option<(f32, &crate::geometry::FeatureFace)> = None;
    for face in &features.faces {
        let dot = face.normal.dot(pick_normal);
        if best.is_none_or(|(d, _)| dot > d) {
            best = Some((dot, face));
        }
    }
    // A cylinder's side hit matches neither cap; report nothing
    let (dot, face) = best?;
    if dot < 0.7 {
        return None;
    }
    Some(FeatureHit::Face {
        normal: face.normal,
        anchor: face.anchor,
    })
}

//! Preview geometry for the highlight subsystem.
//!
//! The engine never draws; it emits marker/indicator data the host renders
//! and discards each frame. Markers are sized through the screen-space
//! tolerance so they keep a constant on-screen size at any zoom.

use glam::Vec3;

use crate::camera::CameraState;
use crate::hit::FeatureHit;
use crate::snap::{SnapCandidate, SnapKind};
use crate::tolerance;

/// On-screen marker size in pixels
const MARKER_PX: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Corner,
    Edge,
}

/// A hover marker at a feature, with its world-space radius
#[derive(Debug, Clone)]
pub struct FeatureMarker {
    pub kind: MarkerKind,
    pub position: Vec3,
    pub radius: f32,
}

/// The active snap proposal, highlighted at its landing point
#[derive(Debug, Clone)]
pub struct SnapIndicator {
    pub kind: SnapKind,
    pub point: Vec3,
    pub radius: f32,
}

/// Everything the highlight subsystem should show this frame
#[derive(Debug, Clone, Default)]
pub struct OverlayFrame {
    pub markers: Vec<FeatureMarker>,
    pub snap: Option<SnapIndicator>,
}

/// Build the overlay for the current hover/snap state. Produces nothing for
/// face hovers (faces are highlighted by the render layer itself).
pub fn frame(
    camera: &CameraState,
    hover: Option<&FeatureHit>,
    snap: Option<&SnapCandidate>,
) -> OverlayFrame {
    let mut overlay = OverlayFrame::default();

    match hover {
        Some(FeatureHit::Corner { position, .. }) => {
            overlay.markers.push(marker(camera, MarkerKind::Corner, *position));
        }
        Some(FeatureHit::Edge {
            start,
            end,
            closest,
            ..
        }) => {
            overlay.markers.push(marker(camera, MarkerKind::Edge, *closest));
            overlay.markers.push(marker(camera, MarkerKind::Edge, *start));
            overlay.markers.push(marker(camera, MarkerKind::Edge, *end));
        }
        _ => {}
    }

    if let Some(candidate) = snap {
        overlay.snap = Some(SnapIndicator {
            kind: candidate.kind,
            point: candidate.point,
            radius: tolerance::world_radius(camera, candidate.point, MARKER_PX),
        });
    }

    overlay
}

fn marker(camera: &CameraState, kind: MarkerKind, position: Vec3) -> FeatureMarker {
    FeatureMarker {
        kind,
        position,
        radius: tolerance::world_radius(camera, position, MARKER_PX),
    }
}

//! Snap-candidate search.
//!
//! While a drag is open, sibling solids are scanned for the corner, edge, or
//! face closest to the drag's probe point. Only the minimal-error candidate
//! under the world-space threshold survives; the host shows it as a preview
//! and the drag applies it on release.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shared::{ObjectId, SceneDescription};

use crate::geometry;
use crate::hit::distance_to_segment;

/// Faces snap only when near-cardinal; oblique face-to-face is not offered.
/// cos(15°).
const AXIS_ALIGNED_COS: f32 = 0.966;

/// Snap tuning, host-persistable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapSettings {
    /// Snapping enabled at all
    pub enabled: bool,
    /// Snap to sibling corners
    pub corners: bool,
    /// Snap to sibling edges (closest point on the segment)
    pub edges: bool,
    /// Snap to sibling face anchors (cardinal-aligned faces only)
    pub faces: bool,
    /// Fall back to the ground grid when no feature qualifies
    pub grid: bool,
    /// Grid cell size in world units
    pub grid_size: f32,
    /// World-space acceptance radius. Independent of the pixel-based
    /// hit-test tolerance.
    pub threshold: f32,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            corners: true,
            edges: true,
            faces: true,
            grid: false,
            grid_size: 0.25,
            threshold: 0.5,
        }
    }
}

/// Which feature kind a candidate aligns to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    Corner,
    Edge,
    Face,
    Grid,
}

/// A proposed alignment target
#[derive(Debug, Clone)]
pub struct SnapCandidate {
    pub kind: SnapKind,
    /// World point the drag anchor should land on
    pub point: Vec3,
    /// Owning solid; None for grid candidates
    pub source: Option<ObjectId>,
    /// Distance from the probe point, always below the threshold
    pub error: f32,
}

/// Find the best alignment for `probe` among all solids except the dragged
/// ones. Smallest error wins; exact ties go to the smaller source id, so
/// resolution does not depend on scene order.
pub fn resolve(
    scene: &SceneDescription,
    dragged: &[ObjectId],
    probe: Vec3,
    settings: &SnapSettings,
) -> Option<SnapCandidate> {
    if !settings.enabled {
        return None;
    }

    let mut best: Option<SnapCandidate> = None;

    for solid in &scene.solids {
        if !solid.visible || dragged.iter().any(|id| *id == solid.id) {
            continue;
        }

        let features = geometry::solid_features(solid);

        if settings.corners {
            for corner in &features.corners {
                let error = (*corner - probe).length();
                consider(
                    &mut best,
                    settings.threshold,
                    SnapCandidate {
                        kind: SnapKind::Corner,
                        point: *corner,
                        source: Some(solid.id.clone()),
                        error,
                    },
                );
            }
        }

        if settings.faces {
            for face in &features.faces {
                if !is_axis_aligned(face.normal) {
                    continue;
                }
                let error = (face.anchor - probe).length();
                consider(
                    &mut best,
                    settings.threshold,
                    SnapCandidate {
                        kind: SnapKind::Face,
                        point: face.anchor,
                        source: Some(solid.id.clone()),
                        error,
                    },
                );
            }
        }

        if settings.edges {
            for edge in &features.edges {
                let (error, closest) = distance_to_segment(probe, edge.start, edge.end);
                consider(
                    &mut best,
                    settings.threshold,
                    SnapCandidate {
                        kind: SnapKind::Edge,
                        point: closest,
                        source: Some(solid.id.clone()),
                        error,
                    },
                );
            }
        }
    }

    // Grid is a fallback only: feature candidates always win
    if best.is_none() && settings.grid && settings.grid_size > 0.0 {
        let snapped = Vec3::new(
            (probe.x / settings.grid_size).round() * settings.grid_size,
            probe.y,
            (probe.z / settings.grid_size).round() * settings.grid_size,
        );
        let error = (snapped - probe).length();
        if error < settings.threshold {
            best = Some(SnapCandidate {
                kind: SnapKind::Grid,
                point: snapped,
                source: None,
                error,
            });
        }
    }

    best
}

fn is_axis_aligned(normal: Vec3) -> bool {
    let a = normal.abs();
    a.x.max(a.y).max(a.z) > AXIS_ALIGNED_COS
}

fn consider(best: &mut Option<SnapCandidate>, threshold: f32, candidate: SnapCandidate) {
    if candidate.error >= threshold {
        return;
    }
    let replace = match best {
        None => true,
        Some(current) => {
            candidate.error < current.error
                || (candidate.error == current.error && candidate.source < current.source)
        }
    };
    if replace {
        *best = Some(candidate);
    }
}

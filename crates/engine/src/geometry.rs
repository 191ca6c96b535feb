//! World-space feature derivation.
//!
//! Corners, edges, and planar faces are re-derived from the solid's current
//! dimensions and transform on every call. Nothing here is cached: a drag
//! mutates geometry mid-frame, and hit-testing and snapping must always see
//! the state they are about to test against.

use glam::{EulerRot, Quat, Vec3};
use shared::{Primitive, Solid, Transform};

/// An edge between two corners, tagged with an outward normal.
/// The normal only orients markers; it plays no role in hit math.
#[derive(Debug, Clone)]
pub struct FeatureEdge {
    pub start: Vec3,
    pub end: Vec3,
    pub normal: Vec3,
}

/// A planar face, identified by its outward normal and a point on it
#[derive(Debug, Clone)]
pub struct FeatureFace {
    pub normal: Vec3,
    pub anchor: Vec3,
}

/// Complete feature set of one solid in world space
#[derive(Debug, Clone, Default)]
pub struct SolidFeatures {
    pub corners: Vec<Vec3>,
    pub edges: Vec<FeatureEdge>,
    pub faces: Vec<FeatureFace>,
}

/// World position of a transform as engine-space f32
pub fn position(transform: &Transform) -> Vec3 {
    Vec3::new(
        transform.position[0] as f32,
        transform.position[1] as f32,
        transform.position[2] as f32,
    )
}

/// World orientation of a transform (XYZ Euler, radians)
pub fn rotation(transform: &Transform) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        transform.rotation[0] as f32,
        transform.rotation[1] as f32,
        transform.rotation[2] as f32,
    )
}

/// Half-extents of the primitive's local bounding box
pub fn half_extents(primitive: &Primitive) -> Vec3 {
    match *primitive {
        Primitive::Cube {
            width,
            height,
            depth,
        } => Vec3::new(width as f32 * 0.5, height as f32 * 0.5, depth as f32 * 0.5),
        Primitive::Plane { width, depth } => {
            Vec3::new(width as f32 * 0.5, 0.0, depth as f32 * 0.5)
        }
        Primitive::Cylinder { radius, height } => {
            Vec3::new(radius as f32, height as f32 * 0.5, radius as f32)
        }
        Primitive::Disc { radius } => Vec3::new(radius as f32, 0.0, radius as f32),
        Primitive::Sphere { radius } => Vec3::splat(radius as f32),
    }
}

/// Derive the world-space corners, edges, and faces of a solid.
pub fn solid_features(solid: &Solid) -> SolidFeatures {
    let center = position(&solid.transform);
    let rot = rotation(&solid.transform);
    let he = half_extents(&solid.primitive);

    let to_world = |local: Vec3| center + rot * local;

    let mut features = SolidFeatures::default();

    match solid.primitive {
        Primitive::Cube { .. } => {
            // 8 corners: center ± half-extent along each local axis
            for &sx in &[-1.0f32, 1.0] {
                for &sy in &[-1.0f32, 1.0] {
                    for &sz in &[-1.0f32, 1.0] {
                        features.corners.push(to_world(he * Vec3::new(sx, sy, sz)));
                    }
                }
            }

            // 12 edges: bottom ring, top ring, verticals
            for &sy in &[-1.0f32, 1.0] {
                for &sz in &[-1.0f32, 1.0] {
                    features.edges.push(box_edge(
                        &to_world,
                        rot,
                        he * Vec3::new(-1.0, sy, sz),
                        he * Vec3::new(1.0, sy, sz),
                        Vec3::new(0.0, sy, sz),
                    ));
                }
                for &sx in &[-1.0f32, 1.0] {
                    features.edges.push(box_edge(
                        &to_world,
                        rot,
                        he * Vec3::new(sx, sy, -1.0),
                        he * Vec3::new(sx, sy, 1.0),
                        Vec3::new(sx, sy, 0.0),
                    ));
                }
            }
            for &sx in &[-1.0f32, 1.0] {
                for &sz in &[-1.0f32, 1.0] {
                    features.edges.push(box_edge(
                        &to_world,
                        rot,
                        he * Vec3::new(sx, -1.0, sz),
                        he * Vec3::new(sx, 1.0, sz),
                        Vec3::new(sx, 0.0, sz),
                    ));
                }
            }

            // 6 cardinal faces
            for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
                for &sign in &[-1.0f32, 1.0] {
                    features.faces.push(FeatureFace {
                        normal: rot * (axis * sign),
                        anchor: to_world(he * axis * sign),
                    });
                }
            }
        }
        Primitive::Plane { .. } => {
            // 4 corners and the 4 border edges of the single face
            let ring = [
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(1.0, 0.0, -1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(-1.0, 0.0, 1.0),
            ];
            for s in ring {
                features.corners.push(to_world(he * s));
            }
            let sides = [
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(-1.0, 0.0, 0.0),
            ];
            for i in 0..4 {
                features.edges.push(box_edge(
                    &to_world,
                    rot,
                    he * ring[i],
                    he * ring[(i + 1) % 4],
                    sides[i] + Vec3::Y,
                ));
            }
            features.faces.push(FeatureFace {
                normal: rot * Vec3::Y,
                anchor: center,
            });
        }
        Primitive::Cylinder { .. } => {
            // No discrete corners or edges; top and bottom caps only
            for &sign in &[-1.0f32, 1.0] {
                features.faces.push(FeatureFace {
                    normal: rot * (Vec3::Y * sign),
                    anchor: to_world(Vec3::new(0.0, he.y * sign, 0.0)),
                });
            }
        }
        Primitive::Disc { .. } => {
            // A flat disc exposes both sides, anchored at its center
            for &sign in &[-1.0f32, 1.0] {
                features.faces.push(FeatureFace {
                    normal: rot * (Vec3::Y * sign),
                    anchor: center,
                });
            }
        }
        Primitive::Sphere { .. } => {
            // Not manipulable: no features
        }
    }

    features
}

fn box_edge(
    to_world: &impl Fn(Vec3) -> Vec3,
    rot: Quat,
    local_start: Vec3,
    local_end: Vec3,
    local_normal: Vec3,
) -> FeatureEdge {
    FeatureEdge {
        start: to_world(local_start),
        end: to_world(local_end),
        normal: rot * local_normal.normalize_or_zero(),
    }
}

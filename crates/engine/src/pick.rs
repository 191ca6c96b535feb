//! Ray picking.
//!
//! The render layer normally supplies the pick result (`PickResult`) from
//! its own ray-intersection query; that is the engine's inbound interface.
//! This module also ships a reference implementation over the solids'
//! oriented bounding boxes, used by the headless harness, the wasm host,
//! and tests.

use glam::Vec3;
use shared::{ObjectId, SceneDescription, Solid};

use crate::geometry;

/// A ray in world space
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// What lies under the pointer, as reported by the pick query
#[derive(Debug, Clone)]
pub struct PickResult {
    pub solid_id: ObjectId,
    /// World-space hit point on the solid's surface
    pub point: Vec3,
    /// Outward normal of the hit face
    pub normal: Vec3,
}

/// Flat kinds (plane, disc) get a thin pick slab so they remain pickable
const MIN_PICK_EXTENT: f32 = 1e-3;

/// Ray/solid intersection against the solid's oriented bounding box.
/// Slab method in solid-local space; returns the hit distance.
pub fn ray_solid(ray: &Ray, solid: &Solid) -> Option<f32> {
    let center = geometry::position(&solid.transform);
    let inv_rot = geometry::rotation(&solid.transform).inverse();
    let he = geometry::half_extents(&solid.primitive).max(Vec3::splat(MIN_PICK_EXTENT));

    let origin = inv_rot * (ray.origin - center);
    let dir = inv_rot * ray.direction;

    let inv_dir = Vec3::new(1.0 / dir.x, 1.0 / dir.y, 1.0 / dir.z);

    let t1 = (-he.x - origin.x) * inv_dir.x;
    let t2 = (he.x - origin.x) * inv_dir.x;
    let t3 = (-he.y - origin.y) * inv_dir.y;
    let t4 = (he.y - origin.y) * inv_dir.y;
    let t5 = (-he.z - origin.z) * inv_dir.z;
    let t6 = (he.z - origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Pick the nearest visible solid intersected by the ray.
///
/// The hit normal is the dominant local box axis at the hit point, mapped
/// back to world space. Curved kinds get their bounding-box normal; exact
/// surface normals are the render layer's job.
pub fn pick_solid(scene: &SceneDescription, ray: &Ray) -> Option<PickResult> {
    let mut best: Option<(&Solid, f32)> = None;

    for solid in &scene.solids {
        if !solid.visible {
            continue;
        }
        if let Some(dist) = ray_solid(ray, solid) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((solid, dist));
            }
        }
    }

    let (solid, dist) = best?;
    let point = ray.origin + ray.direction * dist;

    let center = geometry::position(&solid.transform);
    let rot = geometry::rotation(&solid.transform);
    let he = geometry::half_extents(&solid.primitive).max(Vec3::splat(MIN_PICK_EXTENT));

    // Dominant local axis at the hit point picks the face
    let local = rot.inverse() * (point - center);
    let ratios = (local / he).abs();
    let local_normal = if ratios.x >= ratios.y && ratios.x >= ratios.z {
        Vec3::X * local.x.signum()
    } else if ratios.y >= ratios.z {
        Vec3::Y * local.y.signum()
    } else {
        Vec3::Z * local.z.signum()
    };

    Some(PickResult {
        solid_id: solid.id.clone(),
        point,
        normal: rot * local_normal,
    })
}

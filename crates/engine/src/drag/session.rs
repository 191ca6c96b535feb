use glam::{Vec2, Vec3};
use shared::{DimAxis, ObjectId, Primitive, Transform};

use crate::snap::SnapCandidate;

/// Dimensions never collapse below this floor (world units)
pub const MIN_DIMENSION: f64 = 0.01;

/// Pre-drag state of one solid; cancel restores it verbatim
#[derive(Debug, Clone)]
pub struct SolidSnapshot {
    pub id: ObjectId,
    pub primitive: Primitive,
    pub transform: Transform,
}

/// Which manipulation a session performs
#[derive(Debug, Clone)]
pub enum DragMode {
    /// Face extrusion: one dimension changes, the opposite face stays fixed
    PushPull {
        target: ObjectId,
        /// Local dimension axis the grabbed face lies on
        axis: DimAxis,
        /// Outward world direction of the grabbed face
        world_dir: Vec3,
        face_anchor: Vec3,
        /// Dimension along `axis` at drag start (post-promotion)
        initial_dimension: f64,
    },
    /// Unconstrained move of the selected solids, anchored at a grabbed feature
    MoveFree,
    /// Move restricted to the grabbed face's normal axis
    MoveAxis { normal: Vec3, face_anchor: Vec3 },
}

/// Transient state spanning one pointer-down to release/cancel gesture.
/// At most one session is open at a time.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub mode: DragMode,
    /// Every solid the gesture may mutate, as it was before the drag
    pub snapshots: Vec<SolidSnapshot>,
    pub start_pointer: Vec2,
    /// World point of the grabbed corner/edge, when one was grabbed
    pub grab_point: Option<Vec3>,
    /// World delta currently applied on top of the snapshots (move modes)
    pub current_delta: Vec3,
    /// Best alignment proposal, always under the snap threshold
    pub snap_target: Option<SnapCandidate>,
}

impl DragSession {
    pub fn solid_ids(&self) -> Vec<ObjectId> {
        self.snapshots.iter().map(|s| s.id.clone()).collect()
    }
}

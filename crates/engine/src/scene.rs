//! Scene working set.
//!
//! The scene graph proper (meshes, materials, hierarchy) is the host's; the
//! engine works on this flat solid list and bumps a version counter on every
//! mutation so the host knows when to rebuild display geometry.

use shared::{ObjectId, Primitive, SceneDescription, Solid, Transform};

/// Solids plus a monotonically increasing version for cache invalidation
#[derive(Default)]
pub struct SceneState {
    pub scene: SceneDescription,
    version: u64,
}

impl SceneState {
    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get_solid(&self, id: &str) -> Option<&Solid> {
        self.scene.solids.iter().find(|s| s.id == id)
    }

    pub fn get_solid_mut(&mut self, id: &str) -> Option<&mut Solid> {
        self.scene.solids.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_solid(id).is_some()
    }

    /// Bump the version after external mutation through `get_solid_mut`
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }

    /// Create a solid and return its id
    pub fn create_solid(
        &mut self,
        name: String,
        primitive: Primitive,
        transform: Transform,
    ) -> ObjectId {
        let id = uuid::Uuid::new_v4().to_string();
        self.scene.solids.push(Solid {
            id: id.clone(),
            name,
            primitive,
            transform,
            visible: true,
        });
        self.version += 1;
        id
    }

    /// Remove a solid by id; returns whether anything was removed
    pub fn remove_solid(&mut self, id: &str) -> bool {
        let before = self.scene.solids.len();
        self.scene.solids.retain(|s| s.id != id);
        let removed = self.scene.solids.len() != before;
        if removed {
            self.version += 1;
        }
        removed
    }

    /// Replace the whole scene (load)
    pub fn set_scene(&mut self, scene: SceneDescription) {
        self.scene = scene;
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_lookup() {
        let mut s = SceneState::default();
        let id = s.create_solid(
            "box".to_string(),
            Primitive::Cube {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Transform::new(),
        );
        assert!(s.contains(&id));
        assert_eq!(s.get_solid(&id).unwrap().name, "box");
        assert_eq!(s.version(), 1);
    }

    #[test]
    fn test_remove_bumps_version() {
        let mut s = SceneState::default();
        let id = s.create_solid(
            "box".to_string(),
            Primitive::Sphere { radius: 1.0 },
            Transform::new(),
        );
        let v = s.version();
        assert!(s.remove_solid(&id));
        assert!(s.version() > v);
        assert!(!s.remove_solid(&id));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut s = SceneState::default();
        let a = s.create_solid(
            "a".to_string(),
            Primitive::Sphere { radius: 1.0 },
            Transform::new(),
        );
        let b = s.create_solid(
            "b".to_string(),
            Primitive::Sphere { radius: 1.0 },
            Transform::new(),
        );
        assert_ne!(a, b);
    }
}

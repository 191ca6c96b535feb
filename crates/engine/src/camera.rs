use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::pick::Ray;

/// Read-only camera state supplied by the viewport host.
///
/// The engine never moves the camera; it only reads it for screen/world
/// conversions. Orbit, pan, and zoom belong to the host, which must suspend
/// them while a drag is in progress.
#[derive(Debug, Clone)]
pub struct CameraState {
    /// Camera position in world space
    pub eye: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
    /// Viewport size in physical pixels
    pub viewport: Vec2,
}

impl CameraState {
    pub fn new(eye: Vec3, target: Vec3, fov: f32, viewport: Vec2) -> Self {
        Self {
            eye,
            target,
            fov,
            viewport,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.viewport.y <= 0.0 {
            1.0
        } else {
            self.viewport.x / self.viewport.y
        }
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect(), 0.1, 200.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Camera right in world space. Zero at degenerate view angles
    /// (looking straight along the world up axis).
    pub fn right_vector(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    pub fn up_vector(&self) -> Vec3 {
        self.right_vector().cross(self.forward()).normalize_or_zero()
    }

    /// Project a 3D point to viewport pixel coordinates (y grows downward).
    /// Returns None for points at or behind the eye plane.
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        let p = self.view_projection() * Vec4::new(point.x, point.y, point.z, 1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let half = self.viewport * 0.5;
        Some(Vec2::new(
            half.x + ndc.x * half.x,
            half.y - ndc.y * half.y,
        ))
    }

    /// Cast a ray from a viewport pixel position into the scene
    pub fn screen_ray(&self, screen_pos: Vec2) -> Ray {
        let half = self.viewport * 0.5;
        let ndc_x = (screen_pos.x - half.x) / half.x;
        let ndc_y = -(screen_pos.y - half.y) / half.y;

        let vp_inv = self.view_projection().inverse();

        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray {
            origin: self.eye,
            direction: (far - near).normalize_or_zero(),
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            eye: Vec3::new(5.0, 5.0, 5.0),
            target: Vec3::ZERO,
            fov: 45.0_f32.to_radians(),
            viewport: Vec2::new(1280.0, 720.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_camera() -> CameraState {
        CameraState::new(
            Vec3::new(0.0, 0.0, 8.0),
            Vec3::ZERO,
            45.0_f32.to_radians(),
            Vec2::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_target_projects_to_center() {
        let cam = front_camera();
        let p = cam.project(Vec3::ZERO).unwrap();
        assert!((p.x - 400.0).abs() < 0.5);
        assert!((p.y - 300.0).abs() < 0.5);
    }

    #[test]
    fn test_project_right_of_center() {
        let cam = front_camera();
        let p = cam.project(Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(p.x > 400.0);
        assert!((p.y - 300.0).abs() < 0.5);
    }

    #[test]
    fn test_project_behind_camera() {
        let cam = front_camera();
        assert!(cam.project(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let cam = front_camera();
        let ray = cam.screen_ray(Vec2::new(400.0, 300.0));
        assert!((ray.origin - cam.eye).length() < 1e-4);
        let expected = (cam.target - cam.eye).normalize();
        assert!((ray.direction - expected).length() < 1e-3);
    }

    #[test]
    fn test_basis_vectors_front_view() {
        let cam = front_camera();
        assert!((cam.right_vector() - Vec3::X).length() < 1e-5);
        assert!((cam.up_vector() - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_degenerate_top_down_basis_is_zero() {
        let cam = CameraState::new(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::ZERO,
            45.0_f32.to_radians(),
            Vec2::new(800.0, 600.0),
        );
        // Forward is parallel to world up: no stable right vector exists
        assert_eq!(cam.right_vector(), Vec3::ZERO);
    }
}

use glam::{Mat4, Vec2, Vec3};

/// Orthographic 2D camera: position in world pixels, viewport in screen
/// pixels, zoom factor. Camera motion lives outside the renderer; the
/// renderer only reads it to cull chunks and set the projection.
#[derive(Debug, Clone, Copy)]
pub struct Camera2d {
    pub position: Vec2,
    pub viewport: Vec2,
    pub zoom: f32,
}

impl Default for Camera2d {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            viewport: Vec2::new(800.0, 600.0),
            zoom: 1.0,
        }
    }
}

impl Camera2d {
    pub fn new(position: Vec2, viewport: Vec2, zoom: f32) -> Self {
        assert!(zoom > 0.0, "zoom must be positive");
        Self {
            position,
            viewport,
            zoom,
        }
    }

    /// World-pixel extent currently covered by the viewport.
    pub fn world_extent(&self) -> Vec2 {
        self.viewport * self.zoom
    }

    /// Combined orthographic projection centered on the camera position.
    pub fn combined(&self) -> Mat4 {
        let half = self.world_extent() * 0.5;
        let proj = Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, -1.0, 1.0);
        let view = Mat4::from_translation(Vec3::new(-self.position.x, -self.position.y, 0.0));
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn camera_center_maps_to_clip_origin() {
        let cam = Camera2d::new(Vec2::new(100.0, 50.0), Vec2::new(800.0, 600.0), 1.0);
        let clip = cam.combined() * Vec4::new(100.0, 50.0, 0.0, 1.0);
        assert!(clip.x.abs() < 1e-6 && clip.y.abs() < 1e-6);
    }

    #[test]
    fn viewport_edge_maps_to_clip_edge() {
        let cam = Camera2d::new(Vec2::ZERO, Vec2::new(800.0, 600.0), 1.0);
        let clip = cam.combined() * Vec4::new(400.0, 300.0, 0.0, 1.0);
        assert!((clip.x - 1.0).abs() < 1e-6);
        assert!((clip.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zoom_scales_world_extent() {
        let cam = Camera2d::new(Vec2::ZERO, Vec2::new(800.0, 600.0), 2.0);
        assert_eq!(cam.world_extent(), Vec2::new(1600.0, 1200.0));
    }
}

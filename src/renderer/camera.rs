//! Viewer camera
//!
//! Outside an immersive session the page shows the board from a standing
//! player's eye height, looking down the field toward the goal.

use glam::{Mat4, Vec3};

use crate::consts::BOARD_ORIGIN;

/// Eye height of a standing player (meters)
pub const EYE_HEIGHT: f32 = 1.6;

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Standing player at the origin, looking at the board root
    pub fn standing(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            target: Vec3::from(BOARD_ORIGIN),
            fov_y: 70f32.to_radians(),
            aspect,
            near: 0.01,
            far: 20.0,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far);
        proj * view
    }
}

/// Camera and lighting uniform (matches the WGSL struct)
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
    /// xyz: direction light travels; w: 1 when the target stores sRGB
    light: [f32; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera, srgb_target: bool) -> Self {
        let light = Vec3::new(-0.3, -1.0, -0.4).normalize();
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            light: [light.x, light.y, light.z, if srgb_target { 1.0 } else { 0.0 }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_origin_is_centered() {
        let camera = Camera::standing(16.0 / 9.0);
        let clip = camera.view_proj() * Vec3::from(BOARD_ORIGIN).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn aspect_ignores_zero_height() {
        let mut camera = Camera::standing(1.0);
        camera.set_aspect(800, 0);
        assert_eq!(camera.aspect, 1.0);
        camera.set_aspect(800, 400);
        assert_eq!(camera.aspect, 2.0);
    }
}

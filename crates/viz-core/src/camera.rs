//! Perspective camera that trails the pointer.
//!
//! Platform-free: the web frontend only reads `view_projection()` when it
//! writes the scene uniforms.

use crate::constants::*;
use crate::input::PointerOffset;
use glam::{Mat4, Vec3};

/// Right-handed perspective camera.
///
/// `projection` is a cache: changing `aspect` or `fovy_radians` has no effect
/// until [`Camera::update_projection_matrix`] runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        let mut cam = Self {
            eye: camera_start_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Ease the eye towards the pointer and re-aim at the origin.
    ///
    /// No clamping: extreme offsets overshoot and oscillate.
    pub fn follow_pointer(&mut self, pointer: PointerOffset) {
        self.eye.x += (pointer.x - self.eye.x) * CAMERA_EASE_X;
        self.eye.y += (-pointer.y - self.eye.y) * CAMERA_EASE_Y;
        self.target = Vec3::ZERO;
    }
}

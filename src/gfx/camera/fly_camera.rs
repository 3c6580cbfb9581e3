use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

/// Pitch is kept short of straight up/down so the view basis never degenerates.
pub const MAX_PITCH_DEGREES: f32 = 89.0;

/// First-person camera described by a position and yaw/pitch in degrees.
///
/// Only the matrices and basis vectors are provided here; moving and turning
/// the camera is left to whoever owns the input.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera for FlyCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection() * self.view()
    }
}

impl FlyCamera {
    pub fn new(position: Vector3<f32>, aspect: f32) -> Self {
        Self {
            position,
            yaw: -90.0, // Looking down -Z
            pitch: 0.0,
            fov: 60.0,
            aspect,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Direction the camera is looking in.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw, pitch) = (Rad::from(Deg(self.yaw)), Rad::from(Deg(self.pitch)));
        Vector3::new(yaw.0.cos() * pitch.0.cos(), pitch.0.sin(), yaw.0.sin() * pitch.0.cos())
            .normalize()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.forward().cross(Vector3::unit_y()).normalize()
    }

    pub fn up(&self) -> Vector3<f32> {
        self.right().cross(self.forward()).normalize()
    }

    pub fn view(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at_rh(eye, eye + self.forward(), self.up())
    }

    /// OpenGL-style perspective (clip z in -1..1) at the camera's own aspect.
    pub fn projection(&self) -> Matrix4<f32> {
        perspective(Deg(self.fov), self.aspect, self.znear, self.zfar)
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: self.position.extend(1.0).into(),
            view_proj: convert_matrix4_to_array(self.build_view_projection_matrix()),
        }
    }
}

//! Per-frame data handed to an external renderer.
//!
//! The crate never touches the GPU. A [`Renderer`] receives a [`RenderFrame`]
//! of plain `#[repr(C)]` uniforms it can upload however it likes.

use cgmath::Vector3;

use super::camera::CameraUniform;
use crate::simulation::{PlanetUniform, Ring};

/// Point light colour used for the sun.
pub const SUN_LIGHT_COLOR: [f32; 3] = [1.2, 1.1, 1.0];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub _padding: f32,
}

impl LightUniform {
    pub fn new(position: Vector3<f32>, intensity: f32) -> Self {
        Self {
            position: position.into(),
            intensity,
            color: SUN_LIGHT_COLOR,
            _padding: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct RingUniform {
    pub model: [[f32; 4]; 4],
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub _padding: [f32; 2],
}

impl From<Ring> for RingUniform {
    fn from(ring: Ring) -> Self {
        Self {
            model: ring.model.into(),
            inner_radius: ring.inner_radius,
            outer_radius: ring.outer_radius,
            _padding: [0.0; 2],
        }
    }
}

/// Everything needed to draw one frame, in body order.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub camera: CameraUniform,
    pub light: LightUniform,
    pub planets: Vec<PlanetUniform>,
    pub ring: Option<RingUniform>,
}

/// Consumer of finished frames, e.g. a wgpu or OpenGL backend.
pub trait Renderer {
    fn submit(&mut self, frame: &RenderFrame) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Matrix4};

    #[test]
    fn test_uniform_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<LightUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<RingUniform>() % 16, 0);
    }

    #[test]
    fn test_ring_conversion() {
        let ring = Ring {
            model: Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0)) * Matrix4::from_angle_x(Deg(0.0)),
            inner_radius: 1.0,
            outer_radius: 2.0,
        };
        let uniform = RingUniform::from(ring);
        assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.outer_radius, 2.0);
    }
}

//! # Graphics Module
//!
//! Camera, picking and the per-frame data exchanged with a renderer.
//!
//! - **Camera** ([`camera`]) - First-person camera matrices and basis vectors
//! - **Picking** ([`picking`]) - Cursor rays, sphere picking and drag planes
//! - **Frame** ([`frame`]) - Plain uniforms handed to an external [`Renderer`]
//!
//! Shader, buffer and texture management belong to the renderer, not here.
//!
//! [`Renderer`]: frame::Renderer

pub mod camera;
pub mod frame;
pub mod picking;

// Re-export commonly used types
pub use camera::fly_camera::FlyCamera;
pub use frame::{RenderFrame, Renderer};
pub use picking::{DragController, Ray, Unprojector, Viewport};

//! Planets: orbit state, spin, and hover/drag flags.

use cgmath::{Deg, InnerSpace, Matrix4, Rad, Vector3, Zero};

use crate::gfx::picking::{Draggable, Pickable};

/// Tint added while the cursor is over a body.
const HOVER_TINT: f32 = 0.22;
/// Tint added while a body is being dragged.
const DRAG_TINT: f32 = 0.35;

/// Circular orbit in the XZ plane. Angles and speeds are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub center: Vector3<f32>,
    pub radius: f32,
    /// Degrees per second. Zero while the body is being dragged.
    pub speed: f32,
    pub angle: f32,
}

impl Orbit {
    pub fn new(center: Vector3<f32>, radius: f32, speed: f32) -> Self {
        Self {
            center,
            radius,
            speed,
            angle: 0.0,
        }
    }

    pub fn none() -> Self {
        Self::new(Vector3::zero(), 0.0, 0.0)
    }

    pub fn is_active(&self) -> bool {
        self.speed != 0.0 && self.radius > 0.0
    }

    /// Point on the orbit at the current angle.
    pub fn point(&self) -> Vector3<f32> {
        let r = Rad::from(Deg(self.angle)).0;
        self.center + Vector3::new(r.cos() * self.radius, 0.0, r.sin() * self.radius)
    }
}

/// What an orbit is centered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitAnchor {
    /// Center set once and left alone.
    Fixed,
    /// Center follows the body at this index.
    Body(usize),
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct PlanetUniform {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 3],
    /// 1.0 when hovered or dragged.
    pub highlight: f32,
}

#[derive(Debug, Clone)]
pub struct Planet {
    pub name: String,
    pub position: Vector3<f32>,
    pub radius: f32,
    pub orbit: Orbit,
    pub anchor: OrbitAnchor,
    /// Spin in degrees per second.
    pub self_rotate: f32,
    pub self_angle: f32,
    pub tint: Vector3<f32>,
    pub hovered: bool,
    pub dragging: bool,
}

impl Planet {
    pub fn new(name: &str, radius: f32, position: Vector3<f32>) -> Self {
        Self {
            name: name.to_string(),
            position,
            radius,
            orbit: Orbit::none(),
            anchor: OrbitAnchor::Fixed,
            self_rotate: 0.0,
            self_angle: 0.0,
            tint: Vector3::zero(),
            hovered: false,
            dragging: false,
        }
    }

    pub fn with_orbit(mut self, anchor: OrbitAnchor, center: Vector3<f32>, radius: f32, speed: f32) -> Self {
        self.anchor = anchor;
        self.orbit = Orbit::new(center, radius, speed);
        self
    }

    pub fn with_spin(mut self, degrees_per_second: f32) -> Self {
        self.self_rotate = degrees_per_second;
        self
    }

    pub fn with_tint(mut self, r: f32, g: f32, b: f32) -> Self {
        self.tint = Vector3::new(r, g, b);
        self
    }

    /// Advance orbit and spin by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if !self.dragging && self.orbit.is_active() {
            self.orbit.angle += self.orbit.speed * dt;
            self.position = self.orbit.point();
        }

        if self.self_rotate != 0.0 {
            self.self_angle = (self.self_angle + self.self_rotate * dt).rem_euclid(360.0);
        }
    }

    /// Point on the surface that faces `from`.
    pub fn surface_point(&self, from: Vector3<f32>) -> Vector3<f32> {
        let dir = (self.position - from).normalize();
        self.position - dir * self.radius
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * Matrix4::from_angle_y(Deg(self.self_angle))
    }

    pub fn display_tint(&self) -> Vector3<f32> {
        let mut tint = self.tint;
        if self.hovered {
            tint += Vector3::new(HOVER_TINT, HOVER_TINT, HOVER_TINT);
        }
        if self.dragging {
            tint += Vector3::new(DRAG_TINT, DRAG_TINT, DRAG_TINT);
        }
        tint
    }

    pub fn uniform(&self) -> PlanetUniform {
        PlanetUniform {
            model: self.model_matrix().into(),
            tint: self.display_tint().into(),
            highlight: if self.hovered || self.dragging { 1.0 } else { 0.0 },
        }
    }
}

impl Pickable for Planet {
    fn bounding_sphere(&self) -> (Vector3<f32>, f32) {
        (self.position, self.radius)
    }
}

impl Draggable for Planet {
    fn position(&self) -> Vector3<f32> {
        self.position
    }

    fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    fn orbit_speed(&self) -> f32 {
        self.orbit.speed
    }

    fn set_orbit_speed(&mut self, speed: f32) {
        self.orbit.speed = speed;
    }

    fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }
}

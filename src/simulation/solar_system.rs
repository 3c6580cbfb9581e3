//! The solar system: nine bodies, their orbit anchors, and the sky box that
//! keeps them in view.

use cgmath::{Deg, Matrix4, Vector3, Zero};
use log::info;

use super::{
    planet::{OrbitAnchor, Planet},
    traits::Simulation,
};
use crate::gfx::picking::{pick, Ray};

/// Saturn's axial tilt, applied to its ring.
const RING_TILT_DEGREES: f32 = 26.7;
const RING_INNER_GAP: f32 = 0.8;
const RING_OUTER_GAP: f32 = 4.4;

/// Flat ring drawn around a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub model: Matrix4<f32>,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

pub struct SolarSystem {
    planets: Vec<Planet>,
    initial: Vec<Planet>,
    box_half_size: f32,
    running: bool,
}

impl SolarSystem {
    pub fn new(planets: Vec<Planet>, box_half_size: f32) -> Self {
        Self {
            initial: planets.clone(),
            planets,
            box_half_size,
            running: true,
        }
    }

    /// Sun at the origin, eight bodies around it and the moon around the earth.
    pub fn standard(box_half_size: f32) -> Self {
        const SUN: usize = 0;
        const EARTH: usize = 2;
        let origin = Vector3::zero();
        let around_sun = OrbitAnchor::Body(SUN);

        let planets = vec![
            Planet::new("Sun", 5.0, origin)
                .with_spin(5.0)
                .with_tint(1.0, 0.95, 0.9),
            Planet::new("Venus", 1.9, Vector3::new(20.0, 0.0, 0.0))
                .with_orbit(around_sun, origin, 20.0, 17.0)
                .with_spin(10.0)
                .with_tint(1.0, 0.9, 0.6),
            Planet::new("Earth", 2.0, Vector3::new(35.0, 0.0, 0.0))
                .with_orbit(around_sun, origin, 35.0, 10.0)
                .with_spin(25.0)
                .with_tint(0.5, 0.7, 1.0),
            Planet::new("Moon", 0.6, Vector3::new(38.0, 0.0, 0.0))
                .with_orbit(OrbitAnchor::Body(EARTH), Vector3::new(35.0, 0.0, 0.0), 3.0, 100.0)
                .with_spin(10.0)
                .with_tint(0.8, 0.8, 0.85),
            Planet::new("Mars", 1.6, Vector3::new(50.0, 0.0, 0.0))
                .with_orbit(around_sun, origin, 50.0, 10.0)
                .with_spin(20.0)
                .with_tint(1.0, 0.5, 0.3),
            Planet::new("Jupiter", 5.6, Vector3::new(70.0, 0.0, 0.0))
                .with_orbit(around_sun, origin, 70.0, 5.0)
                .with_spin(15.0)
                .with_tint(1.0, 0.95, 0.9),
            Planet::new("Saturn", 4.8, Vector3::new(90.0, 0.0, 0.0))
                .with_orbit(around_sun, origin, 90.0, 4.0)
                .with_spin(15.0)
                .with_tint(1.0, 0.9, 0.6),
            Planet::new("Uranus", 3.2, Vector3::new(105.0, 0.0, 0.0))
                .with_orbit(around_sun, origin, 105.0, 3.0)
                .with_spin(12.0)
                .with_tint(0.6, 0.9, 0.95),
            Planet::new("Neptune", 3.0, Vector3::new(115.0, 0.0, 0.0))
                .with_orbit(around_sun, origin, 115.0, 2.0)
                .with_spin(12.0)
                .with_tint(0.3, 0.55, 1.0),
        ];

        Self::new(planets, box_half_size)
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planets_mut(&mut self) -> &mut [Planet] {
        &mut self.planets
    }

    pub fn find(&self, name: &str) -> Option<&Planet> {
        self.planets.iter().find(|p| p.name == name)
    }

    pub fn box_half_size(&self) -> f32 {
        self.box_half_size
    }

    /// Advance every body that is not being dragged.
    ///
    /// Orbit centers are refreshed from their anchors first, so a moon follows
    /// its planet even while that planet is held by the cursor.
    pub fn advance(&mut self, dt: f32) {
        for i in 0..self.planets.len() {
            if self.planets[i].dragging {
                continue;
            }

            if let OrbitAnchor::Body(anchor) = self.planets[i].anchor {
                if let Some(center) = self.planets.get(anchor).map(|p| p.position) {
                    self.planets[i].orbit.center = center;
                }
            }

            self.planets[i].update(dt);
            self.keep_inside_box(i);
        }
    }

    fn keep_inside_box(&mut self, index: usize) {
        let half = self.box_half_size;
        let planet = &mut self.planets[index];
        let limit = (half - planet.radius).max(0.0);
        planet.position.x = planet.position.x.clamp(-limit, limit);
        planet.position.y = planet.position.y.clamp(-limit, limit);
        planet.position.z = planet.position.z.clamp(-limit, limit);
    }

    /// Flag the body under `ray` as hovered and clear the rest.
    pub fn hover(&mut self, ray: Option<&Ray>) -> Option<usize> {
        let hovered = ray.and_then(|ray| pick(ray, &self.planets)).map(|hit| hit.index);
        for (i, planet) in self.planets.iter_mut().enumerate() {
            planet.hovered = Some(i) == hovered;
        }
        hovered
    }

    pub fn saturn_ring(&self) -> Option<Ring> {
        let saturn = self.find("Saturn")?;
        Some(Ring {
            model: Matrix4::from_translation(saturn.position)
                * Matrix4::from_angle_x(Deg(RING_TILT_DEGREES)),
            inner_radius: saturn.radius + RING_INNER_GAP,
            outer_radius: saturn.radius + RING_OUTER_GAP,
        })
    }
}

impl Simulation for SolarSystem {
    fn initialize(&mut self) {
        info!("solar system with {} bodies", self.planets.len());
        self.running = true;
    }

    fn update(&mut self, delta_time: f32) {
        if self.running {
            self.advance(delta_time);
        }
    }

    fn name(&self) -> &str {
        "Solar System"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn reset(&mut self) {
        self.planets = self.initial.clone();
    }
}

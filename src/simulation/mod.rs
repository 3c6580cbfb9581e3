// src/simulation/mod.rs
//! Simulation system
//!
//! Orbiting bodies and the manager that steps them.

pub mod manager;
pub mod planet;
pub mod solar_system;
pub mod traits;

pub use manager::SimulationManager;
pub use planet::{Orbit, OrbitAnchor, Planet, PlanetUniform};
pub use solar_system::{Ring, SolarSystem};
pub use traits::Simulation;

//! # Orrery Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use orrery::prelude::*;
//!
//! fn main() -> orrery::Result<()> {
//!     orrery::logger::init()?;
//!     let mut orrery = orrery::default()?;
//!
//!     // In the window loop: forward events, step, then draw.
//!     orrery.input_mut().cursor_moved(640.0, 360.0);
//!     orrery.frame(1.0 / 60.0)?;
//!     let frame: RenderFrame = orrery.render_frame();
//!     println!("{} bodies, dragging {:?}", frame.planets.len(), orrery.dragged());
//!     Ok(())
//! }
//! ```

// Re-export core types
pub use crate::app::Orrery;
pub use crate::config::Config;
pub use crate::{default, Error, Result};

// Re-export graphics and picking types
pub use crate::gfx::camera::{Camera, CameraUniform, FlyCamera};
pub use crate::gfx::frame::{LightUniform, RenderFrame, Renderer, RingUniform};
pub use crate::gfx::picking::{
    intersect_sphere, pick, DragController, DragPlane, Draggable, PickResult, Pickable, Ray,
    Unprojector, Viewport,
};

// Re-export simulation types
pub use crate::simulation::{
    Orbit, OrbitAnchor, Planet, PlanetUniform, Simulation, SimulationManager, SolarSystem,
};
pub use crate::input::InputState;

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector2, Vector3, Zero};

// src/lib.rs
//! Orrery
//!
//! Mouse picking and drag-plane projection for an interactive solar system,
//! built on cgmath. Rendering and windowing stay outside the crate: the
//! [`app::Orrery`] driver consumes input events and hands per-frame uniforms
//! to a [`gfx::frame::Renderer`].

pub mod app;
pub mod config;
pub mod gfx;
pub mod input;
pub mod logger;
pub mod prelude;
pub mod simulation;

// Re-export main types for convenience
pub use app::Orrery;
pub use config::Config;

/// Results that can be returned from this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can be returned from this crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("view-projection matrix is not invertible")]
    SingularViewProjection,
    #[error("viewport has no area: {width}x{height}")]
    DegenerateViewport { width: u32, height: u32 },
    #[error("no body at index {0}")]
    UnknownBody(usize),
    #[error("renderer error: {0}")]
    Renderer(anyhow::Error),
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
}

/// Creates an [`Orrery`] with the standard solar system and configuration
/// read from the environment.
pub fn default() -> Result<Orrery> {
    Orrery::new(Config::from_env())
}

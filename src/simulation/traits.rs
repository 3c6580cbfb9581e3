//! Core simulation traits
//!
//! Defines the interface a simulation implements to be driven by the
//! [`SimulationManager`](super::manager::SimulationManager).

/// Core trait for time-stepped simulations
pub trait Simulation {
    /// Initialize the simulation
    ///
    /// Called once when the simulation is attached to a manager.
    fn initialize(&mut self);

    /// Update simulation state
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last update in seconds
    fn update(&mut self, delta_time: f32);

    /// Get simulation name for display and logs
    fn name(&self) -> &str;

    /// Whether simulation is currently running
    fn is_running(&self) -> bool;

    /// Start/pause simulation
    fn set_running(&mut self, running: bool);

    /// Reset simulation to initial state
    fn reset(&mut self);

    /// Optional: Custom cleanup when simulation is removed
    fn cleanup(&mut self) {
        // Default: no cleanup needed
    }
}

//! Simulation manager
//!
//! Drives a simulation with pause, time scaling and an optional fixed timestep.

use log::{debug, info};

use super::traits::Simulation;

/// Runs one simulation at a time
pub struct SimulationManager<S: Simulation> {
    simulation: Option<S>,
    is_paused: bool,
    time_scale: f32,
    accumulated_time: f32,
    fixed_timestep: Option<f32>, // For deterministic simulations
}

impl<S: Simulation> SimulationManager<S> {
    /// Create a new simulation manager
    pub fn new() -> Self {
        Self {
            simulation: None,
            is_paused: false,
            time_scale: 1.0,
            accumulated_time: 0.0,
            fixed_timestep: None,
        }
    }

    /// Attach a simulation, replacing (and cleaning up) any previous one
    pub fn attach_simulation(&mut self, mut simulation: S) {
        if let Some(mut old_sim) = self.simulation.take() {
            old_sim.cleanup();
        }

        simulation.initialize();
        info!("attached simulation '{}'", simulation.name());
        self.simulation = Some(simulation);
        self.is_paused = false;
    }

    /// Remove current simulation
    pub fn detach_simulation(&mut self) -> Option<S> {
        let mut sim = self.simulation.take()?;
        sim.cleanup();
        Some(sim)
    }

    pub fn simulation(&self) -> Option<&S> {
        self.simulation.as_ref()
    }

    pub fn simulation_mut(&mut self) -> Option<&mut S> {
        self.simulation.as_mut()
    }

    /// Update simulation (called every frame)
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last frame in seconds
    pub fn update(&mut self, delta_time: f32) {
        if self.is_paused {
            return;
        }

        if let Some(simulation) = &mut self.simulation {
            let scaled_delta = delta_time * self.time_scale;

            if let Some(fixed_dt) = self.fixed_timestep {
                // Fixed timestep simulation for deterministic results
                self.accumulated_time += scaled_delta;

                while self.accumulated_time >= fixed_dt {
                    simulation.update(fixed_dt);
                    self.accumulated_time -= fixed_dt;
                }
            } else {
                // Variable timestep
                simulation.update(scaled_delta);
            }
        }
    }

    /// Reset the attached simulation to its initial state
    pub fn reset(&mut self) {
        if let Some(simulation) = &mut self.simulation {
            debug!("resetting simulation '{}'", simulation.name());
            simulation.reset();
        }
        self.accumulated_time = 0.0;
    }

    /// Get current simulation name
    pub fn current_simulation_name(&self) -> Option<&str> {
        self.simulation.as_ref().map(|s| s.name())
    }

    /// `true` if simulation exists and is not paused
    pub fn is_running(&self) -> bool {
        !self.is_paused && self.simulation.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Set pause state
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        if let Some(simulation) = &mut self.simulation {
            simulation.set_running(!paused);
        }
    }

    /// Enable fixed timestep mode
    ///
    /// # Arguments
    /// * `timestep` - Fixed timestep in seconds, or None for variable timestep
    pub fn set_fixed_timestep(&mut self, timestep: Option<f32>) {
        self.fixed_timestep = timestep.filter(|dt| *dt > 0.0);
        self.accumulated_time = 0.0; // Reset accumulator
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set time scale
    ///
    /// # Arguments
    /// * `scale` - Time scale multiplier (1.0 = normal speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0); // Prevent negative time
    }

    pub fn has_simulation(&self) -> bool {
        self.simulation.is_some()
    }
}

impl<S: Simulation> Default for SimulationManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        steps: Vec<f32>,
        running: bool,
        initialized: bool,
    }

    impl Simulation for Counter {
        fn initialize(&mut self) {
            self.initialized = true;
            self.running = true;
        }
        fn update(&mut self, delta_time: f32) {
            self.steps.push(delta_time);
        }
        fn name(&self) -> &str {
            "Counter"
        }
        fn is_running(&self) -> bool {
            self.running
        }
        fn set_running(&mut self, running: bool) {
            self.running = running;
        }
        fn reset(&mut self) {
            self.steps.clear();
        }
    }

    #[test]
    fn test_attach_initializes() {
        let mut manager = SimulationManager::new();
        assert!(!manager.is_running());
        manager.attach_simulation(Counter::default());
        assert!(manager.is_running());
        assert!(manager.simulation().unwrap().initialized);
        assert_eq!(manager.current_simulation_name(), Some("Counter"));
    }

    #[test]
    fn test_time_scale() {
        let mut manager = SimulationManager::new();
        manager.attach_simulation(Counter::default());
        manager.set_time_scale(2.0);
        manager.update(0.25);
        manager.set_time_scale(-1.0);
        manager.update(0.25);
        assert_eq!(manager.simulation().unwrap().steps, vec![0.5, 0.0]);
    }

    #[test]
    fn test_fixed_timestep_accumulates() {
        let mut manager = SimulationManager::new();
        manager.attach_simulation(Counter::default());
        manager.set_fixed_timestep(Some(0.25));
        manager.update(0.6);
        assert_eq!(manager.simulation().unwrap().steps.len(), 2);
        manager.update(0.2);
        assert_eq!(manager.simulation().unwrap().steps.len(), 3);
    }

    #[test]
    fn test_paused_manager_skips_updates() {
        let mut manager = SimulationManager::new();
        manager.attach_simulation(Counter::default());
        manager.set_paused(true);
        manager.update(1.0);
        assert!(manager.simulation().unwrap().steps.is_empty());
        assert!(!manager.simulation().unwrap().running);
    }

    #[test]
    fn test_detach_returns_simulation() {
        let mut manager = SimulationManager::new();
        manager.attach_simulation(Counter::default());
        assert!(manager.detach_simulation().is_some());
        assert!(!manager.has_simulation());
    }
}

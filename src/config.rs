//! Orrery configuration.

use std::env;

/// Tunables for dragging, the sky box and lighting.
#[derive(Debug, Copy, Clone, PartialEq)]
#[must_use]
pub struct Config {
    /// Responsiveness of drag smoothing. Higher is snappier.
    pub drag_smoothing: f32,
    /// Lower bound applied to the frame time when smoothing.
    pub min_drag_dt: f32,
    /// Half extent of the cube bodies are kept inside of.
    pub box_half_size: f32,
    /// Light intensity while the light is switched on.
    pub light_intensity: f32,
    /// Initial viewport size in pixels.
    pub viewport: (u32, u32),
    /// Start with the cursor grabbed (picking from the viewport center).
    pub cursor_locked: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drag_smoothing: 36.0,
            min_drag_dt: 1e-4,
            box_half_size: 120.0,
            light_intensity: 3.5,
            viewport: (1280, 720),
            cursor_locked: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `ORRERY_DRAG_SMOOTHING`, `ORRERY_BOX_HALF_SIZE`
    /// and `ORRERY_LIGHT_INTENSITY` when they parse as numbers.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            drag_smoothing: env_f32("ORRERY_DRAG_SMOOTHING")
                .filter(|k| *k > 0.0)
                .unwrap_or(defaults.drag_smoothing),
            box_half_size: env_f32("ORRERY_BOX_HALF_SIZE")
                .filter(|s| *s > 0.0)
                .unwrap_or(defaults.box_half_size),
            light_intensity: env_f32("ORRERY_LIGHT_INTENSITY")
                .unwrap_or(defaults.light_intensity),
            ..defaults
        }
    }
}

fn env_f32(key: &str) -> Option<f32> {
    env::var(key).ok().and_then(|value| value.trim().parse::<f32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.drag_smoothing, 36.0);
        assert_eq!(config.box_half_size, 120.0);
        assert_eq!(config.viewport, (1280, 720));
        assert!(config.cursor_locked);
    }

    #[test]
    fn test_env_override() {
        env::set_var("ORRERY_BOX_HALF_SIZE", "80");
        env::set_var("ORRERY_DRAG_SMOOTHING", "not a number");
        let config = Config::from_env();
        env::remove_var("ORRERY_BOX_HALF_SIZE");
        env::remove_var("ORRERY_DRAG_SMOOTHING");

        assert_eq!(config.box_half_size, 80.0);
        assert_eq!(config.drag_smoothing, 36.0);
    }
}

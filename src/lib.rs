//! FusionBots - two-player local arcade match across five mini-game modes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, arena, physics, mode rules, match flow)
//! - `settings`: Immutable match configuration
//! - `display`: Display collaborator interface
//! - `autopilot`: Seeded demo input source

pub mod autopilot;
pub mod display;
pub mod settings;
pub mod sim;

pub use autopilot::Autopilot;
pub use display::{Display, LogDisplay, RecordingDisplay, Tint};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
}

/// Unit direction from `from` toward `to`, falling back to +X when the points coincide
#[inline]
pub fn direction_between(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::X)
}

/// Cubic ease-out on `t` in [0, 1]
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_between() {
        let dir = direction_between(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0));
        assert!((dir - Vec2::Y).length() < 1e-6);

        // Coincident points pick a stable axis
        assert_eq!(direction_between(Vec2::ONE, Vec2::ONE), Vec2::X);
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}

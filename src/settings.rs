//! Match settings
//!
//! Every tunable constant of the match lives here. Settings are built once
//! (defaults or JSON) and passed by reference; nothing mutates them mid-match.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Settings file read failed: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings JSON parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Arena geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    pub goal_width: f32,
    pub goal_height: f32,
    pub basket_radius: f32,
    /// Distance from the side edge to a basket center
    pub basket_inset: f32,
    /// Width of the lava band around the safe zone
    pub lava_margin: f32,
    pub center_zone_width: f32,
    pub center_zone_height: f32,
    pub end_zone_width: f32,
    /// Vertical sway of moving goals
    pub goal_sway_amplitude: f32,
    /// Angular speed of moving goals (radians per second of match time)
    pub goal_sway_speed: f32,
    /// Seconds a safe-zone shrink takes to animate
    pub shrink_duration: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            wall_thickness: 15.0,
            goal_width: 20.0,
            goal_height: 120.0,
            basket_radius: 40.0,
            basket_inset: 100.0,
            lava_margin: 100.0,
            center_zone_width: 200.0,
            center_zone_height: 200.0,
            end_zone_width: 80.0,
            goal_sway_amplitude: 150.0,
            goal_sway_speed: 1.0,
            shrink_duration: 1.0,
        }
    }
}

/// Player movement and push tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub radius: f32,
    pub speed: f32,
    /// Distance from each side edge where players spawn
    pub spawn_inset: f32,
    /// Per-axis scale applied when moving diagonally
    pub diagonal_factor: f32,
    pub push_cooldown: f32,
    pub push_radius: f32,
    /// Speed given to the ball by a push
    pub push_force: f32,
    /// Speed given to a struck rival (deliberately lower than `push_force`)
    pub knockback_force: f32,
    /// Linear decay of knockback velocity (units/s²)
    pub knockback_drag: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            radius: 25.0,
            speed: 220.0,
            spawn_inset: 200.0,
            diagonal_factor: 0.707,
            push_cooldown: 0.8,
            push_radius: 120.0,
            push_force: 600.0,
            knockback_force: 500.0,
            knockback_drag: 2500.0,
        }
    }
}

/// Ball tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    /// Restitution against walls, world bounds and players
    pub bounce: f32,
    /// Linear deceleration (units/s²)
    pub drag: f32,
    pub max_speed: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: 12.0,
            bounce: 0.85,
            drag: 50.0,
            max_speed: 800.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalGoalSettings {
    /// Seconds a pending goal waits before it is confirmed
    pub confirm_window: f32,
    pub goal_points: i32,
    /// Points awarded to the opponent when a player falls off a side
    pub fall_points: i32,
}

impl Default for SurvivalGoalSettings {
    fn default() -> Self {
        Self {
            confirm_window: 3.0,
            goal_points: 1,
            fall_points: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarryDominanceSettings {
    /// Maximum center distance at which a player carries the ball
    pub carry_radius: f32,
    pub carry_speed_factor: f32,
    pub touchdown_points: i32,
    /// Continuous seconds of center occupancy needed to score
    pub control_time: f32,
    pub control_points: i32,
}

impl Default for CarryDominanceSettings {
    fn default() -> Self {
        Self {
            carry_radius: 50.0,
            carry_speed_factor: 0.6,
            touchdown_points: 2,
            control_time: 3.0,
            control_points: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TripleRiskSettings {
    /// Continuous seconds in lava before a penalty
    pub lava_grace: f32,
    pub lava_penalty: i32,
    pub basket_points: i32,
    /// Basket points when the scorer stands outside the safe zone
    pub risky_basket_points: i32,
    pub shrink_interval: f32,
    pub shrink_factor: f32,
    pub max_shrinks: u32,
}

impl Default for TripleRiskSettings {
    fn default() -> Self {
        Self {
            lava_grace: 2.0,
            lava_penalty: 1,
            basket_points: 1,
            risky_basket_points: 3,
            shrink_interval: 15.0,
            shrink_factor: 0.8,
            max_shrinks: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicObjectiveSettings {
    pub goal_points: i32,
    /// Goal points when the scorer's last push struck the rival
    pub strike_bonus_points: i32,
}

impl Default for DynamicObjectiveSettings {
    fn default() -> Self {
        Self {
            goal_points: 1,
            strike_bonus_points: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlledImpactSettings {
    /// Seconds between detonations
    pub fuse: f32,
    pub detonation_penalty: i32,
}

impl Default for ControlledImpactSettings {
    fn default() -> Self {
        Self {
            fuse: 6.0,
            detonation_penalty: 2,
        }
    }
}

/// Mode timing and per-mode rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeSettings {
    /// Seconds each mode runs
    pub duration: f32,
    /// Seconds the rules overlay is shown before a mode starts
    pub intro_duration: f32,
    pub survival_goal: SurvivalGoalSettings,
    pub carry_dominance: CarryDominanceSettings,
    pub triple_risk: TripleRiskSettings,
    pub dynamic_objective: DynamicObjectiveSettings,
    pub controlled_impact: ControlledImpactSettings,
}

impl Default for ModeSettings {
    fn default() -> Self {
        Self {
            duration: 60.0,
            intro_duration: 7.0,
            survival_goal: SurvivalGoalSettings::default(),
            carry_dominance: CarryDominanceSettings::default(),
            triple_risk: TripleRiskSettings::default(),
            dynamic_objective: DynamicObjectiveSettings::default(),
            controlled_impact: ControlledImpactSettings::default(),
        }
    }
}

/// Complete match configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: ArenaSettings,
    pub player: PlayerSettings,
    pub ball: BallSettings,
    pub modes: ModeSettings,
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("arena.width", self.arena.width),
            ("arena.height", self.arena.height),
            ("player.radius", self.player.radius),
            ("player.speed", self.player.speed),
            ("ball.radius", self.ball.radius),
            ("ball.max_speed", self.ball.max_speed),
            ("modes.duration", self.modes.duration),
            ("modes.survival_goal.confirm_window", self.modes.survival_goal.confirm_window),
            ("modes.carry_dominance.control_time", self.modes.carry_dominance.control_time),
            ("modes.triple_risk.lava_grace", self.modes.triple_risk.lava_grace),
            ("modes.triple_risk.shrink_interval", self.modes.triple_risk.shrink_interval),
            ("modes.controlled_impact.fuse", self.modes.controlled_impact.fuse),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if self.modes.intro_duration < 0.0 {
            return Err(SettingsError::Invalid("modes.intro_duration must not be negative".into()));
        }

        let factor = self.modes.triple_risk.shrink_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(SettingsError::Invalid(format!(
                "modes.triple_risk.shrink_factor must be in (0, 1], got {factor}"
            )));
        }

        if 2.0 * self.player.spawn_inset >= self.arena.width {
            return Err(SettingsError::Invalid(
                "player.spawn_inset leaves no room between spawn points".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.modes.duration, 60.0);
        // Ball is pushed harder than a rival is knocked back
        assert!(settings.player.push_force > settings.player.knockback_force);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "modes": { "duration": 30.0 }, "ball": { "max_speed": 500 } }"#)
                .unwrap();
        assert_eq!(settings.modes.duration, 30.0);
        assert_eq!(settings.ball.max_speed, 500.0);
        assert_eq!(settings.ball.radius, 12.0);
        assert_eq!(settings.modes.controlled_impact.fuse, 6.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "modes": { "duration": 0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err =
            Settings::from_json(r#"{ "modes": { "triple_risk": { "shrink_factor": 1.5 } } }"#)
                .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}

//! Simulation tuning constants.
//!
//! Tick interval, walk speed and arrival threshold are physically coupled:
//! an agent moves `walk_speed` percentage units per tick and is considered
//! arrived once closer than `arrival_threshold`, so a speed of two or more
//! thresholds could step over the arrival radius and oscillate. They live
//! together in one struct and are validated together.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning for the behavior engine, motion integrator and sprite animation.
///
/// Every field has a reference default, and `#[serde(default)]` lets a JSON
/// file override only the fields it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed simulation tick, in milliseconds.
    pub tick_interval_ms: u64,
    /// Distance covered per tick, in percentage units.
    pub walk_speed: f32,
    /// Distance below which a walker snaps onto its target.
    pub arrival_threshold: f32,
    /// Per-axis tolerance when matching an arrival point against the POI map.
    pub poi_tolerance: f32,
    /// Chance per tick that a non-walking agent starts an errand.
    pub errand_probability: f32,
    /// On-screen width of one sprite frame, in pixels.
    pub base_frame_width: f32,
    /// Frame advance interval while walking, in milliseconds.
    pub walk_frame_interval_ms: u64,
    /// Frame advance interval during action poses, in milliseconds.
    pub action_frame_interval_ms: u64,
    /// Visible fraction of the frame for agents seated facing down.
    pub sitting_clip_ratio: f32,
    /// Extra scale applied to every drawn agent.
    pub display_scale: f32,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            walk_speed: 1.0,
            arrival_threshold: 1.0,
            poi_tolerance: 1.0,
            errand_probability: 0.005,
            base_frame_width: 220.0,
            walk_frame_interval_ms: 150,
            action_frame_interval_ms: 200,
            sitting_clip_ratio: 0.6,
            display_scale: 1.5,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn walk_frame_interval(&self) -> Duration {
        Duration::from_millis(self.walk_frame_interval_ms)
    }

    pub fn action_frame_interval(&self) -> Duration {
        Duration::from_millis(self.action_frame_interval_ms)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the tuning values can produce a stable simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.walk_frame_interval_ms == 0 || self.action_frame_interval_ms == 0 {
            return Err(ConfigError::Invalid("frame intervals must be positive".into()));
        }
        if !positive(self.walk_speed) {
            return Err(ConfigError::Invalid("walk_speed must be positive".into()));
        }
        if !positive(self.arrival_threshold) || !positive(self.poi_tolerance) {
            return Err(ConfigError::Invalid(
                "arrival_threshold and poi_tolerance must be positive".into(),
            ));
        }
        if self.walk_speed >= 2.0 * self.arrival_threshold {
            return Err(ConfigError::Invalid(format!(
                "walk_speed {} can overshoot arrival_threshold {}",
                self.walk_speed, self.arrival_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.errand_probability) {
            return Err(ConfigError::Invalid(
                "errand_probability must lie in [0, 1]".into(),
            ));
        }
        if !positive(self.base_frame_width) || !positive(self.display_scale) {
            return Err(ConfigError::Invalid(
                "base_frame_width and display_scale must be positive".into(),
            ));
        }
        if !positive(self.sitting_clip_ratio) || self.sitting_clip_ratio > 1.0 {
            return Err(ConfigError::Invalid(
                "sitting_clip_ratio must lie in (0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// Strictly positive and not NaN.
fn positive(v: f32) -> bool {
    v > 0.0
}

/// Errors produced while loading a [`SimConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_reference_values() {
        let c = SimConfig::default();
        assert_eq!(c.tick_interval(), Duration::from_millis(100));
        assert_eq!(c.walk_frame_interval(), Duration::from_millis(150));
        assert_eq!(c.action_frame_interval(), Duration::from_millis(200));
        assert!((c.errand_probability - 0.005).abs() < 1e-9);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_overrides_named_fields() {
        let c = SimConfig::from_json(r#"{"walk_speed": 0.5, "seed": 7}"#).unwrap();
        assert!((c.walk_speed - 0.5).abs() < 1e-6);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.tick_interval_ms, 100);
    }

    #[test]
    fn rejects_overshooting_speed() {
        let c = SimConfig {
            walk_speed: 2.5,
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_bad_probability_and_clip() {
        let c = SimConfig {
            errand_probability: 1.5,
            ..Default::default()
        };
        assert!(c.validate().is_err());

        let c = SimConfig {
            sitting_clip_ratio: 0.0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = SimConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Config parse error"));
    }
}

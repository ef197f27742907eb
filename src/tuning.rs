//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a JSON override can
//! retune a build without touching code. Defaults are the shipped values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Physics and gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration per tick (pixels/tick²)
    pub gravity: f32,
    /// Horizontal velocity multiplier per tick when no direction is held
    pub friction: f32,
    /// Clamp the player to the ground line even when no platform caught them
    pub ground_fallback: bool,

    // === Player ===
    pub player_speed: f32,
    pub player_jump_power: f32,
    pub boosted_speed: f32,
    pub boosted_jump_power: f32,
    /// Duration of speed/jump boosts (ticks)
    pub boost_ticks: u32,
    /// Duration of star power (ticks)
    pub star_ticks: u32,
    /// Grace window after taking a hit (ticks)
    pub grace_ticks: u32,
    /// Upward velocity applied after stomping the boss
    pub stomp_bounce: f32,

    // === Session ===
    pub starting_lives: u8,
    pub max_lives: u8,
    /// Collectibles required to open a level's door
    pub collectibles_needed: u32,

    // === Camera ===
    /// Fraction of the distance to its target the camera covers each tick
    pub camera_smoothing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            friction: 0.85,
            ground_fallback: true,

            player_speed: 5.0,
            player_jump_power: 15.0,
            boosted_speed: 8.0,
            boosted_jump_power: 20.0,
            boost_ticks: 300,
            star_ticks: 600,
            grace_ticks: 120,
            stomp_bounce: 15.0,

            starting_lives: 3,
            max_lives: 9,
            collectibles_needed: 5,

            camera_smoothing: 0.1,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse an override, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// Reject values that would produce NaN or runaway physics
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity),
            ("player_speed", self.player_speed),
            ("player_jump_power", self.player_jump_power),
            ("boosted_speed", self.boosted_speed),
            ("boosted_jump_power", self.boosted_jump_power),
            ("stomp_bounce", self.stomp_bounce),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite and positive",
                });
            }
        }

        let unit = [
            ("friction", self.friction),
            ("camera_smoothing", self.camera_smoothing),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be within 0..=1",
                });
            }
        }

        if self.starting_lives == 0 || self.starting_lives > self.max_lives {
            return Err(TuningError::Invalid {
                field: "starting_lives",
                reason: "must be between 1 and max_lives",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1.2, "max_lives": 5 }"#).unwrap();
        assert_eq!(tuning.gravity, 1.2);
        assert_eq!(tuning.max_lives, 5);
        assert_eq!(tuning.friction, 0.85);
        assert_eq!(tuning.collectibles_needed, 5);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "gravity": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gravity", .. }));

        let err = Tuning::from_json(r#"{ "friction": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "friction", .. }));

        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_fallback_to_default() {
        assert_eq!(Tuning::from_json_or_default("[]"), Tuning::default());
    }
}

//! Data-driven game balance
//!
//! Every gameplay constant is exposed here so a session can be reconfigured
//! from a JSON file without recompiling. Missing fields fall back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while building or loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("lane count must be at least 1")]
    NoLanes,
    #[error("{pool} pool capacity must be non-zero")]
    EmptyPool { pool: &'static str },
    #[error("{name} spawn interval {min}..={max} must be positive and ordered")]
    InvalidInterval {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("cannot reconfigure while a session is in progress")]
    SessionInProgress,
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

/// Inclusive range a spawn threshold is drawn from (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnInterval {
    pub min: f32,
    pub max: f32,
}

impl SpawnInterval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub lane_count: usize,

    // === World speed ===
    pub base_world_speed: f32,
    pub world_speed_ceiling: f32,
    /// Units/s gained per second of raw (undilated) play
    pub speed_ramp_rate: f32,

    // === Spawning ===
    pub obstacle_interval: SpawnInterval,
    pub pickup_interval: SpawnInterval,
    pub obstacle_pool_size: usize,
    pub pickup_pool_size: usize,

    // === Scoring ===
    pub pickup_score: u64,
    pub obstacle_pass_score: u64,

    // === Near-miss / bullet time ===
    pub near_miss_window: f32,
    pub near_miss_gap: f32,
    pub near_miss_cooldown: f32,
    pub bullet_time_hold: f32,
    pub time_scale_min: f32,
    pub time_scale_lerp_speed: f32,

    // === Layout ===
    pub lane_switch_duration: f32,
    pub player_size_ratio: f32,
    pub player_y_ratio: f32,
    pub obstacle_width_ratio: f32,
    pub pickup_size_ratio: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_count: DEFAULT_LANE_COUNT,

            base_world_speed: BASE_WORLD_SPEED,
            world_speed_ceiling: WORLD_SPEED_CEILING,
            speed_ramp_rate: SPEED_RAMP_RATE,

            obstacle_interval: SpawnInterval::new(OBSTACLE_INTERVAL_MIN, OBSTACLE_INTERVAL_MAX),
            pickup_interval: SpawnInterval::new(PICKUP_INTERVAL_MIN, PICKUP_INTERVAL_MAX),
            obstacle_pool_size: OBSTACLE_POOL_SIZE,
            pickup_pool_size: PICKUP_POOL_SIZE,

            pickup_score: PICKUP_SCORE,
            obstacle_pass_score: OBSTACLE_PASS_SCORE,

            near_miss_window: NEAR_MISS_WINDOW,
            near_miss_gap: NEAR_MISS_GAP,
            near_miss_cooldown: NEAR_MISS_COOLDOWN,
            bullet_time_hold: BULLET_TIME_HOLD,
            time_scale_min: TIME_SCALE_MIN,
            time_scale_lerp_speed: TIME_SCALE_LERP_SPEED,

            lane_switch_duration: LANE_SWITCH_DURATION,
            player_size_ratio: PLAYER_SIZE_RATIO,
            player_y_ratio: PLAYER_Y_RATIO,
            obstacle_width_ratio: OBSTACLE_WIDTH_RATIO,
            pickup_size_ratio: PICKUP_SIZE_RATIO,
        }
    }
}

impl Tuning {
    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::NoLanes);
        }
        if self.obstacle_pool_size == 0 {
            return Err(ConfigError::EmptyPool { pool: "obstacle" });
        }
        if self.pickup_pool_size == 0 {
            return Err(ConfigError::EmptyPool { pool: "pickup" });
        }
        for (name, interval) in [
            ("obstacle", self.obstacle_interval),
            ("pickup", self.pickup_interval),
        ] {
            if !interval.is_valid() {
                return Err(ConfigError::InvalidInterval {
                    name,
                    min: interval.min,
                    max: interval.max,
                });
            }
        }
        if !(self.base_world_speed > 0.0) {
            return Err(ConfigError::Invalid("base_world_speed must be positive"));
        }
        if !(self.world_speed_ceiling >= self.base_world_speed) {
            return Err(ConfigError::Invalid(
                "world_speed_ceiling cannot be below base_world_speed",
            ));
        }
        if !(self.speed_ramp_rate >= 0.0) {
            return Err(ConfigError::Invalid("speed_ramp_rate must be non-negative"));
        }
        if !(self.time_scale_min > 0.0 && self.time_scale_min <= 1.0) {
            return Err(ConfigError::Invalid("time_scale_min must be in (0, 1]"));
        }
        if !(self.time_scale_lerp_speed > 0.0) {
            return Err(ConfigError::Invalid("time_scale_lerp_speed must be positive"));
        }
        if !(self.near_miss_window >= 0.0
            && self.near_miss_gap >= 0.0
            && self.near_miss_cooldown >= 0.0
            && self.bullet_time_hold >= 0.0)
        {
            return Err(ConfigError::Invalid("near-miss timings must be non-negative"));
        }
        if !(self.lane_switch_duration >= 0.0) {
            return Err(ConfigError::Invalid("lane_switch_duration must be non-negative"));
        }
        let ratios = [
            self.player_size_ratio,
            self.player_y_ratio,
            self.obstacle_width_ratio,
            self.pickup_size_ratio,
        ];
        if ratios.iter().any(|r| !(*r > 0.0)) {
            return Err(ConfigError::Invalid("layout ratios must be positive"));
        }
        Ok(())
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.lane_count, 3);
        assert_eq!(tuning.obstacle_pool_size, 24);
        assert!((tuning.speed_ramp_rate - 35.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "lane_count": 4, "pickup_score": 25 }"#).unwrap();
        assert_eq!(tuning.lane_count, 4);
        assert_eq!(tuning.pickup_score, 25);
        assert_eq!(tuning.base_world_speed, BASE_WORLD_SPEED);
    }

    #[test]
    fn test_rejects_zero_lanes() {
        let err = Tuning::from_json(r#"{ "lane_count": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoLanes));
    }

    #[test]
    fn test_rejects_empty_pool() {
        let tuning = Tuning {
            pickup_pool_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::EmptyPool { pool: "pickup" })
        ));
    }

    #[test]
    fn test_rejects_inverted_interval() {
        let tuning = Tuning {
            obstacle_interval: SpawnInterval::new(1.5, 1.0),
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidInterval { name: "obstacle", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_time_scale_min() {
        for min in [0.0, -0.5, 1.5, f32::NAN] {
            let tuning = Tuning {
                time_scale_min: min,
                ..Default::default()
            };
            assert!(tuning.validate().is_err(), "min {min} accepted");
        }
    }

    #[test]
    fn test_rejects_ceiling_below_base() {
        let tuning = Tuning {
            world_speed_ceiling: 100.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ lane_count: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

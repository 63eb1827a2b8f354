//! Lane Shift - A lane-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, kinematics, collisions, bullet time)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (lane mode, feedback toggles)
//! - `feedback`: Translates tick events into presentation cues

pub mod feedback;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use feedback::{FeedbackCue, HapticStrength, cues_for};
pub use settings::{LaneMode, Settings};
pub use tuning::{ConfigError, SpawnInterval, Tuning};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Lanes in a fresh session
    pub const DEFAULT_LANE_COUNT: usize = 3;

    /// World scroll speed at session start (units/s)
    pub const BASE_WORLD_SPEED: f32 = 280.0;
    /// World speed never ramps past this
    pub const WORLD_SPEED_CEILING: f32 = 540.0;
    /// Speed gained per second of raw play time
    pub const SPEED_RAMP_RATE: f32 = 0.35 * 100.0;

    /// Obstacle spawn interval bounds (seconds)
    pub const OBSTACLE_INTERVAL_MIN: f32 = 0.9;
    pub const OBSTACLE_INTERVAL_MAX: f32 = 1.2;
    /// Pickup spawn interval bounds (seconds)
    pub const PICKUP_INTERVAL_MIN: f32 = 0.6;
    pub const PICKUP_INTERVAL_MAX: f32 = 0.9;

    /// Points per collected pickup
    pub const PICKUP_SCORE: u64 = 10;
    /// Points per obstacle that leaves the bottom of the world
    pub const OBSTACLE_PASS_SCORE: u64 = 1;

    /// A lane change this recent (seconds) makes near-misses eligible
    pub const NEAR_MISS_WINDOW: f32 = 0.35;
    /// Max vertical gap between player and obstacle for a near-miss
    pub const NEAR_MISS_GAP: f32 = 6.0;
    /// Time after a near-miss before another may trigger
    pub const NEAR_MISS_COOLDOWN: f32 = 0.45;
    /// How long bullet time holds the slowed target
    pub const BULLET_TIME_HOLD: f32 = 0.55;

    /// Slowest time scale reached during bullet time
    pub const TIME_SCALE_MIN: f32 = 0.35;
    /// Exponential ease rate toward the target time scale
    pub const TIME_SCALE_LERP_SPEED: f32 = 8.0;

    /// Entity pool capacities
    pub const OBSTACLE_POOL_SIZE: usize = 24;
    pub const PICKUP_POOL_SIZE: usize = 24;

    /// Player lateral slide duration (seconds)
    pub const LANE_SWITCH_DURATION: f32 = 0.12;
    /// Player side as a fraction of world width
    pub const PLAYER_SIZE_RATIO: f32 = 0.12;
    /// Player centre y as a fraction of world height
    pub const PLAYER_Y_RATIO: f32 = 0.78;
    /// Obstacle width as a fraction of lane width
    pub const OBSTACLE_WIDTH_RATIO: f32 = 0.8;
    /// Pickup side as a fraction of player side
    pub const PICKUP_SIZE_RATIO: f32 = 0.55;

    /// Bullet overlay alpha at full dilation
    pub const BULLET_OVERLAY_MAX_ALPHA: f32 = 0.35;
}

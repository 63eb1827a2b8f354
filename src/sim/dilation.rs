//! Bullet time
//!
//! A single eased scalar scales every entity's displacement. A near-miss pulls
//! the target down to `min_scale` for a fixed hold, then releases it back to
//! 1.0; the eased value glides between the two.

use serde::{Deserialize, Serialize};

use crate::consts::BULLET_OVERLAY_MAX_ALPHA;
use crate::tuning::Tuning;

/// Time-dilation controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeDilation {
    /// Current (eased) time scale
    scale: f32,
    /// Value `scale` eases toward
    target: f32,
    /// Whether the slowed target is being held
    active: bool,
    hold_remaining: f32,
    cooldown_remaining: f32,

    min_scale: f32,
    lerp_speed: f32,
    hold: f32,
    cooldown: f32,
}

impl TimeDilation {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            scale: 1.0,
            target: 1.0,
            active: false,
            hold_remaining: 0.0,
            cooldown_remaining: 0.0,
            min_scale: tuning.time_scale_min,
            lerp_speed: tuning.time_scale_lerp_speed,
            hold: tuning.bullet_time_hold,
            cooldown: tuning.near_miss_cooldown,
        }
    }

    /// Back to normal speed with no hold or cooldown pending
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.target = 1.0;
        self.active = false;
        self.hold_remaining = 0.0;
        self.cooldown_remaining = 0.0;
    }

    /// Ease toward the target and run down the hold and cooldown timers
    pub fn advance(&mut self, dt: f32) {
        let factor = (self.lerp_speed * dt).min(1.0);
        self.scale = (self.scale + (self.target - self.scale) * factor).clamp(self.min_scale, 1.0);

        if self.active {
            self.hold_remaining -= dt;
            if self.hold_remaining <= 0.0 {
                self.active = false;
                self.hold_remaining = 0.0;
                self.target = 1.0;
                log::debug!("Bullet time released");
            }
        }

        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining -= dt;
        }
    }

    /// Whether a near-miss may trigger right now
    pub fn ready(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    /// Start bullet time: slow target, hold timer and cooldown
    pub fn trigger(&mut self) {
        self.active = true;
        self.hold_remaining = self.hold;
        self.target = self.min_scale;
        self.cooldown_remaining = self.cooldown;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining.max(0.0)
    }

    /// 0 at normal speed, 1 at the slowest scale
    pub fn intensity(&self) -> f32 {
        let range = 1.0 - self.min_scale;
        if range <= f32::EPSILON {
            return 0.0;
        }
        let clamped = self.scale.clamp(self.min_scale, 1.0);
        (1.0 - (clamped - self.min_scale) / range).clamp(0.0, 1.0)
    }

    /// Alpha for the darkening overlay drawn during bullet time
    pub fn overlay_alpha(&self) -> f32 {
        (BULLET_OVERLAY_MAX_ALPHA * self.intensity()).clamp(0.0, BULLET_OVERLAY_MAX_ALPHA)
    }
}

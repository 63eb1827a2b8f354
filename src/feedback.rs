//! Presentation cues for tick events
//!
//! The simulation only reports what happened; this maps those events to the
//! haptic pulses, shakes and flashes the host should play, filtered through
//! the player's [`Settings`].

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{GameEvent, TickResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HapticStrength {
    Light,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeedbackCue {
    Haptic(HapticStrength),
    /// Jitter the view by up to `intensity` units for `duration` seconds
    ScreenShake { intensity: f32, duration: f32 },
    /// Pulse the player token
    FlashPlayer,
}

const NEAR_MISS_SHAKE: FeedbackCue = FeedbackCue::ScreenShake {
    intensity: 2.0,
    duration: 0.18,
};

/// Cues to play for one tick
pub fn cues_for(result: &TickResult, settings: &Settings) -> Vec<FeedbackCue> {
    let mut cues = Vec::new();
    for event in result.events() {
        match event {
            GameEvent::PickupCollected => {
                if settings.haptics {
                    cues.push(FeedbackCue::Haptic(HapticStrength::Light));
                }
                if settings.effective_flash() {
                    cues.push(FeedbackCue::FlashPlayer);
                }
            }
            GameEvent::NearMiss { .. } => {
                if settings.haptics {
                    cues.push(FeedbackCue::Haptic(HapticStrength::Medium));
                }
                if settings.effective_screen_shake() {
                    cues.push(NEAR_MISS_SHAKE);
                }
                if settings.effective_flash() {
                    cues.push(FeedbackCue::FlashPlayer);
                }
            }
            GameEvent::ObstaclesPassed { .. } | GameEvent::Collision { .. } => {}
        }
    }
    cues
}

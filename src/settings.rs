//! Game settings and preferences
//!
//! Chosen on the menu screen and persisted by the host as JSON.

use serde::{Deserialize, Serialize};

/// Lane layouts offered on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LaneMode {
    #[default]
    Three,
    Four,
}

impl LaneMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaneMode::Three => "3 lanes",
            LaneMode::Four => "4 lanes",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "3" | "three" | "3 lanes" => Some(LaneMode::Three),
            "4" | "four" | "4 lanes" => Some(LaneMode::Four),
            _ => None,
        }
    }

    pub fn lane_count(&self) -> usize {
        match self {
            LaneMode::Three => 3,
            LaneMode::Four => 4,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lane_mode: LaneMode,

    // === Feedback ===
    /// Haptic pulses on pickups and near-misses
    pub haptics: bool,
    /// Screen shake on near-misses
    pub screen_shake: bool,
    /// Player flash on pickups and near-misses
    pub flash: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lane_mode: LaneMode::Three,

            // Feedback - all on by default
            haptics: true,
            screen_shake: true,
            flash: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective flash (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.flash && !self.reduced_motion
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_mode_parsing() {
        assert_eq!(LaneMode::from_str("3"), Some(LaneMode::Three));
        assert_eq!(LaneMode::from_str(" Four "), Some(LaneMode::Four));
        assert_eq!(LaneMode::from_str("4 lanes"), Some(LaneMode::Four));
        assert_eq!(LaneMode::from_str("5"), None);
        assert_eq!(LaneMode::Four.lane_count(), 4);
        assert_eq!(LaneMode::default().as_str(), "3 lanes");
    }

    #[test]
    fn test_reduced_motion_overrides() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
        assert!(!settings.effective_flash());
        assert!(settings.haptics);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{ "lane_mode": "Four", "haptics": false }"#).unwrap();
        assert_eq!(settings.lane_mode, LaneMode::Four);
        assert!(!settings.haptics);
        assert!(settings.screen_shake);

        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}

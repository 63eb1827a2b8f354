//! Lane geometry
//!
//! The world is split into `lane_count` equal vertical strips. Entities and
//! the player sit on strip centres.

use serde::{Deserialize, Serialize};

use crate::tuning::ConfigError;

/// Ordered lane centre x-coordinates for one world width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSet {
    centers: Vec<f32>,
    lane_width: f32,
}

impl LaneSet {
    /// Compute lane centres for a world width
    ///
    /// Centre `i` is `i * lane_width + lane_width / 2`.
    pub fn compute(world_width: f32, lane_count: usize) -> Result<Self, ConfigError> {
        if lane_count == 0 {
            return Err(ConfigError::NoLanes);
        }
        let lane_width = world_width / lane_count as f32;
        let centers = (0..lane_count)
            .map(|i| i as f32 * lane_width + lane_width / 2.0)
            .collect();
        Ok(Self {
            centers,
            lane_width,
        })
    }

    /// Lane a fresh session starts in (left-middle for even counts)
    pub fn start_lane(&self) -> usize {
        (self.centers.len() / 2).min(self.centers.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    pub fn lane_width(&self) -> f32 {
        self.lane_width
    }

    pub fn centers(&self) -> &[f32] {
        &self.centers
    }

    /// Centre x of a lane, `None` if out of range
    pub fn center(&self, lane: usize) -> Option<f32> {
        self.centers.get(lane).copied()
    }

    /// Apply a signed lane step, `None` if it would leave the lane set
    pub fn step(&self, lane: usize, delta: i32) -> Option<usize> {
        let next = lane.checked_add_signed(delta as isize)?;
        (next < self.centers.len()).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_lanes() {
        let lanes = LaneSet::compute(300.0, 3).unwrap();
        assert_eq!(lanes.centers(), &[50.0, 150.0, 250.0]);
        assert_eq!(lanes.lane_width(), 100.0);
        assert_eq!(lanes.start_lane(), 1);
    }

    #[test]
    fn test_four_lanes_start_left_of_middle() {
        let lanes = LaneSet::compute(400.0, 4).unwrap();
        assert_eq!(lanes.centers(), &[50.0, 150.0, 250.0, 350.0]);
        assert_eq!(lanes.start_lane(), 2);
    }

    #[test]
    fn test_single_lane() {
        let lanes = LaneSet::compute(90.0, 1).unwrap();
        assert_eq!(lanes.centers(), &[45.0]);
        assert_eq!(lanes.start_lane(), 0);
    }

    #[test]
    fn test_zero_lanes_rejected() {
        assert!(matches!(LaneSet::compute(300.0, 0), Err(ConfigError::NoLanes)));
    }

    #[test]
    fn test_step_bounds() {
        let lanes = LaneSet::compute(300.0, 3).unwrap();
        assert_eq!(lanes.step(1, -1), Some(0));
        assert_eq!(lanes.step(1, 1), Some(2));
        assert_eq!(lanes.step(0, -1), None);
        assert_eq!(lanes.step(2, 1), None);
    }
}

//! Collision and near-miss detection
//!
//! Fatal collisions are plain rectangle overlaps. A near-miss is stricter: the
//! obstacle must sit in a lane directly beside the player, must not overlap,
//! and must pass within a small vertical gap of the player's box.

use super::pool::{Pool, SlotId};
use super::rect::Rect;
use super::state::{Layout, Obstacle};

/// First active obstacle overlapping the player, in slot order
pub fn find_collision(player: &Rect, obstacles: &Pool<Obstacle>, layout: &Layout) -> Option<SlotId> {
    obstacles
        .iter_active()
        .find(|(_, ob)| player.intersects(&layout.obstacle_rect(ob)))
        .map(|(id, _)| id)
}

/// Inputs to a near-miss scan
#[derive(Debug, Clone, Copy)]
pub struct NearMissProbe {
    pub player_rect: Rect,
    pub player_lane: usize,
    /// Largest vertical gap that still counts
    pub gap_threshold: f32,
}

impl NearMissProbe {
    /// Whether one obstacle box qualifies as a near-miss
    pub fn qualifies(&self, obstacle_lane: usize, obstacle_rect: &Rect) -> bool {
        if self.player_lane.abs_diff(obstacle_lane) != 1 {
            return false;
        }
        if self.player_rect.intersects(obstacle_rect) {
            return false;
        }
        let gap = self.player_rect.vertical_gap(obstacle_rect);
        (0.0..=self.gap_threshold).contains(&gap)
    }
}

/// Tag and return the first untagged obstacle that qualifies, in slot order
///
/// At most one obstacle is tagged per call.
pub fn tag_near_miss(
    probe: &NearMissProbe,
    obstacles: &mut Pool<Obstacle>,
    layout: &Layout,
) -> Option<SlotId> {
    let (id, ob) = obstacles
        .iter_active_mut()
        .filter(|(_, ob)| !ob.near_miss_tagged)
        .find(|(_, ob)| probe.qualifies(ob.lane, &layout.obstacle_rect(ob)))?;
    ob.near_miss_tagged = true;
    Some(id)
}

//! Demo mode - a simple AI that plays the game
//!
//! Looks a short distance up each lane and steps away from the nearest
//! threat. Deterministic: same state, same decision.

use super::state::{GameState, LaneDirection};

/// Seconds of travel the autopilot looks ahead
const LOOKAHEAD_SECS: f32 = 0.6;

/// Pick a lane step for this frame, if one is needed
pub fn choose_lane_change(state: &GameState) -> Option<LaneDirection> {
    let layout = state.layout()?;
    let player = state.player_rect()?;
    let reach = state.world_speed * LOOKAHEAD_SECS;

    // Vertical distance to the closest obstacle heading into the player's row
    let threat = |lane: usize| -> Option<f32> {
        state
            .obstacles
            .iter_active()
            .filter(|(_, ob)| ob.lane == lane)
            .map(|(_, ob)| layout.obstacle_rect(ob))
            .filter(|r| r.top() < player.bottom() && r.bottom() > player.top() - reach)
            .map(|r| (player.top() - r.bottom()).max(0.0))
            .reduce(f32::min)
    };

    let current = state.player.lane;
    let pickup_ahead = |lane: usize| {
        state
            .pickups
            .iter_active()
            .any(|(_, pk)| pk.lane == lane && pk.pos.y < player.bottom())
    };

    let options = [LaneDirection::Left, LaneDirection::Right]
        .into_iter()
        .filter_map(|dir| layout.lanes.step(current, dir.delta()).map(|lane| (dir, lane)));

    if threat(current).is_none() {
        // Safe: drift toward a pickup in a clear neighbouring lane
        if pickup_ahead(current) {
            return None;
        }
        return options
            .filter(|&(_, lane)| threat(lane).is_none() && pickup_ahead(lane))
            .map(|(dir, _)| dir)
            .next();
    }

    // Prefer a clear lane, otherwise the lane whose threat is furthest away
    options
        .map(|(dir, lane)| (dir, threat(lane).unwrap_or(f32::INFINITY)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .filter(|&(_, distance)| distance > threat(current).unwrap_or(0.0))
        .map(|(dir, _)| dir)
}

//! Per-frame simulation step
//!
//! Core game loop that advances one rendered frame of variable length. The
//! step order is fixed: time scale, parallax, obstacles, pickups, collision,
//! near-miss, spawning, difficulty ramp. A collision ends the step early.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{NearMissProbe, find_collision, tag_near_miss};
use super::pool::SlotId;
use super::state::{GamePhase, GameState};

/// Discrete things that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Obstacles that left the bottom of the world
    ObstaclesPassed { count: u32 },
    PickupCollected,
    NearMiss { obstacle: SlotId },
    Collision { obstacle: SlotId },
}

/// Outcome of one tick, for the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    pub score: u64,
    pub phase: GamePhase,
    pub obstacles_passed: u32,
    pub pickups_collected: u32,
    pub near_miss: Option<SlotId>,
    pub collision: Option<SlotId>,
}

impl TickResult {
    fn idle(state: &GameState) -> Self {
        Self {
            score: state.score,
            phase: state.phase,
            ..Default::default()
        }
    }

    /// Events in the order they were resolved
    pub fn events(self) -> impl Iterator<Item = GameEvent> {
        let passed = (self.obstacles_passed > 0).then_some(GameEvent::ObstaclesPassed {
            count: self.obstacles_passed,
        });
        let pickups = std::iter::repeat_n(GameEvent::PickupCollected, self.pickups_collected as usize);
        let collision = self
            .collision
            .map(|obstacle| GameEvent::Collision { obstacle });
        let near_miss = self.near_miss.map(|obstacle| GameEvent::NearMiss { obstacle });
        passed
            .into_iter()
            .chain(pickups)
            .chain(collision)
            .chain(near_miss)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Non-finite and negative deltas integrate as zero; positive ones pass through
fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}

/// Advance the session by one frame of `dt` seconds
///
/// Does nothing unless the session is running.
pub fn tick(state: &mut GameState, dt: f32) -> TickResult {
    let mut result = TickResult::idle(state);
    if state.phase != GamePhase::Running {
        return result;
    }

    let dt = sanitize_delta(dt);
    state.elapsed += dt;
    state.player.advance(dt);

    // Time scale eases first; everything that moves uses the eased value
    state.dilation.advance(dt);
    let scaled_dt = dt * state.dilation.scale();
    let step = state.world_speed * scaled_dt;

    if let Some(layout) = state.layout.as_ref() {
        state
            .parallax
            .advance(state.world_speed, scaled_dt, layout.world.height);

        // Obstacles: move, retire past the bottom, score each pass
        let passed = state.obstacles.release_if(|ob| {
            ob.pos.y += step;
            layout.is_below_world(ob.pos, layout.obstacle_size)
        });
        if passed > 0 {
            state.score += u64::from(passed) * state.tuning.obstacle_pass_score;
            result.obstacles_passed = passed;
        }

        // Pickups: move, collect on overlap, otherwise retire past the bottom
        let player_rect = layout.player_rect(&state.player);
        let mut collected = 0u32;
        state.pickups.release_if(|pk| {
            pk.pos.y += step;
            if player_rect.intersects(&layout.pickup_rect(pk)) {
                collected += 1;
                return true;
            }
            layout.is_below_world(pk.pos, layout.pickup_size)
        });
        if collected > 0 {
            state.score += u64::from(collected) * state.tuning.pickup_score;
            result.pickups_collected = collected;
        }

        // Fatal collision ends the tick here
        if let Some(id) = find_collision(&player_rect, &state.obstacles, layout) {
            state.phase = GamePhase::GameOver;
            result.collision = Some(id);
            result.score = state.score;
            result.phase = state.phase;
            log::info!(
                "Game over: score {} after {:.2}s (speed {:.0})",
                state.score,
                state.elapsed,
                state.world_speed
            );
            return result;
        }

        if state.dilation.ready() && state.near_miss_eligible() {
            let probe = NearMissProbe {
                player_rect,
                player_lane: state.player.lane,
                gap_threshold: state.tuning.near_miss_gap,
            };
            if let Some(id) = tag_near_miss(&probe, &mut state.obstacles, layout) {
                state.dilation.trigger();
                result.near_miss = Some(id);
                log::debug!("Near miss on obstacle {:?}, bullet time", id);
            }
        }
    }

    // Spawn timers run on raw time
    let due = state.spawner.advance(dt, &mut state.rng);
    if due.obstacle {
        spawn_obstacle(state);
    }
    if due.pickup {
        spawn_pickup(state);
    }

    // Difficulty ramp ignores dilation
    state.world_speed = (state.world_speed + state.tuning.speed_ramp_rate * dt)
        .min(state.tuning.world_speed_ceiling);

    result.score = state.score;
    result.phase = state.phase;
    result
}

/// Activate one obstacle in a random lane just above the world
fn spawn_obstacle(state: &mut GameState) -> Option<SlotId> {
    let layout = state.layout.as_ref()?;
    let y = -layout.obstacle_size.y;
    let lane = state.rng.random_range(0..layout.lanes.len());
    let id = state.place_obstacle(lane, y);
    if id.is_none() {
        log::trace!("Obstacle pool exhausted, spawn dropped");
    }
    id
}

/// Activate one pickup in a random lane just above the world
fn spawn_pickup(state: &mut GameState) -> Option<SlotId> {
    let layout = state.layout.as_ref()?;
    let y = -layout.pickup_size.y;
    let lane = state.rng.random_range(0..layout.lanes.len());
    let id = state.place_pickup(lane, y);
    if id.is_none() {
        log::trace!("Pickup pool exhausted, spawn dropped");
    }
    id
}

impl GameState {
    /// Advance one frame; see [`tick`]
    pub fn update(&mut self, dt: f32) -> TickResult {
        tick(self, dt)
    }
}

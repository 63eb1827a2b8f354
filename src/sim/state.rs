//! Game state and core simulation types
//!
//! All session state lives in [`GameState`]; the presentation layer reads it
//! and drives it through the session commands (start/pause/resume/lane change).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::dilation::TimeDilation;
use super::lanes::LaneSet;
use super::parallax::Parallax;
use super::pool::{Pool, Poolable, SlotId};
use super::rect::Rect;
use super::spawner::Spawner;
use crate::tuning::{ConfigError, Tuning};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start
    #[default]
    Ready,
    /// Active gameplay
    Running,
    /// Simulation frozen
    Paused,
    /// Run ended; only `start` leaves this phase
    GameOver,
}

/// Requested lane step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneDirection {
    Left,
    Right,
}

impl LaneDirection {
    pub fn delta(self) -> i32 {
        match self {
            LaneDirection::Left => -1,
            LaneDirection::Right => 1,
        }
    }
}

/// A descending obstacle (pool element)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Obstacle {
    pub active: bool,
    pub lane: usize,
    /// Centre position
    pub pos: Vec2,
    /// Set once a near-miss has been reported for this activation
    pub near_miss_tagged: bool,
}

impl Obstacle {
    pub fn activate(&mut self, lane: usize, pos: Vec2) {
        self.active = true;
        self.lane = lane;
        self.pos = pos;
        self.near_miss_tagged = false;
    }
}

impl Poolable for Obstacle {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// A collectible pickup (pool element)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pickup {
    pub active: bool,
    pub lane: usize,
    /// Centre position
    pub pos: Vec2,
}

impl Pickup {
    pub fn activate(&mut self, lane: usize, pos: Vec2) {
        self.active = true;
        self.lane = lane;
        self.pos = pos;
    }
}

impl Poolable for Pickup {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Lateral slide between lane centres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct LaneSlide {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

/// The player token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    /// Logical lane; changes instantly on a lane change
    pub lane: usize,
    /// Visual x; trails the lane centre while sliding
    pub x: f32,
    /// Centre y (fixed for a layout)
    pub y: f32,
    /// Side length of the square bounding box
    pub size: f32,
    slide: Option<LaneSlide>,
}

impl Player {
    /// Snap to a position with no slide in flight
    pub fn place(&mut self, lane: usize, x: f32, y: f32, size: f32) {
        self.lane = lane;
        self.x = x;
        self.y = y;
        self.size = size;
        self.slide = None;
    }

    /// Start sliding the visual x toward `target_x`
    pub fn slide_to(&mut self, target_x: f32, duration: f32) {
        if duration <= 0.0 {
            self.x = target_x;
            self.slide = None;
            return;
        }
        self.slide = Some(LaneSlide {
            from: self.x,
            to: target_x,
            elapsed: 0.0,
            duration,
        });
    }

    /// Advance the slide by wall time (ease-out, settles without overshoot)
    pub fn advance(&mut self, dt: f32) {
        let Some(slide) = self.slide.as_mut() else {
            return;
        };
        slide.elapsed += dt;
        let t = (slide.elapsed / slide.duration).clamp(0.0, 1.0);
        let eased = 1.0 - (1.0 - t).powi(3);
        self.x = slide.from + (slide.to - slide.from) * eased;
        if t >= 1.0 {
            self.x = slide.to;
            self.slide = None;
        }
    }

    pub fn is_sliding(&self) -> bool {
        self.slide.is_some()
    }
}

/// World dimensions supplied by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

/// Geometry derived from the world size and lane count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub world: WorldSize,
    pub lanes: LaneSet,
    pub player_side: f32,
    pub player_y: f32,
    pub obstacle_size: Vec2,
    pub pickup_size: Vec2,
}

impl Layout {
    pub fn new(world: WorldSize, lane_count: usize, tuning: &Tuning) -> Result<Self, ConfigError> {
        let lanes = LaneSet::compute(world.width, lane_count)?;
        let player_side = world.width * tuning.player_size_ratio;
        Ok(Self {
            player_y: world.height * tuning.player_y_ratio,
            obstacle_size: Vec2::new(lanes.lane_width() * tuning.obstacle_width_ratio, player_side),
            pickup_size: Vec2::splat(player_side * tuning.pickup_size_ratio),
            world,
            lanes,
            player_side,
        })
    }

    /// Collision box of the player at its logical lane
    pub fn player_rect(&self, player: &Player) -> Rect {
        let x = self.lanes.center(player.lane).unwrap_or(player.x);
        Rect::from_center(Vec2::new(x, player.y), Vec2::splat(player.size))
    }

    pub fn obstacle_rect(&self, obstacle: &Obstacle) -> Rect {
        Rect::from_center(obstacle.pos, self.obstacle_size)
    }

    pub fn pickup_rect(&self, pickup: &Pickup) -> Rect {
        Rect::from_center(pickup.pos, self.pickup_size)
    }

    /// Whether a centred box has fully left through the bottom of the world
    pub fn is_below_world(&self, pos: Vec2, size: Vec2) -> bool {
        pos.y - size.y / 2.0 > self.world.height
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) tuning: Tuning,
    pub(crate) world: Option<WorldSize>,
    pub(crate) layout: Option<Layout>,

    pub phase: GamePhase,
    pub score: u64,
    /// Scroll speed before time dilation (units/s)
    pub world_speed: f32,
    /// Raw seconds simulated this session
    pub elapsed: f32,
    /// Session clock at the last accepted lane change
    pub last_lane_change_at: Option<f32>,

    pub player: Player,
    pub obstacles: Pool<Obstacle>,
    pub pickups: Pool<Pickup>,
    pub dilation: TimeDilation,
    pub spawner: Spawner,
    pub parallax: Parallax,
}

impl GameState {
    /// Validate the tuning and prewarm both pools
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        log::info!(
            "Game initialized with seed {} ({} lanes, pools {}/{})",
            seed,
            tuning.lane_count,
            tuning.obstacle_pool_size,
            tuning.pickup_pool_size
        );
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            world: None,
            layout: None,
            phase: GamePhase::Ready,
            score: 0,
            world_speed: tuning.base_world_speed,
            elapsed: 0.0,
            last_lane_change_at: None,
            player: Player::default(),
            obstacles: Pool::new(tuning.obstacle_pool_size),
            pickups: Pool::new(tuning.pickup_pool_size),
            dilation: TimeDilation::new(&tuning),
            spawner: Spawner::new(&tuning),
            parallax: Parallax::default(),
            tuning,
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Geometry, once the world size is known
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn lane_count(&self) -> usize {
        self.tuning.lane_count
    }

    /// Change the lane count; only allowed outside a session
    pub fn configure(&mut self, lane_count: usize) -> Result<(), ConfigError> {
        if matches!(self.phase, GamePhase::Running | GamePhase::Paused) {
            return Err(ConfigError::SessionInProgress);
        }
        if lane_count == 0 {
            return Err(ConfigError::NoLanes);
        }
        self.tuning.lane_count = lane_count;
        self.relayout()?;
        log::info!("Configured {} lanes", lane_count);
        Ok(())
    }

    /// Supply the world size; recomputes lanes and re-places everything
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(ConfigError::Invalid("world size must be positive and finite"));
        }
        self.world = Some(WorldSize { width, height });
        self.relayout()
    }

    /// Rebuild the layout and snap the player and entities onto it
    fn relayout(&mut self) -> Result<(), ConfigError> {
        let Some(world) = self.world else {
            self.layout = None;
            return Ok(());
        };
        let layout = Layout::new(world, self.tuning.lane_count, &self.tuning)?;

        let lane = layout.lanes.start_lane();
        let x = layout.lanes.center(lane).unwrap_or(world.width / 2.0);
        self.player.place(lane, x, layout.player_y, layout.player_side);

        let last = layout.lanes.len() - 1;
        for (_, ob) in self.obstacles.iter_active_mut() {
            ob.lane = ob.lane.min(last);
            ob.pos.x = layout.lanes.center(ob.lane).unwrap_or(ob.pos.x);
        }
        for (_, pk) in self.pickups.iter_active_mut() {
            pk.lane = pk.lane.min(last);
            pk.pos.x = layout.lanes.center(pk.lane).unwrap_or(pk.pos.x);
        }

        self.layout = Some(layout);
        Ok(())
    }

    /// Reset every piece of session state and begin running
    ///
    /// Also serves as restart from any phase.
    pub fn start(&mut self) {
        self.score = 0;
        self.world_speed = self.tuning.base_world_speed;
        self.elapsed = 0.0;
        self.last_lane_change_at = None;
        self.dilation.reset();
        self.obstacles.release_all();
        self.pickups.release_all();
        self.spawner.reset(&mut self.rng);
        self.parallax.reset();
        if let Err(e) = self.relayout() {
            log::warn!("Layout failed on start: {}", e);
            self.layout = None;
        }
        self.phase = GamePhase::Running;
        log::info!("Session started (seed {})", self.seed);
    }

    /// RUNNING -> PAUSED; returns whether the phase changed
    pub fn pause(&mut self) -> bool {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            true
        } else {
            false
        }
    }

    /// PAUSED -> RUNNING; returns whether the phase changed
    pub fn resume(&mut self) -> bool {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            true
        } else {
            false
        }
    }

    /// Move one lane left or right
    ///
    /// Ignored (returns false) unless running with a layout and the target
    /// lane exists. The logical lane changes immediately; only the visual x
    /// slides.
    pub fn request_lane_change(&mut self, direction: LaneDirection) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let Some(layout) = self.layout.as_ref() else {
            return false;
        };
        let Some(next) = layout.lanes.step(self.player.lane, direction.delta()) else {
            return false;
        };
        let Some(target_x) = layout.lanes.center(next) else {
            return false;
        };

        self.player.lane = next;
        self.last_lane_change_at = Some(self.elapsed);
        self.player.slide_to(target_x, self.tuning.lane_switch_duration);
        true
    }

    /// Activate an obstacle centred in `lane` at height `y`
    ///
    /// `None` without a layout, for an unknown lane, or when the pool is full.
    pub fn place_obstacle(&mut self, lane: usize, y: f32) -> Option<SlotId> {
        let x = self.layout.as_ref()?.lanes.center(lane)?;
        let id = self.obstacles.acquire()?;
        self.obstacles[id].activate(lane, Vec2::new(x, y));
        Some(id)
    }

    /// Activate a pickup centred in `lane` at height `y`
    pub fn place_pickup(&mut self, lane: usize, y: f32) -> Option<SlotId> {
        let x = self.layout.as_ref()?.lanes.center(lane)?;
        let id = self.pickups.acquire()?;
        self.pickups[id].activate(lane, Vec2::new(x, y));
        Some(id)
    }

    /// Player collision box, once laid out
    pub fn player_rect(&self) -> Option<Rect> {
        self.layout.as_ref().map(|l| l.player_rect(&self.player))
    }

    /// Whether the last lane change is recent enough for a near-miss
    pub fn near_miss_eligible(&self) -> bool {
        self.last_lane_change_at
            .is_some_and(|at| self.elapsed - at <= self.tuning.near_miss_window)
    }
}

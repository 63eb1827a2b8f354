//! Read-only view of the simulation for rendering

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::SlotId;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Pickup,
}

/// One active entity, keyed by its stable slot so renderers can reuse visuals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub slot: SlotId,
    pub lane: usize,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub lane: usize,
    /// Visual centre (x trails the lane centre during a slide)
    pub pos: Vec2,
    pub size: f32,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub world_speed: f32,
    pub time_scale: f32,
    /// 0 at normal speed, 1 at full bullet time
    pub dilation_intensity: f32,
    pub overlay_alpha: f32,
    pub parallax_offsets: [f32; 3],
    /// `None` until the world has been sized
    pub player: Option<PlayerView>,
    pub entities: Vec<EntityView>,
}

impl GameState {
    /// Active obstacles then active pickups, each in slot order
    pub fn entities(&self) -> impl Iterator<Item = EntityView> + '_ {
        let layout = self.layout.as_ref();
        let obstacles = layout.into_iter().flat_map(move |layout| {
            self.obstacles.iter_active().map(move |(slot, ob)| EntityView {
                kind: EntityKind::Obstacle,
                slot,
                lane: ob.lane,
                pos: ob.pos,
                size: layout.obstacle_size,
            })
        });
        let pickups = layout.into_iter().flat_map(move |layout| {
            self.pickups.iter_active().map(move |(slot, pk)| EntityView {
                kind: EntityKind::Pickup,
                slot,
                lane: pk.lane,
                pos: pk.pos,
                size: layout.pickup_size,
            })
        });
        obstacles.chain(pickups)
    }

    pub fn player_view(&self) -> Option<PlayerView> {
        self.layout.as_ref().map(|_| PlayerView {
            lane: self.player.lane,
            pos: Vec2::new(self.player.x, self.player.y),
            size: self.player.size,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            world_speed: self.world_speed,
            time_scale: self.dilation.scale(),
            dilation_intensity: self.dilation.intensity(),
            overlay_alpha: self.dilation.overlay_alpha(),
            parallax_offsets: self.parallax.offsets,
            player: self.player_view(),
            entities: self.entities().collect(),
        }
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Fixed-capacity pools, no allocation while running
//! - Stable iteration order (by slot id)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod dilation;
pub mod lanes;
pub mod parallax;
pub mod pool;
pub mod rect;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::choose_lane_change;
pub use collision::{NearMissProbe, find_collision, tag_near_miss};
pub use dilation::TimeDilation;
pub use lanes::LaneSet;
pub use parallax::{PARALLAX_MULTIPLIERS, Parallax};
pub use pool::{Pool, Poolable, SlotId};
pub use rect::Rect;
pub use snapshot::{EntityKind, EntityView, PlayerView, Snapshot};
pub use spawner::{SpawnDue, SpawnTimer, Spawner};
pub use state::{
    GamePhase, GameState, LaneDirection, Layout, Obstacle, Pickup, Player, WorldSize,
};
pub use tick::{GameEvent, TickResult, tick};

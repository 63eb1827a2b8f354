//! Background parallax scroll
//!
//! Three layers scroll at fractions of the world speed and wrap at the world
//! height. Only the offsets live here; drawing the tiles is up to the renderer.

use serde::{Deserialize, Serialize};

/// Speed multipliers, far to near
pub const PARALLAX_MULTIPLIERS: [f32; 3] = [0.30, 0.60, 0.95];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parallax {
    /// Vertical offset of each layer, in `[0, height)`
    pub offsets: [f32; 3],
}

impl Parallax {
    pub fn reset(&mut self) {
        self.offsets = [0.0; 3];
    }

    /// Scroll every layer by `world_speed * multiplier * scaled_dt`
    pub fn advance(&mut self, world_speed: f32, scaled_dt: f32, height: f32) {
        if height <= 1.0 {
            return;
        }
        for (offset, mult) in self.offsets.iter_mut().zip(PARALLAX_MULTIPLIERS) {
            *offset = (*offset + world_speed * mult * scaled_dt).rem_euclid(height);
        }
    }
}

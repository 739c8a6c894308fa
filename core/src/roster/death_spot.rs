//! Fading markers where blobs collapsed.

use serde::Serialize;

use crate::world::Tile;

/// Ticks a blob death marker stays on screen
pub const BLOB_DEATH_SPOT_TICKS: i32 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct BlobDeathSpot {
    pub tile: Tile,
    pub ticks_until_done: i32,
}

impl BlobDeathSpot {
    pub fn new(tile: Tile) -> Self {
        Self {
            tile,
            ticks_until_done: BLOB_DEATH_SPOT_TICKS,
        }
    }

    pub fn decrement_tick(&mut self) {
        self.ticks_until_done -= 1;
    }

    pub fn is_done(&self) -> bool {
        self.ticks_until_done <= 0
    }

    /// Fill alpha growing linearly from 0 toward `max_alpha` as the marker expires
    pub fn fill_alpha(&self, max_alpha: u8) -> u8 {
        let elapsed = (BLOB_DEATH_SPOT_TICKS - self.ticks_until_done).clamp(0, BLOB_DEATH_SPOT_TICKS);
        (i32::from(max_alpha) * elapsed / BLOB_DEATH_SPOT_TICKS) as u8
    }
}

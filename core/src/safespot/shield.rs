//! Dead reckoning of the shield that slides along the final boss's wall.
//!
//! The shield moves one tile per tick, reverses at two turning points and
//! rests a few ticks in each corner. Once both turning points have been seen
//! the shield's position at the boss's next attack can be extrapolated.

use serde::Serialize;

use crate::world::Tile;

use super::map::{ExposureMask, SafeTileMap};

/// Corner stall counter before the shield has moved at all
pub const CORNER_STALL_UNSEEN: i32 = -2;
/// Corner stall counter once the first move was seen; the boss override fires once
pub const CORNER_STALL_ARMED: i32 = -1;

/// Safe-tile class of the predicted shadow; the live shadow is class 0
pub const PREDICTED_SHADOW_CLASS: u8 = 2;

/// Ticks the shield rests in a corner
const CORNER_REST_TICKS: i32 = 4;
/// Horizon used when the boss's clock gives nothing better
const DEFAULT_HORIZON: i32 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct ShieldTracker {
    last_position: Option<Tile>,
    base_position: Option<Tile>,
    corner_stall: i32,
    negative_turn_x: Option<i32>,
    positive_turn_x: Option<i32>,
    last_delta: i32,
    last_non_zero_delta: i32,
    ticks_left_in_corner: i32,
}

impl Default for ShieldTracker {
    fn default() -> Self {
        Self {
            last_position: None,
            base_position: None,
            corner_stall: CORNER_STALL_UNSEEN,
            negative_turn_x: None,
            positive_turn_x: None,
            last_delta: 0,
            last_non_zero_delta: 0,
            ticks_left_in_corner: 0,
        }
    }
}

impl ShieldTracker {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn corner_stall(&self) -> i32 {
        self.corner_stall
    }

    pub fn is_corner_stall_armed(&self) -> bool {
        self.corner_stall == CORNER_STALL_ARMED
    }

    pub fn consume_corner_stall(&mut self) {
        self.corner_stall = 0;
    }

    pub fn base_position(&self) -> Option<Tile> {
        self.base_position
    }

    pub fn turning_points(&self) -> (Option<i32>, Option<i32>) {
        (self.negative_turn_x, self.positive_turn_x)
    }

    pub fn ticks_left_in_corner(&self) -> i32 {
        self.ticks_left_in_corner
    }

    pub fn last_position(&self) -> Option<Tile> {
        self.last_position
    }

    /// Record the shield's position for this tick
    pub fn update(&mut self, current: Tile) {
        if let Some(last) = self.last_position {
            if self.corner_stall == CORNER_STALL_UNSEEN && current.x != last.x {
                self.base_position = Some(last);
                self.corner_stall = CORNER_STALL_ARMED;
            }

            let delta = current.x - last.x;
            if delta != 0 {
                self.last_non_zero_delta = delta;
                if self.last_delta == 0 {
                    self.ticks_left_in_corner = CORNER_REST_TICKS;
                }
            } else {
                if self.last_non_zero_delta > 0 {
                    self.positive_turn_x = Some(current.x);
                } else if self.last_non_zero_delta < 0 {
                    self.negative_turn_x = Some(current.x);
                }
                if self.ticks_left_in_corner > 0 {
                    self.ticks_left_in_corner -= 1;
                }
            }
            self.last_delta = delta;
        }
        self.last_position = Some(current);
    }

    /// Where the shield will be when the boss next attacks.
    ///
    /// `zuk_ticks` is the boss's attack clock. Returns `None` until both
    /// turning points are known, or in the final phase when the boss is not
    /// about to attack.
    pub fn predict(&self, zuk_ticks: i32, final_phase: bool) -> Option<Tile> {
        let current = self.last_position?;
        let negative = self.negative_turn_x?;
        let positive = self.positive_turn_x?;

        let mut ticks = if final_phase { zuk_ticks } else { zuk_ticks - 1 };
        if ticks < 1 {
            if final_phase {
                return None;
            }
            ticks = DEFAULT_HORIZON;
        }

        let x = current.x;
        let next_x = if self.last_non_zero_delta > 0 {
            let mut next = x + ticks;
            if next > positive {
                next -= self.ticks_left_in_corner;
                if next <= positive {
                    next = positive;
                } else {
                    next = positive - next + positive;
                }
            }
            next
        } else {
            let mut next = x - ticks;
            if next < negative {
                next += self.ticks_left_in_corner;
                if next >= negative {
                    next = negative;
                } else {
                    next = negative - next + negative;
                }
            }
            next
        };

        Some(Tile::new(next_x, current.y))
    }
}

/// Tiles hidden from the boss behind a shield anchored at `shield`
pub fn shadow_tiles(shield: Tile) -> Vec<Tile> {
    (shield.x - 1..=shield.x + 3)
        .flat_map(|x| (shield.y - 4..=shield.y - 2).map(move |y| Tile::new(x, y)))
        .collect()
}

/// Write the live and predicted shadows into the safe-tile map. The
/// prediction is written last so it wins where both overlap.
pub fn mark_shadows(map: &mut SafeTileMap, live: &[Tile], predicted: &[Tile]) {
    for &tile in live {
        map.insert(tile, ExposureMask::SAFE);
    }
    for &tile in predicted {
        map.insert(tile, ExposureMask::from_bits(PREDICTED_SHADOW_CLASS));
    }
}

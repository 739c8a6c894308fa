//! Tiles and square NPC footprints.

use serde::{Deserialize, Serialize};

/// A tile on the encounter plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Chebyshev distance
    pub fn distance_to(&self, other: Tile) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// The eight surrounding tiles
    pub fn neighbours(&self) -> impl Iterator<Item = Tile> + '_ {
        (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(|(dx, dy)| self.offset(dx, dy))
    }
}

impl From<(i32, i32)> for Tile {
    fn from((x, y): (i32, i32)) -> Self {
        Tile::new(x, y)
    }
}

/// A square footprint anchored at its south-west tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    pub origin: Tile,
    pub size: i32,
}

impl Area {
    pub const fn new(origin: Tile, size: i32) -> Self {
        Self { origin, size }
    }

    pub fn tile(tile: Tile) -> Self {
        Self::new(tile, 1)
    }

    pub fn max_x(&self) -> i32 {
        self.origin.x + self.size - 1
    }

    pub fn max_y(&self) -> i32 {
        self.origin.y + self.size - 1
    }

    pub fn contains(&self, tile: Tile) -> bool {
        (self.origin.x..=self.max_x()).contains(&tile.x)
            && (self.origin.y..=self.max_y()).contains(&tile.y)
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (self.origin.x..=self.max_x())
            .flat_map(move |x| (self.origin.y..=self.max_y()).map(move |y| Tile::new(x, y)))
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.origin.offset(dx, dy), self.size)
    }

    /// Per-axis gap between the footprint edges and `other` (0 when overlapping on that axis)
    fn axis_gaps(&self, other: &Area) -> (i32, i32) {
        let gap_x = (other.origin.x - self.max_x()).max(self.origin.x - other.max_x()).max(0);
        let gap_y = (other.origin.y - self.max_y()).max(self.origin.y - other.max_y()).max(0);
        (gap_x, gap_y)
    }

    /// Chebyshev distance between the closest tiles of both footprints
    pub fn distance_to(&self, other: &Area) -> i32 {
        let (gap_x, gap_y) = self.axis_gaps(other);
        gap_x.max(gap_y)
    }

    pub fn distance_to_tile(&self, tile: Tile) -> i32 {
        self.distance_to(&Area::tile(tile))
    }

    pub fn intersects(&self, other: &Area) -> bool {
        self.axis_gaps(other) == (0, 0)
    }

    /// Orthogonally adjacent: one tile apart on one axis, overlapping on the other
    pub fn is_in_melee_distance(&self, other: &Area) -> bool {
        matches!(self.axis_gaps(other), (1, 0) | (0, 1))
    }

    /// The footprint tile closest to `tile`
    pub fn closest_tile_to(&self, tile: Tile) -> Tile {
        Tile::new(
            tile.x.clamp(self.origin.x, self.max_x()),
            tile.y.clamp(self.origin.y, self.max_y()),
        )
    }
}

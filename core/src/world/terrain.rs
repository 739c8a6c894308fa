//! Per-tick terrain: impassable tiles and tiles that block line of sight.

use hashbrown::HashSet;

use super::area::{Area, Tile};

/// Terrain rebuilt every tick from the roster and the host's scene blockers.
///
/// Scene blockers (pillars, walls) both block movement and sight. NPC
/// footprints only block movement.
#[derive(Debug, Clone, Default)]
pub struct Terrain {
    obstacles: HashSet<Tile>,
    sight_blockers: HashSet<Tile>,
}

impl Terrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blockers(blockers: impl IntoIterator<Item = Tile>) -> Self {
        let mut terrain = Self::new();
        for tile in blockers {
            terrain.add_blocker(tile);
        }
        terrain
    }

    pub fn add_blocker(&mut self, tile: Tile) {
        self.sight_blockers.insert(tile);
        self.obstacles.insert(tile);
    }

    pub fn add_footprint(&mut self, area: &Area) {
        self.obstacles.extend(area.tiles());
    }

    pub fn is_obstacle(&self, tile: Tile) -> bool {
        self.obstacles.contains(&tile)
    }

    pub fn blocks_sight(&self, tile: Tile) -> bool {
        self.sight_blockers.contains(&tile)
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Tile> {
        self.obstacles.iter()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether `area` can occupy its position, ignoring tiles of `ignore`
    pub fn is_area_free(&self, area: &Area, ignore: &Area) -> bool {
        area.tiles()
            .all(|tile| ignore.contains(tile) || !self.obstacles.contains(&tile))
    }

    /// Line of sight from the closest tile of `from` to `target`.
    ///
    /// Walks a Bresenham line between both tiles; any sight blocker strictly
    /// between them, or on the target itself, breaks the line.
    pub fn has_line_of_sight(&self, from: &Area, target: Tile) -> bool {
        if self.blocks_sight(target) {
            return false;
        }
        let start = from.closest_tile_to(target);
        bresenham(start, target)
            .into_iter()
            .skip(1)
            .all(|tile| tile == target || !self.blocks_sight(tile))
    }
}

/// Tiles on the line from `a` to `b`, both ends included
fn bresenham(a: Tile, b: Tile) -> Vec<Tile> {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (a.x, a.y);
    let mut line = Vec::with_capacity((dx.max(-dy) + 1) as usize);

    loop {
        line.push(Tile::new(x, y));
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    line
}

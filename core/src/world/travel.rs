//! Single-step movement of an NPC footprint toward a tile.
//!
//! NPCs move one tile per tick, trying the diagonal first and falling back to
//! the horizontal, then the vertical step. A diagonal is only taken when both
//! of its orthogonal components are free as well.

use super::area::{Area, Tile};
use super::terrain::Terrain;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(Area),
    /// The footprint already covers the target; the next move is unpredictable
    Overlapping,
    Stuck,
}

/// Next position of `area` walking toward `target`. `own` is the footprint the
/// NPC started from, which never counts as an obstacle to itself.
pub fn next_step(area: &Area, target: Tile, terrain: &Terrain, own: &Area) -> Step {
    if area.contains(target) {
        return Step::Overlapping;
    }

    let dx = (target.x - area.closest_tile_to(target).x).signum();
    let dy = (target.y - area.closest_tile_to(target).y).signum();
    let free = |dx: i32, dy: i32| terrain.is_area_free(&area.translate(dx, dy), own);

    if dx != 0 && dy != 0 && free(dx, 0) && free(0, dy) && free(dx, dy) {
        return Step::Moved(area.translate(dx, dy));
    }
    if dx != 0 && free(dx, 0) {
        return Step::Moved(area.translate(dx, 0));
    }
    if dy != 0 && free(0, dy) {
        return Step::Moved(area.translate(0, dy));
    }
    Step::Stuck
}

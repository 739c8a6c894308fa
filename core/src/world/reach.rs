//! Whether an NPC can hit a tile now, or after walking toward it.

use crate::game_data::NpcTypeInfo;

use super::area::{Area, Tile};
use super::terrain::Terrain;
use super::travel::{next_step, Step};

/// Steps simulated before giving up on an NPC reaching attack position
pub const MAX_SIMULATED_STEPS: usize = 30;

/// Line of sight plus range from `area` to `tile`. Melee-only NPCs must be
/// orthogonally adjacent.
pub fn can_attack(area: &Area, info: &NpcTypeInfo, tile: Tile, terrain: &Terrain) -> bool {
    let target = Area::tile(tile);
    let in_range = if info.is_melee_only() {
        area.is_in_melee_distance(&target)
    } else {
        area.distance_to(&target) <= info.range
    };
    in_range && terrain.has_line_of_sight(area, tile)
}

/// Walk the NPC toward `tile` and report whether any visited position can
/// attack it. Movement that would overlap the tile cannot be predicted and is
/// treated as a threat.
pub fn can_move_to_attack(area: &Area, info: &NpcTypeInfo, tile: Tile, terrain: &Terrain) -> bool {
    let mut current = *area;
    for _ in 0..MAX_SIMULATED_STEPS {
        match next_step(&current, tile, terrain, area) {
            Step::Overlapping => return true,
            Step::Stuck => return false,
            Step::Moved(next) => {
                if can_attack(&next, info, tile, terrain) {
                    return true;
                }
                current = next;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_data::NpcType;

    #[test]
    fn test_meleer_needs_adjacency() {
        let info = NpcType::Meleer.info();
        let area = Area::new(Tile::new(0, 0), 4);
        let terrain = Terrain::new();
        assert!(can_attack(&area, info, Tile::new(4, 2), &terrain));
        assert!(!can_attack(&area, info, Tile::new(5, 2), &terrain));
        assert!(!can_attack(&area, info, Tile::new(4, 4), &terrain), "diagonal is not melee");
    }

    #[test]
    fn test_meleer_walks_into_range() {
        let info = NpcType::Meleer.info();
        let area = Area::new(Tile::new(0, 0), 4);
        let terrain = Terrain::new();
        assert!(can_move_to_attack(&area, info, Tile::new(10, 2), &terrain));
    }

    #[test]
    fn test_pillar_shelters_from_mage() {
        let info = NpcType::Mage.info();
        let area = Area::new(Tile::new(0, 0), 4);
        let blockers = (0..4).map(|y| Tile::new(8, y));
        let terrain = Terrain::with_blockers(blockers);
        assert!(!can_attack(&area, info, Tile::new(9, 1), &terrain));
    }
}

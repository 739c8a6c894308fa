//! Exposure classification of the tiles around the player.
//!
//! Each tile gets a 3-bit mask of the attack kinds that can reach it
//! (melee 1, ranged 2, magic 4). A tile with mask 0 is a safespot. The map is
//! rebuilt from scratch every tick.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::{Serialize, Serializer};

use inferno_types::Settings;

use crate::context::NpcTogglesExt;
use crate::game_data::{AttackKind, NpcType};
use crate::roster::TrackedNpc;
use crate::world::{can_attack, can_move_to_attack, Area, Terrain, Tile};

/// Bitmask of attack kinds that can reach a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize)]
pub struct ExposureMask(u8);

impl ExposureMask {
    pub const SAFE: ExposureMask = ExposureMask(0);
    pub const ALL: ExposureMask = ExposureMask(7);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn is_safe(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, kind: AttackKind) -> bool {
        let bit = kind.exposure_bit();
        bit != 0 && self.0 & bit == bit
    }

    pub fn insert(&mut self, kind: AttackKind) {
        self.0 |= kind.exposure_bit();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafeTileMap {
    tiles: HashMap<Tile, ExposureMask>,
}

/// Written as a list of `{ tile, class }` entries sorted by tile; struct keys
/// are not valid map keys in JSON.
impl Serialize for SafeTileMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Entry {
            tile: Tile,
            class: u8,
        }

        let mut entries: Vec<Entry> = self
            .tiles
            .iter()
            .map(|(&tile, mask)| Entry {
                tile,
                class: mask.bits(),
            })
            .collect();
        entries.sort_by_key(|entry| entry.tile);
        serializer.collect_seq(entries)
    }
}

impl SafeTileMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tile: Tile) -> Option<ExposureMask> {
        self.tiles.get(&tile).copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tile, &ExposureMask)> {
        self.tiles.iter()
    }

    /// Overwrite a tile's classification
    pub fn insert(&mut self, tile: Tile, mask: ExposureMask) {
        self.tiles.insert(tile, mask);
    }

    fn entry(&mut self, tile: Tile) -> &mut ExposureMask {
        self.tiles.entry(tile).or_default()
    }

    /// Tiles grouped by classification, each group sorted
    pub fn group_by_class(&self) -> BTreeMap<u8, Vec<Tile>> {
        let mut groups: BTreeMap<u8, Vec<Tile>> = BTreeMap::new();
        for (&tile, mask) in &self.tiles {
            groups.entry(mask.bits()).or_default().push(tile);
        }
        for tiles in groups.values_mut() {
            tiles.sort();
        }
        groups
    }
}

/// Classify every free tile in the check square around the player
pub fn compute_safe_tile_map(
    npcs: &[TrackedNpc],
    player: Tile,
    terrain: &Terrain,
    settings: &Settings,
) -> SafeTileMap {
    let mut map = SafeTileMap::new();
    let radius = (settings.safespots_check_size / 2) as i32;
    let threats: Vec<&TrackedNpc> = npcs
        .iter()
        .filter(|npc| !npc.is_dead && settings.safespots.allows(npc.npc_type))
        .collect();
    if threats.is_empty() {
        return map;
    }

    for x in -radius..=radius {
        for y in -radius..=radius {
            let tile = player.offset(x, y);
            if terrain.is_obstacle(tile) {
                continue;
            }
            for npc in &threats {
                classify(map.entry(tile), npc, tile, terrain);
            }
        }
    }
    map
}

fn classify(mask: &mut ExposureMask, npc: &TrackedNpc, tile: Tile, terrain: &Terrain) {
    let area = npc.area();
    let info = npc.info();

    if npc.npc_type == NpcType::Jad && area.is_in_melee_distance(&Area::tile(tile)) {
        mask.insert(AttackKind::Melee);
    }

    if !(can_attack(&area, info, tile, terrain) || can_move_to_attack(&area, info, tile, terrain)) {
        return;
    }

    if npc.npc_type == NpcType::Blob {
        if !mask.contains(AttackKind::Ranged) {
            mask.insert(AttackKind::Magic);
        }
        if !mask.contains(AttackKind::Magic) {
            mask.insert(AttackKind::Ranged);
        }
    } else {
        mask.insert(info.default_attack);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_bits() {
        let mut mask = ExposureMask::SAFE;
        mask.insert(AttackKind::Melee);
        mask.insert(AttackKind::Magic);
        assert_eq!(mask.bits(), 5);
        assert!(mask.contains(AttackKind::Magic));
        assert!(!mask.contains(AttackKind::Ranged));
        assert!(!mask.contains(AttackKind::Unknown));
        assert_eq!(ExposureMask::from_bits(0xff), ExposureMask::ALL);
    }
}

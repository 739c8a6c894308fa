//! Tests for the safe-tile map
//!
//! Verifies that:
//! - Unreachable tiles classify as safe
//! - Obstacles are skipped and the map is rebuilt identically
//! - Blob and Jad special cases set the expected bits

use inferno_types::{NpcToggles, Settings};

use crate::game_data::{AttackKind, NpcType};
use crate::roster::TrackedNpc;
use crate::world::{Terrain, Tile};

use super::{compute_safe_tile_map, ExposureMask};

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn make_npc(actor: u64, npc_type: NpcType, x: i32, y: i32) -> TrackedNpc {
    TrackedNpc::new(actor, 0, npc_type, Tile::new(x, y))
}

/// A closed ring of pillars around (x, y) with radius r
fn walled_box(x: i32, y: i32, r: i32) -> Terrain {
    let mut blockers = Vec::new();
    for i in -r..=r {
        blockers.push(Tile::new(x + i, y - r));
        blockers.push(Tile::new(x + i, y + r));
        blockers.push(Tile::new(x - r, y + i));
        blockers.push(Tile::new(x + r, y + i));
    }
    Terrain::with_blockers(blockers)
}

// ═══════════════════════════════════════════════════════════════════════════
// Classification
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_unreachable_tiles_are_safe() {
    let player = Tile::new(50, 50);
    let terrain = walled_box(50, 50, 4);
    let meleer = make_npc(1, NpcType::Meleer, 0, 0);

    let map = compute_safe_tile_map(&[meleer], player, &terrain, &Settings::default());
    assert!(!map.is_empty());
    for (tile, mask) in map.iter() {
        assert!(mask.is_safe(), "{tile:?} should be out of reach, got {mask:?}");
    }
}

#[test]
fn test_obstacles_skipped() {
    let player = Tile::new(50, 50);
    let terrain = Terrain::with_blockers([Tile::new(51, 51)]);
    let mage = make_npc(1, NpcType::Mage, 30, 30);

    let map = compute_safe_tile_map(&[mage], player, &terrain, &Settings::default());
    assert_eq!(map.get(Tile::new(51, 51)), None);
    assert_eq!(map.len(), 7 * 7 - 1);
}

#[test]
fn test_recompute_is_idempotent() {
    let player = Tile::new(20, 20);
    let terrain = Terrain::with_blockers([Tile::new(18, 18), Tile::new(18, 19)]);
    let npcs = vec![
        make_npc(1, NpcType::Mage, 5, 5),
        make_npc(2, NpcType::Meleer, 25, 20),
        make_npc(3, NpcType::Blob, 10, 25),
    ];
    let settings = Settings::default();

    let first = compute_safe_tile_map(&npcs, player, &terrain, &settings);
    let second = compute_safe_tile_map(&npcs, player, &terrain, &settings);
    assert_eq!(first, second);
}

#[test]
fn test_mage_and_ranger_bits_combine() {
    let player = Tile::new(20, 20);
    let npcs = vec![make_npc(1, NpcType::Mage, 0, 20), make_npc(2, NpcType::Ranger, 40, 20)];
    let map = compute_safe_tile_map(&npcs, player, &Terrain::new(), &Settings::default());
    assert_eq!(map.get(player), Some(ExposureMask::from_bits(6)));
}

#[test]
fn test_lone_blob_marks_magic() {
    let player = Tile::new(20, 20);
    let blob = make_npc(1, NpcType::Blob, 12, 20);
    let map = compute_safe_tile_map(&[blob], player, &Terrain::new(), &Settings::default());
    let mask = map.get(player).unwrap();
    assert!(mask.contains(AttackKind::Magic));
    assert!(!mask.contains(AttackKind::Ranged));
}

#[test]
fn test_blob_next_to_ranger_keeps_ranged_only() {
    let player = Tile::new(20, 20);
    let npcs = vec![make_npc(1, NpcType::Ranger, 40, 20), make_npc(2, NpcType::Blob, 12, 20)];
    let map = compute_safe_tile_map(&npcs, player, &Terrain::new(), &Settings::default());
    assert_eq!(map.get(player), Some(ExposureMask::from_bits(2)));
}

#[test]
fn test_jad_melee_reach_always_flagged() {
    let player = Tile::new(20, 20);
    let jad = make_npc(1, NpcType::Jad, 21, 18);
    let map = compute_safe_tile_map(&[jad], player, &Terrain::new(), &Settings::default());
    let mask = map.get(player).unwrap();
    assert!(mask.contains(AttackKind::Melee), "tile beside jad is in melee reach");
    assert!(map.get(Tile::new(17, 17)).unwrap().is_safe(), "unknown kinds add no bits");
}

#[test]
fn test_opted_out_types_ignored() {
    let player = Tile::new(20, 20);
    let settings = Settings {
        safespots: NpcToggles {
            mage: false,
            ..NpcToggles::default()
        },
        ..Settings::default()
    };
    let map = compute_safe_tile_map(&[make_npc(1, NpcType::Mage, 0, 20)], player, &Terrain::new(), &settings);
    assert!(map.is_empty());
}

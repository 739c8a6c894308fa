//! Tests for attack clock prediction
//!
//! Verifies that:
//! - Clocks tick down by one and roll to the type's cycle at zero
//! - Idle NPCs stay idle and count idle ticks
//! - Suspended clocks never move
//! - Animations resynchronise clocks
//! - The final boss's corner stall and final-phase rules apply

use crate::game_data::{AttackKind, NpcType, Prayer, ZUK_FINAL_PHASE_CYCLE};
use crate::roster::{BossPhaseState, TrackedNpc, SUSPENDED};
use crate::world::{Terrain, Tile};

use super::{advance, advance_all, sync_from_animation, AdvanceContext, CORNER_STALL_TICKS};

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn make_npc(npc_type: NpcType, ticks: i32) -> TrackedNpc {
    let mut npc = TrackedNpc::new(1, 0, npc_type, Tile::new(0, 0));
    npc.ticks_until_attack = ticks;
    npc
}

fn make_ctx(terrain: &Terrain) -> AdvanceContext<'_> {
    AdvanceContext {
        tick: 0,
        final_phase: false,
        ticks_since_final_phase: 0,
        player: Tile::new(40, 40),
        previous_player: None,
        active_prayer: None,
        terrain,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Clock Rolls
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_clock_decrements_then_rolls_to_cycle() {
    let terrain = Terrain::new();
    let ctx = make_ctx(&terrain);
    for npc_type in [
        NpcType::Bat,
        NpcType::Blob,
        NpcType::Meleer,
        NpcType::Ranger,
        NpcType::Mage,
        NpcType::Jad,
    ] {
        let cycle = npc_type.cycle();
        let mut npc = make_npc(npc_type, cycle);
        for expected in (1..cycle).rev() {
            advance(&mut npc, &ctx);
            assert_eq!(npc.ticks_until_attack, expected, "{npc_type:?} should count down");
        }
        advance(&mut npc, &ctx);
        assert_eq!(
            npc.ticks_until_attack, cycle,
            "{npc_type:?} should roll over to its cycle at zero"
        );
        assert_eq!(npc.idle_ticks, 0, "a roll resets the idle counter");
    }
}

#[test]
fn test_cycle_table_values() {
    assert_eq!(NpcType::Meleer.cycle(), 7);
    assert_eq!(NpcType::Ranger.cycle(), 5);
    assert_eq!(NpcType::Mage.cycle(), 5);
    assert_eq!(NpcType::Bat.cycle(), 3);
    assert_eq!(NpcType::Blob.cycle(), 6);
    assert_eq!(NpcType::Jad.cycle(), 8);
}

#[test]
fn test_roll_rederives_kind() {
    let terrain = Terrain::new();
    let ctx = make_ctx(&terrain);

    let mut ranger = make_npc(NpcType::Ranger, 1);
    ranger.next_attack = AttackKind::Melee;
    advance(&mut ranger, &ctx);
    assert_eq!(ranger.next_attack, AttackKind::Ranged);

    let mut jad = make_npc(NpcType::Jad, 1);
    jad.next_attack = AttackKind::Magic;
    advance(&mut jad, &ctx);
    assert_eq!(jad.next_attack, AttackKind::Unknown, "jad's next style is unknown until it animates");
}

#[test]
fn test_idle_npc_stays_idle_and_counts() {
    let terrain = Terrain::new();
    let ctx = make_ctx(&terrain);
    let mut meleer = make_npc(NpcType::Meleer, 0);
    for _ in 0..5 {
        advance(&mut meleer, &ctx);
    }
    assert_eq!(meleer.ticks_until_attack, 0);
    assert_eq!(meleer.idle_ticks, 5);
}

#[test]
fn test_suspended_clock_never_moves() {
    let terrain = Terrain::new();
    let ctx = make_ctx(&terrain);
    let mut zuk = make_npc(NpcType::Zuk, SUSPENDED);
    for _ in 0..20 {
        advance(&mut zuk, &ctx);
    }
    assert_eq!(zuk.ticks_until_attack, SUSPENDED);
}

// ═══════════════════════════════════════════════════════════════════════════
// Animations
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_animation_syncs_clock_and_kind() {
    let mut mage = make_npc(NpcType::Mage, 0);
    assert!(sync_from_animation(&mut mage, 7612, false, 0));
    assert_eq!(mage.ticks_until_attack, 4);
    assert_eq!(mage.next_attack, AttackKind::Melee);
}

#[test]
fn test_animation_of_other_type_is_ignored() {
    let mut mage = make_npc(NpcType::Mage, 2);
    assert!(!sync_from_animation(&mut mage, 7605, false, 0), "ranger animation on a mage");
    assert_eq!(mage.ticks_until_attack, 2);
}

#[test]
fn test_suspended_boss_resumes_only_after_grace() {
    let mut zuk = make_npc(NpcType::Zuk, SUSPENDED);
    assert!(!sync_from_animation(&mut zuk, 7566, true, 2));
    assert_eq!(zuk.ticks_until_attack, SUSPENDED);

    assert!(sync_from_animation(&mut zuk, 7566, true, 4));
    assert_eq!(zuk.ticks_until_attack, ZUK_FINAL_PHASE_CYCLE);
}

#[test]
fn test_boss_waits_at_zero_early_in_final_phase() {
    let terrain = Terrain::new();
    let mut ctx = make_ctx(&terrain);
    ctx.final_phase = true;
    ctx.ticks_since_final_phase = 2;

    let mut zuk = make_npc(NpcType::Zuk, 1);
    advance(&mut zuk, &ctx);
    assert_eq!(zuk.ticks_until_attack, 0);

    ctx.ticks_since_final_phase = 5;
    let mut zuk = make_npc(NpcType::Zuk, 1);
    advance(&mut zuk, &ctx);
    assert_eq!(zuk.ticks_until_attack, ZUK_FINAL_PHASE_CYCLE);
}

// ═══════════════════════════════════════════════════════════════════════════
// Corner Stall
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_corner_stall_override_is_one_shot() {
    let terrain = Terrain::new();
    let ctx = make_ctx(&terrain);
    let mut phase = BossPhaseState::default();
    phase.shield_tracker.update(Tile::new(20, 50));
    phase.shield_tracker.update(Tile::new(21, 50));
    assert!(phase.shield_tracker.is_corner_stall_armed());

    let mut npcs = vec![make_npc(NpcType::Zuk, 5)];
    advance_all(&mut npcs, &mut phase, &ctx);
    assert_eq!(npcs[0].ticks_until_attack, CORNER_STALL_TICKS);
    assert_eq!(npcs[0].next_attack, AttackKind::Unknown);

    advance_all(&mut npcs, &mut phase, &ctx);
    assert_eq!(npcs[0].ticks_until_attack, CORNER_STALL_TICKS - 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Blob
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_blob_engages_when_player_in_sight() {
    let terrain = Terrain::new();
    let mut ctx = make_ctx(&terrain);
    ctx.player = Tile::new(8, 1);
    let mut blob = make_npc(NpcType::Blob, 0);

    advance(&mut blob, &ctx);
    assert_eq!(blob.ticks_until_attack, 4, "first sighting starts the detection window");

    let mut blob = make_npc(NpcType::Blob, 0);
    ctx.previous_player = Some(Tile::new(8, 1));
    advance(&mut blob, &ctx);
    assert_eq!(blob.ticks_until_attack, 3);
}

#[test]
fn test_blob_reads_prayer_on_detection_tick() {
    let terrain = Terrain::new();
    let mut ctx = make_ctx(&terrain);
    ctx.player = Tile::new(8, 1);
    ctx.active_prayer = Some(Prayer::ProtectFromMissiles);

    let mut blob = make_npc(NpcType::Blob, 4);
    advance(&mut blob, &ctx);
    assert_eq!(blob.ticks_until_attack, 3);
    assert_eq!(blob.next_attack, AttackKind::Magic);

    ctx.active_prayer = Some(Prayer::ProtectFromMagic);
    let mut blob = make_npc(NpcType::Blob, 4);
    advance(&mut blob, &ctx);
    assert_eq!(blob.next_attack, AttackKind::Ranged);
}

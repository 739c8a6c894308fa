//! Tests for threat aggregation
//!
//! Verifies that:
//! - The window keeps the best priority per tick and kind
//! - Blob detection fan-out follows its precedence rules
//! - Recommendations and tile clicks resolve ties deterministically
//! - Periodic coincidences are grouped only when prayers conflict

use inferno_types::{NpcToggles, Settings};

use crate::game_data::{AttackKind, NpcType, Prayer, Recommendation};
use crate::roster::TrackedNpc;
use crate::safespot::ExposureMask;
use crate::world::{Terrain, Tile};

use super::*;

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn make_npc(actor: u64, npc_type: NpcType, ticks: i32) -> TrackedNpc {
    let mut npc = TrackedNpc::new(actor, 0, npc_type, Tile::new(actor as i32 * 10, 0));
    npc.ticks_until_attack = ticks;
    npc
}

fn make_npc_with_kind(actor: u64, npc_type: NpcType, ticks: i32, kind: AttackKind) -> TrackedNpc {
    let mut npc = make_npc(actor, npc_type, ticks);
    npc.next_attack = kind;
    npc
}

fn auto_pray() -> Settings {
    Settings {
        auto_pray: true,
        ..Settings::default()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Threat Window
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_window_keeps_lowest_priority() {
    let mut window = ThreatWindow::new();
    window.put_min(1, AttackKind::Melee, 3);
    window.put_min(1, AttackKind::Melee, 6);
    window.put_min(1, AttackKind::Melee, 2);
    assert_eq!(window.get(1, AttackKind::Melee), Some(2));
}

#[test]
fn test_window_skips_idle_unknown_and_opted_out() {
    let npcs = vec![
        make_npc(1, NpcType::Ranger, 0),
        make_npc_with_kind(2, NpcType::Jad, 3, AttackKind::Unknown),
        make_npc(3, NpcType::Bat, 2),
        make_npc(4, NpcType::Mage, 4),
    ];
    let settings = Settings {
        prayer_helper: NpcToggles {
            bat: false,
            ..NpcToggles::default()
        },
        ..Settings::default()
    };

    let window = build_threat_window(&npcs, &settings);
    let entries: Vec<_> = window.iter().collect();
    assert_eq!(entries, vec![(4, AttackKind::Magic, 1)]);
}

#[test]
fn test_dead_mage_leaves_window() {
    let mut mage = make_npc(1, NpcType::Mage, 2);
    mage.is_dead = true;
    let window = build_threat_window(&[mage], &Settings::default());
    assert!(window.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Blob Fan-out
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_lone_blob_advertises_magic_on_detection_tick() {
    let blob = make_npc(1, NpcType::Blob, 6);
    let window = build_threat_window(&[blob], &Settings::default());
    assert_eq!(window.get(3, AttackKind::Magic), Some(4));
    assert!(!window.contains(6, AttackKind::Unknown));
}

#[test]
fn test_blob_joins_existing_magic_on_detection_tick() {
    // mage lands on the detection tick with a better priority
    let npcs = vec![make_npc(1, NpcType::Mage, 3), make_npc(2, NpcType::Blob, 6)];
    let window = build_threat_window(&npcs, &Settings::default());
    assert_eq!(window.get(3, AttackKind::Magic), Some(1));
    assert!(!window.contains(3, AttackKind::Ranged));

    // bat lands on the detection tick with a worse priority: blob lowers it
    let npcs = vec![make_npc(1, NpcType::Bat, 3), make_npc(2, NpcType::Blob, 6)];
    let window = build_threat_window(&npcs, &Settings::default());
    assert_eq!(window.get(3, AttackKind::Ranged), Some(4));
    assert!(!window.contains(3, AttackKind::Magic));
}

#[test]
fn test_blob_advertises_ranged_when_magic_lands_with_its_attack() {
    let npcs = vec![make_npc(1, NpcType::Mage, 6), make_npc(2, NpcType::Blob, 6)];
    let window = build_threat_window(&npcs, &Settings::default());
    assert_eq!(window.get(3, AttackKind::Ranged), Some(4));
    assert!(!window.contains(3, AttackKind::Magic));
}

#[test]
fn test_blob_advertises_magic_when_ranged_lands_before_detection() {
    let npcs = vec![make_npc(1, NpcType::Ranger, 2), make_npc(2, NpcType::Blob, 6)];
    let window = build_threat_window(&npcs, &Settings::default());
    assert_eq!(window.get(3, AttackKind::Magic), Some(4));
}

#[test]
fn test_blob_without_detection_setting_contributes_nothing_unknown() {
    let settings = Settings {
        indicate_blob_detection_tick: false,
        ..Settings::default()
    };
    let window = build_threat_window(&[make_npc(1, NpcType::Blob, 6)], &settings);
    assert!(window.is_empty());

    let revealed = make_npc_with_kind(1, NpcType::Blob, 2, AttackKind::Ranged);
    let window = build_threat_window(&[revealed], &settings);
    assert_eq!(window.get(2, AttackKind::Ranged), Some(4));
}

// ═══════════════════════════════════════════════════════════════════════════
// Recommendation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_recommend_picks_lowest_priority_on_next_tick() {
    let mut window = ThreatWindow::new();
    window.put_min(1, AttackKind::Melee, 3);
    window.put_min(1, AttackKind::Magic, 1);
    window.put_min(2, AttackKind::Ranged, 0);
    assert_eq!(recommend(&window), Some(Prayer::ProtectFromMagic));
}

#[test]
fn test_recommend_none_without_next_tick_threat() {
    let mut window = ThreatWindow::new();
    window.put_min(2, AttackKind::Ranged, 2);
    assert_eq!(recommend(&window), None);
    assert_eq!(recommend(&ThreatWindow::new()), None);
}

#[test]
fn test_closest_attack_earliest_then_priority() {
    let mut window = ThreatWindow::new();
    window.put_min(3, AttackKind::Magic, 1);
    window.put_min(2, AttackKind::Melee, 3);
    window.put_min(2, AttackKind::Ranged, 2);
    let closest = closest_attack(&window).unwrap();
    assert_eq!((closest.tick, closest.kind), (2, AttackKind::Ranged));
}

#[test]
fn test_decide_respects_gates() {
    let npcs = vec![make_npc(1, NpcType::Ranger, 1)];
    let window = build_threat_window(&npcs, &Settings::default());

    assert_eq!(decide(&window, &npcs, &Settings::default(), 0), Recommendation::None);
    assert_eq!(
        decide(&window, &npcs, &auto_pray(), 0),
        Recommendation::ProtectFromMissiles
    );

    let flicking = Settings {
        one_tick_pray: true,
        ..Settings::default()
    };
    assert_eq!(decide(&window, &npcs, &flicking, 10), Recommendation::ProtectFromMissiles);
    assert_eq!(decide(&window, &npcs, &flicking, 11), Recommendation::None);
}

#[test]
fn test_off_tick_melee_with_jad() {
    let npcs = vec![make_npc_with_kind(1, NpcType::Jad, 5, AttackKind::Unknown)];
    let window = build_threat_window(&npcs, &Settings::default());
    let settings = Settings {
        off_tick_melee_jad: true,
        ..auto_pray()
    };
    assert_eq!(decide(&window, &npcs, &settings, 0), Recommendation::ProtectFromMelee);
    assert_eq!(decide(&window, &npcs, &auto_pray(), 0), Recommendation::None);
}

#[test]
fn test_combined_threat_weighs_damage() {
    // two rangers (80) outweigh one mage (45) even though the mage outranks them
    let npcs = vec![
        make_npc(1, NpcType::Ranger, 1),
        make_npc(2, NpcType::Ranger, 1),
        make_npc(3, NpcType::Mage, 1),
    ];
    let window = build_threat_window(&npcs, &Settings::default());
    let settings = Settings {
        show_attack_timer_overlay: true,
        ..auto_pray()
    };
    assert_eq!(decide(&window, &npcs, &auto_pray(), 0), Recommendation::ProtectFromMagic);
    assert_eq!(decide(&window, &npcs, &settings, 0), Recommendation::ProtectFromMissiles);
}

#[test]
fn test_combined_threat_of_unknown_kinds_falls_back_to_melee() {
    // Jad and the final boss land together with their kinds still unrevealed
    let npcs = vec![make_npc(1, NpcType::Jad, 1), make_npc(2, NpcType::Zuk, 1)];
    let settings = Settings {
        show_attack_timer_overlay: true,
        prayer_helper: NpcToggles {
            zuk: true,
            ..NpcToggles::default()
        },
        ..auto_pray()
    };
    let window = build_threat_window(&npcs, &settings);
    assert_eq!(decide(&window, &npcs, &settings, 0), Recommendation::ProtectFromMelee);

    assert_eq!(damage_weighted_prayer(&npcs), Some(Prayer::ProtectFromMelee));
    assert_eq!(damage_weighted_prayer(std::iter::empty::<&TrackedNpc>()), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Simultaneous Attacks
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_gcd() {
    assert_eq!(gcd(6, 4), 2);
    assert_eq!(gcd(5, 7), 1);
    assert_eq!(gcd(0, 0), 0);
}

#[test]
fn test_periodic_coincidence() {
    // cycles 6 and 4 share a period of 2
    let blob = make_npc_with_kind(1, NpcType::Blob, 5, AttackKind::Magic);
    let mut healer = make_npc(2, NpcType::JadHealer, 3);
    assert!(conflicts(&blob, &healer), "difference 2 lines up every few cycles");

    healer.ticks_until_attack = 4;
    assert!(!conflicts(&blob, &healer), "difference 1 never lines up");
}

#[test]
fn test_same_prayer_is_never_a_conflict() {
    let a = make_npc(1, NpcType::Ranger, 2);
    let b = make_npc(2, NpcType::Bat, 2);
    assert!(!conflicts(&a, &b));
}

#[test]
fn test_ranger_and_mage_on_next_tick_grouped_and_mage_recommended() {
    let npcs = vec![make_npc(1, NpcType::Ranger, 1), make_npc(2, NpcType::Mage, 1)];

    let groups = detect_simultaneous(&npcs);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members, vec![1, 2]);
    assert_eq!(groups[0].severity, 85);
    assert_eq!(groups[0].tick, 1);

    let window = build_threat_window(&npcs, &Settings::default());
    assert_eq!(recommend(&window), Some(Prayer::ProtectFromMagic));
}

#[test]
fn test_excluded_types_never_grouped() {
    let npcs = vec![
        make_npc(1, NpcType::Mage, 1),
        make_npc_with_kind(2, NpcType::Zuk, 1, AttackKind::Ranged),
        make_npc(3, NpcType::JadHealer, 1),
    ];
    assert!(detect_simultaneous(&npcs).is_empty());
}

#[test]
fn test_near_simultaneous_threshold() {
    let npcs = vec![
        make_npc(1, NpcType::Ranger, 2),
        make_npc(2, NpcType::Mage, 3),
        make_npc(3, NpcType::Meleer, 6),
    ];
    let by_tick = attacks_by_tick(&npcs, &Settings::default());

    let flagged = near_simultaneous(&by_tick, 1);
    assert!(flagged.contains(&1) && flagged.contains(&2));
    assert!(!flagged.contains(&3));

    assert!(near_simultaneous(&by_tick, 0).is_empty());
}

#[test]
fn test_near_simultaneous_huge_threshold_saturates() {
    let npcs = vec![make_npc(1, NpcType::Mage, 3), make_npc(2, NpcType::Meleer, 40)];
    let by_tick = attacks_by_tick(&npcs, &Settings::default());

    for threshold in [u32::MAX, i32::MAX as u32] {
        let flagged = near_simultaneous(&by_tick, threshold);
        assert!(flagged.contains(&1) && flagged.contains(&2));
    }

    let lone = attacks_by_tick(&npcs[..1], &Settings::default());
    assert!(near_simultaneous(&lone, u32::MAX).is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Tile Clicks
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_click_single_kinds_and_safe() {
    let settings = Settings::default();
    let cases = [
        (0, Recommendation::None),
        (1, Recommendation::ProtectFromMelee),
        (2, Recommendation::ProtectFromMissiles),
        (4, Recommendation::ProtectFromMagic),
    ];
    for (bits, expected) in cases {
        assert_eq!(prayer_for_exposure(ExposureMask::from_bits(bits), &[], &settings), expected);
    }
}

#[test]
fn test_click_defaults_without_timing() {
    let settings = Settings::default();
    let click = |bits| prayer_for_exposure(ExposureMask::from_bits(bits), &[], &settings);
    assert_eq!(click(3), Recommendation::ProtectFromMelee);
    assert_eq!(click(5), Recommendation::ProtectFromMagic);
    assert_eq!(click(6), Recommendation::ProtectFromMagic);
    assert_eq!(click(7), Recommendation::ProtectFromMagic);
}

#[test]
fn test_click_prefers_kind_that_lands_first() {
    let settings = Settings::default();
    let npcs = vec![make_npc(1, NpcType::Meleer, 4), make_npc(2, NpcType::Mage, 2)];
    assert_eq!(
        prayer_for_exposure(ExposureMask::from_bits(5), &npcs, &settings),
        Recommendation::ProtectFromMagic
    );

    let npcs = vec![make_npc(1, NpcType::Meleer, 1), make_npc(2, NpcType::Mage, 2)];
    assert_eq!(
        prayer_for_exposure(ExposureMask::from_bits(5), &npcs, &settings),
        Recommendation::ProtectFromMelee
    );
}

#[test]
fn test_click_timing_uses_prayer_helper_and_raw_clocks() {
    // idle meleer (clock 0) is treated as landing before the mage
    let npcs = vec![make_npc(1, NpcType::Meleer, 0), make_npc(2, NpcType::Mage, 2)];
    let settings = Settings {
        safespots: NpcToggles::all_off(),
        ..Settings::default()
    };
    assert_eq!(
        prayer_for_exposure(ExposureMask::from_bits(5), &npcs, &settings),
        Recommendation::ProtectFromMelee
    );

    // a mage outside the prayer helper no longer disambiguates
    let npcs = vec![make_npc(1, NpcType::Meleer, 4), make_npc(2, NpcType::Mage, 2)];
    let settings = Settings {
        prayer_helper: NpcToggles {
            mage: false,
            ..NpcToggles::default()
        },
        ..Settings::default()
    };
    assert_eq!(
        prayer_for_exposure(ExposureMask::from_bits(5), &npcs, &settings),
        Recommendation::ProtectFromMelee
    );
}

#[test]
fn test_click_all_exposed_weighs_damage() {
    let npcs = vec![
        make_npc(1, NpcType::Meleer, 3),
        make_npc(2, NpcType::Ranger, 3),
        make_npc(3, NpcType::Bat, 3),
    ];
    assert_eq!(
        prayer_for_exposure(ExposureMask::ALL, &npcs, &Settings::default()),
        Recommendation::ProtectFromMissiles
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Movement Threats and Labels
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_stepping_out_of_cover_is_dangerous() {
    // a pillar column between the mage and the player's tile only
    let mut mage = make_npc(1, NpcType::Mage, 3);
    mage.position = Tile::new(0, 0);
    let terrain = Terrain::with_blockers([Tile::new(8, 1)]);
    let player = Tile::new(9, 1);

    let threats = detect_movement_threats(&[mage], player, &terrain, &Settings::default());
    assert!(!threats.dangerous_tiles.is_empty());
    assert!(threats.dangerous_tiles.iter().all(|d| d.attackers == vec![1]));
    assert_eq!(threats.emergency_prayer, Some(Prayer::ProtectFromMagic));
}

#[test]
fn test_labels_and_dig_warnings() {
    let mut meleer = make_npc(1, NpcType::Meleer, 0);
    meleer.idle_ticks = 31;
    let npcs = vec![meleer, make_npc(2, NpcType::Blob, 4), make_npc(3, NpcType::Ranger, 2)];

    let labels = tick_labels(&npcs, &Settings::default(), &[]);
    assert_eq!(labels.len(), 2, "idle meleer has no label");
    assert!(labels.iter().find(|l| l.actor == 2).unwrap().critical);
    assert!(!labels.iter().find(|l| l.actor == 3).unwrap().critical);

    let warnings = dig_warnings(&npcs, &Settings::default());
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].danger);
}

//! Turning the threat window into a single prayer.

use serde::Serialize;

use inferno_types::Settings;

use crate::context::NpcTogglesExt;
use crate::game_data::{AttackKind, NpcType, Prayer, Recommendation};
use crate::roster::TrackedNpc;
use crate::safespot::ExposureMask;

use super::window::{ThreatWindow, KIND_ORDER};

/// The earliest upcoming attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClosestAttack {
    pub tick: i32,
    pub kind: AttackKind,
    pub priority: i32,
}

/// Lowest-priority attack landing next tick
pub fn recommend(window: &ThreatWindow) -> Option<Prayer> {
    window
        .at(1)
        .into_iter()
        .min_by_key(|&(_, priority)| priority)
        .and_then(|(kind, _)| kind.prayer())
}

/// Earliest tick first, lowest priority within it
pub fn closest_attack(window: &ThreatWindow) -> Option<ClosestAttack> {
    window
        .iter()
        .min_by_key(|&(tick, _, priority)| (tick, priority))
        .map(|(tick, kind, priority)| ClosestAttack { tick, kind, priority })
}

/// Prayer that blocks the most summed max damage. Ties go to the earlier
/// kind in melee, ranged, magic order, so attackers whose kind is still
/// unknown fall back to melee. `None` only when there are no attackers.
pub fn damage_weighted_prayer<'a>(npcs: impl IntoIterator<Item = &'a TrackedNpc>) -> Option<Prayer> {
    let mut damage = [0i32; 3];
    let mut any = false;
    for npc in npcs {
        any = true;
        let kind = likely_attack(npc);
        if let Some(slot) = KIND_ORDER.iter().position(|&k| k == kind) {
            damage[slot] += npc.npc_type.max_damage();
        }
    }
    if !any {
        return None;
    }

    let [melee, ranged, magic] = damage;
    let kind = if melee >= ranged && melee >= magic {
        AttackKind::Melee
    } else if ranged >= magic {
        AttackKind::Ranged
    } else {
        AttackKind::Magic
    };
    kind.prayer()
}

/// The kind an NPC will most likely use: its predicted kind, else its default
fn likely_attack(npc: &TrackedNpc) -> AttackKind {
    if npc.next_attack != AttackKind::Unknown {
        npc.next_attack
    } else {
        npc.info().default_attack
    }
}

/// Opted-in NPCs whose attack lands next tick
fn attacking_next_tick<'a>(npcs: &'a [TrackedNpc], settings: &'a Settings) -> impl Iterator<Item = &'a TrackedNpc> {
    npcs.iter().filter(|npc| {
        npc.ticks_until_attack == 1 && !npc.is_dead && settings.prayer_helper.allows(npc.npc_type)
    })
}

/// Final per-tick decision, after every settings gate
pub fn decide(
    window: &ThreatWindow,
    npcs: &[TrackedNpc],
    settings: &Settings,
    tick_count: u64,
) -> Recommendation {
    if !settings.auto_pray && !settings.one_tick_pray {
        return Recommendation::None;
    }

    let mut prayer = if settings.show_attack_timer_overlay
        && attacking_next_tick(npcs, settings).count() > 1
    {
        damage_weighted_prayer(attacking_next_tick(npcs, settings))
    } else {
        recommend(window)
    };

    if prayer.is_none()
        && settings.off_tick_melee_jad
        && npcs.iter().any(|npc| npc.npc_type == NpcType::Jad)
    {
        prayer = Some(Prayer::ProtectFromMelee);
    }

    if settings.one_tick_pray && tick_count % 2 != 0 {
        return Recommendation::None;
    }
    Recommendation::from(prayer)
}

/// Prayer for standing on a tile with the given exposure.
///
/// Two-kind tiles are resolved by whichever kind's attackers land first;
/// melee wins melee+ranged and magic wins the other pairs when nothing
/// disambiguates.
pub fn prayer_for_exposure(
    mask: ExposureMask,
    npcs: &[TrackedNpc],
    settings: &Settings,
) -> Recommendation {
    let relevant: Vec<&TrackedNpc> = npcs
        .iter()
        .filter(|npc| !npc.is_dead && settings.prayer_helper.allows(npc.npc_type))
        .collect();
    // raw clocks: an idle NPC (0) counts as the most urgent
    let soonest = |kind: AttackKind| {
        relevant
            .iter()
            .filter(|npc| npc.info().default_attack == kind)
            .map(|npc| npc.ticks_until_attack)
            .min()
    };
    let pick = |first: AttackKind, second: AttackKind, fallback: AttackKind| {
        let kind = match (soonest(first), soonest(second)) {
            (Some(a), Some(b)) => {
                if a <= b {
                    first
                } else {
                    second
                }
            }
            (Some(_), None) => first,
            (None, Some(_)) => second,
            (None, None) => fallback,
        };
        Recommendation::from(kind.prayer())
    };

    let melee = mask.contains(AttackKind::Melee);
    let ranged = mask.contains(AttackKind::Ranged);
    let magic = mask.contains(AttackKind::Magic);

    match (melee, ranged, magic) {
        (false, false, false) => Recommendation::None,
        (true, false, false) => Recommendation::ProtectFromMelee,
        (false, true, false) => Recommendation::ProtectFromMissiles,
        (false, false, true) => Recommendation::ProtectFromMagic,
        (true, true, false) => pick(AttackKind::Melee, AttackKind::Ranged, AttackKind::Melee),
        (true, false, true) => pick(AttackKind::Melee, AttackKind::Magic, AttackKind::Magic),
        (false, true, true) => pick(AttackKind::Ranged, AttackKind::Magic, AttackKind::Magic),
        (true, true, true) => Recommendation::from(
            damage_weighted_prayer(relevant.iter().copied()).or(Some(Prayer::ProtectFromMagic)),
        ),
    }
}

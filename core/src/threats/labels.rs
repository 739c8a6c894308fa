//! Per-NPC annotations for the renderer.

use serde::Serialize;

use inferno_types::Settings;

use crate::context::NpcTogglesExt;
use crate::game_data::{AttackKind, NpcType};
use crate::roster::{ActorId, TrackedNpc};

use super::simultaneous::SimultaneousGroup;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NpcTickLabel {
    pub actor: ActorId,
    pub npc_type: NpcType,
    pub ticks: i32,
    pub kind: AttackKind,
    /// Lands next tick, or a blob about to read the player's prayer
    pub critical: bool,
    /// Part of a simultaneous group
    pub simultaneous: bool,
}

pub fn tick_labels(
    npcs: &[TrackedNpc],
    settings: &Settings,
    groups: &[SimultaneousGroup],
) -> Vec<NpcTickLabel> {
    npcs.iter()
        .filter(|npc| npc.ticks_until_attack > 0 && settings.ticks_on_npc.allows(npc.npc_type))
        .map(|npc| NpcTickLabel {
            actor: npc.actor,
            npc_type: npc.npc_type,
            ticks: npc.ticks_until_attack,
            kind: npc.next_attack,
            critical: npc.ticks_until_attack == 1
                || (npc.npc_type == NpcType::Blob && npc.ticks_until_attack == 4),
            simultaneous: groups.iter().any(|group| group.members.contains(&npc.actor)),
        })
        .collect()
}

/// A meleer that has idled long enough that it may burrow next to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DigWarning {
    pub actor: ActorId,
    pub idle_ticks: i32,
    pub danger: bool,
}

pub fn dig_warnings(npcs: &[TrackedNpc], settings: &Settings) -> Vec<DigWarning> {
    let threshold = settings.dig_timer_threshold as i32;
    let danger = settings.dig_timer_danger_threshold as i32;
    npcs.iter()
        .filter(|npc| {
            npc.npc_type == NpcType::Meleer
                && npc.ticks_until_attack == 0
                && npc.idle_ticks >= threshold
        })
        .map(|npc| DigWarning {
            actor: npc.actor,
            idle_ticks: npc.idle_ticks,
            danger: npc.idle_ticks >= danger,
        })
        .collect()
}

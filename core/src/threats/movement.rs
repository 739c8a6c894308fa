//! Threats that only reach the player after a step.

use serde::Serialize;

use inferno_types::Settings;

use crate::context::NpcTogglesExt;
use crate::game_data::Prayer;
use crate::roster::{ActorId, TrackedNpc};
use crate::world::{can_attack, Terrain, Tile};

use super::recommend::damage_weighted_prayer;

/// A neighbouring tile that would put the player in new line of fire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DangerousTile {
    pub tile: Tile,
    pub attackers: Vec<ActorId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovementThreats {
    pub dangerous_tiles: Vec<DangerousTile>,
    /// Prayer blocking the most damage among the new attackers
    pub emergency_prayer: Option<Prayer>,
}

pub fn detect_movement_threats(
    npcs: &[TrackedNpc],
    player: Tile,
    terrain: &Terrain,
    settings: &Settings,
) -> MovementThreats {
    let watched: Vec<&TrackedNpc> = npcs
        .iter()
        .filter(|npc| !npc.is_dead && settings.prayer_helper.allows(npc.npc_type))
        .collect();

    let mut dangerous_tiles = Vec::new();
    let mut new_threats: Vec<&TrackedNpc> = Vec::new();

    for tile in player.neighbours() {
        if terrain.is_obstacle(tile) {
            continue;
        }
        let attackers: Vec<&TrackedNpc> = watched
            .iter()
            .copied()
            .filter(|npc| {
                let area = npc.area();
                can_attack(&area, npc.info(), tile, terrain)
                    && !can_attack(&area, npc.info(), player, terrain)
            })
            .collect();
        if attackers.is_empty() {
            continue;
        }
        for &npc in &attackers {
            if !new_threats.iter().any(|seen| seen.actor == npc.actor) {
                new_threats.push(npc);
            }
        }
        dangerous_tiles.push(DangerousTile {
            tile,
            attackers: attackers.iter().map(|npc| npc.actor).collect(),
        });
    }

    MovementThreats {
        dangerous_tiles,
        emergency_prayer: damage_weighted_prayer(new_threats),
    }
}

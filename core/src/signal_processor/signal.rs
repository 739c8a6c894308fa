use serde::Serialize;

use crate::game_data::{NpcType, Recommendation};
use crate::roster::ActorId;

/// Why a recommendation was emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// The regular per-tick prediction
    Predicted,
    /// A step would expose the player to new attackers
    Emergency,
    /// The player clicked a classified tile
    TileClick,
}

/// Signals emitted by the InfernoEngine for the host adapter.
/// These represent "interesting things that happened" at a higher level
/// than raw host events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineSignal {
    RecommendationChanged {
        recommendation: Recommendation,
        source: RecommendationSource,
        tick: u64,
    },

    // Encounter lifecycle
    WaveChanged {
        wave: i32,
        /// -1 when there is no next wave
        next_wave: i32,
    },
    BossSpawned {
        actor: ActorId,
    },
    FinalPhaseStarted {
        tick: u64,
    },
    BossDespawned {
        actor: ActorId,
    },

    // Roster
    NpcTracked {
        actor: ActorId,
        npc_type: NpcType,
    },
    NpcRemoved {
        actor: ActorId,
        npc_type: NpcType,
    },
}

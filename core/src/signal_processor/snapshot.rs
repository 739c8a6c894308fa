//! Host-facing input and output shapes for one tick.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game_data::{Prayer, Recommendation};
use crate::roster::{ActorId, BlobDeathSpot, SpawnTimer};
use crate::safespot::SafeTileMap;
use crate::threats::{
    ClosestAttack, DigWarning, MovementThreats, NpcTickLabel, SimultaneousGroup, ThreatWindow,
};
use crate::world::Tile;

/// One actor as the host sees it this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorObservation {
    pub actor: ActorId,
    pub position: Tile,
    #[serde(default)]
    pub is_dead: bool,
    #[serde(default = "no_health_bar")]
    pub health_ratio: i32,
    #[serde(default = "no_health_bar")]
    pub health_scale: i32,
}

fn no_health_bar() -> i32 {
    -1
}

/// Everything the host reports at the start of a tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub player: Tile,
    #[serde(default)]
    pub active_prayer: Option<Prayer>,
    #[serde(default)]
    pub actors: Vec<ActorObservation>,
    /// Scene tiles that block both movement and sight (pillars, walls)
    #[serde(default)]
    pub blockers: Vec<Tile>,
}

/// Read-only results of the latest tick, for renderers
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickSnapshot {
    pub tick: u64,
    /// -1 when unknown or hidden by `wave_display`
    pub wave: i32,
    pub next_wave: i32,
    pub recommendation: Recommendation,

    // ─── Threats ────────────────────────────────────────────────────────────
    pub threat_window: ThreatWindow,
    pub closest_attack: Option<ClosestAttack>,
    pub attacks_by_tick: BTreeMap<i32, Vec<ActorId>>,
    /// Actors landing within the configured threshold of another attack
    pub near_simultaneous: Vec<ActorId>,
    pub simultaneous_groups: Vec<SimultaneousGroup>,
    pub movement: MovementThreats,

    // ─── Geometry ───────────────────────────────────────────────────────────
    pub safe_tiles: SafeTileMap,
    /// Safe tiles grouped by class (area display mode only)
    pub safe_areas: BTreeMap<u8, Vec<Tile>>,
    pub live_shield_shadow: Vec<Tile>,
    pub predicted_shield_shadow: Vec<Tile>,
    pub obstacle_count: usize,

    // ─── Annotations ────────────────────────────────────────────────────────
    pub tick_labels: Vec<NpcTickLabel>,
    pub dig_warnings: Vec<DigWarning>,
    pub central_nibbler: Option<ActorId>,
    pub nibbler_count: usize,
    pub death_spots: Vec<BlobDeathSpot>,
    pub spawn_timer: Option<SpawnTimer>,
}

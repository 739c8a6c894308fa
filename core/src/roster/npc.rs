//! A tracked hostile NPC and its attack clock.

use serde::Serialize;

use crate::game_data::{AttackKind, NpcType, NpcTypeInfo, Prayer};
use crate::world::{Area, Tile};

/// Stable host reference for an actor
pub type ActorId = u64;

/// Sentinel clock value: the NPC is not attacking at all
pub const SUSPENDED: i32 = -1;

#[derive(Debug, Clone, Serialize)]
pub struct TrackedNpc {
    pub actor: ActorId,
    pub npc_id: u32,
    pub npc_type: NpcType,
    /// South-west tile of the footprint
    pub position: Tile,

    // ─── Attack Clock ───────────────────────────────────────────────────────
    /// Ticks until the next attack lands; 0 = idle, -1 = suspended
    pub ticks_until_attack: i32,
    /// Ticks since the clock last rolled
    pub idle_ticks: i32,
    pub next_attack: AttackKind,
    /// Whether the clock has rolled at least once
    pub has_attacked: bool,

    // ─── Observation ────────────────────────────────────────────────────────
    pub is_dead: bool,
    pub health_ratio: i32,
    pub health_scale: i32,
}

impl TrackedNpc {
    pub fn new(actor: ActorId, npc_id: u32, npc_type: NpcType, position: Tile) -> Self {
        Self {
            actor,
            npc_id,
            npc_type,
            position,
            ticks_until_attack: 0,
            idle_ticks: 0,
            next_attack: npc_type.info().default_attack,
            has_attacked: false,
            is_dead: false,
            health_ratio: -1,
            health_scale: -1,
        }
    }

    pub fn info(&self) -> &'static NpcTypeInfo {
        self.npc_type.info()
    }

    pub fn area(&self) -> Area {
        Area::new(self.position, self.info().size)
    }

    pub fn is_suspended(&self) -> bool {
        self.ticks_until_attack == SUSPENDED
    }

    /// The prayer needed against the next attack, if it is known
    pub fn required_prayer(&self) -> Option<Prayer> {
        self.next_attack.prayer()
    }

    /// Roll the attack clock
    pub fn update_next_attack(&mut self, kind: AttackKind, ticks: i32) {
        self.next_attack = kind;
        self.ticks_until_attack = ticks;
        self.idle_ticks = 0;
        self.has_attacked = true;
    }

    pub fn suspend(&mut self) {
        self.ticks_until_attack = SUSPENDED;
    }
}

//! Hostile NPC classification for the Inferno.
//!
//! Every NPC id that takes part in the encounter maps to one closed
//! [`NpcType`], and every type has one static [`NpcTypeInfo`] row describing
//! how it attacks. The boss shield is recognised separately because it never
//! attacks and is never part of the roster.

use phf::phf_map;
use serde::{Deserialize, Serialize};

use super::attack::AttackKind;

/// NPC id of the shield that guards the player from the final boss
pub const ANCESTRAL_GLYPH: u32 = 7707;

/// Footprint size of the shield
pub const ANCESTRAL_GLYPH_SIZE: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcType {
    Nibbler,
    Bat,
    Blob,
    Meleer,
    Ranger,
    Mage,
    Jad,
    JadHealer,
    Zuk,
    ZukHealer,
}

/// Static attack profile of an NPC type
#[derive(Debug, Clone, Copy)]
pub struct NpcTypeInfo {
    pub default_attack: AttackKind,
    /// Lower wins when several attacks land on the same tick
    pub priority: i32,
    /// Attack range in tiles; 1 means the NPC must stand in melee distance
    pub range: i32,
    /// Ticks between consecutive attacks; 0 for NPCs without a periodic attack
    pub cycle: i32,
    /// Ticks between the attack animation and the hit landing
    pub ticks_after_animation: i32,
    pub size: i32,
    /// Known maximum hit, used to weigh prayers against each other
    pub max_damage: i32,
}

impl NpcTypeInfo {
    const fn new(
        default_attack: AttackKind,
        priority: i32,
        range: i32,
        cycle: i32,
        ticks_after_animation: i32,
        size: i32,
        max_damage: i32,
    ) -> Self {
        Self {
            default_attack,
            priority,
            range,
            cycle,
            ticks_after_animation,
            size,
            max_damage,
        }
    }

    /// Whether the NPC can only attack from melee distance
    pub fn is_melee_only(&self) -> bool {
        self.range <= 1
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Type Table
// ═══════════════════════════════════════════════════════════════════════════

const NIBBLER: NpcTypeInfo = NpcTypeInfo::new(AttackKind::Melee, 100, 99, 4, 4, 1, 30);
const BAT: NpcTypeInfo = NpcTypeInfo::new(AttackKind::Ranged, 7, 4, 3, 3, 2, 15);
const BLOB: NpcTypeInfo = NpcTypeInfo::new(AttackKind::Unknown, 4, 15, 6, 6, 3, 20);
const MELEER: NpcTypeInfo = NpcTypeInfo::new(AttackKind::Melee, 3, 1, 7, 4, 4, 35);
const RANGER: NpcTypeInfo = NpcTypeInfo::new(AttackKind::Ranged, 2, 98, 5, 4, 3, 40);
const MAGE: NpcTypeInfo = NpcTypeInfo::new(AttackKind::Magic, 1, 98, 5, 4, 4, 45);
const JAD: NpcTypeInfo = NpcTypeInfo::new(AttackKind::Unknown, 0, 99, 8, 3, 5, 97);
const JAD_HEALER: NpcTypeInfo = NpcTypeInfo::new(AttackKind::Melee, 6, 1, 4, 4, 1, 30);
const ZUK: NpcTypeInfo = NpcTypeInfo::new(AttackKind::Unknown, 99, 99, 10, 10, 7, 120);
const ZUK_HEALER: NpcTypeInfo = NpcTypeInfo::new(AttackKind::Unknown, 100, 99, 0, 0, 1, 30);

/// Zuk's attack cycle once its healers have spawned
pub const ZUK_FINAL_PHASE_CYCLE: i32 = 7;

impl NpcType {
    pub fn info(&self) -> &'static NpcTypeInfo {
        match self {
            NpcType::Nibbler => &NIBBLER,
            NpcType::Bat => &BAT,
            NpcType::Blob => &BLOB,
            NpcType::Meleer => &MELEER,
            NpcType::Ranger => &RANGER,
            NpcType::Mage => &MAGE,
            NpcType::Jad => &JAD,
            NpcType::JadHealer => &JAD_HEALER,
            NpcType::Zuk => &ZUK,
            NpcType::ZukHealer => &ZUK_HEALER,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NpcType::Nibbler => "Jal-Nib",
            NpcType::Bat => "Jal-MejRah",
            NpcType::Blob => "Jal-Ak",
            NpcType::Meleer => "Jal-ImKot",
            NpcType::Ranger => "Jal-Xil",
            NpcType::Mage => "Jal-Zek",
            NpcType::Jad => "JalTok-Jad",
            NpcType::JadHealer => "Yt-HurKot",
            NpcType::Zuk => "TzKal-Zuk",
            NpcType::ZukHealer => "Jal-MejJak",
        }
    }

    /// Known maximum hit, 30 when the type has no dedicated value
    pub fn max_damage(&self) -> i32 {
        self.info().max_damage
    }

    /// Attack cycle used for periodic coincidence checks
    pub fn cycle(&self) -> i32 {
        self.info().cycle
    }

    /// Types whose clocks never take part in simultaneous-attack detection
    pub fn excluded_from_simultaneous(&self) -> bool {
        matches!(
            self,
            NpcType::Nibbler | NpcType::JadHealer | NpcType::ZukHealer | NpcType::Zuk
        )
    }

    /// Types that only ever appear with a fixed default attack kind
    pub fn has_fixed_attack(&self) -> bool {
        self.info().default_attack != AttackKind::Unknown
    }
}

/// NPC id → type lookup
pub static NPC_TYPES: phf::Map<u32, NpcType> = phf_map! {
    7691u32 => NpcType::Nibbler,
    7692u32 => NpcType::Bat,
    7693u32 => NpcType::Blob,
    7697u32 => NpcType::Meleer,
    7698u32 => NpcType::Ranger,
    7702u32 => NpcType::Ranger,
    7699u32 => NpcType::Mage,
    7703u32 => NpcType::Mage,
    7700u32 => NpcType::Jad,
    7704u32 => NpcType::Jad,
    7701u32 => NpcType::JadHealer,
    7705u32 => NpcType::JadHealer,
    7706u32 => NpcType::Zuk,
    7708u32 => NpcType::ZukHealer,
};

/// Classify an NPC id, `None` for anything outside the encounter
pub fn lookup_npc_type(npc_id: u32) -> Option<NpcType> {
    NPC_TYPES.get(&npc_id).copied()
}

pub fn is_shield(npc_id: u32) -> bool {
    npc_id == ANCESTRAL_GLYPH
}

//! Animation ids the engine reacts to.

use phf::phf_map;

use super::attack::AttackKind;
use super::npcs::NpcType;

/// Nibbler burrowing back into the ground (it leaves the encounter)
pub const NIBBLER_BURROW: u32 = 7576;
/// Blob collapsing; its splits spawn on the same tile
pub const BLOB_DEATH: u32 = 7584;

/// An attack animation, tied to the NPC type that performs it
#[derive(Debug, Clone, Copy)]
pub struct AttackAnimation {
    pub npc_type: NpcType,
    pub kind: AttackKind,
}

impl AttackAnimation {
    const fn new(npc_type: NpcType, kind: AttackKind) -> Self {
        Self { npc_type, kind }
    }
}

/// Attack animation id → (performer, revealed attack kind)
pub static ATTACK_ANIMATIONS: phf::Map<u32, AttackAnimation> = phf_map! {
    7578u32 => AttackAnimation::new(NpcType::Bat, AttackKind::Ranged),
    7581u32 => AttackAnimation::new(NpcType::Blob, AttackKind::Ranged),
    7582u32 => AttackAnimation::new(NpcType::Blob, AttackKind::Melee),
    7583u32 => AttackAnimation::new(NpcType::Blob, AttackKind::Magic),
    7597u32 => AttackAnimation::new(NpcType::Meleer, AttackKind::Melee),
    7604u32 => AttackAnimation::new(NpcType::Ranger, AttackKind::Melee),
    7605u32 => AttackAnimation::new(NpcType::Ranger, AttackKind::Ranged),
    7610u32 => AttackAnimation::new(NpcType::Mage, AttackKind::Magic),
    7612u32 => AttackAnimation::new(NpcType::Mage, AttackKind::Melee),
    7592u32 => AttackAnimation::new(NpcType::Jad, AttackKind::Magic),
    7593u32 => AttackAnimation::new(NpcType::Jad, AttackKind::Ranged),
    7566u32 => AttackAnimation::new(NpcType::Zuk, AttackKind::Unknown),
};

/// The attack kind revealed by `animation` when performed by `npc_type`
pub fn attack_for_animation(npc_type: NpcType, animation: u32) -> Option<AttackKind> {
    ATTACK_ANIMATIONS
        .get(&animation)
        .filter(|anim| anim.npc_type == npc_type)
        .map(|anim| anim.kind)
}

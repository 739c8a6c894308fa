mod animations;
mod attack;
mod npcs;

pub use animations::{attack_for_animation, AttackAnimation, BLOB_DEATH, NIBBLER_BURROW};
pub use attack::{AttackKind, Prayer, Recommendation};
pub use npcs::{
    is_shield, lookup_npc_type, NpcType, NpcTypeInfo, ANCESTRAL_GLYPH, ANCESTRAL_GLYPH_SIZE,
    ZUK_FINAL_PHASE_CYCLE,
};

//! Per-NPC attack clocks.
//!
//! Every tracked NPC carries a countdown to its next landing attack. Clocks
//! tick down once per game tick and roll over to the type's attack cycle the
//! moment they hit zero. Observed attack animations resynchronise a clock
//! to the exact landing tick and reveal the attack kind.

use tracing::trace;

use crate::game_data::{attack_for_animation, AttackKind, NpcType, Prayer, ZUK_FINAL_PHASE_CYCLE};
use crate::roster::{BossPhaseState, TrackedNpc};
use crate::world::{can_attack, Terrain, Tile};

/// Clock forced onto the final boss while its shield rests in the first corner
pub const CORNER_STALL_TICKS: i32 = 12;

/// Final-phase ticks before the boss's faster clock starts
const FINAL_PHASE_GRACE_TICKS: i32 = 3;

/// Blob clock value on which it reads the player's prayer
pub const BLOB_DETECTION_TICK: i32 = 3;

/// Everything a clock needs to know about the world this tick
#[derive(Debug, Clone, Copy)]
pub struct AdvanceContext<'a> {
    pub tick: u64,
    pub final_phase: bool,
    pub ticks_since_final_phase: i32,
    pub player: Tile,
    /// Player tile on the previous tick
    pub previous_player: Option<Tile>,
    pub active_prayer: Option<Prayer>,
    pub terrain: &'a Terrain,
}

impl<'a> AdvanceContext<'a> {
    fn final_phase_clock_started(&self) -> bool {
        self.final_phase && self.ticks_since_final_phase > FINAL_PHASE_GRACE_TICKS
    }
}

/// Advance one NPC's clock by a tick
pub fn advance(npc: &mut TrackedNpc, ctx: &AdvanceContext<'_>) {
    let rolled = match npc.ticks_until_attack {
        t if t > 0 => {
            npc.ticks_until_attack -= 1;
            npc.ticks_until_attack == 0 && roll(npc, ctx)
        }
        0 => engage(npc, ctx),
        // suspended
        _ => return,
    };

    if !rolled {
        npc.idle_ticks += 1;
    }

    if npc.npc_type == NpcType::Blob && npc.ticks_until_attack == BLOB_DETECTION_TICK {
        detect_prayer(npc, ctx);
    }
}

/// Advance every clock, then apply the one-shot corner stall override
pub fn advance_all(npcs: &mut [TrackedNpc], phase: &mut BossPhaseState, ctx: &AdvanceContext<'_>) {
    for npc in npcs.iter_mut() {
        advance(npc, ctx);
        if npc.npc_type == NpcType::Zuk && phase.shield_tracker.is_corner_stall_armed() {
            trace!(tick = ctx.tick, "shield in corner, holding boss clock");
            npc.update_next_attack(AttackKind::Unknown, CORNER_STALL_TICKS);
            phase.shield_tracker.consume_corner_stall();
        }
    }
}

/// Resynchronise a clock from an attack animation. Returns true when the
/// animation was an attack by this NPC.
pub fn sync_from_animation(
    npc: &mut TrackedNpc,
    animation: u32,
    final_phase: bool,
    ticks_since_final_phase: i32,
) -> bool {
    let Some(kind) = attack_for_animation(npc.npc_type, animation) else {
        return false;
    };

    let ticks = if npc.npc_type == NpcType::Zuk && final_phase {
        if ticks_since_final_phase <= FINAL_PHASE_GRACE_TICKS {
            return false;
        }
        ZUK_FINAL_PHASE_CYCLE
    } else {
        npc.info().ticks_after_animation
    };

    trace!(actor = npc.actor, ?kind, ticks, "attack animation");
    npc.update_next_attack(kind, ticks);
    true
}

/// Kind of the next attack after a roll
fn rerolled_kind(npc_type: NpcType) -> AttackKind {
    match npc_type {
        // revealed by the animation, or by the blob's prayer read
        NpcType::Jad | NpcType::Blob | NpcType::Zuk => AttackKind::Unknown,
        other => other.info().default_attack,
    }
}

fn roll(npc: &mut TrackedNpc, ctx: &AdvanceContext<'_>) -> bool {
    let cycle = match npc.npc_type {
        NpcType::Zuk if ctx.final_phase => {
            if !ctx.final_phase_clock_started() {
                return false;
            }
            ZUK_FINAL_PHASE_CYCLE
        }
        other => other.cycle(),
    };
    if cycle <= 0 {
        return false;
    }
    npc.update_next_attack(rerolled_kind(npc.npc_type), cycle);
    true
}

/// An idle blob starts its cycle once the player is in its sights
fn engage(npc: &mut TrackedNpc, ctx: &AdvanceContext<'_>) -> bool {
    if npc.npc_type != NpcType::Blob {
        return false;
    }
    let area = npc.area();
    let info = npc.info();

    if ctx
        .previous_player
        .is_some_and(|tile| can_attack(&area, info, tile, ctx.terrain))
    {
        npc.update_next_attack(AttackKind::Unknown, BLOB_DETECTION_TICK);
        return true;
    }
    if !npc.has_attacked && can_attack(&area, info, ctx.player, ctx.terrain) {
        npc.update_next_attack(AttackKind::Unknown, BLOB_DETECTION_TICK + 1);
        return true;
    }
    false
}

/// The blob reads the player's prayer and attacks with the style it leaves open
fn detect_prayer(npc: &mut TrackedNpc, ctx: &AdvanceContext<'_>) {
    if npc.area().distance_to_tile(ctx.player) > npc.info().range {
        return;
    }
    npc.next_attack = match ctx.active_prayer {
        Some(Prayer::ProtectFromMissiles) => AttackKind::Magic,
        Some(Prayer::ProtectFromMagic) => AttackKind::Ranged,
        _ => AttackKind::Unknown,
    };
}

//! Hostile NPC roster, boss phase and roster-driven bookkeeping

mod death_spot;
mod npc;
mod phase;
mod spawn_timer;
mod tracker;


pub use death_spot::{BlobDeathSpot, BLOB_DEATH_SPOT_TICKS};
pub use npc::{ActorId, TrackedNpc, SUSPENDED};
pub use phase::{BossPhaseState, ShieldRef};
pub use spawn_timer::{estimate_hp, SpawnTimer, SPAWN_INTERVAL_TICKS, ZUK_MAX_HP};
pub use tracker::{
    parse_wave_message, AnimationOutcome, EntityTracker, SpawnOutcome, FINAL_WAVE,
};

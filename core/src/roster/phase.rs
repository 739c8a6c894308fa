//! Runtime boss-phase state
//!
//! Tracks the final boss's encounter state:
//! - Whether the healers have spawned (final phase) and for how long
//! - The shield actor and its movement history

use serde::Serialize;
use tracing::info;

use crate::safespot::ShieldTracker;
use crate::world::{Area, Tile};

use super::npc::ActorId;

/// The shield guarding the player from the final boss
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShieldRef {
    pub actor: ActorId,
    pub position: Tile,
}

impl ShieldRef {
    pub fn area(&self) -> Area {
        Area::new(self.position, crate::game_data::ANCESTRAL_GLYPH_SIZE)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BossPhaseState {
    /// Healers have spawned; the boss attacks faster
    pub final_phase: bool,
    /// Ticks since the healers spawned (starts at 1)
    pub ticks_since_final_phase: i32,
    /// Set on the tick the healers spawned so the counter skips that tick
    pub final_phase_began_this_tick: bool,

    pub shield: Option<ShieldRef>,
    pub shield_tracker: ShieldTracker,
}

impl BossPhaseState {
    /// The boss spawned: start a fresh fight
    pub fn begin_boss(&mut self) {
        self.final_phase = false;
        self.ticks_since_final_phase = 0;
        self.final_phase_began_this_tick = false;
        self.shield_tracker.reset();
    }

    /// Healers spawned. Returns true when this starts the final phase.
    pub fn begin_final_phase(&mut self) -> bool {
        let started = !self.final_phase;
        self.final_phase = true;
        self.ticks_since_final_phase = 1;
        self.final_phase_began_this_tick = true;
        if started {
            info!("final phase started");
        }
        started
    }

    /// End-of-tick bookkeeping for the elapsed counter
    pub fn advance(&mut self) {
        if !self.final_phase {
            return;
        }
        if self.final_phase_began_this_tick {
            self.final_phase_began_this_tick = false;
        } else {
            self.ticks_since_final_phase += 1;
        }
    }
}

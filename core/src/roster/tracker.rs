//! Roster of hostile NPCs for one Inferno run.
//!
//! The tracker owns every tracked NPC, the boss-phase state and the two
//! sibling concerns driven by roster events: blob death markers and the boss
//! spawn timer. It never advances attack clocks itself; that is the
//! predictor's job.

use tracing::{debug, trace};

use inferno_types::Settings;

use crate::game_data::{is_shield, lookup_npc_type, NpcType, BLOB_DEATH, NIBBLER_BURROW};
use crate::world::Tile;

use super::death_spot::BlobDeathSpot;
use super::npc::{ActorId, TrackedNpc};
use super::phase::{BossPhaseState, ShieldRef};
use super::spawn_timer::{estimate_hp, SpawnTimer, ZUK_MAX_HP};

/// Last wave of the run: the final boss
pub const FINAL_WAVE: i32 = 69;

/// What a spawn event did to the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Tracked(NpcType),
    /// Healers of the final boss started the final phase
    FinalPhaseStarted,
    Shield,
    Ignored,
}

/// What an animation event did to the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    Burrowed,
    BlobDied,
    /// Not a roster event; the attack clock may still care
    Passthrough,
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct EntityTracker {
    npcs: Vec<TrackedNpc>,
    pub phase: BossPhaseState,
    spawn_timer: Option<SpawnTimer>,
    death_spots: Vec<BlobDeathSpot>,
    /// Current wave, -1 until announced
    wave: i32,
}

impl EntityTracker {
    pub fn new() -> Self {
        Self {
            wave: -1,
            ..Default::default()
        }
    }

    /// Forget everything (left the encounter)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Roster Access
    // ─────────────────────────────────────────────────────────────────────────

    pub fn npcs(&self) -> &[TrackedNpc] {
        &self.npcs
    }

    pub fn npcs_mut(&mut self) -> &mut [TrackedNpc] {
        &mut self.npcs
    }

    /// Split borrow for passes that advance clocks and touch boss state together
    pub fn npcs_and_phase_mut(&mut self) -> (&mut [TrackedNpc], &mut BossPhaseState) {
        (&mut self.npcs, &mut self.phase)
    }

    pub fn get(&self, actor: ActorId) -> Option<&TrackedNpc> {
        self.npcs.iter().find(|npc| npc.actor == actor)
    }

    pub fn get_mut(&mut self, actor: ActorId) -> Option<&mut TrackedNpc> {
        self.npcs.iter_mut().find(|npc| npc.actor == actor)
    }

    pub fn zuk(&self) -> Option<&TrackedNpc> {
        self.npcs.iter().find(|npc| npc.npc_type == NpcType::Zuk)
    }

    pub fn has_type(&self, npc_type: NpcType) -> bool {
        self.npcs.iter().any(|npc| npc.npc_type == npc_type)
    }

    pub fn nibbler_count(&self) -> usize {
        self.npcs
            .iter()
            .filter(|npc| npc.npc_type == NpcType::Nibbler)
            .count()
    }

    pub fn spawn_timer(&self) -> Option<&SpawnTimer> {
        self.spawn_timer.as_ref()
    }

    pub fn death_spots(&self) -> &[BlobDeathSpot] {
        &self.death_spots
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    pub fn on_spawn(
        &mut self,
        actor: ActorId,
        npc_id: u32,
        position: Tile,
        settings: &Settings,
    ) -> SpawnOutcome {
        if is_shield(npc_id) {
            debug!(actor, "shield spawned");
            self.phase.shield = Some(ShieldRef { actor, position });
            return SpawnOutcome::Shield;
        }

        let Some(npc_type) = lookup_npc_type(npc_id) else {
            trace!(actor, npc_id, "ignoring unknown npc");
            return SpawnOutcome::Ignored;
        };

        let mut outcome = SpawnOutcome::Tracked(npc_type);
        match npc_type {
            NpcType::Mage => {
                if self.zuk().is_some()
                    && let Some(timer) = self.spawn_timer.as_mut()
                {
                    timer.reset();
                    timer.run();
                }
            }
            NpcType::Jad => {
                if self.zuk().is_some()
                    && let Some(timer) = self.spawn_timer.as_mut()
                {
                    timer.reset();
                }
            }
            NpcType::Zuk => {
                self.phase.begin_boss();
                self.spawn_timer = settings.spawn_timer_infobox.then(SpawnTimer::new_running);
            }
            NpcType::ZukHealer => {
                if self.phase.begin_final_phase() {
                    outcome = SpawnOutcome::FinalPhaseStarted;
                }
                for zuk in self.npcs.iter_mut().filter(|npc| npc.npc_type == NpcType::Zuk) {
                    zuk.suspend();
                }
            }
            _ => {}
        }

        let npc = TrackedNpc::new(actor, npc_id, npc_type, position);
        debug!(actor, npc = npc_type.name(), x = position.x, y = position.y, "npc tracked");
        // Blobs go last so their detection-tick fan-out sees the others first
        if npc_type == NpcType::Blob {
            self.npcs.push(npc);
        } else {
            self.npcs.insert(0, npc);
        }
        outcome
    }

    /// Remove a despawned actor, returning its type if it was tracked
    pub fn on_despawn(&mut self, actor: ActorId) -> Option<NpcType> {
        if self.phase.shield.is_some_and(|shield| shield.actor == actor) {
            debug!(actor, "shield despawned");
            self.phase.shield = None;
            return None;
        }

        let index = self.npcs.iter().position(|npc| npc.actor == actor)?;
        let npc = self.npcs.remove(index);
        if npc.npc_type == NpcType::Zuk {
            self.spawn_timer = None;
        }
        debug!(actor, npc = npc.npc_type.name(), "npc removed");
        Some(npc.npc_type)
    }

    pub fn on_animation(
        &mut self,
        actor: ActorId,
        animation: u32,
        settings: &Settings,
    ) -> AnimationOutcome {
        let Some(index) = self.npcs.iter().position(|npc| npc.actor == actor) else {
            return AnimationOutcome::Ignored;
        };
        let npc_type = self.npcs[index].npc_type;

        if npc_type == NpcType::Nibbler && animation == NIBBLER_BURROW {
            self.npcs.remove(index);
            return AnimationOutcome::Burrowed;
        }

        if npc_type == NpcType::Blob
            && animation == BLOB_DEATH
            && settings.indicate_blob_death_location
        {
            let npc = self.npcs.remove(index);
            debug!(actor, x = npc.position.x, y = npc.position.y, "blob died");
            self.death_spots.push(BlobDeathSpot::new(npc.position));
            return AnimationOutcome::BlobDied;
        }

        AnimationOutcome::Passthrough
    }

    /// Apply one tick of host observations to a tracked actor
    pub fn observe(
        &mut self,
        actor: ActorId,
        position: Tile,
        is_dead: bool,
        health_ratio: i32,
        health_scale: i32,
    ) {
        if let Some(shield) = self.phase.shield.as_mut().filter(|s| s.actor == actor) {
            shield.position = position;
            return;
        }
        if let Some(npc) = self.get_mut(actor) {
            npc.position = position;
            npc.is_dead = is_dead;
            npc.health_ratio = health_ratio;
            npc.health_scale = health_scale;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Waves
    // ─────────────────────────────────────────────────────────────────────────

    pub fn wave(&self) -> i32 {
        self.wave
    }

    pub fn set_wave(&mut self, wave: i32) {
        self.wave = wave;
    }

    pub fn is_final_wave(&self) -> bool {
        self.wave == FINAL_WAVE
    }

    /// The upcoming wave, or -1 when unknown or on the final wave
    pub fn next_wave_number(&self) -> i32 {
        if self.wave == -1 || self.wave == FINAL_WAVE {
            -1
        } else {
            self.wave + 1
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tick Bookkeeping
    // ─────────────────────────────────────────────────────────────────────────

    /// Drive the spawn timer from the boss's health bar
    pub fn update_spawn_timer(&mut self) {
        let Some(zuk) = self.zuk() else {
            return;
        };
        if self.phase.final_phase {
            return;
        }
        let hp = estimate_hp(zuk.health_ratio, zuk.health_scale, ZUK_MAX_HP);
        let Some(timer) = self.spawn_timer.as_mut() else {
            return;
        };
        if hp > 0 {
            timer.update_from_hp(hp);
        }
        timer.tick();
    }

    pub fn age_death_spots(&mut self) {
        for spot in &mut self.death_spots {
            spot.decrement_tick();
        }
        self.death_spots.retain(|spot| !spot.is_done());
    }

    /// The nibbler with the most nibblers packed around it, ties broken by
    /// distance to the player
    pub fn central_nibbler(&self, player: Tile) -> Option<&TrackedNpc> {
        let nibblers: Vec<&TrackedNpc> = self
            .npcs
            .iter()
            .filter(|npc| npc.npc_type == NpcType::Nibbler)
            .collect();

        nibblers
            .iter()
            .map(|&candidate| {
                let area = candidate.area();
                let neighbours = nibblers
                    .iter()
                    .filter(|other| area.distance_to(&other.area()) <= 1)
                    .count();
                (candidate, neighbours)
            })
            .max_by(|(a, count_a), (b, count_b)| {
                count_a.cmp(count_b).then_with(|| {
                    // closer wins, so compare distances reversed
                    b.area()
                        .distance_to_tile(player)
                        .cmp(&a.area().distance_to_tile(player))
                })
            })
            .map(|(npc, _)| npc)
    }
}

/// Extract the wave number from a chat message such as `<col=ef1020>Wave: 12</col>`
pub fn parse_wave_message(message: &str) -> Option<i32> {
    let start = message.find("Wave: ")? + "Wave: ".len();
    let digits: String = message[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

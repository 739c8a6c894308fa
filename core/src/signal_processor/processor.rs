use tracing::{debug, trace};

use inferno_types::{SafespotDisplayMode, Settings};

use crate::game_data::{NpcType, Prayer, Recommendation};
use crate::prediction::{advance_all, sync_from_animation, AdvanceContext};
use crate::roster::{
    parse_wave_message, ActorId, AnimationOutcome, EntityTracker, SpawnOutcome, FINAL_WAVE,
};
use crate::safespot::{compute_safe_tile_map, mark_shadows, shadow_tiles};
use crate::threats::{
    attacks_by_tick, build_threat_window, closest_attack, decide, detect_movement_threats,
    detect_simultaneous, dig_warnings, near_simultaneous, prayer_for_exposure, tick_labels,
};
use crate::world::{Terrain, Tile};

use super::signal::{EngineSignal, RecommendationSource};
use super::snapshot::{TickSnapshot, WorldSnapshot};

/// Owns all state of one Inferno run and turns host events into signals.
///
/// Every method takes `&mut self`; the host must feed events from a single
/// thread (or behind a lock) so a tick is never interleaved with roster
/// mutations.
pub struct InfernoEngine {
    settings: Settings,
    tracker: EntityTracker,
    tick_count: u64,
    player: Option<Tile>,
    last_recommendation: Recommendation,
    last_emergency: Option<Prayer>,
    snapshot: TickSnapshot,
}

impl Default for InfernoEngine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl InfernoEngine {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            tracker: EntityTracker::new(),
            tick_count: 0,
            player: None,
            last_recommendation: Recommendation::None,
            last_emergency: None,
            snapshot: TickSnapshot::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn tracker(&self) -> &EntityTracker {
        &self.tracker
    }

    pub fn snapshot(&self) -> &TickSnapshot {
        &self.snapshot
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn last_recommendation(&self) -> Recommendation {
        self.last_recommendation
    }

    /// Leave the encounter: drop every piece of run state
    pub fn reset(&mut self) {
        debug!("engine reset");
        self.tracker.reset();
        self.tick_count = 0;
        self.player = None;
        self.last_recommendation = Recommendation::None;
        self.last_emergency = None;
        self.snapshot = TickSnapshot::default();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Roster Events
    // ─────────────────────────────────────────────────────────────────────────

    pub fn on_spawn(&mut self, actor: ActorId, npc_id: u32, position: Tile) -> Vec<EngineSignal> {
        match self.tracker.on_spawn(actor, npc_id, position, &self.settings) {
            SpawnOutcome::Tracked(npc_type) => {
                let mut signals = vec![EngineSignal::NpcTracked { actor, npc_type }];
                if npc_type == NpcType::Zuk {
                    signals.push(EngineSignal::BossSpawned { actor });
                }
                signals
            }
            SpawnOutcome::FinalPhaseStarted => vec![
                EngineSignal::NpcTracked {
                    actor,
                    npc_type: NpcType::ZukHealer,
                },
                EngineSignal::FinalPhaseStarted {
                    tick: self.tick_count,
                },
            ],
            SpawnOutcome::Shield | SpawnOutcome::Ignored => Vec::new(),
        }
    }

    pub fn on_despawn(&mut self, actor: ActorId) -> Vec<EngineSignal> {
        let Some(npc_type) = self.tracker.on_despawn(actor) else {
            return Vec::new();
        };
        let mut signals = vec![EngineSignal::NpcRemoved { actor, npc_type }];
        if npc_type == NpcType::Zuk {
            signals.push(EngineSignal::BossDespawned { actor });
        }
        signals
    }

    pub fn on_animation(&mut self, actor: ActorId, animation: u32) -> Vec<EngineSignal> {
        let npc_type = self.tracker.get(actor).map(|npc| npc.npc_type);
        match self.tracker.on_animation(actor, animation, &self.settings) {
            AnimationOutcome::Burrowed | AnimationOutcome::BlobDied => npc_type
                .map(|npc_type| EngineSignal::NpcRemoved { actor, npc_type })
                .into_iter()
                .collect(),
            AnimationOutcome::Passthrough => {
                let final_phase = self.tracker.phase.final_phase;
                let since = self.tracker.phase.ticks_since_final_phase;
                if let Some(npc) = self.tracker.get_mut(actor) {
                    sync_from_animation(npc, animation, final_phase, since);
                }
                Vec::new()
            }
            AnimationOutcome::Ignored => Vec::new(),
        }
    }

    pub fn on_wave_announced(&mut self, wave: i32) -> Vec<EngineSignal> {
        debug!(wave, "wave announced");
        self.tracker.set_wave(wave);
        vec![EngineSignal::WaveChanged {
            wave,
            next_wave: self.tracker.next_wave_number(),
        }]
    }

    /// Feed a game chat message; wave announcements update the wave
    pub fn on_chat_message(&mut self, message: &str) -> Vec<EngineSignal> {
        match parse_wave_message(message) {
            Some(wave) => self.on_wave_announced(wave),
            None => Vec::new(),
        }
    }

    /// Immediate prayer for a clicked tile. Always emitted, even when it
    /// repeats the current recommendation; `None` when the tile is not in
    /// the safe-tile map.
    pub fn on_tile_clicked(&mut self, x: i32, y: i32) -> Option<EngineSignal> {
        let mask = self.snapshot.safe_tiles.get(Tile::new(x, y))?;
        let recommendation = prayer_for_exposure(mask, self.tracker.npcs(), &self.settings);
        debug!(x, y, class = mask.bits(), %recommendation, "tile clicked");
        self.last_recommendation = recommendation;
        Some(EngineSignal::RecommendationChanged {
            recommendation,
            source: RecommendationSource::TileClick,
            tick: self.tick_count,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tick
    // ─────────────────────────────────────────────────────────────────────────

    pub fn on_tick(&mut self, world: &WorldSnapshot) -> Vec<EngineSignal> {
        let mut signals = Vec::new();
        let settings = &self.settings;
        self.tick_count = world.tick;
        let previous_player = self.player.replace(world.player);

        // ═══════════════════════════════════════════════════════════════════════
        // PHASE 1: Observations and terrain
        // ═══════════════════════════════════════════════════════════════════════

        for observed in &world.actors {
            self.tracker.observe(
                observed.actor,
                observed.position,
                observed.is_dead,
                observed.health_ratio,
                observed.health_scale,
            );
        }
        let terrain = self.build_terrain(&world.blockers);

        // ═══════════════════════════════════════════════════════════════════════
        // PHASE 2: Attack clocks
        // ═══════════════════════════════════════════════════════════════════════

        let ctx = AdvanceContext {
            tick: world.tick,
            final_phase: self.tracker.phase.final_phase,
            ticks_since_final_phase: self.tracker.phase.ticks_since_final_phase,
            player: world.player,
            previous_player,
            active_prayer: world.active_prayer,
            terrain: &terrain,
        };
        let (npcs, phase) = self.tracker.npcs_and_phase_mut();
        advance_all(npcs, phase, &ctx);

        // ═══════════════════════════════════════════════════════════════════════
        // PHASE 3: Threats and the recommendation
        // ═══════════════════════════════════════════════════════════════════════

        let npcs = self.tracker.npcs();
        let mut snapshot = TickSnapshot {
            tick: world.tick,
            wave: if settings.wave_display.shows_current() {
                self.tracker.wave()
            } else {
                -1
            },
            next_wave: if settings.wave_display.shows_next() {
                self.tracker.next_wave_number()
            } else {
                -1
            },
            obstacle_count: terrain.obstacle_count(),
            threat_window: build_threat_window(npcs, settings),
            ..TickSnapshot::default()
        };

        if settings.tracks_attacks_by_tick() {
            snapshot.attacks_by_tick = attacks_by_tick(npcs, settings);
            let mut flagged: Vec<ActorId> =
                near_simultaneous(&snapshot.attacks_by_tick, settings.simultaneous_attack_threshold)
                    .into_iter()
                    .collect();
            flagged.sort_unstable();
            snapshot.near_simultaneous = flagged;
        }
        if settings.prayer_display_mode.shows_prayer_tab() {
            snapshot.closest_attack = closest_attack(&snapshot.threat_window);
        }

        if settings.proactive_threat_detection {
            snapshot.movement = detect_movement_threats(npcs, world.player, &terrain, settings);
            if settings.emergency_prayer_switching
                && snapshot.movement.emergency_prayer != self.last_emergency
            {
                self.last_emergency = snapshot.movement.emergency_prayer;
                if let Some(prayer) = self.last_emergency {
                    let recommendation = Recommendation::from(Some(prayer));
                    self.last_recommendation = recommendation;
                    signals.push(EngineSignal::RecommendationChanged {
                        recommendation,
                        source: RecommendationSource::Emergency,
                        tick: world.tick,
                    });
                }
            }
        }

        let recommendation = decide(&snapshot.threat_window, npcs, settings, world.tick);
        snapshot.recommendation = recommendation;
        if recommendation != self.last_recommendation {
            trace!(tick = world.tick, %recommendation, "recommendation changed");
            self.last_recommendation = recommendation;
            signals.push(EngineSignal::RecommendationChanged {
                recommendation,
                source: RecommendationSource::Predicted,
                tick: world.tick,
            });
        }

        // ═══════════════════════════════════════════════════════════════════════
        // PHASE 4: Safespots
        // ═══════════════════════════════════════════════════════════════════════

        if self.tracker.wave() < FINAL_WAVE {
            if settings.safespot_display_mode != SafespotDisplayMode::Off {
                snapshot.safe_tiles = compute_safe_tile_map(npcs, world.player, &terrain, settings);
                if settings.safespot_display_mode == SafespotDisplayMode::Area {
                    snapshot.safe_areas = snapshot.safe_tiles.group_by_class();
                }
            }
        } else if let Some(shield) = self.tracker.phase.shield {
            let final_phase = self.tracker.phase.final_phase;
            let zuk_ticks = self.tracker.zuk().map(|zuk| zuk.ticks_until_attack);
            let tracker = &mut self.tracker.phase.shield_tracker;
            tracker.update(shield.position);

            let display = settings.shield_display(final_phase);
            if display.shows_live() {
                snapshot.live_shield_shadow = shadow_tiles(shield.position);
            }
            if display.shows_prediction()
                && let Some(predicted) =
                    zuk_ticks.and_then(|ticks| tracker.predict(ticks, final_phase))
            {
                snapshot.predicted_shield_shadow = shadow_tiles(predicted);
            }

            if settings.safespot_display_mode != SafespotDisplayMode::Off {
                mark_shadows(
                    &mut snapshot.safe_tiles,
                    &snapshot.live_shield_shadow,
                    &snapshot.predicted_shield_shadow,
                );
                if settings.safespot_display_mode == SafespotDisplayMode::Area {
                    snapshot.safe_areas = snapshot.safe_tiles.group_by_class();
                }
            }
        }

        // ═══════════════════════════════════════════════════════════════════════
        // PHASE 5: Annotations
        // ═══════════════════════════════════════════════════════════════════════

        let npcs = self.tracker.npcs();
        snapshot.simultaneous_groups = detect_simultaneous(npcs);
        snapshot.tick_labels = tick_labels(npcs, settings, &snapshot.simultaneous_groups);
        snapshot.dig_warnings = dig_warnings(npcs, settings);
        snapshot.central_nibbler = self
            .tracker
            .central_nibbler(world.player)
            .map(|npc| npc.actor);
        snapshot.nibbler_count = self.tracker.nibbler_count();

        // ═══════════════════════════════════════════════════════════════════════
        // PHASE 6: End-of-tick bookkeeping
        // ═══════════════════════════════════════════════════════════════════════

        self.tracker.update_spawn_timer();
        self.tracker.age_death_spots();
        self.tracker.phase.advance();

        snapshot.death_spots = self.tracker.death_spots().to_vec();
        snapshot.spawn_timer = self.tracker.spawn_timer().cloned();
        self.snapshot = snapshot;
        signals
    }

    /// Scene blockers plus every tracked footprint and the shield
    fn build_terrain(&self, blockers: &[Tile]) -> Terrain {
        let mut terrain = Terrain::with_blockers(blockers.iter().copied());
        for npc in self.tracker.npcs() {
            terrain.add_footprint(&npc.area());
        }
        if let Some(shield) = self.tracker.phase.shield {
            terrain.add_footprint(&shield.area());
        }
        terrain
    }
}

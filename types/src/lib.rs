//! Shared configuration types for the Inferno assistant
//!
//! This crate contains serializable settings shared between the engine
//! (inferno-core) and any front-end that edits or displays them. Every field
//! carries a serde default so partial or older settings files still load.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Display Modes
// ─────────────────────────────────────────────────────────────────────────────

/// Where the prayer recommendation is surfaced to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrayerDisplayMode {
    /// Highlight the prayer in the prayer tab
    PrayerTab,
    /// Descending boxes in the bottom right corner
    BottomRight,
    /// Both of the above
    #[default]
    Both,
}

impl PrayerDisplayMode {
    /// Whether the prayer-tab highlight (and thus the closest attack) is shown
    pub fn shows_prayer_tab(&self) -> bool {
        matches!(self, PrayerDisplayMode::PrayerTab | PrayerDisplayMode::Both)
    }
}

/// How safe tiles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafespotDisplayMode {
    Off,
    IndividualTiles,
    #[default]
    Area,
}

/// Which shield shadow(s) to show during the final wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShieldDisplayMode {
    Off,
    #[default]
    Live,
    Predict,
    LivePlusPredict,
}

impl ShieldDisplayMode {
    pub fn shows_live(&self) -> bool {
        matches!(self, ShieldDisplayMode::Live | ShieldDisplayMode::LivePlusPredict)
    }

    pub fn shows_prediction(&self) -> bool {
        matches!(
            self,
            ShieldDisplayMode::Predict | ShieldDisplayMode::LivePlusPredict
        )
    }
}

/// Which wave numbers the wave overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveDisplayMode {
    None,
    Current,
    Next,
    #[default]
    Both,
}

impl WaveDisplayMode {
    pub fn shows_current(&self) -> bool {
        matches!(self, WaveDisplayMode::Current | WaveDisplayMode::Both)
    }

    pub fn shows_next(&self) -> bool {
        matches!(self, WaveDisplayMode::Next | WaveDisplayMode::Both)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-NPC Toggles
// ─────────────────────────────────────────────────────────────────────────────

/// One opt-in flag per hostile type that a feature can be scoped to.
///
/// Nibblers and the final boss's healers are never part of these features,
/// so they have no flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcToggles {
    #[serde(default = "default_true")]
    pub bat: bool,
    #[serde(default = "default_true")]
    pub blob: bool,
    #[serde(default = "default_true")]
    pub meleer: bool,
    #[serde(default = "default_true")]
    pub ranger: bool,
    #[serde(default = "default_true")]
    pub mage: bool,
    #[serde(default = "default_true")]
    pub jad_healer: bool,
    #[serde(default = "default_true")]
    pub jad: bool,
    #[serde(default)]
    pub zuk: bool,
}

impl Default for NpcToggles {
    fn default() -> Self {
        Self {
            bat: true,
            blob: true,
            meleer: true,
            ranger: true,
            mage: true,
            jad_healer: true,
            jad: true,
            zuk: false,
        }
    }
}

impl NpcToggles {
    pub fn all_off() -> Self {
        Self {
            bat: false,
            blob: false,
            meleer: false,
            ranger: false,
            mage: false,
            jad_healer: false,
            jad: false,
            zuk: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Read-only settings consulted by the engine every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // ─── Prayer ─────────────────────────────────────────────────────────────
    #[serde(default)]
    pub prayer_display_mode: PrayerDisplayMode,
    /// Which NPC types contribute to the prayer recommendation
    #[serde(default)]
    pub prayer_helper: NpcToggles,
    /// Fan blob attacks out to their detection tick
    #[serde(default = "default_true")]
    pub indicate_blob_detection_tick: bool,
    #[serde(default)]
    pub auto_pray: bool,
    /// Only recommend a prayer on even ticks (one-tick flicking)
    #[serde(default)]
    pub one_tick_pray: bool,
    /// Fall back to melee protection when Jad is alive and nothing lands next tick
    #[serde(default)]
    pub off_tick_melee_jad: bool,

    // ─── Attack Timers ──────────────────────────────────────────────────────
    #[serde(default)]
    pub show_attack_timer_overlay: bool,
    #[serde(default)]
    pub proactive_threat_detection: bool,
    #[serde(default)]
    pub emergency_prayer_switching: bool,
    /// Attacks landing within this many ticks of each other are grouped
    #[serde(default = "default_simultaneous_threshold")]
    pub simultaneous_attack_threshold: u32,
    /// Which NPC types get a tick countdown label
    #[serde(default = "default_ticks_on_npc")]
    pub ticks_on_npc: NpcToggles,

    // ─── Safespots ──────────────────────────────────────────────────────────
    #[serde(default)]
    pub safespot_display_mode: SafespotDisplayMode,
    /// Side length of the square of tiles checked around the player
    #[serde(default = "default_safespots_check_size")]
    pub safespots_check_size: u32,
    #[serde(default)]
    pub safespots: NpcToggles,

    // ─── Final Wave ─────────────────────────────────────────────────────────
    #[serde(default = "default_shield_before_healers")]
    pub shield_before_healers: ShieldDisplayMode,
    #[serde(default = "default_shield_after_healers")]
    pub shield_after_healers: ShieldDisplayMode,
    #[serde(default = "default_true")]
    pub spawn_timer_infobox: bool,

    // ─── Misc ───────────────────────────────────────────────────────────────
    #[serde(default = "default_true")]
    pub indicate_blob_death_location: bool,
    /// Idle ticks before a meleer is flagged as about to dig
    #[serde(default = "default_dig_timer_threshold")]
    pub dig_timer_threshold: u32,
    #[serde(default = "default_dig_timer_danger_threshold")]
    pub dig_timer_danger_threshold: u32,
    #[serde(default)]
    pub wave_display: WaveDisplayMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prayer_display_mode: PrayerDisplayMode::default(),
            prayer_helper: NpcToggles::default(),
            indicate_blob_detection_tick: true,
            auto_pray: false,
            one_tick_pray: false,
            off_tick_melee_jad: false,
            show_attack_timer_overlay: false,
            proactive_threat_detection: false,
            emergency_prayer_switching: false,
            simultaneous_attack_threshold: default_simultaneous_threshold(),
            ticks_on_npc: default_ticks_on_npc(),
            safespot_display_mode: SafespotDisplayMode::default(),
            safespots_check_size: default_safespots_check_size(),
            safespots: NpcToggles::default(),
            shield_before_healers: default_shield_before_healers(),
            shield_after_healers: default_shield_after_healers(),
            spawn_timer_infobox: true,
            indicate_blob_death_location: true,
            dig_timer_threshold: default_dig_timer_threshold(),
            dig_timer_danger_threshold: default_dig_timer_danger_threshold(),
            wave_display: WaveDisplayMode::default(),
        }
    }
}

impl Settings {
    /// Shield display mode for the current half of the final wave
    pub fn shield_display(&self, healers_spawned: bool) -> ShieldDisplayMode {
        if healers_spawned {
            self.shield_after_healers
        } else {
            self.shield_before_healers
        }
    }

    /// Whether the per-tick attack bookkeeping (attacks by tick) is needed
    pub fn tracks_attacks_by_tick(&self) -> bool {
        self.show_attack_timer_overlay || self.proactive_threat_detection
    }
}

fn default_true() -> bool {
    true
}

fn default_simultaneous_threshold() -> u32 {
    1
}

fn default_ticks_on_npc() -> NpcToggles {
    NpcToggles {
        zuk: true,
        ..NpcToggles::default()
    }
}

fn default_safespots_check_size() -> u32 {
    6
}

fn default_shield_before_healers() -> ShieldDisplayMode {
    ShieldDisplayMode::Live
}

fn default_shield_after_healers() -> ShieldDisplayMode {
    ShieldDisplayMode::LivePlusPredict
}

fn default_dig_timer_threshold() -> u32 {
    20
}

fn default_dig_timer_danger_threshold() -> u32 {
    30
}

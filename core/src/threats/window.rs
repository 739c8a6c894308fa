//! Upcoming attacks keyed by tick offset.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::Serialize;

use inferno_types::Settings;

use crate::context::NpcTogglesExt;
use crate::game_data::{AttackKind, NpcType};
use crate::roster::TrackedNpc;

/// Attack kinds in tie-break order
pub const KIND_ORDER: [AttackKind; 3] = [AttackKind::Melee, AttackKind::Ranged, AttackKind::Magic];

/// Ticks before a blob attack lands at which it reads the player's prayer
const BLOB_DETECTION_OFFSET: i32 = 3;
/// The tick before detection, when the player should already be praying
const BLOB_PRE_DETECTION_OFFSET: i32 = 4;

/// Tick offset → attack kind → best (lowest) priority landing then
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThreatWindow {
    ticks: BTreeMap<i32, HashMap<AttackKind, i32>>,
}

impl ThreatWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.values().all(|kinds| kinds.is_empty())
    }

    pub fn get(&self, tick: i32, kind: AttackKind) -> Option<i32> {
        self.ticks.get(&tick).and_then(|kinds| kinds.get(&kind)).copied()
    }

    pub fn contains(&self, tick: i32, kind: AttackKind) -> bool {
        self.get(tick, kind).is_some()
    }

    /// Record an attack, never replacing a better priority with a worse one
    pub fn put_min(&mut self, tick: i32, kind: AttackKind, priority: i32) {
        let slot = self.ticks.entry(tick).or_default().entry(kind).or_insert(priority);
        *slot = (*slot).min(priority);
    }

    /// Lower an existing entry to `priority` if that is better
    fn lower_existing(&mut self, tick: i32, kind: AttackKind, priority: i32) {
        if let Some(slot) = self.ticks.get_mut(&tick).and_then(|kinds| kinds.get_mut(&kind)) {
            *slot = (*slot).min(priority);
        }
    }

    /// Entries on `tick` in tie-break order
    pub fn at(&self, tick: i32) -> Vec<(AttackKind, i32)> {
        KIND_ORDER
            .iter()
            .filter_map(|&kind| self.get(tick, kind).map(|priority| (kind, priority)))
            .collect()
    }

    /// All entries ordered by tick, then tie-break order
    pub fn iter(&self) -> impl Iterator<Item = (i32, AttackKind, i32)> + '_ {
        self.ticks
            .keys()
            .flat_map(move |&tick| self.at(tick).into_iter().map(move |(kind, p)| (tick, kind, p)))
    }
}

/// Whether an NPC's next attack belongs in the window
fn contributes(npc: &TrackedNpc, settings: &Settings) -> bool {
    if npc.ticks_until_attack <= 0 || !settings.prayer_helper.allows(npc.npc_type) {
        return false;
    }
    if matches!(npc.npc_type, NpcType::Ranger | NpcType::Mage) && npc.is_dead {
        return false;
    }
    npc.next_attack != AttackKind::Unknown || fans_out(npc, settings)
}

fn fans_out(npc: &TrackedNpc, settings: &Settings) -> bool {
    npc.npc_type == NpcType::Blob
        && settings.indicate_blob_detection_tick
        && npc.ticks_until_attack >= BLOB_PRE_DETECTION_OFFSET
}

/// Build the window from every opted-in NPC's clock
pub fn build_threat_window(npcs: &[TrackedNpc], settings: &Settings) -> ThreatWindow {
    let mut window = ThreatWindow::new();

    for npc in npcs.iter().filter(|npc| contributes(npc, settings)) {
        let ticks = npc.ticks_until_attack;
        let priority = npc.info().priority;

        if fans_out(npc, settings) {
            fan_out_blob(&mut window, ticks, priority);
        } else {
            window.put_min(ticks, npc.next_attack, priority);
        }
    }
    window
}

/// Advertise a prayer on the blob's detection tick that leaves the blob's
/// real attack covered by whatever else lands around it.
fn fan_out_blob(window: &mut ThreatWindow, ticks: i32, priority: i32) {
    let detect = ticks - BLOB_DETECTION_OFFSET;
    let before = ticks - BLOB_PRE_DETECTION_OFFSET;
    let around = |window: &ThreatWindow, kind| window.contains(ticks, kind) || window.contains(before, kind);

    if window.contains(detect, AttackKind::Magic) {
        window.lower_existing(detect, AttackKind::Magic, priority);
    } else if window.contains(detect, AttackKind::Ranged) {
        window.lower_existing(detect, AttackKind::Ranged, priority);
    } else if around(window, AttackKind::Magic) {
        window.put_min(detect, AttackKind::Ranged, priority);
    } else if around(window, AttackKind::Ranged) {
        window.put_min(detect, AttackKind::Magic, priority);
    } else {
        window.put_min(detect, AttackKind::Magic, priority);
    }
}

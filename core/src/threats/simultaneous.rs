//! Attacks that land together and need different prayers.
//!
//! Two NPCs conflict when they need different prayers and their attack
//! cycles line up now or on some later cycle. Conflicting pairs are merged
//! into connected groups so each group can be highlighted together.

use std::collections::{BTreeMap, VecDeque};

use hashbrown::HashSet;
use serde::Serialize;

use inferno_types::Settings;

use crate::context::NpcTogglesExt;
use crate::game_data::Prayer;
use crate::roster::{ActorId, TrackedNpc};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimultaneousGroup {
    /// Member actors, ordered by their clocks
    pub members: Vec<ActorId>,
    /// Earliest clock among the members
    pub tick: i32,
    pub prayers: Vec<Prayer>,
    /// Sum of member max hits; display emphasis only
    pub severity: i32,
    /// Stable index for picking a highlight colour
    pub color_index: usize,
}

pub fn gcd(a: i32, b: i32) -> i32 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn eligible(npc: &TrackedNpc) -> bool {
    npc.ticks_until_attack > 0 && !npc.is_dead && !npc.npc_type.excluded_from_simultaneous()
}

/// Whether two NPCs' attacks coincide, now or periodically, with conflicting prayers
pub fn conflicts(a: &TrackedNpc, b: &TrackedNpc) -> bool {
    let (Some(prayer_a), Some(prayer_b)) = (a.required_prayer(), b.required_prayer()) else {
        return false;
    };
    if prayer_a == prayer_b {
        return false;
    }
    let divisor = gcd(a.npc_type.cycle(), b.npc_type.cycle());
    divisor > 0 && (a.ticks_until_attack - b.ticks_until_attack).abs() % divisor == 0
}

/// Group every conflicting pair of eligible NPCs
pub fn detect_simultaneous(npcs: &[TrackedNpc]) -> Vec<SimultaneousGroup> {
    let candidates: Vec<&TrackedNpc> = npcs.iter().filter(|npc| eligible(npc)).collect();

    let mut edges: Vec<Vec<usize>> = vec![Vec::new(); candidates.len()];
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            if conflicts(candidates[i], candidates[j]) {
                edges[i].push(j);
                edges[j].push(i);
            }
        }
    }

    let mut visited = vec![false; candidates.len()];
    let mut groups = Vec::new();
    for start in 0..candidates.len() {
        if visited[start] || edges[start].is_empty() {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(node) = queue.pop_front() {
            component.push(candidates[node]);
            for &next in &edges[node] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        groups.push(make_group(component));
    }

    groups.sort_by_key(|group| (group.tick, group.members.first().copied()));
    for (index, group) in groups.iter_mut().enumerate() {
        group.color_index = index;
    }
    groups
}

fn make_group(mut members: Vec<&TrackedNpc>) -> SimultaneousGroup {
    members.sort_by_key(|npc| (npc.ticks_until_attack, npc.actor));
    let mut prayers: Vec<Prayer> = Vec::new();
    for prayer in members.iter().filter_map(|npc| npc.required_prayer()) {
        if !prayers.contains(&prayer) {
            prayers.push(prayer);
        }
    }
    SimultaneousGroup {
        tick: members.first().map_or(0, |npc| npc.ticks_until_attack),
        severity: members.iter().map(|npc| npc.npc_type.max_damage()).sum(),
        members: members.iter().map(|npc| npc.actor).collect(),
        prayers,
        color_index: 0,
    }
}

/// Opted-in attackers grouped by landing tick
pub fn attacks_by_tick(npcs: &[TrackedNpc], settings: &Settings) -> BTreeMap<i32, Vec<ActorId>> {
    let mut by_tick: BTreeMap<i32, Vec<ActorId>> = BTreeMap::new();
    for npc in npcs {
        if npc.ticks_until_attack > 0 && settings.prayer_helper.allows(npc.npc_type) {
            by_tick.entry(npc.ticks_until_attack).or_default().push(npc.actor);
        }
    }
    by_tick
}

/// Attackers landing on the same tick as, or within `threshold` ticks of, another attack
pub fn near_simultaneous(by_tick: &BTreeMap<i32, Vec<ActorId>>, threshold: u32) -> HashSet<ActorId> {
    let threshold = i32::try_from(threshold).unwrap_or(i32::MAX);
    let mut flagged = HashSet::new();
    for (&tick, actors) in by_tick {
        if actors.len() > 1 {
            flagged.extend(actors.iter().copied());
        }
        if threshold <= 0 {
            continue;
        }
        let mut later = by_tick
            .range(tick.saturating_add(1)..=tick.saturating_add(threshold))
            .flat_map(|(_, others)| others.iter().copied())
            .peekable();
        if later.peek().is_some() {
            flagged.extend(actors.iter().copied());
            flagged.extend(later);
        }
    }
    flagged
}

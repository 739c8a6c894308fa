//! Threat aggregation: what lands when, and what to pray against it

mod labels;
mod movement;
mod recommend;
mod simultaneous;
mod window;

#[cfg(test)]
mod threats_tests;

pub use labels::{dig_warnings, tick_labels, DigWarning, NpcTickLabel};
pub use movement::{detect_movement_threats, DangerousTile, MovementThreats};
pub use recommend::{
    closest_attack, damage_weighted_prayer, decide, prayer_for_exposure, recommend, ClosestAttack,
};
pub use simultaneous::{
    attacks_by_tick, conflicts, detect_simultaneous, gcd, near_simultaneous, SimultaneousGroup,
};
pub use window::{build_threat_window, ThreatWindow, KIND_ORDER};

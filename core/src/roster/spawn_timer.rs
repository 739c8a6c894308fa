//! Countdown to the final boss's next set of reinforcements.
//!
//! The timer runs from the boss's spawn, pauses while the boss sits in the
//! health band where Jad is summoned, and resumes once the boss is pushed
//! below it. A mage spawning while the boss is alive marks a fresh set, so
//! the timer restarts.

use serde::Serialize;
use tracing::debug;

/// Ticks between reinforcement sets (210 seconds)
pub const SPAWN_INTERVAL_TICKS: i32 = 350;

pub const ZUK_MAX_HP: i32 = 1200;
/// Timer pauses when the boss drops below this
pub const PAUSE_BELOW_HP: i32 = 600;
/// Timer resumes when the boss drops below this
pub const RESUME_BELOW_HP: i32 = 480;

#[derive(Debug, Clone, Serialize)]
pub struct SpawnTimer {
    ticks_remaining: i32,
    running: bool,
}

impl SpawnTimer {
    pub fn new_running() -> Self {
        Self {
            ticks_remaining: SPAWN_INTERVAL_TICKS,
            running: true,
        }
    }

    pub fn ticks_remaining(&self) -> i32 {
        self.ticks_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn reset(&mut self) {
        self.ticks_remaining = SPAWN_INTERVAL_TICKS;
    }

    pub fn run(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Count down one tick, wrapping to a fresh interval when a set spawns
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.ticks_remaining -= 1;
        if self.ticks_remaining <= 0 {
            self.ticks_remaining = SPAWN_INTERVAL_TICKS;
        }
    }

    /// Pause or resume from the boss's estimated hitpoints
    pub fn update_from_hp(&mut self, hp: i32) {
        if self.running && (RESUME_BELOW_HP..PAUSE_BELOW_HP).contains(&hp) {
            debug!(hp, "spawn timer paused");
            self.pause();
        } else if !self.running && hp < RESUME_BELOW_HP {
            debug!(hp, "spawn timer resumed");
            self.run();
        }
    }
}

/// Estimate current hitpoints from a health bar ratio.
///
/// Returns -1 when no health bar is visible and 0 when the bar is empty.
pub fn estimate_hp(ratio: i32, scale: i32, max_hp: i32) -> i32 {
    if ratio < 0 || scale <= 0 {
        return -1;
    }
    if ratio == 0 {
        return 0;
    }

    let mut min_health = 1;
    let max_health;
    if scale > 1 {
        if ratio > 1 {
            min_health = (max_hp * (ratio - 1) + scale - 2) / (scale - 1);
        }
        max_health = ((max_hp * ratio - 1) / (scale - 1)).min(max_hp);
    } else {
        max_health = max_hp;
    }
    (min_health + max_health + 1) / 2
}

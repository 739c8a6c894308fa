//! Replay scripts: a recorded (or hand-written) sequence of host events.
//!
//! A script is TOML with an optional `[settings]` table and one `[[ticks]]`
//! entry per game tick. Events listed on a tick are delivered before the
//! tick itself is processed, the same order the host sees them.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use inferno_core::{ActorId, ActorObservation, Prayer, Settings, Tile, WorldSnapshot};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid script {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("script {0} has no ticks")]
    Empty(PathBuf),

    #[error("tick {tick} does not come after tick {previous}")]
    OutOfOrder { tick: u64, previous: u64 },
}

/// A host event delivered between ticks
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Spawn {
        actor: ActorId,
        npc_id: u32,
        x: i32,
        y: i32,
    },
    Despawn {
        actor: ActorId,
    },
    Animation {
        actor: ActorId,
        animation: u32,
    },
    Chat {
        message: String,
    },
    Click {
        x: i32,
        y: i32,
    },
    /// The player left the encounter
    Leave,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptTick {
    pub tick: u64,
    pub player: Tile,
    #[serde(default)]
    pub active_prayer: Option<Prayer>,
    #[serde(default)]
    pub actors: Vec<ActorObservation>,
    #[serde(default)]
    pub blockers: Vec<Tile>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl ScriptTick {
    pub fn world(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            player: self.player,
            active_prayer: self.active_prayer,
            actors: self.actors.clone(),
            blockers: self.blockers.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Overrides the persisted settings while this script runs
    #[serde(default)]
    pub settings: Option<Settings>,
    pub ticks: Vec<ScriptTick>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parse script text; `path` is only used for error messages
    pub fn parse(text: &str, path: &Path) -> Result<Self, ScriptError> {
        let script: Script = toml::from_str(text).map_err(|source| ScriptError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if script.ticks.is_empty() {
            return Err(ScriptError::Empty(path.to_path_buf()));
        }
        for pair in script.ticks.windows(2) {
            if pair[1].tick <= pair[0].tick {
                return Err(ScriptError::OutOfOrder {
                    tick: pair[1].tick,
                    previous: pair[0].tick,
                });
            }
        }
        Ok(script)
    }
}

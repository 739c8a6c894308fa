//! Settings persistence and per-NPC opt-in lookups
//!
//! This module re-exports shared types from inferno-types and adds the
//! core-side behaviour: loading/storing through confy and resolving an
//! `NpcToggles` flag for a roster type.

use std::path::Path;

use tracing::warn;

pub use inferno_types::{
    NpcToggles, PrayerDisplayMode, SafespotDisplayMode, Settings, ShieldDisplayMode,
    WaveDisplayMode,
};

use crate::game_data::NpcType;

use super::error::ConfigError;

const APP_NAME: &str = "inferno";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// NpcToggles Extensions
// ─────────────────────────────────────────────────────────────────────────────

pub trait NpcTogglesExt {
    /// Whether a feature scoped by these toggles applies to `npc_type`
    fn allows(&self, npc_type: NpcType) -> bool;
}

impl NpcTogglesExt for NpcToggles {
    fn allows(&self, npc_type: NpcType) -> bool {
        match npc_type {
            NpcType::Bat => self.bat,
            NpcType::Blob => self.blob,
            NpcType::Meleer => self.meleer,
            NpcType::Ranger => self.ranger,
            NpcType::Mage => self.mage,
            NpcType::JadHealer => self.jad_healer,
            NpcType::Jad => self.jad,
            NpcType::Zuk => self.zuk,
            NpcType::Nibbler | NpcType::ZukHealer => false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Settings persistence
pub trait SettingsExt: Sized {
    /// Load from the platform config directory, falling back to defaults
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn load_from_path(path: &Path) -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
}

impl SettingsExt for Settings {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|err| {
            warn!(error = %err, "using default settings");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibblers_and_boss_healers_never_opted_in() {
        let toggles = NpcToggles {
            zuk: true,
            ..NpcToggles::default()
        };
        assert!(!toggles.allows(NpcType::Nibbler));
        assert!(!toggles.allows(NpcType::ZukHealer));
        assert!(toggles.allows(NpcType::Zuk));
        assert!(!NpcToggles::all_off().allows(NpcType::Mage));
    }

    #[test]
    fn test_load_from_missing_path_reports_path() {
        let err = Settings::load_from_path(Path::new("/nonexistent/inferno.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
        assert!(err.to_string().contains("/nonexistent/inferno.toml"));
    }
}

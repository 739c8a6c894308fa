mod config;
pub mod error;

pub use config::{
    NpcToggles, NpcTogglesExt, PrayerDisplayMode, SafespotDisplayMode, Settings, SettingsExt,
    ShieldDisplayMode, WaveDisplayMode,
};
pub use error::ConfigError;

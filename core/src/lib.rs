pub mod context;
pub mod game_data;
pub mod prediction;
pub mod roster;
pub mod safespot;
pub mod signal_processor;
pub mod threats;
pub mod world;

// Re-exports for convenience
pub use context::{ConfigError, NpcTogglesExt, Settings, SettingsExt};
pub use game_data::*;
pub use roster::{ActorId, EntityTracker, TrackedNpc};
pub use signal_processor::{
    ActorObservation, EngineSignal, InfernoEngine, RecommendationSource, SignalHandler,
    TickSnapshot, WorldSnapshot,
};
pub use world::{Area, Tile};

pub mod handler;
pub mod processor;
pub mod signal;
pub mod snapshot;


pub use handler::SignalHandler;
pub use processor::InfernoEngine;
pub use signal::{EngineSignal, RecommendationSource};
pub use snapshot::{ActorObservation, TickSnapshot, WorldSnapshot};

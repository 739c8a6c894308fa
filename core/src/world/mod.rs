//! Tile geometry shared by prediction, threat detection and safespots.

mod area;
mod reach;
mod terrain;
mod travel;

pub use area::{Area, Tile};
pub use reach::{can_attack, can_move_to_attack, MAX_SIMULATED_STEPS};
pub use terrain::Terrain;
pub use travel::{next_step, Step};

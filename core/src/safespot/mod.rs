//! Safe-tile geometry: exposure map, shield tracking and area outlines

mod areas;
mod map;
mod shield;

#[cfg(test)]
mod safespot_tests;

pub use areas::{edge_tolerance, outline_classes, outline_edges, Edge, Quad, ScreenPoint};
pub use map::{compute_safe_tile_map, ExposureMask, SafeTileMap};
pub use shield::{
    mark_shadows, shadow_tiles, ShieldTracker, CORNER_STALL_ARMED, CORNER_STALL_UNSEEN,
    PREDICTED_SHADOW_CLASS,
};

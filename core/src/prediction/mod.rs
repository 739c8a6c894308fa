//! Attack clock prediction

mod predictor;

#[cfg(test)]
mod predictor_tests;

pub use predictor::{
    advance, advance_all, sync_from_animation, AdvanceContext, BLOB_DETECTION_TICK,
    CORNER_STALL_TICKS,
};

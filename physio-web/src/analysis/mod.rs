//! Analysis module - feedback rules and pose scoring
//!
//! Re-exports only. All logic in submodules.

mod feedback;
mod scoring;

pub use feedback::{
    FeedbackGenerator, IDEAL_TOLERANCE, MAX_MESSAGES, PLANK_HIP_MIN_ANGLE, SPINE_MIN_ANGLE,
    SYMMETRY_TOLERANCE,
};
pub use scoring::{overall, PoseScorer, NEUTRAL_SCORE, STABILITY_MIN_CONFIDENCE};

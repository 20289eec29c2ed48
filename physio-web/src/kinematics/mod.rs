//! Kinematics module - angles, smoothing and repetition counting
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod confidence_gate;
mod rep_counter;
mod smoothing;

pub use angles::{calculate_angle, joint_angle, joint_angles, landmark_angle, triple_angle};
pub use confidence_gate::ConfidenceGate;
pub use rep_counter::{RepCounter, DOWN_CONFIDENCE_RANGE, IDLE_CONFIDENCE, REP_CONFIDENCE};
pub use smoothing::{AngleBuffer, TemporalSmoother};

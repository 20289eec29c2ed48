//! Model module - shared data vocabulary
//!
//! Re-exports only. All definitions in submodules.

pub mod landmark;
pub mod joint;
pub mod profile;
pub mod records;

pub use landmark::{Landmark, LandmarkName, PoseSnapshot, LANDMARK_COUNT};
pub use joint::{mirror_triple, JointName, JOINT_COUNT, SYMMETRIC_PAIRS};
pub use profile::{
    Direction, ExerciseProfile, ExerciseType, RangeOfMotion, ReferenceAngle, RepConfig,
    Thresholds, PROFILES,
};
pub use records::{
    FeedbackMessage, FeedbackType, FrameReport, JointAngleSet, Phase, RepState, ScoreSet,
};

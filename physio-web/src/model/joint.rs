//! Joint definitions - which landmark triple measures which joint

use serde::{Deserialize, Serialize};

use super::landmark::LandmarkName;

/// Number of tracked joints
pub const JOINT_COUNT: usize = 9;

/// A joint whose angle the engine tracks
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointName {
    LeftElbow,
    RightElbow,
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    /// Ear-shoulder-hip line (upper back / neck alignment)
    Spine,
}

/// Left/right joint pairs checked for symmetry
pub const SYMMETRIC_PAIRS: [(JointName, JointName); 4] = [
    (JointName::LeftElbow, JointName::RightElbow),
    (JointName::LeftShoulder, JointName::RightShoulder),
    (JointName::LeftHip, JointName::RightHip),
    (JointName::LeftKnee, JointName::RightKnee),
];

impl JointName {
    pub const ALL: [JointName; JOINT_COUNT] = [
        JointName::LeftElbow,
        JointName::RightElbow,
        JointName::LeftShoulder,
        JointName::RightShoulder,
        JointName::LeftHip,
        JointName::RightHip,
        JointName::LeftKnee,
        JointName::RightKnee,
        JointName::Spine,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Landmark triple (p1, vertex, p3). Spine uses the left side; see
    /// [`JointName::fallback_triple`].
    pub const fn triple(self) -> [LandmarkName; 3] {
        use LandmarkName::*;
        match self {
            JointName::LeftElbow => [LeftShoulder, LeftElbow, LeftWrist],
            JointName::RightElbow => [RightShoulder, RightElbow, RightWrist],
            JointName::LeftShoulder => [LeftElbow, LeftShoulder, LeftHip],
            JointName::RightShoulder => [RightElbow, RightShoulder, RightHip],
            JointName::LeftHip => [LeftShoulder, LeftHip, LeftKnee],
            JointName::RightHip => [RightShoulder, RightHip, RightKnee],
            JointName::LeftKnee => [LeftHip, LeftKnee, LeftAnkle],
            JointName::RightKnee => [RightHip, RightKnee, RightAnkle],
            JointName::Spine => [LeftEar, LeftShoulder, LeftHip],
        }
    }

    /// Second triple to try when the primary one is unreadable
    pub fn fallback_triple(self) -> Option<[LandmarkName; 3]> {
        match self {
            JointName::Spine => Some(mirror_triple(self.triple())),
            _ => None,
        }
    }

    /// Opposite-side joint (spine maps to itself)
    pub fn mirrored(self) -> Self {
        match self {
            JointName::LeftElbow => JointName::RightElbow,
            JointName::RightElbow => JointName::LeftElbow,
            JointName::LeftShoulder => JointName::RightShoulder,
            JointName::RightShoulder => JointName::LeftShoulder,
            JointName::LeftHip => JointName::RightHip,
            JointName::RightHip => JointName::LeftHip,
            JointName::LeftKnee => JointName::RightKnee,
            JointName::RightKnee => JointName::LeftKnee,
            JointName::Spine => JointName::Spine,
        }
    }

    /// Human-readable label used in feedback text
    pub fn label(&self) -> &'static str {
        match self {
            JointName::LeftElbow => "left elbow",
            JointName::RightElbow => "right elbow",
            JointName::LeftShoulder => "left shoulder",
            JointName::RightShoulder => "right shoulder",
            JointName::LeftHip => "left hip",
            JointName::RightHip => "right hip",
            JointName::LeftKnee => "left knee",
            JointName::RightKnee => "right knee",
            JointName::Spine => "back",
        }
    }
}

/// Swap every landmark in a triple for its opposite-side counterpart
pub fn mirror_triple(triple: [LandmarkName; 3]) -> [LandmarkName; 3] {
    triple.map(LandmarkName::mirrored)
}

//! Rule-based coaching feedback
//!
//! Reference-range checks run for every joint the profile lists, then the
//! exercise-specific layers. The merged list is ranked by confidence and
//! capped; ties keep rule order so the output is fully deterministic.

use crate::kinematics::ConfidenceGate;
use crate::model::{
    ExerciseProfile, ExerciseType, FeedbackMessage, FeedbackType, JointAngleSet, JointName,
    LandmarkName, PoseSnapshot, SYMMETRIC_PAIRS,
};

/// Maximum messages returned per frame
pub const MAX_MESSAGES: usize = 5;

/// Within this many degrees of ideal counts as a good position
pub const IDEAL_TOLERANCE: f32 = 5.0;

/// Left/right difference (degrees) that triggers a symmetry suggestion
pub const SYMMETRY_TOLERANCE: f32 = 15.0;

/// Below this the back is considered rounded
pub const SPINE_MIN_ANGLE: f32 = 165.0;

/// Below this a plank's hips are sagging
pub const PLANK_HIP_MIN_ANGLE: f32 = 160.0;

/// Knee may sit this fraction of hip width inside the ankle line
const VALGUS_TOLERANCE: f32 = 0.1;

/// Hip tilt (fraction of hip width) that counts as a dropped hip
const HIP_TILT_TOLERANCE: f32 = 0.15;

/// Hip-over-ankle horizontal offset (fraction of hip width)
const WEIGHT_SHIFT_TOLERANCE: f32 = 0.25;

const RANGE_CONFIDENCE: f32 = 0.8;
const IDEAL_CONFIDENCE: f32 = 0.9;
const POSTURE_CONFIDENCE: f32 = 0.85;
const SYMMETRY_CONFIDENCE: f32 = 0.7;
const BALANCE_CONFIDENCE: f32 = 0.6;
const FALLBACK_CONFIDENCE: f32 = 0.5;

/// Evaluates feedback rules against one frame
#[derive(Clone, Copy, Debug, Default)]
pub struct FeedbackGenerator {
    gate: ConfidenceGate,
}

impl FeedbackGenerator {
    pub fn new(gate: ConfidenceGate) -> Self {
        Self { gate }
    }

    /// Ranked, truncated feedback for one frame. Never empty.
    pub fn generate(
        &self,
        angles: &JointAngleSet,
        snapshot: &PoseSnapshot,
        profile: &ExerciseProfile,
    ) -> Vec<FeedbackMessage> {
        let mut messages = Vec::new();

        reference_checks(angles, profile, &mut messages);

        match profile.exercise {
            ExerciseType::Squat | ExerciseType::Pushup => spine_check(angles, &mut messages),
            ExerciseType::Plank => hip_height_check(angles, &mut messages),
            _ => {}
        }
        if matches!(profile.exercise, ExerciseType::Squat | ExerciseType::Lunge) {
            self.knee_valgus_check(snapshot, &mut messages);
        }
        symmetry_check(angles, &mut messages);
        if profile.exercise == ExerciseType::General {
            self.weight_distribution_check(snapshot, &mut messages);
        }

        rank(messages)
    }

    fn knee_valgus_check(&self, snapshot: &PoseSnapshot, out: &mut Vec<FeedbackMessage>) {
        let Some((mid, hip_width)) = self.hip_line(snapshot) else {
            return;
        };

        let sides = [
            (JointName::LeftKnee, LandmarkName::LeftKnee, LandmarkName::LeftAnkle, "Left"),
            (JointName::RightKnee, LandmarkName::RightKnee, LandmarkName::RightAnkle, "Right"),
        ];
        for (joint, knee, ankle, side) in sides {
            let (Some(knee), Some(ankle)) = (
                self.gate.landmark(snapshot, knee),
                self.gate.landmark(snapshot, ankle),
            ) else {
                continue;
            };
            let knee_spread = (knee.x - mid).abs();
            let ankle_spread = (ankle.x - mid).abs();
            if knee_spread + VALGUS_TOLERANCE * hip_width < ankle_spread {
                out.push(
                    FeedbackMessage::new(
                        FeedbackType::Warning,
                        format!("{side} knee is caving inward; push it out over your toes"),
                        POSTURE_CONFIDENCE,
                    )
                    .on_joint(joint),
                );
            }
        }
    }

    fn weight_distribution_check(&self, snapshot: &PoseSnapshot, out: &mut Vec<FeedbackMessage>) {
        let (Some(left_hip), Some(right_hip)) = (
            self.gate.landmark(snapshot, LandmarkName::LeftHip),
            self.gate.landmark(snapshot, LandmarkName::RightHip),
        ) else {
            return;
        };
        let hip_width = (left_hip.x - right_hip.x).abs();
        if hip_width < f32::EPSILON {
            return;
        }

        // Image y grows downward, so the dropped hip has the larger y
        let tilt = left_hip.y - right_hip.y;
        if tilt.abs() > HIP_TILT_TOLERANCE * hip_width {
            let (side, joint) = if tilt > 0.0 {
                ("left", JointName::LeftHip)
            } else {
                ("right", JointName::RightHip)
            };
            out.push(
                FeedbackMessage::new(
                    FeedbackType::Suggestion,
                    format!("Your {side} hip is dropping; level your hips to balance your weight"),
                    BALANCE_CONFIDENCE,
                )
                .on_joint(joint),
            );
        }

        let (Some(left_ankle), Some(right_ankle)) = (
            self.gate.landmark(snapshot, LandmarkName::LeftAnkle),
            self.gate.landmark(snapshot, LandmarkName::RightAnkle),
        ) else {
            return;
        };
        let hip_mid = (left_hip.x + right_hip.x) / 2.0;
        let ankle_mid = (left_ankle.x + right_ankle.x) / 2.0;
        if (hip_mid - ankle_mid).abs() > WEIGHT_SHIFT_TOLERANCE * hip_width {
            out.push(FeedbackMessage::new(
                FeedbackType::Suggestion,
                "Shift your weight back over the center of your feet",
                BALANCE_CONFIDENCE,
            ));
        }
    }

    /// Hip midpoint x and hip width, if both hips are readable
    fn hip_line(&self, snapshot: &PoseSnapshot) -> Option<(f32, f32)> {
        let left = self.gate.landmark(snapshot, LandmarkName::LeftHip)?;
        let right = self.gate.landmark(snapshot, LandmarkName::RightHip)?;
        let width = (left.x - right.x).abs();
        (width > f32::EPSILON).then(|| ((left.x + right.x) / 2.0, width))
    }
}

fn reference_checks(angles: &JointAngleSet, profile: &ExerciseProfile, out: &mut Vec<FeedbackMessage>) {
    for (&joint, &angle) in angles {
        let Some(reference) = profile.reference(joint) else {
            continue;
        };
        let label = joint.label();
        let message = if angle < reference.min {
            FeedbackMessage::new(
                FeedbackType::Correction,
                format!(
                    "Your {label} angle is too small ({angle:.0}°); open it to at least {:.0}°",
                    reference.min
                ),
                RANGE_CONFIDENCE,
            )
            .for_joint(joint, reference.min, angle)
        } else if angle > reference.max {
            FeedbackMessage::new(
                FeedbackType::Correction,
                format!(
                    "Your {label} angle is too large ({angle:.0}°); bring it under {:.0}°",
                    reference.max
                ),
                RANGE_CONFIDENCE,
            )
            .for_joint(joint, reference.max, angle)
        } else if (angle - reference.ideal).abs() < IDEAL_TOLERANCE {
            FeedbackMessage::new(
                FeedbackType::Positive,
                format!("Great {label} position"),
                IDEAL_CONFIDENCE,
            )
            .for_joint(joint, reference.ideal, angle)
        } else {
            continue;
        };
        out.push(message);
    }
}

fn spine_check(angles: &JointAngleSet, out: &mut Vec<FeedbackMessage>) {
    if let Some(&spine) = angles.get(&JointName::Spine) {
        if spine < SPINE_MIN_ANGLE {
            out.push(
                FeedbackMessage::new(
                    FeedbackType::Correction,
                    "Keep your back straight; avoid rounding your shoulders",
                    POSTURE_CONFIDENCE,
                )
                .for_joint(JointName::Spine, SPINE_MIN_ANGLE, spine),
            );
        }
    }
}

fn hip_height_check(angles: &JointAngleSet, out: &mut Vec<FeedbackMessage>) {
    let Some(hip) = pair_mean(angles, JointName::LeftHip, JointName::RightHip) else {
        return;
    };
    if hip < PLANK_HIP_MIN_ANGLE {
        out.push(
            FeedbackMessage::new(
                FeedbackType::Correction,
                "Raise your hips to keep your body in a straight line",
                POSTURE_CONFIDENCE,
            )
            .with_angles(PLANK_HIP_MIN_ANGLE, hip),
        );
    }
}

/// Flags the side with the numerically smaller angle as the lower one.
/// This does not account for mirrored camera input.
fn symmetry_check(angles: &JointAngleSet, out: &mut Vec<FeedbackMessage>) {
    for (left, right) in SYMMETRIC_PAIRS {
        let (Some(&l), Some(&r)) = (angles.get(&left), angles.get(&right)) else {
            continue;
        };
        if (l - r).abs() <= SYMMETRY_TOLERANCE {
            continue;
        }
        let (low, low_angle, high, high_angle) = if l < r {
            (left, l, right, r)
        } else {
            (right, r, left, l)
        };
        out.push(
            FeedbackMessage::new(
                FeedbackType::Suggestion,
                format!(
                    "Your {} is lower than your {}; try to even out both sides",
                    low.label(),
                    high.label()
                ),
                SYMMETRY_CONFIDENCE,
            )
            .for_joint(low, high_angle, low_angle),
        );
    }
}

/// Stable sort by confidence (descending), cap, and never return empty
fn rank(mut messages: Vec<FeedbackMessage>) -> Vec<FeedbackMessage> {
    messages.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    messages.truncate(MAX_MESSAGES);
    if messages.is_empty() {
        messages.push(FeedbackMessage::new(
            FeedbackType::Positive,
            "Looking good, keep it up!",
            FALLBACK_CONFIDENCE,
        ));
    }
    messages
}

/// Mean of whichever of the two joints are present
pub(crate) fn pair_mean(angles: &JointAngleSet, a: JointName, b: JointName) -> Option<f32> {
    match (angles.get(&a), angles.get(&b)) {
        (Some(x), Some(y)) => Some((x + y) / 2.0),
        (Some(x), None) | (None, Some(x)) => Some(*x),
        (None, None) => None,
    }
}

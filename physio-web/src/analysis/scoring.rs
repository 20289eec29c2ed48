//! Pose scoring - form, alignment, stability, range and overall
//!
//! Every sub-score is an integer in [0, 100]. Missing inputs fall back to
//! [`NEUTRAL_SCORE`] instead of failing the frame.

use super::feedback::pair_mean;
use crate::kinematics::ConfidenceGate;
use crate::model::{
    ExerciseProfile, ExerciseType, JointAngleSet, JointName, LandmarkName, PoseSnapshot, ScoreSet,
    SYMMETRIC_PAIRS,
};

/// Score used when the inputs for a sub-score are missing
pub const NEUTRAL_SCORE: f32 = 50.0;

/// Landmarks at or below this confidence are ignored for stability
pub const STABILITY_MIN_CONFIDENCE: f32 = 0.2;

/// Knee angle at the bottom of a good squat
const SQUAT_TARGET_KNEE: f32 = 95.0;
const SQUAT_PENALTY_PER_DEGREE: f32 = 1.5;

const PLANK_TARGET_SHOULDER: f32 = 90.0;
const PLANK_TARGET_HIP: f32 = 180.0;
const PLANK_PENALTY_PER_DEGREE: f32 = 2.0;

/// Penalty cap for a single left/right pair in the general assessment
const SYMMETRY_PENALTY_CAP: f32 = 50.0;

/// Penalty per degree away from a reference ideal
const REFERENCE_PENALTY_PER_DEGREE: f32 = 1.5;

const FORM_WEIGHT: f32 = 0.4;
const ALIGNMENT_WEIGHT: f32 = 0.3;
const STABILITY_WEIGHT: f32 = 0.2;
const RANGE_WEIGHT: f32 = 0.1;

/// Weighted pose scorer
#[derive(Clone, Copy, Debug, Default)]
pub struct PoseScorer {
    gate: ConfidenceGate,
}

impl PoseScorer {
    pub fn new(gate: ConfidenceGate) -> Self {
        Self { gate }
    }

    pub fn score(
        &self,
        angles: &JointAngleSet,
        snapshot: &PoseSnapshot,
        profile: &ExerciseProfile,
    ) -> ScoreSet {
        let form = to_score(form_score(angles, profile));
        let alignment = to_score(self.alignment_score(snapshot));
        let stability = to_score(stability_score(snapshot));
        let range = to_score(range_score(angles, profile));

        ScoreSet {
            form,
            alignment,
            stability,
            range,
            overall: overall(form, alignment, stability, range),
        }
    }

    /// Horizontal offset of the nose from the hip midpoint, two points per unit
    fn alignment_score(&self, snapshot: &PoseSnapshot) -> f32 {
        let landmarks = (
            self.gate.landmark(snapshot, LandmarkName::Nose),
            self.gate.landmark(snapshot, LandmarkName::LeftHip),
            self.gate.landmark(snapshot, LandmarkName::RightHip),
        );
        let (Some(nose), Some(left_hip), Some(right_hip)) = landmarks else {
            return NEUTRAL_SCORE;
        };
        let hip_mid = (left_hip.x + right_hip.x) / 2.0;
        let vertical_offset = (nose.x - hip_mid).abs();
        100.0 - (vertical_offset / 2.0).min(100.0)
    }
}

/// Weighted blend of the four sub-scores
pub fn overall(form: u8, alignment: u8, stability: u8, range: u8) -> u8 {
    to_score(
        FORM_WEIGHT * form as f32
            + ALIGNMENT_WEIGHT * alignment as f32
            + STABILITY_WEIGHT * stability as f32
            + RANGE_WEIGHT * range as f32,
    )
}

fn form_score(angles: &JointAngleSet, profile: &ExerciseProfile) -> f32 {
    match profile.exercise {
        ExerciseType::Squat => pair_mean(angles, JointName::LeftKnee, JointName::RightKnee)
            .map(|knee| closeness(knee, SQUAT_TARGET_KNEE, SQUAT_PENALTY_PER_DEGREE))
            .unwrap_or(NEUTRAL_SCORE),
        ExerciseType::Plank => {
            let shoulder = pair_mean(angles, JointName::LeftShoulder, JointName::RightShoulder)
                .map(|a| closeness(a, PLANK_TARGET_SHOULDER, PLANK_PENALTY_PER_DEGREE));
            let hip = pair_mean(angles, JointName::LeftHip, JointName::RightHip)
                .map(|a| closeness(a, PLANK_TARGET_HIP, PLANK_PENALTY_PER_DEGREE));
            mean(shoulder.into_iter().chain(hip)).unwrap_or(NEUTRAL_SCORE)
        }
        ExerciseType::General => {
            let penalty: f32 = SYMMETRIC_PAIRS
                .iter()
                .filter_map(|(l, r)| Some((angles.get(l)? - angles.get(r)?).abs()))
                .map(|diff| diff.min(SYMMETRY_PENALTY_CAP))
                .sum();
            (100.0 - penalty).max(0.0)
        }
        _ => mean(profile.reference_angles.iter().filter_map(|r| {
            angles
                .get(&r.joint)
                .map(|&a| closeness(a, r.ideal, REFERENCE_PENALTY_PER_DEGREE))
        }))
        .unwrap_or(NEUTRAL_SCORE),
    }
}

/// Mean confidence of landmarks above the noise floor, as a percentage
fn stability_score(snapshot: &PoseSnapshot) -> f32 {
    mean(
        snapshot
            .iter()
            .map(|lm| lm.confidence)
            .filter(|&c| c > STABILITY_MIN_CONFIDENCE),
    )
    .map(|c| c * 100.0)
    .unwrap_or(0.0)
}

/// Share of the expected sweep travelled; full marks for static holds
fn range_score(angles: &JointAngleSet, profile: &ExerciseProfile) -> f32 {
    let Some(rom) = profile.range_of_motion else {
        return 100.0;
    };
    let Some(angle) = pair_mean(angles, rom.joints.0, rom.joints.1) else {
        return NEUTRAL_SCORE;
    };
    let travelled = (rom.start - angle) / (rom.start - rom.end);
    (travelled * 100.0).clamp(0.0, 100.0)
}

fn closeness(angle: f32, target: f32, penalty_per_degree: f32) -> f32 {
    100.0 - ((target - angle).abs() * penalty_per_degree).min(100.0)
}

fn mean(values: impl Iterator<Item = f32>) -> Option<f32> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f32)
}

fn to_score(value: f32) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn angles(entries: &[(JointName, f32)]) -> JointAngleSet {
        entries.iter().copied().collect()
    }

    fn score(exercise: ExerciseType, set: &JointAngleSet, snapshot: &PoseSnapshot) -> ScoreSet {
        PoseScorer::default().score(set, snapshot, exercise.profile())
    }

    #[test]
    fn test_squat_form_and_range() {
        let set = angles(&[(JointName::LeftKnee, 95.0), (JointName::RightKnee, 95.0)]);
        let scores = score(ExerciseType::Squat, &set, &PoseSnapshot::new());
        assert_eq!(scores.form, 100);
        // (175 - 95) / (175 - 90) = 94.1%
        assert_eq!(scores.range, 94);

        let set = angles(&[(JointName::LeftKnee, 115.0)]);
        let scores = score(ExerciseType::Squat, &set, &PoseSnapshot::new());
        assert_eq!(scores.form, 70);
    }

    #[test]
    fn test_plank_form_and_fixed_range() {
        let set = angles(&[
            (JointName::LeftShoulder, 90.0),
            (JointName::RightShoulder, 90.0),
            (JointName::LeftHip, 150.0),
            (JointName::RightHip, 150.0),
        ]);
        let scores = score(ExerciseType::Plank, &set, &PoseSnapshot::new());
        // shoulder 100, hip 100 - 30 * 2 = 40
        assert_eq!(scores.form, 70);
        assert_eq!(scores.range, 100);
    }

    #[test]
    fn test_general_symmetry_penalties() {
        let set = angles(&[
            (JointName::LeftShoulder, 70.0),
            (JointName::RightShoulder, 95.0),
            (JointName::LeftKnee, 100.0),
            (JointName::RightKnee, 170.0),
        ]);
        let scores = score(ExerciseType::General, &set, &PoseSnapshot::new());
        // 25 + min(70, 50) = 75
        assert_eq!(scores.form, 25);
    }

    #[test]
    fn test_alignment_and_stability() {
        let snapshot = PoseSnapshot::new()
            .with(LandmarkName::Nose, 140.0, 50.0, 0.9)
            .with(LandmarkName::LeftHip, 120.0, 200.0, 0.8)
            .with(LandmarkName::RightHip, 80.0, 200.0, 0.7)
            .with(LandmarkName::LeftAnkle, 0.0, 0.0, 0.1);
        let scores = score(ExerciseType::General, &JointAngleSet::new(), &snapshot);
        // offset 40 -> 100 - 20
        assert_eq!(scores.alignment, 80);
        // (0.9 + 0.8 + 0.7) / 3, the 0.1 ankle is ignored
        assert_eq!(scores.stability, 80);
    }

    #[test]
    fn test_stability_uses_clamped_confidence() {
        let json = r#"[
            {"name":"nose","x":0.0,"y":0.0,"score":7.0},
            {"name":"left_hip","x":0.0,"y":0.0,"score":0.3},
            {"name":"left_pinky","x":0.0,"y":0.0,"score":1.0}
        ]"#;
        let snapshot: PoseSnapshot = serde_json::from_str(json).unwrap();
        let scores = score(ExerciseType::General, &JointAngleSet::new(), &snapshot);
        // (1.0 + 0.3) / 2
        assert_eq!(scores.stability, 65);
    }

    #[test]
    fn test_missing_inputs_degrade_to_defaults() {
        let scores = score(ExerciseType::Squat, &JointAngleSet::new(), &PoseSnapshot::new());
        assert_eq!(scores.form, 50);
        assert_eq!(scores.alignment, 50);
        assert_eq!(scores.stability, 0);
        assert_eq!(scores.range, 50);
        // 0.4*50 + 0.3*50 + 0 + 0.1*50
        assert_eq!(scores.overall, 40);
    }

    #[test]
    fn test_reference_based_form() {
        // bicep curl elbow ideal 45
        let set = angles(&[(JointName::LeftElbow, 45.0), (JointName::RightElbow, 65.0)]);
        let scores = score(ExerciseType::BicepCurl, &set, &PoseSnapshot::new());
        // (100 + 70) / 2
        assert_eq!(scores.form, 85);
    }

    #[test]
    fn test_overall_weights() {
        assert_eq!(overall(100, 100, 100, 100), 100);
        assert_eq!(overall(0, 0, 0, 0), 0);
        // 40 + 15 + 10 + 0 = 65
        assert_eq!(overall(100, 50, 50, 0), 65);
    }

    proptest! {
        #[test]
        fn prop_overall_within_range(
            form in 0u8..=100, alignment in 0u8..=100,
            stability in 0u8..=100, range in 0u8..=100,
        ) {
            prop_assert!(overall(form, alignment, stability, range) <= 100);
        }

        #[test]
        fn prop_scores_within_range(
            knee in 0.0f32..=180.0, hip in 0.0f32..=180.0,
            nose_x in -2000.0f32..2000.0, conf in 0.0f32..=1.0,
        ) {
            let set = angles(&[(JointName::LeftKnee, knee), (JointName::RightHip, hip)]);
            let snapshot = PoseSnapshot::new()
                .with(LandmarkName::Nose, nose_x, 0.0, conf)
                .with(LandmarkName::LeftHip, 10.0, 0.0, conf)
                .with(LandmarkName::RightHip, -10.0, 0.0, conf);
            for exercise in ExerciseType::ALL {
                let s = score(exercise, &set, &snapshot);
                for v in [s.form, s.alignment, s.stability, s.range, s.overall] {
                    prop_assert!(v <= 100);
                }
            }
        }
    }
}

//! Exercise profiles - static per-exercise configuration
//!
//! Every supported exercise owns one immutable [`ExerciseProfile`] in
//! [`PROFILES`]. Adding an exercise means adding a table entry here; the
//! counter, feedback and scoring code read the table and never branch on
//! new names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::joint::JointName;
use super::landmark::LandmarkName;
use crate::error::ConfigError;

// ============================================================================
// EXERCISE TYPES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseType {
    Squat,
    Pushup,
    Lunge,
    Plank,
    ShoulderPress,
    BicepCurl,
    General,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 7] = [
        ExerciseType::Squat,
        ExerciseType::Pushup,
        ExerciseType::Lunge,
        ExerciseType::Plank,
        ExerciseType::ShoulderPress,
        ExerciseType::BicepCurl,
        ExerciseType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Squat => "squat",
            ExerciseType::Pushup => "pushup",
            ExerciseType::Lunge => "lunge",
            ExerciseType::Plank => "plank",
            ExerciseType::ShoulderPress => "shoulderPress",
            ExerciseType::BicepCurl => "bicepCurl",
            ExerciseType::General => "general",
        }
    }

    /// Static profile for this exercise
    pub fn profile(self) -> &'static ExerciseProfile {
        &PROFILES[self as usize]
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = ConfigError;

    /// Accepts the camelCase names plus snake/kebab spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "squat" => Ok(ExerciseType::Squat),
            "pushup" => Ok(ExerciseType::Pushup),
            "lunge" => Ok(ExerciseType::Lunge),
            "plank" => Ok(ExerciseType::Plank),
            "shoulderpress" => Ok(ExerciseType::ShoulderPress),
            "bicepcurl" => Ok(ExerciseType::BicepCurl),
            "general" => Ok(ExerciseType::General),
            _ => Err(ConfigError::UnknownExercise(s.to_string())),
        }
    }
}

// ============================================================================
// PROFILE DATA STRUCTURES
// ============================================================================

/// Acceptable range and target for one joint, in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReferenceAngle {
    pub joint: JointName,
    pub min: f32,
    pub max: f32,
    pub ideal: f32,
}

/// Which way the key angle moves when entering the working phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Small angle is `Down`, large angle is `Up` (squat, pushup)
    Decreasing,
    /// Small angle is `Up`, large angle is `Down` (curl)
    Increasing,
}

/// Phase boundaries; `down` is always the smaller angle
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Thresholds {
    pub up: f32,
    pub down: f32,
}

/// Repetition counting configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepConfig {
    /// Left-side key joint; the counter falls back to its mirror
    pub key_joint: JointName,
    pub thresholds: Thresholds,
    pub landmark_triple: [LandmarkName; 3],
    pub direction: Direction,
}

/// Expected sweep of a joint pair over one repetition
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RangeOfMotion {
    pub joints: (JointName, JointName),
    pub start: f32,
    pub end: f32,
}

/// Immutable per-exercise configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProfile {
    pub exercise: ExerciseType,
    pub reference_angles: &'static [ReferenceAngle],
    /// `None` for static holds and free assessment
    pub rep: Option<RepConfig>,
    /// `None` scores range as a full hold
    pub range_of_motion: Option<RangeOfMotion>,
}

impl ExerciseProfile {
    pub fn reference(&self, joint: JointName) -> Option<&ReferenceAngle> {
        self.reference_angles.iter().find(|r| r.joint == joint)
    }
}

// ============================================================================
// PROFILE TABLE
// ============================================================================

const fn reference(joint: JointName, min: f32, max: f32, ideal: f32) -> ReferenceAngle {
    ReferenceAngle { joint, min, max, ideal }
}

const fn rep(key_joint: JointName, down: f32, up: f32, direction: Direction) -> Option<RepConfig> {
    Some(RepConfig {
        key_joint,
        thresholds: Thresholds { up, down },
        landmark_triple: key_joint.triple(),
        direction,
    })
}

const fn sweep(left: JointName, right: JointName, start: f32, end: f32) -> Option<RangeOfMotion> {
    Some(RangeOfMotion { joints: (left, right), start, end })
}

use JointName::*;

const SQUAT_ANGLES: [ReferenceAngle; 4] = [
    reference(LeftKnee, 60.0, 180.0, 95.0),
    reference(RightKnee, 60.0, 180.0, 95.0),
    reference(LeftHip, 50.0, 180.0, 90.0),
    reference(RightHip, 50.0, 180.0, 90.0),
];

const PUSHUP_ANGLES: [ReferenceAngle; 4] = [
    reference(LeftElbow, 70.0, 180.0, 90.0),
    reference(RightElbow, 70.0, 180.0, 90.0),
    reference(LeftHip, 160.0, 180.0, 175.0),
    reference(RightHip, 160.0, 180.0, 175.0),
];

const LUNGE_ANGLES: [ReferenceAngle; 4] = [
    reference(LeftKnee, 80.0, 180.0, 90.0),
    reference(RightKnee, 80.0, 180.0, 90.0),
    reference(LeftHip, 70.0, 180.0, 95.0),
    reference(RightHip, 70.0, 180.0, 95.0),
];

const PLANK_ANGLES: [ReferenceAngle; 4] = [
    reference(LeftShoulder, 70.0, 110.0, 90.0),
    reference(RightShoulder, 70.0, 110.0, 90.0),
    reference(LeftHip, 160.0, 180.0, 175.0),
    reference(RightHip, 160.0, 180.0, 175.0),
];

const SHOULDER_PRESS_ANGLES: [ReferenceAngle; 4] = [
    reference(LeftElbow, 70.0, 180.0, 170.0),
    reference(RightElbow, 70.0, 180.0, 170.0),
    reference(LeftShoulder, 60.0, 180.0, 165.0),
    reference(RightShoulder, 60.0, 180.0, 165.0),
];

const BICEP_CURL_ANGLES: [ReferenceAngle; 4] = [
    reference(LeftElbow, 30.0, 180.0, 45.0),
    reference(RightElbow, 30.0, 180.0, 45.0),
    reference(LeftShoulder, 0.0, 35.0, 15.0),
    reference(RightShoulder, 0.0, 35.0, 15.0),
];

/// Indexed by `ExerciseType as usize`
pub static PROFILES: [ExerciseProfile; 7] = [
    ExerciseProfile {
        exercise: ExerciseType::Squat,
        reference_angles: &SQUAT_ANGLES,
        rep: rep(LeftKnee, 110.0, 150.0, Direction::Decreasing),
        range_of_motion: sweep(LeftKnee, RightKnee, 175.0, 90.0),
    },
    ExerciseProfile {
        exercise: ExerciseType::Pushup,
        reference_angles: &PUSHUP_ANGLES,
        rep: rep(LeftElbow, 100.0, 150.0, Direction::Decreasing),
        range_of_motion: sweep(LeftElbow, RightElbow, 165.0, 90.0),
    },
    ExerciseProfile {
        exercise: ExerciseType::Lunge,
        reference_angles: &LUNGE_ANGLES,
        rep: rep(LeftKnee, 110.0, 150.0, Direction::Decreasing),
        range_of_motion: sweep(LeftKnee, RightKnee, 175.0, 90.0),
    },
    ExerciseProfile {
        exercise: ExerciseType::Plank,
        reference_angles: &PLANK_ANGLES,
        rep: None,
        range_of_motion: None,
    },
    ExerciseProfile {
        exercise: ExerciseType::ShoulderPress,
        reference_angles: &SHOULDER_PRESS_ANGLES,
        rep: rep(LeftElbow, 100.0, 150.0, Direction::Decreasing),
        range_of_motion: sweep(LeftElbow, RightElbow, 90.0, 170.0),
    },
    ExerciseProfile {
        exercise: ExerciseType::BicepCurl,
        reference_angles: &BICEP_CURL_ANGLES,
        rep: rep(LeftElbow, 60.0, 140.0, Direction::Increasing),
        range_of_motion: sweep(LeftElbow, RightElbow, 160.0, 45.0),
    },
    ExerciseProfile {
        exercise: ExerciseType::General,
        reference_angles: &[],
        rep: None,
        range_of_motion: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_type() {
        for exercise in ExerciseType::ALL {
            assert_eq!(exercise.profile().exercise, exercise);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("squat".parse::<ExerciseType>().unwrap(), ExerciseType::Squat);
        assert_eq!("shoulderPress".parse::<ExerciseType>().unwrap(), ExerciseType::ShoulderPress);
        assert_eq!("bicep_curl".parse::<ExerciseType>().unwrap(), ExerciseType::BicepCurl);
        assert_eq!("Push-Up".parse::<ExerciseType>().unwrap(), ExerciseType::Pushup);
    }

    #[test]
    fn test_unknown_exercise_is_config_error() {
        let err = "deadlift".parse::<ExerciseType>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownExercise("deadlift".to_string()));
    }

    #[test]
    fn test_rep_triple_matches_key_joint() {
        for exercise in ExerciseType::ALL {
            if let Some(rep) = exercise.profile().rep {
                assert_eq!(rep.landmark_triple, rep.key_joint.triple());
                assert!(rep.thresholds.down < rep.thresholds.up);
            }
        }
    }

    #[test]
    fn test_rep_triple_follows_any_key_joint() {
        for joint in JointName::ALL {
            let config = rep(joint, 90.0, 150.0, Direction::Decreasing).unwrap();
            assert_eq!(config.landmark_triple, joint.triple());
        }
        let config = rep(JointName::RightKnee, 110.0, 150.0, Direction::Decreasing).unwrap();
        assert_eq!(
            config.landmark_triple,
            [LandmarkName::RightHip, LandmarkName::RightKnee, LandmarkName::RightAnkle]
        );
    }

    #[test]
    fn test_reference_ranges_are_ordered() {
        for exercise in ExerciseType::ALL {
            for r in exercise.profile().reference_angles {
                assert!(r.min <= r.ideal && r.ideal <= r.max, "{exercise}: {:?}", r.joint);
            }
        }
    }

    #[test]
    fn test_squat_thresholds() {
        let rep = ExerciseType::Squat.profile().rep.unwrap();
        assert_eq!(rep.thresholds.down, 110.0);
        assert_eq!(rep.thresholds.up, 150.0);
        assert_eq!(rep.direction, Direction::Decreasing);
    }
}

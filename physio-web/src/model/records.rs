//! Output records - plain data handed to display/persistence collaborators

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::joint::JointName;

/// Joint angles in degrees (0-180). Unreadable joints are absent, never zeroed.
pub type JointAngleSet = BTreeMap<JointName, f32>;

/// Repetition counter phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Unknown,
    Down,
    Up,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Unknown => "UNKNOWN",
            Phase::Down => "DOWN",
            Phase::Up => "UP",
        }
    }
}

/// Repetition counter state for one session
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepState {
    pub count: u32,
    pub phase: Phase,
    /// 0-1; zero for a frame whose key joint was unreadable
    pub confidence: f32,
    /// Last smoothed key angle that drove the state machine
    pub smoothed_angle: Option<f32>,
    /// Caller-supplied timestamp (ms) of the last readable frame
    pub last_update_timestamp: Option<f64>,
}

impl RepState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Feedback category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackType {
    Correction,
    Suggestion,
    Warning,
    Positive,
}

/// One piece of coaching feedback
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackMessage {
    #[serde(rename = "type")]
    pub kind: FeedbackType,
    pub text: String,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joint_name: Option<JointName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_angle: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_angle: Option<f32>,
}

impl FeedbackMessage {
    pub fn new(kind: FeedbackType, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            kind,
            text: text.into(),
            confidence,
            joint_name: None,
            target_angle: None,
            current_angle: None,
        }
    }

    /// Attach the joint this message is about
    pub fn on_joint(mut self, joint: JointName) -> Self {
        self.joint_name = Some(joint);
        self
    }

    pub fn with_angles(mut self, target: f32, current: f32) -> Self {
        self.target_angle = Some(target);
        self.current_angle = Some(current);
        self
    }

    /// Shorthand for [`Self::on_joint`] plus [`Self::with_angles`]
    pub fn for_joint(self, joint: JointName, target: f32, current: f32) -> Self {
        self.on_joint(joint).with_angles(target, current)
    }
}

/// Aggregate form scores, each 0-100
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub form: u8,
    pub alignment: u8,
    pub stability: u8,
    pub range: u8,
    pub overall: u8,
}

/// Everything the engine produces for one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub angles: JointAngleSet,
    pub rep: RepState,
    pub feedback: Vec<FeedbackMessage>,
    pub scores: ScoreSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_serializes_type_tag() {
        let msg = FeedbackMessage::new(FeedbackType::Suggestion, "Even out", 0.7)
            .for_joint(JointName::LeftShoulder, 95.0, 70.0);
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"suggestion""#));
        assert!(json.contains(r#""jointName":"left_shoulder""#));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let msg = FeedbackMessage::new(FeedbackType::Positive, "Nice", 0.5);
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("jointName"));
        assert!(!json.contains("targetAngle"));
    }

    #[test]
    fn test_default_rep_state() {
        let state = RepState::new();
        assert_eq!(state.count, 0);
        assert_eq!(state.phase, Phase::Unknown);
        assert_eq!(state.confidence, 0.0);
    }
}

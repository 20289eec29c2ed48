//! Landmark vocabulary and per-frame pose snapshots
//!
//! Landmarks follow the 17-point COCO layout used by most 2D pose
//! estimators (MoveNet, PoseNet, YOLO-pose).

use serde::{de, Deserialize, Deserializer, Serialize};

// ============================================================================
// LANDMARK NAMES (COCO - 17 total)
// ============================================================================

/// Number of landmarks in a full snapshot
pub const LANDMARK_COUNT: usize = 17;

/// Anatomical point reported by the pose estimator
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl LandmarkName {
    /// All names in canonical (flat-array) order
    pub const ALL: [LandmarkName; LANDMARK_COUNT] = [
        LandmarkName::Nose,
        LandmarkName::LeftEye,
        LandmarkName::RightEye,
        LandmarkName::LeftEar,
        LandmarkName::RightEar,
        LandmarkName::LeftShoulder,
        LandmarkName::RightShoulder,
        LandmarkName::LeftElbow,
        LandmarkName::RightElbow,
        LandmarkName::LeftWrist,
        LandmarkName::RightWrist,
        LandmarkName::LeftHip,
        LandmarkName::RightHip,
        LandmarkName::LeftKnee,
        LandmarkName::RightKnee,
        LandmarkName::LeftAnkle,
        LandmarkName::RightAnkle,
    ];

    /// Position in the canonical order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Look up a snake_case name such as `"left_knee"`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|n| n.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LandmarkName::Nose => "nose",
            LandmarkName::LeftEye => "left_eye",
            LandmarkName::RightEye => "right_eye",
            LandmarkName::LeftEar => "left_ear",
            LandmarkName::RightEar => "right_ear",
            LandmarkName::LeftShoulder => "left_shoulder",
            LandmarkName::RightShoulder => "right_shoulder",
            LandmarkName::LeftElbow => "left_elbow",
            LandmarkName::RightElbow => "right_elbow",
            LandmarkName::LeftWrist => "left_wrist",
            LandmarkName::RightWrist => "right_wrist",
            LandmarkName::LeftHip => "left_hip",
            LandmarkName::RightHip => "right_hip",
            LandmarkName::LeftKnee => "left_knee",
            LandmarkName::RightKnee => "right_knee",
            LandmarkName::LeftAnkle => "left_ankle",
            LandmarkName::RightAnkle => "right_ankle",
        }
    }

    /// The same point on the opposite side of the body.
    /// Midline points (nose) map to themselves.
    pub fn mirrored(self) -> Self {
        match self {
            LandmarkName::Nose => LandmarkName::Nose,
            LandmarkName::LeftEye => LandmarkName::RightEye,
            LandmarkName::RightEye => LandmarkName::LeftEye,
            LandmarkName::LeftEar => LandmarkName::RightEar,
            LandmarkName::RightEar => LandmarkName::LeftEar,
            LandmarkName::LeftShoulder => LandmarkName::RightShoulder,
            LandmarkName::RightShoulder => LandmarkName::LeftShoulder,
            LandmarkName::LeftElbow => LandmarkName::RightElbow,
            LandmarkName::RightElbow => LandmarkName::LeftElbow,
            LandmarkName::LeftWrist => LandmarkName::RightWrist,
            LandmarkName::RightWrist => LandmarkName::LeftWrist,
            LandmarkName::LeftHip => LandmarkName::RightHip,
            LandmarkName::RightHip => LandmarkName::LeftHip,
            LandmarkName::LeftKnee => LandmarkName::RightKnee,
            LandmarkName::RightKnee => LandmarkName::LeftKnee,
            LandmarkName::LeftAnkle => LandmarkName::RightAnkle,
            LandmarkName::RightAnkle => LandmarkName::LeftAnkle,
        }
    }
}

// ============================================================================
// LANDMARK DATA STRUCTURE
// ============================================================================

/// A single estimated 2D landmark
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Landmark {
    pub name: LandmarkName,
    pub x: f32,
    pub y: f32,
    /// Estimator confidence (0-1)
    pub confidence: f32,
}

/// Landmark as the page sends it. Estimators with larger skeletons
/// (MediaPipe's 33 points) report names outside the COCO set.
#[derive(Debug, Deserialize)]
struct RawLandmark {
    #[serde(default)]
    name: String,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
    #[serde(default, alias = "score", alias = "visibility")]
    confidence: Option<f32>,
}

impl RawLandmark {
    /// `None` for unknown names and non-finite coordinates
    fn into_landmark(self) -> Option<Landmark> {
        let name = LandmarkName::from_name(&self.name)?;
        let (x, y) = (self.x.filter(|v| v.is_finite())?, self.y.filter(|v| v.is_finite())?);
        Some(Landmark::new(name, x, y, self.confidence.unwrap_or(0.0)))
    }
}

impl<'de> Deserialize<'de> for Landmark {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawLandmark::deserialize(deserializer)?;
        let name = raw.name.clone();
        raw.into_landmark()
            .ok_or_else(|| de::Error::custom(format!("unusable landmark `{name}`")))
    }
}

impl Landmark {
    /// Confidence is clamped to [0, 1]; NaN reads as 0
    pub fn new(name: LandmarkName, x: f32, y: f32, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() { 0.0 } else { confidence.clamp(0.0, 1.0) };
        Self { name, x, y, confidence }
    }
}

/// All landmarks estimated for one frame, keyed uniquely by name
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(into = "Vec<Landmark>")]
pub struct PoseSnapshot {
    slots: [Option<Landmark>; LANDMARK_COUNT],
}

impl PoseSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a landmark, replacing any earlier one with the same name
    pub fn insert(&mut self, landmark: Landmark) {
        self.slots[landmark.name.index()] = Some(landmark);
    }

    /// Builder-style insert
    pub fn with(mut self, name: LandmarkName, x: f32, y: f32, confidence: f32) -> Self {
        self.insert(Landmark::new(name, x, y, confidence));
        self
    }

    pub fn get(&self, name: LandmarkName) -> Option<&Landmark> {
        self.slots[name.index()].as_ref()
    }

    /// Landmarks in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Flip every x-coordinate across a frame of the given width.
    ///
    /// Names are left alone: a selfie-view camera mirrors pixels, not anatomy.
    pub fn mirror_horizontally(&mut self, frame_width: f32) {
        for lm in self.slots.iter_mut().flatten() {
            lm.x = frame_width - lm.x;
        }
    }
}

impl From<Vec<Landmark>> for PoseSnapshot {
    fn from(landmarks: Vec<Landmark>) -> Self {
        landmarks.into_iter().collect()
    }
}

/// Unknown names and unreadable entries are dropped, not fatal
impl<'de> Deserialize<'de> for PoseSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<RawLandmark>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|lm| {
                let name = lm.name.clone();
                let landmark = lm.into_landmark();
                if landmark.is_none() {
                    log::trace!("skipping landmark `{}`", name);
                }
                landmark
            })
            .collect())
    }
}

impl From<PoseSnapshot> for Vec<Landmark> {
    fn from(snapshot: PoseSnapshot) -> Self {
        snapshot.slots.into_iter().flatten().collect()
    }
}

impl FromIterator<Landmark> for PoseSnapshot {
    fn from_iter<I: IntoIterator<Item = Landmark>>(iter: I) -> Self {
        let mut snapshot = PoseSnapshot::new();
        for lm in iter {
            snapshot.insert(lm);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_replaces() {
        let snapshot: PoseSnapshot = vec![
            Landmark::new(LandmarkName::Nose, 1.0, 1.0, 0.9),
            Landmark::new(LandmarkName::Nose, 2.0, 3.0, 0.7),
        ]
        .into();
        assert_eq!(snapshot.len(), 1);
        let nose = snapshot.get(LandmarkName::Nose).unwrap();
        assert_eq!((nose.x, nose.y), (2.0, 3.0));
    }

    #[test]
    fn test_iteration_is_canonical_order() {
        let snapshot = PoseSnapshot::new()
            .with(LandmarkName::RightAnkle, 0.0, 0.0, 1.0)
            .with(LandmarkName::Nose, 0.0, 0.0, 1.0)
            .with(LandmarkName::LeftHip, 0.0, 0.0, 1.0);
        let names: Vec<_> = snapshot.iter().map(|lm| lm.name).collect();
        assert_eq!(
            names,
            vec![LandmarkName::Nose, LandmarkName::LeftHip, LandmarkName::RightAnkle]
        );
    }

    #[test]
    fn test_mirror_flips_x_only() {
        let mut snapshot = PoseSnapshot::new().with(LandmarkName::LeftWrist, 100.0, 50.0, 0.8);
        snapshot.mirror_horizontally(640.0);
        let wrist = snapshot.get(LandmarkName::LeftWrist).unwrap();
        assert_eq!((wrist.x, wrist.y), (540.0, 50.0));
    }

    #[test]
    fn test_confidence_is_clamped() {
        let lm = Landmark::new(LandmarkName::Nose, 0.0, 0.0, 1.7);
        assert_eq!(lm.confidence, 1.0);
        let lm = Landmark::new(LandmarkName::Nose, 0.0, 0.0, f32::NAN);
        assert_eq!(lm.confidence, 0.0);
    }

    #[test]
    fn test_deserialize_from_json_array() {
        let json = r#"[{"name":"left_knee","x":1.0,"y":2.0,"score":0.6}]"#;
        let snapshot: PoseSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.get(LandmarkName::LeftKnee).unwrap().confidence, 0.6);
    }

    #[test]
    fn test_unknown_names_are_skipped() {
        let json = r#"[
            {"name":"left_knee","x":1.0,"y":2.0,"score":0.6},
            {"name":"left_pinky","x":3.0,"y":4.0,"score":0.9},
            {"name":"nose","x":5.0,"z":0.1,"visibility":0.8}
        ]"#;
        let snapshot: PoseSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(LandmarkName::LeftKnee).unwrap().x, 1.0);
    }

    #[test]
    fn test_deserialized_confidence_is_clamped() {
        let json = r#"[
            {"name":"nose","x":0.0,"y":0.0,"score":7.0},
            {"name":"left_hip","x":0.0,"y":0.0,"confidence":-0.5},
            {"name":"right_hip","x":0.0,"y":0.0}
        ]"#;
        let snapshot: PoseSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.get(LandmarkName::Nose).unwrap().confidence, 1.0);
        assert_eq!(snapshot.get(LandmarkName::LeftHip).unwrap().confidence, 0.0);
        assert_eq!(snapshot.get(LandmarkName::RightHip).unwrap().confidence, 0.0);

        let lm: Landmark =
            serde_json::from_str(r#"{"name":"nose","x":0.0,"y":0.0,"score":3.0}"#).unwrap();
        assert_eq!(lm.confidence, 1.0);
        assert!(serde_json::from_str::<Landmark>(r#"{"name":"left_pinky","x":0.0,"y":0.0}"#).is_err());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(LandmarkName::from_name("right_ankle"), Some(LandmarkName::RightAnkle));
        assert_eq!(LandmarkName::from_name("left_pinky"), None);
    }

    #[test]
    fn test_mirrored_names_roundtrip() {
        for name in LandmarkName::ALL {
            assert_eq!(name.mirrored().mirrored(), name);
        }
    }
}

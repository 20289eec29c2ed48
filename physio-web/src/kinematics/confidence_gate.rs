//! Confidence gate - first filter between the estimator and the geometry
//!
//! Landmarks below the confidence floor (or with non-finite coordinates)
//! are treated as missing so that downstream angles are omitted instead of
//! computed from noise.

use crate::config::DEFAULT_CONFIDENCE_FLOOR;
use crate::model::{Landmark, LandmarkName, PoseSnapshot};

/// Accepts or rejects landmarks by estimator confidence
#[derive(Clone, Copy, Debug)]
pub struct ConfidenceGate {
    /// Minimum confidence to accept raw data
    threshold: f32,
}

impl ConfidenceGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Set confidence threshold
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether a landmark is usable for geometry
    pub fn accepts(&self, landmark: &Landmark) -> bool {
        landmark.confidence >= self.threshold && landmark.x.is_finite() && landmark.y.is_finite()
    }

    /// Look up a landmark, returning `None` if absent or gated out
    pub fn landmark<'a>(&self, snapshot: &'a PoseSnapshot, name: LandmarkName) -> Option<&'a Landmark> {
        snapshot.get(name).filter(|lm| self.accepts(lm))
    }

    /// All three landmarks of a triple, or `None` if any is unusable
    pub fn triple<'a>(
        &self,
        snapshot: &'a PoseSnapshot,
        names: [LandmarkName; 3],
    ) -> Option<[&'a Landmark; 3]> {
        Some([
            self.landmark(snapshot, names[0])?,
            self.landmark(snapshot, names[1])?,
            self.landmark(snapshot, names[2])?,
        ])
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_FLOOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let gate = ConfidenceGate::default();
        assert!(gate.accepts(&Landmark::new(LandmarkName::Nose, 0.0, 0.0, 0.5)));
        assert!(!gate.accepts(&Landmark::new(LandmarkName::Nose, 0.0, 0.0, 0.49)));
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let gate = ConfidenceGate::default();
        assert!(!gate.accepts(&Landmark::new(LandmarkName::Nose, f32::NAN, 0.0, 0.9)));
    }

    #[test]
    fn test_triple_requires_all_three() {
        let gate = ConfidenceGate::default();
        let triple = [LandmarkName::LeftHip, LandmarkName::LeftKnee, LandmarkName::LeftAnkle];
        let snapshot = PoseSnapshot::new()
            .with(LandmarkName::LeftHip, 0.0, 0.0, 0.9)
            .with(LandmarkName::LeftKnee, 0.0, 1.0, 0.9)
            .with(LandmarkName::LeftAnkle, 0.0, 2.0, 0.2);
        assert!(gate.triple(&snapshot, triple).is_none());

        let mut gate = gate;
        gate.set_threshold(0.1);
        assert!(gate.triple(&snapshot, triple).is_some());
    }
}

//! Joint angle calculation using atan2
//!
//! The angle at the middle landmark of a triple is the absolute difference
//! between the headings of the two limb vectors, reflected into [0, 180].

use nalgebra::Vector2;

use super::confidence_gate::ConfidenceGate;
use crate::model::{JointAngleSet, JointName, Landmark, LandmarkName, PoseSnapshot};

/// Calculate the angle at `vertex` in degrees
///
/// Returns angle in degrees:
/// - 0° = limbs folded onto each other
/// - 180° = fully straight
pub fn calculate_angle(first: (f32, f32), vertex: (f32, f32), last: (f32, f32)) -> f32 {
    let origin = Vector2::new(vertex.0, vertex.1);
    let to_first = Vector2::new(first.0, first.1) - origin;
    let to_last = Vector2::new(last.0, last.1) - origin;

    let radians = to_last.y.atan2(to_last.x) - to_first.y.atan2(to_first.x);
    let degrees = radians.to_degrees().abs();

    let reflected = if degrees > 180.0 { 360.0 - degrees } else { degrees };
    reflected.clamp(0.0, 180.0)
}

/// Angle at `b` formed by landmarks `a`-`b`-`c`
pub fn landmark_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f32 {
    calculate_angle((a.x, a.y), (b.x, b.y), (c.x, c.y))
}

/// Angle for an arbitrary triple, `None` if any landmark is gated out
pub fn triple_angle(
    snapshot: &PoseSnapshot,
    triple: [LandmarkName; 3],
    gate: &ConfidenceGate,
) -> Option<f32> {
    let [a, b, c] = gate.triple(snapshot, triple)?;
    Some(landmark_angle(a, b, c))
}

/// Angle for one joint, trying its fallback triple if the primary is unreadable
pub fn joint_angle(snapshot: &PoseSnapshot, joint: JointName, gate: &ConfidenceGate) -> Option<f32> {
    triple_angle(snapshot, joint.triple(), gate)
        .or_else(|| joint.fallback_triple().and_then(|t| triple_angle(snapshot, t, gate)))
}

/// Every readable joint angle in the snapshot
pub fn joint_angles(snapshot: &PoseSnapshot, gate: &ConfidenceGate) -> JointAngleSet {
    JointName::ALL
        .iter()
        .filter_map(|&joint| joint_angle(snapshot, joint, gate).map(|angle| (joint, angle)))
        .collect()
}

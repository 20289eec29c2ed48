//! Flat landmark decoding for the JS bridge
//!
//! Pose estimators in the page hand over a Float32Array of
//! 17 landmarks x 3 values (x, y, confidence) in COCO order.

use crate::model::{Landmark, LandmarkName, PoseSnapshot, LANDMARK_COUNT};

/// Values per landmark in the flat layout
pub const VALUES_PER_LANDMARK: usize = 3;

/// Expected Float32Array length
pub const FLAT_LENGTH: usize = LANDMARK_COUNT * VALUES_PER_LANDMARK;

/// Decode a flat `[x, y, confidence, ...]` buffer.
///
/// Returns `None` on a length mismatch. Entries with non-finite
/// coordinates are left out of the snapshot.
pub fn snapshot_from_flat(data: &[f32]) -> Option<PoseSnapshot> {
    if data.len() != FLAT_LENGTH {
        log::warn!(
            "Invalid landmark data length: {} (expected {})",
            data.len(),
            FLAT_LENGTH
        );
        return None;
    }

    let snapshot = data
        .chunks_exact(VALUES_PER_LANDMARK)
        .zip(LandmarkName::ALL)
        .filter(|(values, _)| values[0].is_finite() && values[1].is_finite())
        .map(|(values, name)| {
            let confidence = if values[2].is_finite() { values[2] } else { 0.0 };
            Landmark::new(name, values[0], values[1], confidence)
        })
        .collect();
    Some(snapshot)
}

/// Inverse of [`snapshot_from_flat`]; missing landmarks become NaN
pub fn snapshot_to_flat(snapshot: &PoseSnapshot) -> Vec<f32> {
    let mut data = vec![f32::NAN; FLAT_LENGTH];
    for lm in snapshot.iter() {
        let base = lm.name.index() * VALUES_PER_LANDMARK;
        data[base] = lm.x;
        data[base + 1] = lm.y;
        data[base + 2] = lm.confidence;
    }
    data
}

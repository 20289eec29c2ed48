//! Rolling angle buffers for per-joint moving-average smoothing
//!
//! Each joint keeps the last N raw samples in a fixed arena. The arena is
//! allocated once per session; pushing a sample never allocates.

use crate::config::DEFAULT_SMOOTHING_WINDOW;
use crate::model::{JointAngleSet, JointName, JOINT_COUNT};

/// Fixed-capacity circular buffer of angle samples
#[derive(Clone, Debug)]
pub struct AngleBuffer {
    /// Sample slots, reused in place
    data: Box<[f32]>,

    /// Current write position (points to next slot to write)
    write_index: usize,

    /// Number of valid samples (saturates at capacity)
    len: usize,
}

impl AngleBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: vec![0.0; capacity].into_boxed_slice(),
            write_index: 0,
            len: 0,
        }
    }

    /// Push a new sample, overwriting the oldest once full.
    /// Returns the mean of the buffer after the push.
    pub fn push(&mut self, sample: f32) -> f32 {
        self.data[self.write_index] = sample;
        self.write_index = (self.write_index + 1) % self.data.len();
        self.len = (self.len + 1).min(self.data.len());
        self.sum() / self.len as f32
    }

    /// Arithmetic mean of the held samples
    pub fn mean(&self) -> Option<f32> {
        if self.len == 0 {
            None
        } else {
            Some(self.sum() / self.len as f32)
        }
    }

    // Until the first wrap the valid samples are exactly data[..len]
    fn sum(&self) -> f32 {
        self.data[..self.len].iter().sum()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let cap = self.data.len();
        let start = (self.write_index + cap - self.len) % cap;
        (0..self.len).map(move |i| self.data[(start + i) % cap])
    }

    /// Clear the buffer (useful on reset)
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|slot| *slot = 0.0);
        self.write_index = 0;
        self.len = 0;
    }
}

/// One [`AngleBuffer`] per tracked joint
#[derive(Clone, Debug)]
pub struct TemporalSmoother {
    buffers: [AngleBuffer; JOINT_COUNT],
}

impl TemporalSmoother {
    pub fn new(window: usize) -> Self {
        Self {
            buffers: std::array::from_fn(|_| AngleBuffer::new(window)),
        }
    }

    /// Feed one sample for a joint, returning its smoothed angle
    pub fn smooth_joint(&mut self, joint: JointName, angle: f32) -> f32 {
        self.buffers[joint.index()].push(angle)
    }

    /// Smooth every joint present in `raw`. Absent joints get no sample and
    /// stay absent in the output.
    pub fn smooth(&mut self, raw: &JointAngleSet) -> JointAngleSet {
        raw.iter()
            .map(|(&joint, &angle)| (joint, self.smooth_joint(joint, angle)))
            .collect()
    }

    pub fn history(&self, joint: JointName) -> &AngleBuffer {
        &self.buffers[joint.index()]
    }

    /// True when no joint holds any samples
    pub fn is_empty(&self) -> bool {
        self.buffers.iter().all(AngleBuffer::is_empty)
    }

    pub fn window(&self) -> usize {
        self.buffers[0].capacity()
    }

    pub fn reset(&mut self) {
        self.buffers.iter_mut().for_each(AngleBuffer::clear);
    }
}

impl Default for TemporalSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_partial_buffer() {
        let mut buffer = AngleBuffer::new(4);
        assert_eq!(buffer.mean(), None);
        assert_eq!(buffer.push(10.0), 10.0);
        assert_eq!(buffer.push(20.0), 15.0);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut buffer = AngleBuffer::new(3);
        for sample in [10.0, 20.0, 30.0, 40.0] {
            buffer.push(sample);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.iter().collect::<Vec<_>>(), vec![20.0, 30.0, 40.0]);
        assert_eq!(buffer.mean(), Some(30.0));
    }

    #[test]
    fn test_capacity_is_fixed() {
        let mut buffer = AngleBuffer::new(10);
        for i in 0..1000 {
            buffer.push(i as f32);
        }
        assert_eq!(buffer.capacity(), 10);
        assert_eq!(buffer.len(), 10);
        assert_eq!(buffer.mean(), Some(994.5));
    }

    #[test]
    fn test_clear_empties_buffer() {
        let mut buffer = AngleBuffer::new(3);
        buffer.push(5.0);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.iter().count(), 0);
    }

    #[test]
    fn test_smoother_keeps_joints_separate() {
        let mut smoother = TemporalSmoother::new(10);
        let mut raw = JointAngleSet::new();
        raw.insert(JointName::LeftKnee, 100.0);
        raw.insert(JointName::RightKnee, 160.0);
        smoother.smooth(&raw);

        raw.insert(JointName::LeftKnee, 120.0);
        raw.remove(&JointName::RightKnee);
        let smoothed = smoother.smooth(&raw);

        assert_eq!(smoothed[&JointName::LeftKnee], 110.0);
        assert!(!smoothed.contains_key(&JointName::RightKnee));
        assert_eq!(smoother.history(JointName::RightKnee).len(), 1);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut smoother = TemporalSmoother::default();
        smoother.smooth_joint(JointName::Spine, 170.0);
        assert!(!smoother.is_empty());
        smoother.reset();
        assert!(smoother.is_empty());
        assert_eq!(smoother.window(), 10);
    }
}

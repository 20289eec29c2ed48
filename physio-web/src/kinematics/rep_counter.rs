//! Repetition counting state machine
//!
//! Phases are driven by the smoothed key-joint angle crossing the profile
//! thresholds. Between the thresholds the phase holds, so an angle has to
//! travel the full band before the next transition.

use crate::model::{Direction, ExerciseProfile, JointAngleSet, Phase, RepConfig, RepState};

/// Confidence reported on the frame that completes a repetition
pub const REP_CONFIDENCE: f32 = 0.9;

/// Confidence while waiting at the top or before the first transition
pub const IDLE_CONFIDENCE: f32 = 0.5;

/// Bounds for the in-progress confidence while in `Down`
pub const DOWN_CONFIDENCE_RANGE: (f32, f32) = (0.4, 0.8);

/// Repetition counter for a single tracked subject
#[derive(Clone, Debug)]
pub struct RepCounter {
    /// `None` for static holds: the counter stays in `Unknown`
    config: Option<RepConfig>,
    state: RepState,
}

impl RepCounter {
    pub fn new(config: Option<RepConfig>) -> Self {
        Self {
            config,
            state: RepState::new(),
        }
    }

    pub fn for_profile(profile: &ExerciseProfile) -> Self {
        Self::new(profile.rep)
    }

    /// Update from a smoothed angle set.
    ///
    /// Uses the left key joint, falling back to its mirrored right joint.
    /// If neither is present the state is held and confidence drops to 0.
    pub fn update(&mut self, smoothed: &JointAngleSet, timestamp: f64) -> &RepState {
        let Some(config) = self.config else {
            self.state.confidence = 0.0;
            return &self.state;
        };

        let key = config.key_joint;
        let angle = smoothed
            .get(&key)
            .or_else(|| smoothed.get(&key.mirrored()))
            .copied();

        match angle {
            Some(angle) => self.observe(angle, timestamp),
            None => {
                log::trace!("{} unreadable, holding {}", key.label(), self.state.phase.name());
                self.state.confidence = 0.0;
                &self.state
            }
        }
    }

    /// Advance the state machine with one already-smoothed angle
    pub fn observe(&mut self, angle: f32, timestamp: f64) -> &RepState {
        let Some(config) = self.config else {
            self.state.confidence = 0.0;
            return &self.state;
        };

        let previous = self.state.phase;
        let phase = classify(angle, &config).unwrap_or(previous);

        if previous == Phase::Down && phase == Phase::Up {
            self.state.count += 1;
            self.state.confidence = REP_CONFIDENCE;
            log::debug!("rep {} counted at {:.1}°", self.state.count, angle);
        } else {
            self.state.confidence = match phase {
                Phase::Down => down_progress(angle, &config),
                Phase::Up | Phase::Unknown => IDLE_CONFIDENCE,
            };
        }

        self.state.phase = phase;
        self.state.smoothed_angle = Some(angle);
        self.state.last_update_timestamp = Some(timestamp);
        &self.state
    }

    pub fn state(&self) -> &RepState {
        &self.state
    }

    pub fn count(&self) -> u32 {
        self.state.count
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn config(&self) -> Option<&RepConfig> {
        self.config.as_ref()
    }

    /// Zero the count and return to `Unknown`
    pub fn reset(&mut self) {
        self.state = RepState::new();
    }
}

/// Phase implied by an angle outside the threshold band, `None` inside it
fn classify(angle: f32, config: &RepConfig) -> Option<Phase> {
    let (below, above) = match config.direction {
        Direction::Decreasing => (Phase::Down, Phase::Up),
        Direction::Increasing => (Phase::Up, Phase::Down),
    };
    if angle < config.thresholds.down {
        Some(below)
    } else if angle > config.thresholds.up {
        Some(above)
    } else {
        None
    }
}

/// Fraction of the band already travelled from the `Up` side, clamped
fn down_progress(angle: f32, config: &RepConfig) -> f32 {
    let t = config.thresholds;
    let travelled = match config.direction {
        Direction::Decreasing => t.up - angle,
        Direction::Increasing => angle - t.down,
    };
    let (lo, hi) = DOWN_CONFIDENCE_RANGE;
    (travelled / (t.up - t.down)).clamp(lo, hi)
}

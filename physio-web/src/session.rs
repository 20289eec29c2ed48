//! Per-subject exercise session
//!
//! Owns every piece of mutable state for one tracked subject: the joint
//! smoother, the repetition counter and the running summary. Sessions
//! share nothing, so independent subjects can be processed on separate
//! threads without locking.

use std::borrow::Cow;

use serde::Serialize;

use crate::analysis::{FeedbackGenerator, PoseScorer};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::kinematics::{joint_angles, ConfidenceGate, RepCounter, TemporalSmoother};
use crate::model::{ExerciseProfile, ExerciseType, FrameReport, PoseSnapshot, RepState, ScoreSet};

/// Running totals a persistence collaborator stores at session end
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub exercise: Option<ExerciseType>,
    pub reps: u32,
    pub frames_processed: u64,
    /// Frames where at least one joint angle was readable
    pub frames_with_pose: u64,
    /// Mean scores over frames with a readable pose
    pub average_scores: ScoreSet,
}

#[derive(Clone, Debug, Default)]
struct ScoreTotals {
    frames: u64,
    with_pose: u64,
    form: u64,
    alignment: u64,
    stability: u64,
    range: u64,
    overall: u64,
}

impl ScoreTotals {
    fn add(&mut self, scores: &ScoreSet, has_pose: bool) {
        self.frames += 1;
        if !has_pose {
            return;
        }
        self.with_pose += 1;
        self.form += u64::from(scores.form);
        self.alignment += u64::from(scores.alignment);
        self.stability += u64::from(scores.stability);
        self.range += u64::from(scores.range);
        self.overall += u64::from(scores.overall);
    }

    fn averages(&self) -> ScoreSet {
        if self.with_pose == 0 {
            return ScoreSet::default();
        }
        let avg = |total: u64| ((total as f64 / self.with_pose as f64).round() as u64).min(100) as u8;
        ScoreSet {
            form: avg(self.form),
            alignment: avg(self.alignment),
            stability: avg(self.stability),
            range: avg(self.range),
            overall: avg(self.overall),
        }
    }
}

/// One subject performing one exercise
#[derive(Clone, Debug)]
pub struct ExerciseSession {
    profile: &'static ExerciseProfile,
    config: EngineConfig,
    gate: ConfidenceGate,
    smoother: TemporalSmoother,
    counter: RepCounter,
    feedback: FeedbackGenerator,
    scorer: PoseScorer,
    totals: ScoreTotals,
}

impl ExerciseSession {
    /// Validate configuration and resolve the exercise profile.
    /// This is the only fallible step; frames never error.
    pub fn start(exercise: ExerciseType, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let profile = exercise.profile();
        let gate = ConfidenceGate::new(config.confidence_floor);

        log::info!(
            "starting {} session (floor {:.2}, window {})",
            exercise,
            config.confidence_floor,
            config.smoothing_window
        );

        Ok(Self {
            profile,
            smoother: TemporalSmoother::new(config.smoothing_window),
            counter: RepCounter::for_profile(profile),
            feedback: FeedbackGenerator::new(gate),
            scorer: PoseScorer::new(gate),
            gate,
            config,
            totals: ScoreTotals::default(),
        })
    }

    /// [`Self::start`] with an exercise name such as `"shoulderPress"`
    pub fn from_name(exercise: &str, config: EngineConfig) -> Result<Self> {
        Self::start(exercise.parse()?, config)
    }

    /// Run the full pipeline for one frame
    pub fn process_frame(&mut self, snapshot: &PoseSnapshot, timestamp: f64) -> FrameReport {
        let snapshot = match self.config.mirror_width {
            Some(width) => {
                let mut mirrored = snapshot.clone();
                mirrored.mirror_horizontally(width);
                Cow::Owned(mirrored)
            }
            None => Cow::Borrowed(snapshot),
        };

        let raw = joint_angles(&snapshot, &self.gate);
        let angles = self.smoother.smooth(&raw);
        let rep = self.counter.update(&angles, timestamp).clone();
        let feedback = self.feedback.generate(&angles, &snapshot, self.profile);
        let scores = self.scorer.score(&angles, &snapshot, self.profile);

        self.totals.add(&scores, !angles.is_empty());

        FrameReport {
            angles,
            rep,
            feedback,
            scores,
        }
    }

    /// Zero the count, return to `Unknown`, drop smoothing history and totals
    pub fn reset(&mut self) {
        self.counter.reset();
        self.smoother.reset();
        self.totals = ScoreTotals::default();
        log::info!("{} session reset", self.profile.exercise);
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            exercise: Some(self.profile.exercise),
            reps: self.counter.count(),
            frames_processed: self.totals.frames,
            frames_with_pose: self.totals.with_pose,
            average_scores: self.totals.averages(),
        }
    }

    pub fn exercise(&self) -> ExerciseType {
        self.profile.exercise
    }

    pub fn profile(&self) -> &'static ExerciseProfile {
        self.profile
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rep_state(&self) -> &RepState {
        self.counter.state()
    }

    pub fn smoother(&self) -> &TemporalSmoother {
        &self.smoother
    }
}

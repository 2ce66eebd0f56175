//! Compilation plan
//!
//! Glue between the two engines: sequence the clips, balance the loudness of
//! the ones that have a measurement, and hand the renderer one list with
//! timing and gain per clip.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::CompilationConfig;
use crate::error::CoreResult;
use crate::loudness::{compute_for_samples, db_to_linear};
use crate::sequence::{sequence_with_rng, total_duration};
use crate::types::{Clip, LoudnessSample, TimedClip};

/// One clip of the compilation with its render gain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedClip {
    #[serde(flatten)]
    pub timed: TimedClip,
    /// `None` when the clip has no loudness measurement
    pub gain_db: Option<f64>,
    /// Linear multiplier for the renderer (1.0 without a measurement)
    pub gain_linear: f32,
}

/// Ordered, timed and gain-adjusted clips ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationPlan {
    pub clips: Vec<PlannedClip>,
    /// `None` when no clip had a measurement
    pub target_loudness: Option<f64>,
    pub total_duration: f64,
}

impl PlannedClip {
    /// Id of the underlying clip
    pub fn id(&self) -> &str {
        &self.timed.clip.id
    }
}

impl CompilationPlan {
    /// Build a plan with the thread-local RNG.
    pub fn build(
        clips: &[Clip],
        samples: &[LoudnessSample],
        config: &CompilationConfig,
    ) -> CoreResult<Self> {
        Self::build_with_rng(clips, samples, config, &mut rand::thread_rng())
    }

    /// Build a plan.
    ///
    /// Samples referencing clips that are not in `clips` are ignored. If a
    /// clip id is measured more than once, the last sample wins for its
    /// gain, though every sample still counts toward the target.
    pub fn build_with_rng<R: Rng>(
        clips: &[Clip],
        samples: &[LoudnessSample],
        config: &CompilationConfig,
        rng: &mut R,
    ) -> CoreResult<Self> {
        let timed = sequence_with_rng(clips, &config.sequence, rng);
        let known: HashSet<&str> = clips.iter().map(|c| c.id.as_str()).collect();

        let (measured, unknown): (Vec<LoudnessSample>, Vec<LoudnessSample>) = samples
            .iter()
            .cloned()
            .partition(|s| known.contains(s.clip_id.as_str()));
        for sample in &unknown {
            log::warn!(
                "Ignoring loudness sample for unknown clip {:?}",
                sample.clip_id
            );
        }

        let loudness = &config.loudness;
        let (gains, target_loudness) = if measured.is_empty() {
            (HashMap::new(), None)
        } else {
            let fixed_target = Some(loudness.fixed_target_db);
            let (gains, target) = compute_for_samples(&measured, loudness.strategy, fixed_target)?;
            let gains: HashMap<String, f64> = gains
                .into_iter()
                .map(|g| (g.clip_id, loudness.limit(g.adjustment_db)))
                .collect();
            (gains, Some(target))
        };

        let total_duration = total_duration(&timed);
        let clips: Vec<PlannedClip> = timed
            .into_iter()
            .map(|timed| {
                let gain_db = gains.get(&timed.clip.id).copied();
                PlannedClip {
                    timed,
                    gain_db,
                    gain_linear: gain_db.map(db_to_linear).unwrap_or(1.0),
                }
            })
            .collect();

        log::info!(
            "Built compilation plan: {} clips, {} measured, {:.2}s total",
            clips.len(),
            gains.len(),
            total_duration
        );

        Ok(Self {
            clips,
            target_loudness,
            total_duration,
        })
    }
}

//! Loudness balancer
//!
//! Picks one target loudness for a set of clips and computes the additive
//! dB correction that brings each clip onto it. The measurements themselves
//! come from an external analysis step.
//!
//! For every sample `s[i]`: `s[i] + adjustments[i] == target_loudness`.

mod gain;

pub use gain::{db_to_linear, GainLimits};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{LoudnessSample, LoudnessStrategy, DEFAULT_FIXED_TARGET_DB};

/// Output of [`compute_adjustments`], index-aligned with the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoudnessAdjustments {
    pub adjustments: Vec<f64>,
    pub target_loudness: f64,
}

/// Gain adjustment for one measured clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipGain {
    pub clip_id: String,
    pub adjustment_db: f64,
}

/// Compute per-sample gain adjustments toward a common target.
///
/// `fixed_target_db` is only read by [`LoudnessStrategy::Fixed`] and defaults
/// to [`DEFAULT_FIXED_TARGET_DB`].
///
/// # Errors
/// `InvalidArgument` when `samples` is empty and the strategy derives its
/// target from the data (`Average`, `Median`).
///
/// # Example
/// ```
/// use cardreel_core::loudness::compute_adjustments;
/// use cardreel_core::LoudnessStrategy;
///
/// let result = compute_adjustments(&[-12.0, -28.0], LoudnessStrategy::Fixed, None);
/// let result = result.unwrap();
/// assert_eq!(result.target_loudness, -16.0);
/// assert_eq!(result.adjustments, vec![-4.0, 12.0]);
/// ```
pub fn compute_adjustments(
    samples: &[f64],
    strategy: LoudnessStrategy,
    fixed_target_db: Option<f64>,
) -> CoreResult<LoudnessAdjustments> {
    let target_loudness = target_loudness(samples, strategy, fixed_target_db)?;
    let adjustments = samples.iter().map(|&s| target_loudness - s).collect();

    log::debug!(
        "compute_adjustments: {} samples, strategy={}, target={:.2} dB",
        samples.len(),
        strategy,
        target_loudness
    );

    Ok(LoudnessAdjustments {
        adjustments,
        target_loudness,
    })
}

/// Same as [`compute_adjustments`] but keyed by clip id, in input order.
pub fn compute_for_samples(
    samples: &[LoudnessSample],
    strategy: LoudnessStrategy,
    fixed_target_db: Option<f64>,
) -> CoreResult<(Vec<ClipGain>, f64)> {
    let values: Vec<f64> = samples.iter().map(|s| s.loudness_db).collect();
    let result = compute_adjustments(&values, strategy, fixed_target_db)?;
    let gains = samples
        .iter()
        .zip(result.adjustments)
        .map(|(sample, adjustment_db)| ClipGain {
            clip_id: sample.clip_id.clone(),
            adjustment_db,
        })
        .collect();
    Ok((gains, result.target_loudness))
}

/// Resolve the target loudness for a strategy.
pub fn target_loudness(
    samples: &[f64],
    strategy: LoudnessStrategy,
    fixed_target_db: Option<f64>,
) -> CoreResult<f64> {
    match strategy {
        LoudnessStrategy::Fixed => Ok(fixed_target_db.unwrap_or(DEFAULT_FIXED_TARGET_DB)),
        LoudnessStrategy::Average | LoudnessStrategy::Median if samples.is_empty() => {
            Err(CoreError::InvalidArgument(format!(
                "{} loudness target needs at least one sample",
                strategy
            )))
        }
        LoudnessStrategy::Average => Ok(mean(samples)),
        LoudnessStrategy::Median => Ok(median(samples)),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of a non-empty slice; even counts average the two middle values.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

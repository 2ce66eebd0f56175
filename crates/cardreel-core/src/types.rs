//! Common types for Cardreel
//!
//! Clip descriptors as supplied by the card library, the timed clips the
//! sequencer produces, and the rule/strategy enums that drive both engines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// Target used by [`LoudnessStrategy::Fixed`] when the caller gives none (dB)
pub const DEFAULT_FIXED_TARGET_DB: f64 = -16.0;

/// One selected segment of a source video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    /// Stable identifier, unchanged by reordering
    pub id: String,
    /// Category tags; only the first one is used for distribution
    #[serde(default, deserialize_with = "tags_or_empty")]
    pub category_tags: Vec<String>,
    /// Offset into the source media in seconds
    pub source_start: f64,
    pub source_end: f64,
}

/// Accept a missing or `null` tag list as empty.
fn tags_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(tags.unwrap_or_default())
}

impl Clip {
    /// Create a clip from its id, tags and source range
    pub fn new(
        id: impl Into<String>,
        category_tags: Vec<String>,
        source_start: f64,
        source_end: f64,
    ) -> Self {
        Self {
            id: id.into(),
            category_tags,
            source_start,
            source_end,
        }
    }

    /// The primary category tag (first entry), if the clip has any tags
    pub fn primary_category(&self) -> Option<&str> {
        self.category_tags.first().map(String::as_str)
    }

    /// Length of the selected range. NaN if either bound is non-finite.
    #[inline]
    pub fn source_duration(&self) -> f64 {
        self.source_end - self.source_start
    }
}

/// A clip placed on the output timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedClip {
    #[serde(flatten)]
    pub clip: Clip,
    /// Seconds from the start of the assembled output
    pub start_time: f64,
    pub duration: f64,
    pub end_time: f64,
}

/// Measured loudness for one clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoudnessSample {
    /// Id of the measured clip (lookup only)
    pub clip_id: String,
    /// Typically negative, dBFS-style
    pub loudness_db: f64,
}

/// How the sequencer orders clips after category distribution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    /// Keep the order produced by distribution
    #[default]
    Sequential,
    /// Uniform Fisher–Yates permutation
    Shuffle,
    /// Random-comparator sort. Not uniform; kept for parity with the
    /// desktop app's "random" mode.
    #[serde(rename = "random")]
    BiasedRandom,
}

impl OrderMode {
    pub const ALL: [OrderMode; 3] = [
        OrderMode::Sequential,
        OrderMode::Shuffle,
        OrderMode::BiasedRandom,
    ];

    /// Name used in config files and the desktop app
    pub fn name(&self) -> &'static str {
        match self {
            OrderMode::Sequential => "sequential",
            OrderMode::Shuffle => "shuffle",
            OrderMode::BiasedRandom => "random",
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrderMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| unknown_name("order mode", s))
    }
}

/// Rules applied by the sequencer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SequenceRules {
    pub mode: OrderMode,
    /// Spread clips sharing a primary tag across the sequence
    pub distribute_by_category: bool,
}

impl SequenceRules {
    pub fn new(mode: OrderMode, distribute_by_category: bool) -> Self {
        Self {
            mode,
            distribute_by_category,
        }
    }
}

/// How the balancer picks the common target loudness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoudnessStrategy {
    /// Arithmetic mean of the measurements
    #[default]
    Average,
    /// Median of the measurements
    Median,
    /// Caller-supplied target
    Fixed,
}

impl LoudnessStrategy {
    pub const ALL: [LoudnessStrategy; 3] = [
        LoudnessStrategy::Average,
        LoudnessStrategy::Median,
        LoudnessStrategy::Fixed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LoudnessStrategy::Average => "average",
            LoudnessStrategy::Median => "median",
            LoudnessStrategy::Fixed => "fixed",
        }
    }

    /// Parse a strategy name, falling back to `Average` for unknown names.
    ///
    /// Matches the desktop app, which silently treats anything it does not
    /// recognise as "average". Prefer [`str::parse`], which rejects them.
    pub fn from_str_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            log::warn!("Unknown loudness strategy {:?}, falling back to average", s);
            LoudnessStrategy::Average
        })
    }
}

impl fmt::Display for LoudnessStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LoudnessStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoudnessStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| unknown_name("loudness strategy", s))
    }
}

fn unknown_name(kind: &str, name: &str) -> CoreError {
    CoreError::InvalidArgument(format!("unknown {}: {:?}", kind, name))
}

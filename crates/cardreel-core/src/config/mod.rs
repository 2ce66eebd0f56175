//! Compilation configuration
//!
//! Persisted as YAML; every field has a default so partial files load.
//!
//! ```yaml
//! sequence:
//!   mode: shuffle            # sequential | shuffle | random
//!   distributeByCategory: true
//! loudness:
//!   strategy: median         # average | median | fixed
//!   fixedTargetDb: -16.0
//!   limitsEnabled: true
//!   limits:
//!     minGainDb: -24.0
//!     maxGainDb: 12.0
//! ```

mod io;
mod paths;

pub use io::{load_config, save_config, try_load_config};
pub use paths::{default_config_dir, default_config_path};

use serde::{Deserialize, Serialize};

use crate::loudness::GainLimits;
use crate::types::{LoudnessStrategy, SequenceRules, DEFAULT_FIXED_TARGET_DB};

/// File name used under [`default_config_dir`]
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Top-level config for building a compilation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilationConfig {
    pub sequence: SequenceRules,
    pub loudness: LoudnessConfig,
}

/// How gains are computed for the compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoudnessConfig {
    pub strategy: LoudnessStrategy,
    /// Target for the `fixed` strategy
    pub fixed_target_db: f64,
    /// Clamp adjustments to `limits` before they reach the renderer
    pub limits_enabled: bool,
    pub limits: GainLimits,
}

impl Default for LoudnessConfig {
    fn default() -> Self {
        Self {
            strategy: LoudnessStrategy::Average,
            fixed_target_db: DEFAULT_FIXED_TARGET_DB,
            limits_enabled: false,
            limits: GainLimits::default(),
        }
    }
}

impl LoudnessConfig {
    /// Apply the limits if enabled
    pub fn limit(&self, gain_db: f64) -> f64 {
        if self.limits_enabled {
            self.limits.clamp(gain_db)
        } else {
            gain_db
        }
    }
}

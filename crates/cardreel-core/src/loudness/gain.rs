//! Gain safety limits and dB conversion

use serde::{Deserialize, Serialize};

/// Bounds applied to a gain adjustment before it reaches the renderer
///
/// Clamping breaks the "measurement + adjustment == target" relationship
/// for clips outside the window, so it is only applied on request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GainLimits {
    /// Maximum cut in dB (most negative adjustment)
    /// Default: -24.0 dB
    pub min_gain_db: f64,

    /// Maximum boost in dB (safety limit for very quiet clips)
    /// Default: 12.0 dB
    pub max_gain_db: f64,
}

impl Default for GainLimits {
    fn default() -> Self {
        Self {
            min_gain_db: -24.0,
            max_gain_db: 12.0,
        }
    }
}

impl GainLimits {
    /// Clamp an adjustment into `[min_gain_db, max_gain_db]`.
    ///
    /// NaN stays NaN.
    pub fn clamp(&self, gain_db: f64) -> f64 {
        if gain_db.is_nan() {
            return gain_db;
        }
        // Not f64::clamp: limits come from user config and may be inverted
        gain_db.max(self.min_gain_db).min(self.max_gain_db)
    }
}

/// Convert a dB adjustment to a linear amplitude multiplier
///
/// # Example
/// ```
/// use cardreel_core::loudness::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
/// assert!((db_to_linear(6.0) - 2.0).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(gain_db: f64) -> f32 {
    10.0_f64.powf(gain_db / 20.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = GainLimits::default();
        assert_eq!(limits.min_gain_db, -24.0);
        assert_eq!(limits.max_gain_db, 12.0);
    }

    #[test]
    fn test_clamp() {
        let limits = GainLimits::default();
        assert_eq!(limits.clamp(3.0), 3.0);
        assert_eq!(limits.clamp(20.0), 12.0);
        assert_eq!(limits.clamp(-30.0), -24.0);
        assert!(limits.clamp(f64::NAN).is_nan());
    }

    #[test]
    fn test_linear_conversion() {
        assert!((db_to_linear(-6.0) - 0.501).abs() < 0.01);
        assert!((db_to_linear(20.0) - 10.0).abs() < 1e-4);
    }
}

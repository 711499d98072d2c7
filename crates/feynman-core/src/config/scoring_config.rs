use serde::{Deserialize, Serialize};

use super::defaults;

/// Score-delta clamping and attitude defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub score_delta_min: i32,
    pub score_delta_max: i32,
    pub initial_attitude: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            score_delta_min: defaults::DEFAULT_SCORE_DELTA_MIN,
            score_delta_max: defaults::DEFAULT_SCORE_DELTA_MAX,
            initial_attitude: defaults::DEFAULT_INITIAL_ATTITUDE,
        }
    }
}

impl ScoringConfig {
    /// The clamp range as `(low, high)`, whichever order the bounds were
    /// configured in.
    pub fn delta_bounds(&self) -> (i32, i32) {
        let (a, b) = (self.score_delta_min, self.score_delta_max);
        (a.min(b), a.max(b))
    }

    /// Clamp a single metric delta to the configured range.
    pub fn clamp_delta(&self, delta: i32) -> i32 {
        let (low, high) = self.delta_bounds();
        delta.clamp(low, high)
    }
}

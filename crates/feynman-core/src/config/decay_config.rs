use serde::{Deserialize, Serialize};

use super::defaults;

/// Decay scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Health removed per tick.
    pub step: u8,
    /// Seconds of elapsed time that count as one tick.
    pub tick_interval_secs: u64,
    /// Health at or below which a node is shown as wilting.
    pub wilting_threshold: u8,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            step: defaults::DEFAULT_DECAY_STEP,
            tick_interval_secs: defaults::DEFAULT_TICK_INTERVAL_SECS,
            wilting_threshold: defaults::DEFAULT_WILTING_THRESHOLD,
        }
    }
}

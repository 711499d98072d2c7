use serde::{Deserialize, Serialize};

use super::defaults;

/// Bounded retry settings, one knob per error class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Extra attempts after a transient failure.
    pub transient_max_retries: u32,
    /// Delay before each transient retry (ms).
    pub transient_backoff_ms: u64,
    /// Full re-asks after the structured output could not be repaired.
    pub parse_max_reasks: u32,
    /// Delay before each re-ask (ms).
    pub parse_backoff_ms: u64,
    /// Re-resolution passes allowed when a cached model disappears.
    pub re_resolve_max: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            transient_max_retries: defaults::DEFAULT_TRANSIENT_MAX_RETRIES,
            transient_backoff_ms: defaults::DEFAULT_TRANSIENT_BACKOFF_MS,
            parse_max_reasks: defaults::DEFAULT_PARSE_MAX_REASKS,
            parse_backoff_ms: defaults::DEFAULT_PARSE_BACKOFF_MS,
            re_resolve_max: defaults::DEFAULT_RE_RESOLVE_MAX,
        }
    }
}

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::ModelCandidate;

/// Inference service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Root URL of the content-generation API.
    pub base_url: String,
    /// Model candidates, tried in ascending priority order.
    pub candidates: Vec<ModelCandidate>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Environment variable consulted when no API key is passed explicitly.
    pub api_key_env: String,
    /// Text sent by the resolver's minimal probe call.
    pub probe_prompt: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            candidates: defaults::DEFAULT_CANDIDATES
                .iter()
                .enumerate()
                .map(|(i, id)| ModelCandidate::new(*id, i as i32))
                .collect(),
            timeout_secs: defaults::DEFAULT_TIMEOUT_SECS,
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            probe_prompt: defaults::DEFAULT_PROBE_PROMPT.to_string(),
        }
    }
}

pub mod decay_config;
pub mod defaults;
pub mod gate_config;
pub mod inference_config;
pub mod observability_config;
pub mod retry_config;
pub mod scoring_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use decay_config::DecayConfig;
pub use gate_config::GateConfig;
pub use inference_config::InferenceConfig;
pub use observability_config::ObservabilityConfig;
pub use retry_config::RetryConfig;
pub use scoring_config::ScoringConfig;
pub use storage_config::StorageConfig;

use crate::errors::{FeynmanError, FeynmanResult, ValidationError};

/// Top-level engine configuration. Every section falls back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeynmanConfig {
    pub inference: InferenceConfig,
    pub retry: RetryConfig,
    pub gates: GateConfig,
    pub scoring: ScoringConfig,
    pub decay: DecayConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl FeynmanConfig {
    /// Parse from a TOML string and validate.
    pub fn from_toml(toml_str: &str) -> FeynmanResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| FeynmanError::ConfigError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> FeynmanResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| FeynmanError::ConfigError {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_toml(&text)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> FeynmanResult<()> {
        if self.inference.candidates.is_empty() {
            return Err(invalid("inference.candidates must not be empty"));
        }
        if self.scoring.score_delta_min > self.scoring.score_delta_max {
            return Err(invalid("scoring.score_delta_min exceeds score_delta_max"));
        }
        if self.decay.tick_interval_secs == 0 {
            return Err(invalid("decay.tick_interval_secs must be positive"));
        }
        Ok(())
    }

    /// Resolve the API key: an explicit operator value wins, otherwise the
    /// configured environment variable.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> FeynmanResult<String> {
        let from_env = || std::env::var(&self.inference.api_key_env).ok();
        explicit
            .map(str::to_string)
            .or_else(from_env)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ValidationError::MissingApiKey {
                    env_var: self.inference.api_key_env.clone(),
                }
                .into()
            })
    }
}

fn invalid(reason: &str) -> FeynmanError {
    ValidationError::InvalidConfig {
        reason: reason.to_string(),
    }
    .into()
}

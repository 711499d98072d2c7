//! Blocking HTTP transport with timeout, gzip, and error classification.
//!
//! Retries are not done here; the resolver owns the retry policy so that
//! probe and content calls share the same bounds.

use std::time::Duration;

use feynman_core::config::InferenceConfig;
use feynman_core::errors::{InferenceError, InferenceResult};
use feynman_core::models::PromptRequest;
use feynman_core::traits::IInferenceTransport;

use super::protocol::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key. Keeps the key out of URLs and logs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Configuration for the HTTP transport layer.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Base URL of the API, without trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self::from(&InferenceConfig::default())
    }
}

impl From<&InferenceConfig> for HttpTransportConfig {
    fn from(config: &InferenceConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// HTTP transport over `reqwest::blocking`.
#[derive(Debug)]
pub struct HttpTransport {
    config: HttpTransportConfig,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> InferenceResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(|e| InferenceError::Transient {
                reason: format!("cannot build HTTP client: {e}"),
            })?;
        Ok(Self { config, client })
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, model)
    }
}

impl IInferenceTransport for HttpTransport {
    fn generate(
        &self,
        model: &str,
        api_key: &str,
        request: &PromptRequest,
    ) -> InferenceResult<String> {
        let url = self.endpoint(model);
        let body = GenerateContentRequest::from_prompt(request);
        tracing::debug!(model = %model, expect_json = request.expect_json, "inference: POST generateContent");

        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .map_err(|e| InferenceError::Transient {
                reason: describe_send_error(&e),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().unwrap_or_default();
            return Err(classify_status(status.as_u16(), model, &body_text));
        }

        let parsed: GenerateContentResponse = resp.json().map_err(|e| InferenceError::Parse {
            reason: format!("response body is not a generateContent reply: {e}"),
        })?;
        parsed.text().ok_or_else(|| InferenceError::Parse {
            reason: "response carried no text".to_string(),
        })
    }
}

fn describe_send_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        e.to_string()
    }
}

/// Map a non-success status (and its body) onto the error taxonomy.
pub fn classify_status(status: u16, model: &str, body: &str) -> InferenceError {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let message = if envelope.error.message.is_empty() {
        body.trim().to_string()
    } else {
        envelope.error.message
    };
    let lowered = message.to_ascii_lowercase();
    let reason = format!("HTTP {status}: {message}");

    match status {
        401 | 403 => InferenceError::Auth { reason },
        // The service reports a bad key as a 400 INVALID_ARGUMENT.
        400 if lowered.contains("api key") => InferenceError::Auth { reason },
        404 => InferenceError::NotFound {
            model: model.to_string(),
            reason,
        },
        400 if lowered.contains("not found")
            || lowered.contains("not supported")
            || lowered.contains("unsupported") =>
        {
            InferenceError::NotFound {
                model: model.to_string(),
                reason,
            }
        }
        408 | 429 | 500..=599 => InferenceError::Transient { reason },
        _ => InferenceError::Rejected { status, reason },
    }
}

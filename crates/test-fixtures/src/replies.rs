//! Canned transport results.

use feynman_core::errors::{InferenceError, InferenceResult};

pub fn ok(text: impl Into<String>) -> InferenceResult<String> {
    Ok(text.into())
}

/// A well-formed verdict reply.
pub fn verdict(decision: &str, response: &str) -> InferenceResult<String> {
    Ok(serde_json::json!({ "decision": decision, "response": response }).to_string())
}

/// A verdict reply carrying keywords.
pub fn verdict_with_keywords(
    decision: &str,
    response: &str,
    known: &[&str],
    unknown: &[&str],
) -> InferenceResult<String> {
    Ok(serde_json::json!({
        "decision": decision,
        "response": response,
        "known_keywords": known,
        "unknown_keywords": unknown,
    })
    .to_string())
}

pub fn not_found(model: &str) -> InferenceResult<String> {
    Err(InferenceError::NotFound {
        model: model.to_string(),
        reason: "HTTP 404: model not found".to_string(),
    })
}

pub fn auth() -> InferenceResult<String> {
    Err(InferenceError::Auth {
        reason: "HTTP 401: API key not valid".to_string(),
    })
}

pub fn transient() -> InferenceResult<String> {
    Err(InferenceError::Transient {
        reason: "HTTP 503: overloaded".to_string(),
    })
}

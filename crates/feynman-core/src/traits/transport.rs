use crate::errors::InferenceResult;
use crate::models::PromptRequest;

/// One content-generation call against a named model.
///
/// Implementations classify every failure into an `InferenceError` variant;
/// callers never inspect transport-specific errors.
pub trait IInferenceTransport: Send + Sync {
    fn generate(&self, model: &str, api_key: &str, request: &PromptRequest)
        -> InferenceResult<String>;
}

mod feynman_error;
mod inference_error;
mod storage_error;
mod validation_error;

pub use feynman_error::{FeynmanError, FeynmanResult};
pub use inference_error::{CandidateFailure, InferenceError, InferenceResult};
pub use storage_error::StorageError;
pub use validation_error::ValidationError;

/// Closed classification of failures. Retry and fallback logic branches on
/// this, never on error message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Input rejected locally before any external call.
    Validation,
    /// Credentials rejected. Terminal: no retry, no candidate fallback.
    Auth,
    /// Model candidate unavailable or unsupported.
    NotFound,
    /// Server busy or network blip.
    Transient,
    /// Structured output could not be parsed.
    Parse,
    /// Request refused for a reason retrying cannot fix.
    Rejected,
    /// Every model candidate failed during resolution.
    Exhausted,
}

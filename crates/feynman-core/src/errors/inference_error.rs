use super::ErrorClass;

/// The last failure observed for one model candidate during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    pub model: String,
    pub reason: String,
}

/// Errors raised while talking to the external inference service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InferenceError {
    #[error("authentication failed: {reason}")]
    Auth { reason: String },

    #[error("model {model} unavailable: {reason}")]
    NotFound { model: String, reason: String },

    #[error("transient failure: {reason}")]
    Transient { reason: String },

    #[error("request rejected with status {status}: {reason}")]
    Rejected { status: u16, reason: String },

    #[error("all {} model candidates failed: {}", .failures.len(), summarize(.failures))]
    Exhausted { failures: Vec<CandidateFailure> },

    #[error("malformed structured output: {reason}")]
    Parse { reason: String },
}

impl InferenceError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Auth { .. } => ErrorClass::Auth,
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::Transient { .. } => ErrorClass::Transient,
            Self::Rejected { .. } => ErrorClass::Rejected,
            Self::Exhausted { .. } => ErrorClass::Exhausted,
            Self::Parse { .. } => ErrorClass::Parse,
        }
    }

    pub fn is_auth(&self) -> bool {
        self.class() == ErrorClass::Auth
    }
}

fn summarize(failures: &[CandidateFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.model, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for transport and resolver calls.
pub type InferenceResult<T> = Result<T, InferenceError>;

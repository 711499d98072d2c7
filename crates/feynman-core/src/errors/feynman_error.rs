use super::{ErrorClass, InferenceError, StorageError, ValidationError};

/// Top-level error type for the Feynman engine.
#[derive(Debug, thiserror::Error)]
pub enum FeynmanError {
    #[error("inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl FeynmanError {
    /// Classify this error for propagation decisions.
    pub fn class(&self) -> Option<ErrorClass> {
        match self {
            Self::Inference(e) => Some(e.class()),
            Self::Validation(_) => Some(ErrorClass::Validation),
            _ => None,
        }
    }

    /// Whether this error must be shown to the user as-is.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self.class(),
            Some(ErrorClass::Validation) | Some(ErrorClass::Auth)
        )
    }
}

/// Convenience alias used throughout the workspace.
pub type FeynmanResult<T> = Result<T, FeynmanError>;

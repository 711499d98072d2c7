/// Input rejected locally. No external call is made for any of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("answer for gate {gate} needs at least {min} characters, got {actual}")]
    InputTooShort {
        gate: String,
        min: usize,
        actual: usize,
    },

    #[error("session already cleared every gate; reset to start again")]
    SessionTerminal,

    #[error("keyword {keyword:?} is not an unexplored part of the territory")]
    UnknownKeyword { keyword: String },

    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("no API key supplied and {env_var} is not set")]
    MissingApiKey { env_var: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("restored session state is inconsistent: {reason}")]
    InvalidState { reason: String },
}

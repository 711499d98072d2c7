use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the prioritized model list. Lower priority is tried first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCandidate {
    pub identifier: String,
    pub priority: i32,
}

impl ModelCandidate {
    pub fn new(identifier: impl Into<String>, priority: i32) -> Self {
        Self {
            identifier: identifier.into(),
            priority,
        }
    }
}

/// A model that answered a probe and is cached for reuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelHandle {
    pub model: String,
    pub resolved_at: DateTime<Utc>,
}

impl ModelHandle {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            resolved_at: Utc::now(),
        }
    }
}

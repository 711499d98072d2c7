use serde::{Deserialize, Serialize};

/// One request to the inference service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// Gate criteria, persona, and running keyword context.
    pub instruction: String,
    pub user_input: String,
    /// Ask the service for a JSON body rather than free text.
    pub expect_json: bool,
}

impl PromptRequest {
    pub fn json(instruction: impl Into<String>, user_input: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            user_input: user_input.into(),
            expect_json: true,
        }
    }

    pub fn text(instruction: impl Into<String>, user_input: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            user_input: user_input.into(),
            expect_json: false,
        }
    }
}

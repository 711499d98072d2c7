use serde::{Deserialize, Serialize};

/// Voice the engine takes when judging answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Patient and encouraging.
    #[default]
    Tutor,
    /// Ruthless examiner hunting for holes.
    Adversary,
    /// Neutral, structure-first reviewer.
    Analyst,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Tutor, Persona::Adversary, Persona::Analyst];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tutor => "tutor",
            Self::Adversary => "adversary",
            Self::Analyst => "analyst",
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::constants::TERMINAL_ORDINAL;

/// One of the four fixed understanding gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    Definition,
    Mechanism,
    Falsification,
    Insight,
}

impl GateKind {
    pub const ALL: [GateKind; 4] = [
        GateKind::Definition,
        GateKind::Mechanism,
        GateKind::Falsification,
        GateKind::Insight,
    ];

    /// 1-based ordinal.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Definition => 1,
            Self::Mechanism => 2,
            Self::Falsification => 3,
            Self::Insight => 4,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get((ordinal as usize).checked_sub(1)?).copied()
    }

    /// The gate after this one, `None` after the last.
    pub fn next(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    pub fn definition(self) -> &'static GateDefinition {
        &GATE_DEFINITIONS[self.ordinal() as usize - 1]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }
}

/// Static description of a gate. Never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDefinition {
    pub kind: GateKind,
    pub name: &'static str,
    pub pass_criteria: &'static str,
}

pub static GATE_DEFINITIONS: [GateDefinition; 4] = [
    GateDefinition {
        kind: GateKind::Definition,
        name: "Definition",
        pass_criteria: "The learner states what the concept is in plain words, \
                        without jargon they cannot themselves unpack.",
    },
    GateDefinition {
        kind: GateKind::Mechanism,
        name: "Mechanism",
        pass_criteria: "The learner explains how or why the concept works: the causal \
                        chain, not just the outcome.",
    },
    GateDefinition {
        kind: GateKind::Falsification,
        name: "Falsification",
        pass_criteria: "The learner gives an explicit counter-example or a condition \
                        under which the concept fails or does not apply.",
    },
    GateDefinition {
        kind: GateKind::Insight,
        name: "Insight",
        pass_criteria: "The learner connects the concept to something outside the topic \
                        or draws a non-obvious implication of their own.",
    },
];

/// Gate state of a session.
///
/// `NotStarted` (0) → `Active(n)` (1..=4) → `Terminal`. The only way back is
/// an explicit session reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "gate")]
pub enum GateState {
    #[default]
    NotStarted,
    Active(GateKind),
    Terminal,
}

impl GateState {
    /// 0 for not started, 1..=4 for an active gate, `TERMINAL_ORDINAL` when cleared.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::Active(kind) => kind.ordinal(),
            Self::Terminal => TERMINAL_ORDINAL,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Terminal
    }

    /// State after a PASS.
    pub fn advance(self) -> Self {
        match self {
            Self::NotStarted => Self::Active(GateKind::Definition),
            Self::Active(kind) => kind.next().map_or(Self::Terminal, Self::Active),
            Self::Terminal => Self::Terminal,
        }
    }

    /// Gate whose criteria judge the next answer. A session that has not
    /// started is judged against the first gate.
    pub fn evaluated_gate(self) -> Option<GateKind> {
        match self {
            Self::NotStarted => Some(GateKind::Definition),
            Self::Active(kind) => Some(kind),
            Self::Terminal => None,
        }
    }
}

/// Whether a session walks the fixed gates or keeps expanding its territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    #[default]
    Gated,
    Territory,
}

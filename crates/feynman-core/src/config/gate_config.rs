use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::GateKind;

/// Local acceptance thresholds for user answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub definition_min_chars: usize,
    pub mechanism_min_chars: usize,
    pub falsification_min_chars: usize,
    pub insight_min_chars: usize,
    /// Minimum for territory-mode turns, which have no fixed gate.
    pub territory_min_chars: usize,
    /// Attitude points deducted per hint.
    pub hint_penalty: u8,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            definition_min_chars: defaults::DEFAULT_DEFINITION_MIN_CHARS,
            mechanism_min_chars: defaults::DEFAULT_MECHANISM_MIN_CHARS,
            falsification_min_chars: defaults::DEFAULT_FALSIFICATION_MIN_CHARS,
            insight_min_chars: defaults::DEFAULT_INSIGHT_MIN_CHARS,
            territory_min_chars: defaults::DEFAULT_TERRITORY_MIN_CHARS,
            hint_penalty: defaults::DEFAULT_HINT_PENALTY,
        }
    }
}

impl GateConfig {
    /// Minimum trimmed length for an answer at `gate`.
    pub fn min_chars(&self, gate: GateKind) -> usize {
        match gate {
            GateKind::Definition => self.definition_min_chars,
            GateKind::Mechanism => self.mechanism_min_chars,
            GateKind::Falsification => self.falsification_min_chars,
            GateKind::Insight => self.insight_min_chars,
        }
    }
}

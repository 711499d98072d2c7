use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GateState, HealthBand};

/// Read-only copy of a territory graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TerritorySnapshot {
    pub known: Vec<String>,
    pub unknown: Vec<String>,
    pub conquered: bool,
}

/// What the presentation layer receives after every turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub gate: GateState,
    pub territory: TerritorySnapshot,
    pub feedback: String,
    pub attitude_score: u8,
}

impl TurnSnapshot {
    pub fn gate_ordinal(&self) -> u8 {
        self.gate.ordinal()
    }
}

/// What the presentation layer receives after a decay tick or watering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeHealth {
    pub id: String,
    pub health: u8,
    pub last_touched: DateTime<Utc>,
    pub band: HealthBand,
}

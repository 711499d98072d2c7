//! Session: everything one learner's dialogue about one topic owns.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use feynman_core::constants::MAX_SCORE;
use feynman_core::errors::ValidationError;
use feynman_core::models::{
    GateKind, GateState, Persona, Role, SessionMode, Turn, TurnSnapshot,
};

use crate::territory::TerritoryGraph;

/// Per-session state. Passed explicitly into every engine call; nothing
/// here is shared between sessions.
///
/// Gate, scores, and territory are only changed by `GateController`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct Session {
    id: String,
    topic: String,
    persona: Persona,
    mode: SessionMode,
    gate: GateState,
    history: Vec<Turn>,
    attitude_score: u8,
    initial_attitude: u8,
    metrics: BTreeMap<String, u8>,
    territory: TerritoryGraph,
    /// Latest accepted answer per gate.
    accepted: BTreeMap<GateKind, String>,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

/// Serialized form of `Session`, checked before it becomes one.
#[derive(Deserialize)]
struct SessionRecord {
    id: String,
    topic: String,
    persona: Persona,
    mode: SessionMode,
    gate: GateState,
    history: Vec<Turn>,
    attitude_score: u8,
    initial_attitude: u8,
    metrics: BTreeMap<String, u8>,
    territory: TerritoryGraph,
    accepted: BTreeMap<GateKind, String>,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl TryFrom<SessionRecord> for Session {
    type Error = ValidationError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let topic = validate_topic(record.topic)?;
        let over_max = |what: &str, value: u8| {
            (value > MAX_SCORE).then(|| ValidationError::InvalidState {
                reason: format!("{what} {value} exceeds {MAX_SCORE}"),
            })
        };
        if let Some(err) = over_max("attitude_score", record.attitude_score)
            .or_else(|| over_max("initial_attitude", record.initial_attitude))
            .or_else(|| {
                record
                    .metrics
                    .iter()
                    .find_map(|(name, value)| over_max(name.as_str(), *value))
            })
        {
            return Err(err);
        }

        Ok(Self {
            id: record.id,
            topic,
            persona: record.persona,
            mode: record.mode,
            gate: record.gate,
            history: record.history,
            attitude_score: record.attitude_score,
            initial_attitude: record.initial_attitude,
            metrics: record.metrics,
            territory: record.territory,
            accepted: record.accepted,
            created_at: record.created_at,
            last_activity: record.last_activity,
        })
    }
}

impl Session {
    pub fn new(
        topic: impl Into<String>,
        persona: Persona,
        mode: SessionMode,
    ) -> Result<Self, ValidationError> {
        let topic = validate_topic(topic.into())?;
        let now = Utc::now();
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            topic,
            persona,
            mode,
            gate: GateState::NotStarted,
            history: Vec::new(),
            attitude_score: MAX_SCORE,
            initial_attitude: MAX_SCORE,
            metrics: BTreeMap::new(),
            territory: TerritoryGraph::new(),
            accepted: BTreeMap::new(),
            created_at: now,
            last_activity: now,
        })
    }

    /// Start (and restart) with `attitude` instead of the maximum.
    pub fn with_initial_attitude(mut self, attitude: u8) -> Self {
        self.initial_attitude = attitude.min(MAX_SCORE);
        self.attitude_score = self.initial_attitude;
        self
    }

    /// Seed concepts to explore, typically for territory mode.
    pub fn with_territory(mut self, territory: TerritoryGraph) -> Self {
        self.territory = territory;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn gate(&self) -> GateState {
        self.gate
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn attitude_score(&self) -> u8 {
        self.attitude_score
    }

    pub fn metrics(&self) -> &BTreeMap<String, u8> {
        &self.metrics
    }

    pub fn territory(&self) -> &TerritoryGraph {
        &self.territory
    }

    pub fn accepted_answer(&self, gate: GateKind) -> Option<&str> {
        self.accepted.get(&gate).map(String::as_str)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// Latest engine feedback, empty before the first turn.
    pub fn last_feedback(&self) -> &str {
        self.history
            .iter()
            .rev()
            .find(|t| t.role == Role::Engine)
            .map_or("", |t| t.text.as_str())
    }

    /// Back to gate 0 with empty history and territory, attitude restored.
    /// Topic, persona, and mode are kept.
    pub fn reset(&mut self) {
        self.gate = GateState::NotStarted;
        self.history.clear();
        self.attitude_score = self.initial_attitude;
        self.metrics.clear();
        self.territory.clear();
        self.accepted.clear();
        self.last_activity = Utc::now();
    }

    pub fn change_topic(&mut self, topic: impl Into<String>) -> Result<(), ValidationError> {
        self.topic = validate_topic(topic.into())?;
        self.reset();
        Ok(())
    }

    pub fn set_persona(&mut self, persona: Persona) {
        self.persona = persona;
    }

    pub fn snapshot(&self) -> TurnSnapshot {
        TurnSnapshot {
            gate: self.gate,
            territory: self.territory.snapshot(),
            feedback: self.last_feedback().to_string(),
            attitude_score: self.attitude_score,
        }
    }

    pub(crate) fn push_turn(&mut self, turn: Turn) {
        self.last_activity = turn.timestamp;
        self.history.push(turn);
    }

    pub(crate) fn set_gate(&mut self, gate: GateState) {
        self.gate = gate;
    }

    pub(crate) fn territory_mut(&mut self) -> &mut TerritoryGraph {
        &mut self.territory
    }

    pub(crate) fn record_accepted(&mut self, gate: GateKind, answer: &str) {
        self.accepted.insert(gate, answer.to_string());
    }

    /// Apply a signed delta to the attitude score, clamped to 0..=100.
    pub(crate) fn adjust_attitude(&mut self, delta: i32) {
        self.attitude_score = apply_delta(self.attitude_score, delta);
    }

    /// Apply a signed delta to a named metric (starting at 0), clamped to 0..=100.
    pub(crate) fn adjust_metric(&mut self, metric: &str, delta: i32) {
        let entry = self.metrics.entry(metric.to_string()).or_insert(0);
        *entry = apply_delta(*entry, delta);
    }
}

fn validate_topic(topic: String) -> Result<String, ValidationError> {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTopic);
    }
    Ok(trimmed.to_string())
}

fn apply_delta(current: u8, delta: i32) -> u8 {
    (i32::from(current) + delta).clamp(0, i32::from(MAX_SCORE)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new("entropy", Persona::Tutor, SessionMode::Gated).unwrap()
    }

    #[test]
    fn new_session_starts_at_gate_zero() {
        let s = session();
        assert_eq!(s.gate().ordinal(), 0);
        assert_eq!(s.attitude_score(), 100);
        assert!(s.history().is_empty());
        assert_eq!(s.last_feedback(), "");
    }

    #[test]
    fn blank_topic_is_rejected() {
        let err = Session::new("  ", Persona::Tutor, SessionMode::Gated).unwrap_err();
        assert_eq!(err, ValidationError::EmptyTopic);
    }

    #[test]
    fn deltas_clamp_to_score_range() {
        let mut s = session();
        s.adjust_attitude(50);
        assert_eq!(s.attitude_score(), 100);
        s.adjust_attitude(-250);
        assert_eq!(s.attitude_score(), 0);
        s.adjust_metric("clarity", -5);
        assert_eq!(s.metrics()["clarity"], 0);
        s.adjust_metric("clarity", 15);
        assert_eq!(s.metrics()["clarity"], 15);
    }

    #[test]
    fn reset_restores_initial_attitude_and_keeps_topic() {
        let mut s = session().with_initial_attitude(80);
        s.adjust_attitude(-30);
        s.set_gate(GateState::Terminal);
        s.push_turn(Turn::user("hello"));
        s.reset();
        assert_eq!(s.attitude_score(), 80);
        assert_eq!(s.gate(), GateState::NotStarted);
        assert!(s.history().is_empty());
        assert_eq!(s.topic(), "entropy");
    }

    #[test]
    fn change_topic_resets_state() {
        let mut s = session();
        s.territory_mut().merge(["heat"], ["work"]);
        s.record_accepted(GateKind::Definition, "an answer");
        s.change_topic("  gravity ").unwrap();
        assert_eq!(s.topic(), "gravity");
        assert!(s.territory().known().is_empty());
        assert!(s.accepted_answer(GateKind::Definition).is_none());
    }

    #[test]
    fn restored_session_round_trips() {
        let mut s = session();
        s.adjust_attitude(-30);
        let json = serde_json::to_string(&s).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id(), s.id());
        assert_eq!(restored.attitude_score(), 70);
    }

    #[test]
    fn restored_session_rejects_out_of_range_scores() {
        let mut value = serde_json::to_value(session()).unwrap();
        value["attitude_score"] = serde_json::json!(150);
        let err = serde_json::from_value::<Session>(value).unwrap_err();
        assert!(err.to_string().contains("attitude_score"));

        let mut value = serde_json::to_value(session()).unwrap();
        value["metrics"] = serde_json::json!({ "clarity": 101 });
        assert!(serde_json::from_value::<Session>(value).is_err());

        let mut value = serde_json::to_value(session()).unwrap();
        value["topic"] = serde_json::json!("   ");
        assert!(serde_json::from_value::<Session>(value).is_err());
    }
}

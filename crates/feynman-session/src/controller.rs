//! GateController: the dialogue state machine.
//!
//! Owns every mutation of a session's gate, scores, and territory. Inference
//! failures never escape as errors except auth: everything else arrives here
//! as a (possibly degraded) FAIL verdict, so the session is always left in a
//! defined state.

use feynman_core::config::{GateConfig, ScoringConfig};
use feynman_core::constants::{ATTITUDE_METRIC, VERIFICATION_UNAVAILABLE};
use feynman_core::errors::{FeynmanResult, InferenceError, ValidationError};
use feynman_core::models::{
    Decision, GateKind, GateState, PromptRequest, SessionMode, Turn, Verdict,
};
use feynman_inference::VerdictSource;
use feynman_observability::events;

use crate::prompt;
use crate::session::Session;

#[derive(Debug, Clone, Default)]
pub struct GateController {
    gates: GateConfig,
    scoring: ScoringConfig,
}

impl GateController {
    pub fn new(gates: GateConfig, scoring: ScoringConfig) -> Self {
        Self { gates, scoring }
    }

    pub fn gates(&self) -> &GateConfig {
        &self.gates
    }

    /// Check `text` against the minimum for the session's current gate and
    /// return it trimmed. No external call is made.
    pub fn validate<'a>(
        &self,
        session: &Session,
        text: &'a str,
    ) -> Result<&'a str, ValidationError> {
        let gate = session
            .gate()
            .evaluated_gate()
            .ok_or(ValidationError::SessionTerminal)?;
        let (label, min) = match session.mode() {
            SessionMode::Gated => (gate.name(), self.gates.min_chars(gate)),
            SessionMode::Territory => ("Territory", self.gates.territory_min_chars),
        };

        let trimmed = text.trim();
        let actual = trimmed.chars().count();
        if actual < min || actual == 0 {
            return Err(ValidationError::InputTooShort {
                gate: label.to_string(),
                min,
                actual,
            });
        }
        Ok(trimmed)
    }

    /// Request judging `answer` at the session's current gate.
    pub fn compose(&self, session: &Session, answer: &str) -> Option<PromptRequest> {
        let gate = session.gate().evaluated_gate()?;
        Some(match session.mode() {
            SessionMode::Gated => prompt::gate_request(session, gate, answer),
            SessionMode::Territory => prompt::territory_request(session, answer),
        })
    }

    /// Validate, verify, and apply one user answer.
    ///
    /// Returns `Err` only for validation and auth failures, in which case
    /// the session is untouched.
    pub fn submit(
        &self,
        session: &mut Session,
        text: &str,
        source: &dyn VerdictSource,
    ) -> FeynmanResult<Verdict> {
        let answer = self.validate(session, text)?;
        let request = self
            .compose(session, answer)
            .ok_or(ValidationError::SessionTerminal)?;

        let verdict = settle(source.verify(&request))?;
        session.push_turn(Turn::user(answer));
        self.apply(session, &verdict, answer);
        Ok(verdict)
    }

    /// Investigate an unknown keyword. The reply only grows the territory:
    /// a PASS is treated as CONTINUE, so the gate moves only on CONQUERED
    /// or, in territory mode, once the graph is conquered.
    pub fn explore(
        &self,
        session: &mut Session,
        keyword: &str,
        source: &dyn VerdictSource,
    ) -> FeynmanResult<Verdict> {
        if session.gate().is_terminal() {
            return Err(ValidationError::SessionTerminal.into());
        }
        let request = session
            .territory()
            .explore(session.topic(), session.persona(), keyword)?;

        let mut verdict = settle(source.verify(&request))?;
        if verdict.decision == Decision::Pass {
            verdict.decision = Decision::Continue;
        }
        session.push_turn(Turn::user(request.user_input.as_str()));
        self.apply(session, &verdict, "");
        Ok(verdict)
    }

    /// Apply a verdict: territory merge, scores, gate transition, feedback.
    ///
    /// `answer` is recorded as the accepted answer for the judged gate when
    /// the verdict accepts it; pass `""` to skip recording.
    pub fn apply(&self, session: &mut Session, verdict: &Verdict, answer: &str) {
        let before = session.gate();
        let judged = before.evaluated_gate();

        session
            .territory_mut()
            .merge(&verdict.known_keywords, &verdict.unknown_keywords);

        for (metric, delta) in &verdict.score_delta {
            let delta = self.scoring.clamp_delta(*delta);
            if metric == ATTITUDE_METRIC {
                session.adjust_attitude(delta);
            } else {
                session.adjust_metric(metric, delta);
            }
        }

        let after = self.transition(session, verdict.decision);
        if let Some(gate) = judged {
            if !answer.is_empty() && accepts(session.mode(), verdict) {
                let slot = match session.mode() {
                    SessionMode::Gated => gate,
                    SessionMode::Territory => GateKind::Definition,
                };
                session.record_accepted(slot, answer);
            }
        }
        session.set_gate(after);
        session.push_turn(Turn::engine(verdict.feedback.as_str()));

        if after != before {
            events::gate_advanced(session.topic(), before.ordinal(), after.ordinal());
        }
        events::turn_processed(
            session.topic(),
            after.ordinal(),
            decision_label(verdict.decision),
            verdict.degraded,
        );
    }

    /// Next gate state. Never moves backwards; only `Session::reset` does.
    fn transition(&self, session: &Session, decision: Decision) -> GateState {
        let current = session.gate();
        if current.is_terminal() || decision == Decision::Conquered {
            return GateState::Terminal;
        }
        match session.mode() {
            SessionMode::Gated if decision == Decision::Pass => current.advance(),
            SessionMode::Gated => current,
            SessionMode::Territory if session.territory().is_conquered() => GateState::Terminal,
            SessionMode::Territory => current,
        }
    }

    /// Hint request for the current gate. The penalty is applied by
    /// `deliver_hint` once a hint actually arrives.
    pub fn hint(&self, session: &Session) -> Result<PromptRequest, ValidationError> {
        if session.gate().is_terminal() {
            return Err(ValidationError::SessionTerminal);
        }
        Ok(prompt::hint_request(session))
    }

    /// Record a delivered hint and deduct the penalty (floor 0). The gate
    /// does not change.
    pub fn deliver_hint(&self, session: &mut Session, hint: &str) {
        session.adjust_attitude(-i32::from(self.gates.hint_penalty));
        session.push_turn(Turn::engine(hint.trim()));
        events::hint_used(
            session.topic(),
            self.gates.hint_penalty,
            session.attitude_score(),
        );
    }

    /// Record that no hint could be obtained. No penalty.
    pub fn hint_unavailable(&self, session: &mut Session) {
        session.push_turn(Turn::engine(VERIFICATION_UNAVAILABLE));
    }

    pub fn reset(&self, session: &mut Session) {
        let before = session.gate().ordinal();
        session.reset();
        tracing::info!(topic = %session.topic(), from = before, "session reset");
    }
}

/// Turn a verification result into a verdict. Auth is the only failure that
/// escapes; everything else becomes the generic degraded FAIL.
fn settle(result: Result<Verdict, InferenceError>) -> FeynmanResult<Verdict> {
    match result {
        Ok(verdict) => Ok(verdict),
        Err(e) if e.is_auth() => Err(e.into()),
        Err(e) => {
            events::verdict_degraded("gate_controller", &e.to_string());
            Ok(Verdict::degraded(VERIFICATION_UNAVAILABLE))
        }
    }
}

fn accepts(mode: SessionMode, verdict: &Verdict) -> bool {
    if verdict.degraded {
        return false;
    }
    match mode {
        SessionMode::Gated => matches!(verdict.decision, Decision::Pass | Decision::Conquered),
        SessionMode::Territory => verdict.decision != Decision::Fail,
    }
}

fn decision_label(decision: Decision) -> &'static str {
    match decision {
        Decision::Pass => "PASS",
        Decision::Fail => "FAIL",
        Decision::Continue => "CONTINUE",
        Decision::Conquered => "CONQUERED",
    }
}

#[cfg(test)]
mod tests {
    use feynman_core::models::Persona;

    use super::*;

    fn gated() -> Session {
        Session::new("entropy", Persona::Tutor, SessionMode::Gated).unwrap()
    }

    #[test]
    fn validation_uses_per_gate_minimum() {
        let controller = GateController::default();
        let session = gated();
        assert!(controller.validate(&session, "too short").is_err());
        assert_eq!(
            controller.validate(&session, "  long enough answer  ").unwrap(),
            "long enough answer"
        );
    }

    #[test]
    fn terminal_session_rejects_input() {
        let controller = GateController::default();
        let mut session = gated();
        session.set_gate(GateState::Terminal);
        assert_eq!(
            controller.validate(&session, "anything at all here"),
            Err(ValidationError::SessionTerminal)
        );
        assert_eq!(controller.hint(&session), Err(ValidationError::SessionTerminal));
    }

    #[test]
    fn fail_holds_gate() {
        let controller = GateController::default();
        let mut session = gated();
        session.set_gate(GateState::Active(GateKind::Mechanism));
        controller.apply(&mut session, &Verdict::new(Decision::Fail, "no"), "x");
        assert_eq!(session.gate(), GateState::Active(GateKind::Mechanism));
        assert!(session.accepted_answer(GateKind::Mechanism).is_none());
    }

    #[test]
    fn out_of_range_delta_is_clamped_before_applying() {
        let controller = GateController::default();
        let mut session = gated();
        let verdict = Verdict::new(Decision::Fail, "").with_score("attitude", -90);
        controller.apply(&mut session, &verdict, "");
        assert_eq!(session.attitude_score(), 80);
    }

    #[test]
    fn inverted_score_range_is_reordered() {
        let scoring = ScoringConfig {
            score_delta_min: 20,
            score_delta_max: -20,
            ..ScoringConfig::default()
        };
        let controller = GateController::new(GateConfig::default(), scoring);
        let mut session = gated();
        let verdict = Verdict::new(Decision::Fail, "").with_score("attitude", -90);
        controller.apply(&mut session, &verdict, "");
        assert_eq!(session.attitude_score(), 80);
    }
}

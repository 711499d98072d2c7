//! Instruction text sent with every request.

use std::collections::BTreeSet;
use std::fmt::Write;

use feynman_core::models::{GateKind, Persona, PromptRequest};

use crate::persona;
use crate::session::Session;

/// Reply format demanded from the service for every structured request.
pub const RESPONSE_SCHEMA: &str = r#"Reply with a single JSON object and nothing else:
{
  "decision": "PASS" | "FAIL" | "CONTINUE" | "CONQUERED",
  "response": "<feedback shown to the learner>",
  "known_keywords": ["<concepts the learner demonstrably understands>"],
  "unknown_keywords": ["<concepts the learner has not yet covered>"],
  "score_delta": { "<metric>": <integer> }
}"#;

fn header(topic: &str, persona: Persona, known: &BTreeSet<String>) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}", persona::template(persona));
    let _ = writeln!(text, "Topic: {topic}");
    if known.is_empty() {
        let _ = writeln!(text, "Concepts already demonstrated: none yet.");
    } else {
        let list: Vec<&str> = known.iter().map(String::as_str).collect();
        let _ = writeln!(text, "Concepts already demonstrated: {}.", list.join(", "));
    }
    text
}

/// Judge `answer` against the criteria of `gate`.
pub fn gate_request(session: &Session, gate: GateKind, answer: &str) -> PromptRequest {
    let definition = gate.definition();
    let mut instruction = header(
        session.topic(),
        session.persona(),
        session.territory().known(),
    );
    let _ = writeln!(
        instruction,
        "Gate {} of 4: {}. Pass criteria: {}",
        gate.ordinal(),
        definition.name,
        definition.pass_criteria
    );
    let _ = writeln!(
        instruction,
        "Answer PASS only if the criteria are met, FAIL otherwise. Use CONQUERED \
         only if the learner has fully mastered the topic."
    );
    instruction.push_str(RESPONSE_SCHEMA);
    PromptRequest::json(instruction, answer)
}

/// Territory-mode turn: grow the map of known and unknown concepts.
pub fn territory_request(session: &Session, answer: &str) -> PromptRequest {
    let mut instruction = header(
        session.topic(),
        session.persona(),
        session.territory().known(),
    );
    let unknown = session.territory().unknown();
    if !unknown.is_empty() {
        let list: Vec<&str> = unknown.iter().map(String::as_str).collect();
        let _ = writeln!(instruction, "Concepts still unexplored: {}.", list.join(", "));
    }
    let _ = writeln!(
        instruction,
        "Map what the learner's explanation shows they know and what it reveals \
         they are missing. Answer CONTINUE while gaps remain and CONQUERED once \
         nothing important is left."
    );
    instruction.push_str(RESPONSE_SCHEMA);
    PromptRequest::json(instruction, answer)
}

/// Free-text nudge toward the current gate without giving the answer away.
pub fn hint_request(session: &Session) -> PromptRequest {
    let mut instruction = header(
        session.topic(),
        session.persona(),
        session.territory().known(),
    );
    match session.gate().evaluated_gate() {
        Some(gate) if session.mode() == feynman_core::models::SessionMode::Gated => {
            let _ = writeln!(
                instruction,
                "The learner is stuck at the {} gate ({}).",
                gate.name(),
                gate.definition().pass_criteria
            );
        }
        _ => {
            let _ = writeln!(instruction, "The learner is stuck mapping the topic.");
        }
    }
    let _ = writeln!(
        instruction,
        "Give one short hint in plain text. Do not state the answer."
    );
    PromptRequest::text(instruction, session.topic())
}

/// Follow-up question about one unexplored concept.
pub fn explore_request(
    topic: &str,
    persona: Persona,
    keyword: &str,
    known: &BTreeSet<String>,
) -> PromptRequest {
    let mut instruction = header(topic, persona, known);
    let _ = writeln!(
        instruction,
        "The learner chose to investigate \"{keyword}\". Explain how it fits the \
         topic, then list which concepts are now known and which new gaps it opens. \
         Answer CONTINUE unless the topic is fully mastered."
    );
    instruction.push_str(RESPONSE_SCHEMA);
    PromptRequest::json(instruction, keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lists_known_concepts() {
        let known: BTreeSet<String> = ["heat".to_string(), "work".to_string()].into();
        let text = header("thermodynamics", Persona::Analyst, &known);
        assert!(text.contains("Topic: thermodynamics"));
        assert!(text.contains("heat, work"));
    }

    #[test]
    fn explore_request_expects_json() {
        let request = explore_request("t", Persona::Tutor, "entropy", &BTreeSet::new());
        assert!(request.expect_json);
        assert_eq!(request.user_input, "entropy");
        assert!(request.instruction.contains("\"entropy\""));
    }
}

//! Persona → prompt template lookup.

use feynman_core::models::Persona;

/// Voice instructions, indexed by `Persona as usize`.
static PERSONA_TEMPLATES: [&str; 3] = [
    // Tutor
    "You are a patient tutor. Point out gaps kindly and always suggest \
     what the learner could look at next.",
    // Adversary
    "You are a ruthless examiner. Assume the learner is bluffing, hunt for \
     vague wording and hidden jargon, and never accept hand-waving.",
    // Analyst
    "You are a neutral analyst. Judge the structure of the explanation: \
     premises, causal links, and conclusions, without encouragement or scorn.",
];

pub fn template(persona: Persona) -> &'static str {
    PERSONA_TEMPLATES[persona as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_persona_has_a_distinct_template() {
        let templates: std::collections::BTreeSet<_> =
            Persona::ALL.iter().map(|p| template(*p)).collect();
        assert_eq!(templates.len(), Persona::ALL.len());
    }
}

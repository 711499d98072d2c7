use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// What the inference service decided about one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Pass,
    Fail,
    Continue,
    Conquered,
}

impl Decision {
    /// Case-insensitive parse of the wire value.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PASS" => Some(Self::Pass),
            "FAIL" => Some(Self::Fail),
            "CONTINUE" => Some(Self::Continue),
            "CONQUERED" => Some(Self::Conquered),
            _ => None,
        }
    }
}

/// Normalized result of one inference call. Every optional wire field has
/// already been defaulted, so consumers never test for presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub decision: Decision,
    pub feedback: String,
    pub known_keywords: BTreeSet<String>,
    pub unknown_keywords: BTreeSet<String>,
    pub score_delta: BTreeMap<String, i32>,
    /// Produced by a fallback path rather than a parsed reply.
    #[serde(default)]
    pub degraded: bool,
}

impl Verdict {
    pub fn new(decision: Decision, feedback: impl Into<String>) -> Self {
        Self {
            decision,
            feedback: feedback.into(),
            known_keywords: BTreeSet::new(),
            unknown_keywords: BTreeSet::new(),
            score_delta: BTreeMap::new(),
            degraded: false,
        }
    }

    /// A FAIL verdict standing in for a call that could not be completed.
    pub fn degraded(feedback: impl Into<String>) -> Self {
        Self {
            degraded: true,
            ..Self::new(Decision::Fail, feedback)
        }
    }

    pub fn with_known<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn with_unknown<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unknown_keywords
            .extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn with_score(mut self, metric: impl Into<String>, delta: i32) -> Self {
        self.score_delta.insert(metric.into(), delta);
        self
    }
}

//! ResponseParser: turns an unstructured reply into a `Verdict`.
//!
//! 1. strict JSON parse of the whole reply
//! 2. parse of the slice between the first `{` and the last `}`
//! 3. schema step: defaults for every optional field, keyword cleanup,
//!    score deltas clamped to the configured range
//!
//! The re-ask and the final FAIL fallback live in `Verifier`, which owns the
//! ability to call the service again.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use feynman_core::config::ScoringConfig;
use feynman_core::constants::VERIFICATION_UNAVAILABLE;
use feynman_core::errors::{InferenceError, InferenceResult};
use feynman_core::models::{Decision, Verdict};

/// Wire shape of a verdict. Everything except `decision` is optional.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    decision: String,
    #[serde(default, alias = "feedback", alias = "feedbackText")]
    response: Option<String>,
    #[serde(default, alias = "knownKeywords")]
    known_keywords: Option<Vec<String>>,
    #[serde(default, alias = "unknownKeywords")]
    unknown_keywords: Option<Vec<String>>,
    #[serde(default, alias = "scoreDelta")]
    score_delta: Option<BTreeMap<String, f64>>,
}

/// Parses and normalizes verdicts.
#[derive(Debug, Clone)]
pub struct ResponseParser {
    score_min: i32,
    score_max: i32,
}

impl ResponseParser {
    pub fn new(scoring: &ScoringConfig) -> Self {
        let (score_min, score_max) = scoring.delta_bounds();
        Self {
            score_min,
            score_max,
        }
    }

    /// Parse `raw`, repairing surrounding prose when the strict parse fails.
    pub fn parse(&self, raw: &str) -> InferenceResult<Verdict> {
        let trimmed = raw.trim();
        let strict_err = match serde_json::from_str::<RawVerdict>(trimmed) {
            Ok(parsed) => return self.normalize(parsed),
            Err(e) => e,
        };

        let slice = extract_json_block(trimmed).ok_or_else(|| InferenceError::Parse {
            reason: format!("no JSON object in reply: {strict_err}"),
        })?;
        let parsed =
            serde_json::from_str::<RawVerdict>(slice).map_err(|e| InferenceError::Parse {
                reason: format!("bracket extraction failed: {e}"),
            })?;
        tracing::debug!("parser: recovered verdict via bracket extraction");
        self.normalize(parsed)
    }

    /// FAIL verdict showing the reply verbatim, so the user always sees
    /// something.
    pub fn fallback(&self, raw: &str) -> Verdict {
        if raw.trim().is_empty() {
            Verdict::degraded(VERIFICATION_UNAVAILABLE)
        } else {
            Verdict::degraded(raw)
        }
    }

    fn normalize(&self, raw: RawVerdict) -> InferenceResult<Verdict> {
        let decision = Decision::parse(&raw.decision).ok_or_else(|| InferenceError::Parse {
            reason: format!("unknown decision {:?}", raw.decision),
        })?;

        let score_delta = raw
            .score_delta
            .unwrap_or_default()
            .into_iter()
            .filter(|(metric, delta)| !metric.trim().is_empty() && delta.is_finite())
            .map(|(metric, delta)| (metric.trim().to_string(), self.clamp(delta)))
            .collect();

        Ok(Verdict {
            decision,
            feedback: raw.response.unwrap_or_default().trim().to_string(),
            known_keywords: clean_keywords(raw.known_keywords),
            unknown_keywords: clean_keywords(raw.unknown_keywords),
            score_delta,
            degraded: false,
        })
    }

    fn clamp(&self, delta: f64) -> i32 {
        let bounded = delta
            .round()
            .clamp(f64::from(self.score_min), f64::from(self.score_max));
        bounded as i32
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

fn clean_keywords(keywords: Option<Vec<String>>) -> BTreeSet<String> {
    keywords
        .unwrap_or_default()
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Slice from the first `{` to the last `}`, inclusive.
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_json_block_spans_outermost_braces() {
        assert_eq!(extract_json_block("a {x {y}} b"), Some("{x {y}}"));
        assert_eq!(extract_json_block("} nothing {"), None);
        assert_eq!(extract_json_block("no braces"), None);
    }

    #[test]
    fn score_clamp_rounds_then_bounds() {
        let parser = ResponseParser::default();
        assert_eq!(parser.clamp(4.6), 5);
        assert_eq!(parser.clamp(500.0), 20);
        assert_eq!(parser.clamp(-500.0), -20);
    }
}

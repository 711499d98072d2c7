//! Response parsing against recorded replies, plus repair properties.

use std::collections::BTreeSet;

use feynman_core::config::ScoringConfig;
use feynman_core::constants::VERIFICATION_UNAVAILABLE;
use feynman_core::models::Decision;
use feynman_inference::ResponseParser;
use proptest::prelude::*;
use test_fixtures::golden_replies;

#[test]
fn golden_replies_parse_as_recorded() {
    let parser = ResponseParser::default();
    for reply in golden_replies() {
        let result = parser.parse(&reply.raw);
        match reply.expect {
            None => assert!(result.is_err(), "{} should not parse", reply.name),
            Some(expected) => {
                let verdict = result.unwrap_or_else(|e| panic!("{}: {e}", reply.name));
                assert_eq!(
                    Some(verdict.decision),
                    Decision::parse(&expected.decision),
                    "{}",
                    reply.name
                );
                assert_eq!(verdict.feedback, expected.response, "{}", reply.name);
                assert_eq!(
                    verdict.known_keywords,
                    expected.known.into_iter().collect::<BTreeSet<_>>(),
                    "{}",
                    reply.name
                );
                assert_eq!(
                    verdict.unknown_keywords,
                    expected.unknown.into_iter().collect::<BTreeSet<_>>(),
                    "{}",
                    reply.name
                );
                assert_eq!(verdict.score_delta, expected.score_delta, "{}", reply.name);
                assert!(!verdict.degraded);
            }
        }
    }
}

#[test]
fn prose_wrapped_reply_is_recovered() {
    let raw = r#"Sure! {"decision":"PASS","response":"ok"} Hope that helps!"#;
    let verdict = ResponseParser::default().parse(raw).unwrap();
    assert_eq!(verdict.decision, Decision::Pass);
    assert_eq!(verdict.feedback, "ok");
    assert!(verdict.known_keywords.is_empty());
    assert!(verdict.unknown_keywords.is_empty());
    assert!(verdict.score_delta.is_empty());
}

#[test]
fn missing_optional_fields_take_defaults() {
    let verdict = ResponseParser::default()
        .parse(r#"{"decision":"continue"}"#)
        .unwrap();
    assert_eq!(verdict.decision, Decision::Continue);
    assert_eq!(verdict.feedback, "");
    assert!(verdict.score_delta.is_empty());
}

#[test]
fn missing_decision_is_a_parse_error() {
    let err = ResponseParser::default()
        .parse(r#"{"response":"no decision here"}"#)
        .unwrap_err();
    assert!(matches!(
        err,
        feynman_core::errors::InferenceError::Parse { .. }
    ));
}

#[test]
fn configured_score_range_is_honored() {
    let scoring = ScoringConfig {
        score_delta_min: -5,
        score_delta_max: 5,
        ..ScoringConfig::default()
    };
    let verdict = ResponseParser::new(&scoring)
        .parse(r#"{"decision":"PASS","score_delta":{"clarity":12,"rigor":-12}}"#)
        .unwrap();
    assert_eq!(verdict.score_delta["clarity"], 5);
    assert_eq!(verdict.score_delta["rigor"], -5);
}

#[test]
fn inverted_score_range_still_clamps() {
    let scoring = ScoringConfig {
        score_delta_min: 5,
        score_delta_max: -5,
        ..ScoringConfig::default()
    };
    let verdict = ResponseParser::new(&scoring)
        .parse(r#"{"decision":"PASS","score_delta":{"clarity":12,"rigor":-12}}"#)
        .unwrap();
    assert_eq!(verdict.score_delta["clarity"], 5);
    assert_eq!(verdict.score_delta["rigor"], -5);
}

#[test]
fn fallback_shows_raw_text_verbatim() {
    let parser = ResponseParser::default();
    let verdict = parser.fallback("the model rambled");
    assert_eq!(verdict.decision, Decision::Fail);
    assert_eq!(verdict.feedback, "the model rambled");
    assert!(verdict.degraded);

    assert_eq!(parser.fallback("   ").feedback, VERIFICATION_UNAVAILABLE);
}

proptest! {
    #[test]
    fn surrounding_prose_never_breaks_extraction(
        prefix in "[a-zA-Z0-9 .,!?\n]{0,40}",
        suffix in "[a-zA-Z0-9 .,!?\n]{0,40}",
    ) {
        let raw = format!(r#"{prefix}{{"decision":"FAIL","response":"nope"}}{suffix}"#);
        let verdict = ResponseParser::default().parse(&raw).unwrap();
        prop_assert_eq!(verdict.decision, Decision::Fail);
        prop_assert_eq!(verdict.feedback, "nope");
    }

    #[test]
    fn score_deltas_always_land_in_range(delta in -1.0e6f64..1.0e6) {
        let raw = format!(r#"{{"decision":"PASS","score_delta":{{"m":{delta}}}}}"#);
        let verdict = ResponseParser::default().parse(&raw).unwrap();
        let value = verdict.score_delta["m"];
        prop_assert!((-20..=20).contains(&value));
    }
}

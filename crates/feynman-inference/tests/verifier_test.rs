//! Verifier: parse, re-ask, degrade.

use std::sync::Arc;

use feynman_core::constants::VERIFICATION_UNAVAILABLE;
use feynman_core::errors::InferenceError;
use feynman_core::models::{Decision, ModelCandidate, PromptRequest};
use feynman_inference::{ModelResolver, ResponseParser, RetryPolicies, VerdictSource, Verifier};
use test_fixtures::replies::{auth, not_found, ok, transient, verdict, verdict_with_keywords};
use test_fixtures::ScriptedTransport;

fn verifier(transport: &Arc<ScriptedTransport>) -> Verifier {
    let resolver = ModelResolver::new(
        transport.clone(),
        vec![ModelCandidate::new("alpha", 0)],
        RetryPolicies::immediate(),
    );
    Verifier::new(
        Arc::new(resolver),
        ResponseParser::default(),
        "key".to_string(),
    )
}

fn two_model_verifier(transport: &Arc<ScriptedTransport>) -> Verifier {
    let resolver = ModelResolver::new(
        transport.clone(),
        vec![ModelCandidate::new("alpha", 0), ModelCandidate::new("beta", 1)],
        RetryPolicies::immediate(),
    );
    Verifier::new(
        Arc::new(resolver),
        ResponseParser::default(),
        "key".to_string(),
    )
}

fn primed() -> Arc<ScriptedTransport> {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push("alpha", ok("OK"));
    transport
}

fn request() -> PromptRequest {
    PromptRequest::json("criteria", "my answer")
}

#[test]
fn well_formed_reply_round_trips() {
    let transport = primed();
    transport.push(
        "alpha",
        verdict_with_keywords("PASS", "Nice.", &["entropy"], &["microstate"]),
    );

    let verdict = verifier(&transport).verify(&request()).unwrap();
    assert_eq!(verdict.decision, Decision::Pass);
    assert_eq!(verdict.feedback, "Nice.");
    assert!(verdict.known_keywords.contains("entropy"));
    assert!(verdict.unknown_keywords.contains("microstate"));
    assert!(!verdict.degraded);
    assert_eq!(transport.json_calls().len(), 1);
}

#[test]
fn unparsable_reply_is_re_asked_once() {
    let transport = primed();
    transport.push("alpha", ok("I refuse to use JSON."));
    transport.push("alpha", ok(r#"{"decision":"FAIL","response":"fine"}"#));

    let verdict = verifier(&transport).verify(&request()).unwrap();
    assert_eq!(verdict.decision, Decision::Fail);
    assert_eq!(verdict.feedback, "fine");
    assert!(!verdict.degraded);
    assert_eq!(transport.json_calls().len(), 2);
}

#[test]
fn persistent_garbage_degrades_to_fail_with_raw_text() {
    let transport = primed();
    transport.push("alpha", ok("first ramble"));
    transport.push("alpha", ok("second ramble"));
    transport.always("alpha", ok("should never be asked"));

    let verdict = verifier(&transport).verify(&request()).unwrap();
    assert_eq!(verdict.decision, Decision::Fail);
    assert_eq!(verdict.feedback, "second ramble");
    assert!(verdict.degraded);
    assert_eq!(transport.json_calls().len(), 2);
}

#[test]
fn one_turn_gets_one_transient_retry_across_re_resolution() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push("alpha", ok("OK"));
    transport.push("alpha", transient());
    transport.push("alpha", not_found("alpha"));
    transport.push("beta", ok("OK"));
    transport.push("beta", transient());
    transport.always("beta", verdict("PASS", "too late"));

    let err = two_model_verifier(&transport).verify(&request()).unwrap_err();
    assert!(matches!(err, InferenceError::Transient { .. }));
    // Resolution call, transient + retry, re-resolution pass (alpha gone),
    // then beta's transient with the retry already spent.
    assert_eq!(
        transport.models_called(),
        vec!["alpha", "alpha", "alpha", "alpha", "beta", "beta"]
    );
}

#[test]
fn one_turn_gets_one_re_resolution_across_re_ask() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push("alpha", ok("OK"));
    transport.push("alpha", not_found("alpha"));
    transport.push("beta", ok("OK"));
    transport.push("beta", ok("no json here"));
    transport.push("beta", not_found("beta"));

    let verdict = two_model_verifier(&transport).verify(&request()).unwrap();
    assert!(verdict.degraded);
    assert_eq!(verdict.feedback, "no json here");
    // The re-ask hits a vanished model but the re-resolution was used up.
    assert_eq!(transport.call_count(), 6);
}

#[test]
fn re_ask_does_not_refill_transient_retries() {
    let transport = primed();
    transport.push("alpha", transient());
    transport.push("alpha", ok("no json here"));
    transport.push("alpha", transient());
    transport.always("alpha", verdict("PASS", "never reached"));

    let verdict = verifier(&transport).verify(&request()).unwrap();
    assert!(verdict.degraded);
    assert_eq!(verdict.feedback, "no json here");
    assert_eq!(transport.call_count(), 4);
}

#[test]
fn empty_replies_degrade_to_unavailable_message() {
    let transport = primed();
    transport.always("alpha", ok(""));

    let verdict = verifier(&transport).verify(&request()).unwrap();
    assert!(verdict.degraded);
    assert_eq!(verdict.feedback, VERIFICATION_UNAVAILABLE);
}

#[test]
fn auth_failure_is_not_swallowed() {
    let transport = primed();
    transport.push("alpha", auth());

    let err = verifier(&transport).verify(&request()).unwrap_err();
    assert!(err.is_auth());
}

#[test]
fn resolution_failure_propagates_as_exhausted() {
    let transport = Arc::new(ScriptedTransport::new());
    let err = verifier(&transport).verify(&request()).unwrap_err();
    assert!(matches!(
        err,
        feynman_core::errors::InferenceError::Exhausted { .. }
    ));
}

#[test]
fn ask_text_returns_reply_unparsed() {
    let transport = primed();
    transport.push("alpha", ok("Think about what happens at absolute zero."));
    let hint = verifier(&transport)
        .ask_text(&PromptRequest::text("hint", "entropy"))
        .unwrap();
    assert_eq!(hint, "Think about what happens at absolute zero.");
}

#[test]
fn debug_output_redacts_api_key() {
    let transport = primed();
    let rendered = format!("{:?}", verifier(&transport));
    assert!(!rendered.contains("\"key\""));
    assert!(rendered.contains("<redacted>"));
}

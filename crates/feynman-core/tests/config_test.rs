use feynman_core::config::*;
use feynman_core::errors::{FeynmanError, ValidationError};
use feynman_core::models::GateKind;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = FeynmanConfig::from_toml("").unwrap();

    // Inference defaults
    assert_eq!(config.inference.candidates.len(), 3);
    assert_eq!(config.inference.timeout_secs, 30);
    assert_eq!(config.inference.api_key_env, "FEYNMAN_API_KEY");

    // Retry defaults: one transient retry, one re-ask, one re-resolution.
    assert_eq!(config.retry.transient_max_retries, 1);
    assert_eq!(config.retry.parse_max_reasks, 1);
    assert_eq!(config.retry.re_resolve_max, 1);

    // Gate defaults
    assert_eq!(config.gates.min_chars(GateKind::Definition), 10);
    assert_eq!(config.gates.min_chars(GateKind::Falsification), 20);
    assert_eq!(config.gates.hint_penalty, 10);

    // Scoring / decay defaults
    assert_eq!(config.scoring.initial_attitude, 100);
    assert_eq!(config.decay.step, 5);
    assert_eq!(config.decay.tick_interval_secs, 86_400);

    assert_eq!(config.storage.db_path, "feynman.db");
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[inference]
base_url = "http://localhost:9000"
candidates = [
    { identifier = "late", priority = 5 },
    { identifier = "early", priority = 1 },
]

[decay]
step = 10
"#;
    let config = FeynmanConfig::from_toml(toml).unwrap();
    assert_eq!(config.inference.base_url, "http://localhost:9000");
    let priorities: Vec<_> = config
        .inference
        .candidates
        .iter()
        .map(|c| (c.identifier.as_str(), c.priority))
        .collect();
    assert_eq!(priorities, vec![("late", 5), ("early", 1)]);
    assert_eq!(config.decay.step, 10);
    // Non-overridden fields keep defaults
    assert_eq!(config.decay.tick_interval_secs, 86_400);
    assert_eq!(config.inference.timeout_secs, 30);
}

#[test]
fn config_serde_roundtrip() {
    let config = FeynmanConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = FeynmanConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.inference.candidates, config.inference.candidates);
    assert_eq!(roundtripped.gates.hint_penalty, config.gates.hint_penalty);
}

#[test]
fn config_rejects_empty_candidate_list() {
    let err = FeynmanConfig::from_toml("[inference]\ncandidates = []\n").unwrap_err();
    assert!(matches!(
        err,
        FeynmanError::Validation(ValidationError::InvalidConfig { .. })
    ));
}

#[test]
fn config_rejects_inverted_score_range() {
    let toml = "[scoring]\nscore_delta_min = 5\nscore_delta_max = -5\n";
    assert!(FeynmanConfig::from_toml(toml).is_err());
}

#[test]
fn inverted_score_bounds_clamp_without_panicking() {
    let scoring = ScoringConfig {
        score_delta_min: 20,
        score_delta_max: -20,
        ..ScoringConfig::default()
    };
    assert_eq!(scoring.delta_bounds(), (-20, 20));
    assert_eq!(scoring.clamp_delta(50), 20);
    assert_eq!(scoring.clamp_delta(-50), -20);
    assert_eq!(scoring.clamp_delta(3), 3);
}

#[test]
fn config_reports_malformed_toml() {
    let err = FeynmanConfig::from_toml("[decay\nstep = ").unwrap_err();
    assert!(matches!(err, FeynmanError::ConfigError { .. }));
}

#[test]
fn api_key_explicit_value_wins_and_is_trimmed() {
    let config = FeynmanConfig::default();
    assert_eq!(config.resolve_api_key(Some("  secret ")).unwrap(), "secret");
}

#[test]
fn api_key_missing_is_a_validation_error() {
    let mut config = FeynmanConfig::default();
    config.inference.api_key_env = "FEYNMAN_TEST_KEY_THAT_IS_NEVER_SET".into();
    let err = config.resolve_api_key(None).unwrap_err();
    assert!(err.is_user_visible());
    assert!(err.to_string().contains("FEYNMAN_TEST_KEY_THAT_IS_NEVER_SET"));
}

#[test]
fn api_key_blank_explicit_value_is_rejected() {
    let mut config = FeynmanConfig::default();
    config.inference.api_key_env = "FEYNMAN_TEST_KEY_THAT_IS_NEVER_SET".into();
    assert!(config.resolve_api_key(Some("   ")).is_err());
}

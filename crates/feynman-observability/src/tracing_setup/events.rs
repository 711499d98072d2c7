//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a fully processed turn.
pub fn turn_processed(topic: &str, gate: u8, decision: &str, degraded: bool) {
    tracing::info!(
        event = "turn_processed",
        topic = %topic,
        gate = gate,
        decision = %decision,
        degraded = degraded,
        "turn processed"
    );
}

/// Log a gate transition.
pub fn gate_advanced(topic: &str, from: u8, to: u8) {
    tracing::info!(
        event = "gate_advanced",
        topic = %topic,
        from = from,
        to = to,
        "gate advanced"
    );
}

/// Log a successful model resolution.
pub fn model_resolved(model: &str, probes: usize) {
    tracing::info!(
        event = "model_resolved",
        model = %model,
        probes = probes,
        "model resolved"
    );
}

/// Log a candidate that failed its probe.
pub fn candidate_failed(model: &str, class: &str, reason: &str) {
    tracing::warn!(
        event = "candidate_failed",
        model = %model,
        class = %class,
        reason = %reason,
        "model candidate failed"
    );
}

/// Log a fallback to a degraded FAIL verdict.
pub fn verdict_degraded(component: &str, failure: &str) {
    tracing::warn!(
        event = "verdict_degraded",
        component = %component,
        failure = %failure,
        "verdict degraded"
    );
}

/// Log a hint being used.
pub fn hint_used(topic: &str, penalty: u8, attitude: u8) {
    tracing::info!(
        event = "hint_used",
        topic = %topic,
        penalty = penalty,
        attitude = attitude,
        "hint used"
    );
}

/// Log a completed decay pass.
pub fn decay_ticked(nodes: usize, steps: u32, faded: usize) {
    tracing::info!(
        event = "decay_ticked",
        nodes = nodes,
        steps = steps,
        faded = faded,
        "decay tick applied"
    );
}

/// Log a node being watered back to full health.
pub fn node_watered(node_id: &str) {
    tracing::info!(
        event = "node_watered",
        node_id = %node_id,
        "knowledge node watered"
    );
}

/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of fixed gates in a gated session.
pub const GATE_COUNT: u8 = 4;

/// Ordinal reported for the TERMINAL gate state.
pub const TERMINAL_ORDINAL: u8 = GATE_COUNT + 1;

/// Upper bound for knowledge node health.
pub const MAX_HEALTH: u8 = 100;

/// Upper bound for the session attitude score and every session metric.
pub const MAX_SCORE: u8 = 100;

/// Score-delta key that adjusts the attitude score directly.
pub const ATTITUDE_METRIC: &str = "attitude";

/// Feedback shown when verification could not be completed.
pub const VERIFICATION_UNAVAILABLE: &str =
    "Verification is unavailable right now. Your answer was kept; please try again.";

// Single source of truth for all default values.

// --- Inference ---
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CANDIDATES: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"];
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_KEY_ENV: &str = "FEYNMAN_API_KEY";
pub const DEFAULT_PROBE_PROMPT: &str = "ping";

// --- Retry ---
pub const DEFAULT_TRANSIENT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_TRANSIENT_BACKOFF_MS: u64 = 750;
pub const DEFAULT_PARSE_MAX_REASKS: u32 = 1;
pub const DEFAULT_PARSE_BACKOFF_MS: u64 = 250;
pub const DEFAULT_RE_RESOLVE_MAX: u32 = 1;

// --- Gates ---
pub const DEFAULT_DEFINITION_MIN_CHARS: usize = 10;
pub const DEFAULT_MECHANISM_MIN_CHARS: usize = 20;
pub const DEFAULT_FALSIFICATION_MIN_CHARS: usize = 20;
pub const DEFAULT_INSIGHT_MIN_CHARS: usize = 15;
pub const DEFAULT_TERRITORY_MIN_CHARS: usize = 4;
pub const DEFAULT_HINT_PENALTY: u8 = 10;

// --- Scoring ---
pub const DEFAULT_SCORE_DELTA_MIN: i32 = -20;
pub const DEFAULT_SCORE_DELTA_MAX: i32 = 20;
pub const DEFAULT_INITIAL_ATTITUDE: u8 = 100;

// --- Decay ---
pub const DEFAULT_DECAY_STEP: u8 = 5;
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 86_400; // 1 day
pub const DEFAULT_WILTING_THRESHOLD: u8 = 50;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "feynman.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;

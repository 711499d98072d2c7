//! # feynman-inference
//!
//! Everything between a composed prompt and a trustworthy `Verdict`:
//!
//! - `transport`: blocking HTTP client for the `generateContent` protocol,
//!   with status codes classified into the engine's error taxonomy
//! - `retry`: bounded retry policies, one per error class
//! - `resolver`, `ModelResolver`: probes the candidate list, caches the
//!   first working model, re-resolves once when it disappears
//! - `parser`, `ResponseParser`: strict JSON, then bracket extraction,
//!   then schema defaults and score clamping
//! - `verifier`, `Verifier`: resolver + parser + the single re-ask

pub mod parser;
pub mod resolver;
pub mod retry;
pub mod transport;
pub mod verifier;

pub use parser::ResponseParser;
pub use resolver::ModelResolver;
pub use retry::{RetryBudget, RetryPolicies, RetryPolicy};
pub use transport::{HttpTransport, HttpTransportConfig};
pub use verifier::{VerdictSource, Verifier};

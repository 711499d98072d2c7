//! Verifier: one request in, one `Verdict` out.

use std::sync::Arc;

use feynman_core::errors::{ErrorClass, InferenceError, InferenceResult};
use feynman_core::models::{PromptRequest, Verdict};
use feynman_observability::events;

use crate::parser::ResponseParser;
use crate::resolver::ModelResolver;
use crate::retry::RetryBudget;

/// Source of verdicts and free-text replies for the gate controller.
pub trait VerdictSource: Send + Sync {
    /// Structured verdict for `request`.
    ///
    /// `Ok` covers both parsed replies and the FAIL fallback for replies that
    /// could not be repaired. `Err` means no reply was obtained at all.
    fn verify(&self, request: &PromptRequest) -> InferenceResult<Verdict>;

    /// Free-text reply for `request` (hints).
    fn ask_text(&self, request: &PromptRequest) -> InferenceResult<String>;
}

/// Resolver + parser bound to one operator's API key.
pub struct Verifier {
    resolver: Arc<ModelResolver>,
    parser: ResponseParser,
    api_key: String,
}

impl Verifier {
    pub fn new(resolver: Arc<ModelResolver>, parser: ResponseParser, api_key: String) -> Self {
        Self {
            resolver,
            parser,
            api_key,
        }
    }

    pub fn resolver(&self) -> &Arc<ModelResolver> {
        &self.resolver
    }

    /// A reply with no text is handed to the parser as empty, so it goes
    /// through the same re-ask path as any other non-compliant reply.
    fn ask_raw(
        &self,
        request: &PromptRequest,
        budget: &mut RetryBudget,
    ) -> InferenceResult<String> {
        match self.resolver.call_within(&self.api_key, request, budget) {
            Err(InferenceError::Parse { reason }) => {
                tracing::debug!("verifier: empty reply treated as unparsable: {reason}");
                Ok(String::new())
            }
            other => other,
        }
    }
}

impl VerdictSource for Verifier {
    /// All attempts share one turn budget: at most one re-resolution pass,
    /// the transient retries and the re-asks, however they interleave.
    fn verify(&self, request: &PromptRequest) -> InferenceResult<Verdict> {
        let policy = self.resolver.policies().parse;
        let mut budget = self.resolver.policies().budget();

        let mut last_raw = self.ask_raw(request, &mut budget)?;
        let mut last_err = match self.parser.parse(&last_raw) {
            Ok(verdict) => return Ok(verdict),
            Err(e) => e,
        };

        while budget.spend(ErrorClass::Parse) {
            tracing::debug!("verifier: re-asking after unparsable reply: {last_err}");
            policy.pause();
            match self.ask_raw(request, &mut budget) {
                Ok(raw) => match self.parser.parse(&raw) {
                    Ok(verdict) => return Ok(verdict),
                    Err(e) => {
                        last_err = e;
                        if !raw.trim().is_empty() {
                            last_raw = raw;
                        }
                    }
                },
                Err(e) if e.is_auth() => return Err(e),
                Err(e) => {
                    tracing::warn!("verifier: re-ask failed: {e}");
                    break;
                }
            }
        }

        events::verdict_degraded("response_parser", &last_err.to_string());
        Ok(self.parser.fallback(&last_raw))
    }

    fn ask_text(&self, request: &PromptRequest) -> InferenceResult<String> {
        self.resolver.call(&self.api_key, request)
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("resolver", &self.resolver)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

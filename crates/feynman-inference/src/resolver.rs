//! ModelResolver: finds a working model among prioritized candidates and
//! shields the engine from identifier churn on the service side.

use std::sync::{Arc, RwLock};

use feynman_core::config::InferenceConfig;
use feynman_core::errors::{CandidateFailure, ErrorClass, InferenceError, InferenceResult};
use feynman_core::models::{ModelCandidate, ModelHandle, PromptRequest};
use feynman_core::traits::IInferenceTransport;
use feynman_observability::events;

use crate::retry::{RetryBudget, RetryPolicies};

/// Instruction sent with every probe. Any reply counts as alive.
const PROBE_INSTRUCTION: &str = "Reply with the single word OK.";

/// Resolves and caches the model handle.
///
/// The cache is the only state shared between sessions. Two sessions racing
/// to fill it just probe twice; the later write wins and both handles work.
pub struct ModelResolver {
    transport: Arc<dyn IInferenceTransport>,
    candidates: Vec<ModelCandidate>,
    probe: PromptRequest,
    policies: RetryPolicies,
    cache: RwLock<Option<ModelHandle>>,
}

impl ModelResolver {
    /// `candidates` are sorted by priority; equal priorities keep their order.
    pub fn new(
        transport: Arc<dyn IInferenceTransport>,
        mut candidates: Vec<ModelCandidate>,
        policies: RetryPolicies,
    ) -> Self {
        candidates.sort_by_key(|c| c.priority);
        Self {
            transport,
            candidates,
            probe: PromptRequest::text(PROBE_INSTRUCTION, "ping"),
            policies,
            cache: RwLock::new(None),
        }
    }

    pub fn from_config(
        transport: Arc<dyn IInferenceTransport>,
        config: &InferenceConfig,
        policies: RetryPolicies,
    ) -> Self {
        let mut resolver = Self::new(transport, config.candidates.clone(), policies);
        resolver.probe = PromptRequest::text(PROBE_INSTRUCTION, config.probe_prompt.clone());
        resolver
    }

    pub fn candidates(&self) -> &[ModelCandidate] {
        &self.candidates
    }

    pub fn policies(&self) -> &RetryPolicies {
        &self.policies
    }

    /// The cached handle, if any.
    pub fn cached(&self) -> Option<ModelHandle> {
        self.cache.read().ok().and_then(|guard| guard.clone())
    }

    /// Drop the cached handle so the next call probes again.
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.cache.write() {
            *guard = None;
        }
    }

    fn store(&self, handle: &ModelHandle) {
        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(handle.clone());
        }
    }

    /// Return the cached handle or run one resolution pass.
    pub fn resolve(&self, api_key: &str) -> InferenceResult<ModelHandle> {
        match self.cached() {
            Some(handle) => Ok(handle),
            None => self.resolve_fresh(api_key),
        }
    }

    /// Probe candidates in order, at most one probe each.
    ///
    /// - auth failure: stop immediately, no further probes
    /// - anything else: record it and try the next candidate
    /// - a reply (even an empty one) means the model exists and is cached
    pub fn resolve_fresh(&self, api_key: &str) -> InferenceResult<ModelHandle> {
        let mut failures = Vec::with_capacity(self.candidates.len());

        for (probes, candidate) in self.candidates.iter().enumerate() {
            let model = candidate.identifier.as_str();
            tracing::debug!(model = %model, "resolver: probing candidate");

            match self.transport.generate(model, api_key, &self.probe) {
                Ok(_) | Err(InferenceError::Parse { .. }) => {
                    let handle = ModelHandle::new(model);
                    self.store(&handle);
                    events::model_resolved(model, probes + 1);
                    return Ok(handle);
                }
                Err(e) if e.is_auth() => {
                    events::candidate_failed(model, "Auth", &e.to_string());
                    return Err(e);
                }
                Err(e) => {
                    events::candidate_failed(model, &format!("{:?}", e.class()), &e.to_string());
                    failures.push(CandidateFailure {
                        model: model.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(InferenceError::Exhausted { failures })
    }

    /// Content-generation call with `handle`, on a fresh turn budget.
    pub fn invoke(
        &self,
        api_key: &str,
        handle: &ModelHandle,
        request: &PromptRequest,
    ) -> InferenceResult<String> {
        let mut budget = self.policies.budget();
        self.invoke_within(api_key, handle, request, &mut budget)
    }

    /// Content-generation call with `handle`, drawing retries from `budget`.
    ///
    /// Transient failures are retried while the budget allows. A not-found
    /// reply means the cached model went away: the cache is cleared and a
    /// re-resolution pass is made if the budget still has one. An auth
    /// failure also clears the cache.
    pub fn invoke_within(
        &self,
        api_key: &str,
        handle: &ModelHandle,
        request: &PromptRequest,
        budget: &mut RetryBudget,
    ) -> InferenceResult<String> {
        let mut handle = handle.clone();

        loop {
            let result = self.policies.run(ErrorClass::Transient, budget, || {
                self.transport.generate(&handle.model, api_key, request)
            });

            match result {
                Err(InferenceError::NotFound { model, reason })
                    if budget.spend(ErrorClass::NotFound) =>
                {
                    tracing::warn!(
                        model = %model,
                        "resolver: cached model unavailable ({reason}), re-resolving"
                    );
                    self.invalidate();
                    self.policies.re_resolve.pause();
                    handle = self.resolve_fresh(api_key)?;
                }
                Err(e) if e.is_auth() => {
                    self.invalidate();
                    return Err(e);
                }
                other => return other,
            }
        }
    }

    /// Resolve (or reuse the cache) and invoke, on a fresh turn budget.
    pub fn call(&self, api_key: &str, request: &PromptRequest) -> InferenceResult<String> {
        let mut budget = self.policies.budget();
        self.call_within(api_key, request, &mut budget)
    }

    /// Resolve (or reuse the cache) and invoke, drawing from `budget`.
    pub fn call_within(
        &self,
        api_key: &str,
        request: &PromptRequest,
        budget: &mut RetryBudget,
    ) -> InferenceResult<String> {
        let handle = self.resolve(api_key)?;
        self.invoke_within(api_key, &handle, request, budget)
    }
}

impl std::fmt::Debug for ModelResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelResolver")
            .field("candidates", &self.candidates)
            .field("policies", &self.policies)
            .field("cached", &self.cached())
            .finish()
    }
}

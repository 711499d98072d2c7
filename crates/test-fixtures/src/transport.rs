//! Scripted inference transport.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use feynman_core::errors::{InferenceError, InferenceResult};
use feynman_core::models::PromptRequest;
use feynman_core::traits::IInferenceTransport;

/// One call observed by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportCall {
    pub model: String,
    pub api_key: String,
    pub request: PromptRequest,
}

/// Replays scripted results per model, in order. Once a model's queue is
/// empty its sticky reply (if any) is returned; otherwise the call fails
/// with `NotFound`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    queued: Mutex<HashMap<String, VecDeque<InferenceResult<String>>>>,
    sticky: Mutex<HashMap<String, InferenceResult<String>>>,
    calls: Mutex<Vec<TransportCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a one-shot reply for `model`.
    pub fn push(&self, model: &str, reply: InferenceResult<String>) -> &Self {
        self.queued
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(model.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Reply returned for `model` whenever its queue is empty.
    pub fn always(&self, model: &str, reply: InferenceResult<String>) -> &Self {
        self.sticky
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(model.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn models_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.model).collect()
    }

    /// Calls that carried a structured (JSON) request, i.e. not probes or hints.
    pub fn json_calls(&self) -> Vec<TransportCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.request.expect_json)
            .collect()
    }
}

impl IInferenceTransport for ScriptedTransport {
    fn generate(
        &self,
        model: &str,
        api_key: &str,
        request: &PromptRequest,
    ) -> InferenceResult<String> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(TransportCall {
                model: model.to_string(),
                api_key: api_key.to_string(),
                request: request.clone(),
            });

        let next = self
            .queued
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(model)
            .and_then(VecDeque::pop_front);
        if let Some(reply) = next {
            return reply;
        }

        self.sticky
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(model)
            .cloned()
            .unwrap_or_else(|| {
                Err(InferenceError::NotFound {
                    model: model.to_string(),
                    reason: "unscripted model".to_string(),
                })
            })
    }
}

//! VerificationEngine: the surface the presentation layer talks to.

use std::sync::Arc;

use feynman_core::config::FeynmanConfig;
use feynman_core::errors::{FeynmanError, FeynmanResult};
use feynman_core::models::{
    GateKind, NewKnowledgeNode, Persona, SessionMode, TurnSnapshot,
};
use feynman_core::traits::{IInferenceTransport, IKnowledgeStore, SessionObserver};
use feynman_inference::{
    HttpTransport, HttpTransportConfig, ModelResolver, ResponseParser, RetryPolicies,
    VerdictSource, Verifier,
};

use crate::controller::GateController;
use crate::session::Session;

/// Binds a `GateController` to a verdict source, an optional knowledge
/// store, and any number of observers. Holds no session state; sessions
/// are passed into every call.
pub struct VerificationEngine {
    controller: GateController,
    source: Arc<dyn VerdictSource>,
    store: Option<Arc<dyn IKnowledgeStore>>,
    observers: Vec<Arc<dyn SessionObserver>>,
    initial_attitude: u8,
}

impl VerificationEngine {
    pub fn new(controller: GateController, source: Arc<dyn VerdictSource>) -> Self {
        Self {
            controller,
            source,
            store: None,
            observers: Vec::new(),
            initial_attitude: feynman_core::constants::MAX_SCORE,
        }
    }

    /// Build the full inference stack over `transport`. The API key is
    /// resolved here, before any call is made.
    pub fn from_config(
        config: &FeynmanConfig,
        api_key: Option<&str>,
        transport: Arc<dyn IInferenceTransport>,
    ) -> FeynmanResult<Self> {
        config.validate()?;
        let key = config.resolve_api_key(api_key)?;
        let resolver = ModelResolver::from_config(
            transport,
            &config.inference,
            RetryPolicies::from_config(&config.retry),
        );
        let verifier = Verifier::new(
            Arc::new(resolver),
            ResponseParser::new(&config.scoring),
            key,
        );
        let controller = GateController::new(config.gates.clone(), config.scoring.clone());

        let mut engine = Self::new(controller, Arc::new(verifier));
        engine.initial_attitude = config.scoring.initial_attitude;
        Ok(engine)
    }

    /// `from_config` over the HTTP transport.
    pub fn connect(config: &FeynmanConfig, api_key: Option<&str>) -> FeynmanResult<Self> {
        let transport = HttpTransport::new(HttpTransportConfig::from(&config.inference))?;
        Self::from_config(config, api_key, Arc::new(transport))
    }

    pub fn with_store(mut self, store: Arc<dyn IKnowledgeStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn controller(&self) -> &GateController {
        &self.controller
    }

    pub fn start_session(
        &self,
        topic: &str,
        persona: Persona,
        mode: SessionMode,
    ) -> FeynmanResult<Session> {
        let session =
            Session::new(topic, persona, mode)?.with_initial_attitude(self.initial_attitude);
        tracing::info!(topic = %session.topic(), mode = ?mode, persona = persona.as_str(), "session started");
        Ok(session)
    }

    /// Process one user answer and return the new snapshot.
    pub fn submit(&self, session: &mut Session, text: &str) -> FeynmanResult<TurnSnapshot> {
        self.controller.submit(session, text, self.source.as_ref())?;
        Ok(self.notify(session))
    }

    /// Ask for a hint. A delivered hint costs attitude; a failed request
    /// records the unavailable message at no cost.
    pub fn request_hint(&self, session: &mut Session) -> FeynmanResult<TurnSnapshot> {
        let request = self.controller.hint(session)?;
        match self.source.ask_text(&request) {
            Ok(hint) if !hint.trim().is_empty() => self.controller.deliver_hint(session, &hint),
            Ok(_) => self.controller.hint_unavailable(session),
            Err(e) if e.is_auth() => return Err(e.into()),
            Err(e) => {
                tracing::warn!("hint unavailable: {e}");
                self.controller.hint_unavailable(session);
            }
        }
        Ok(self.notify(session))
    }

    /// Investigate one unknown keyword and merge what comes back.
    pub fn explore(&self, session: &mut Session, keyword: &str) -> FeynmanResult<TurnSnapshot> {
        self.controller
            .explore(session, keyword, self.source.as_ref())?;
        Ok(self.notify(session))
    }

    pub fn reset(&self, session: &mut Session) -> TurnSnapshot {
        self.controller.reset(session);
        self.notify(session)
    }

    pub fn change_topic(&self, session: &mut Session, topic: &str) -> FeynmanResult<TurnSnapshot> {
        session.change_topic(topic)?;
        Ok(self.notify(session))
    }

    /// Persist the session's topic as a knowledge node and return its id.
    ///
    /// The explanation is the latest accepted Mechanism answer, else the
    /// Definition answer; the counterexample is the accepted Falsification
    /// answer. Missing answers are stored empty.
    pub fn save_topic(&self, session: &Session, tags: &[&str]) -> FeynmanResult<String> {
        let store = self.store.as_ref().ok_or_else(|| FeynmanError::ConfigError {
            reason: "no knowledge store attached to the engine".to_string(),
        })?;

        let explanation = session
            .accepted_answer(GateKind::Mechanism)
            .or_else(|| session.accepted_answer(GateKind::Definition))
            .unwrap_or_default();
        let counterexample = session
            .accepted_answer(GateKind::Falsification)
            .unwrap_or_default();

        let node = NewKnowledgeNode {
            concept: session.topic().to_string(),
            explanation: explanation.to_string(),
            counterexample: counterexample.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        let id = store.save(&node)?;
        tracing::info!(topic = %session.topic(), node_id = %id, "topic saved");
        Ok(id)
    }

    fn notify(&self, session: &Session) -> TurnSnapshot {
        let snapshot = session.snapshot();
        for observer in &self.observers {
            observer.on_turn(&snapshot);
        }
        snapshot
    }
}

impl std::fmt::Debug for VerificationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationEngine")
            .field("controller", &self.controller)
            .field("store", &self.store.is_some())
            .field("observers", &self.observers.len())
            .finish()
    }
}

//! # feynman-core
//!
//! Foundation crate for the Feynman verification engine.
//! Defines the data model, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::FeynmanConfig;
pub use errors::{FeynmanError, FeynmanResult, InferenceError, InferenceResult, ValidationError};
pub use models::{
    Decision, GateDefinition, GateKind, GateState, KnowledgeNode, ModelCandidate, ModelHandle,
    Persona, PromptRequest, Role, SessionMode, Turn, Verdict,
};

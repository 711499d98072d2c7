//! # feynman-session
//!
//! The dialogue side of the engine.
//!
//! - `session`, `Session`: topic, persona, gate, history, scores, territory
//! - `territory`, `TerritoryGraph`: disjoint known/unknown keyword sets
//! - `controller`, `GateController`: validation, prompt composition,
//!   verdict application
//! - `engine`, `VerificationEngine`: wires the controller to a verdict
//!   source, a knowledge store, and observers

pub mod controller;
pub mod engine;
pub mod persona;
pub mod prompt;
pub mod session;
pub mod territory;

pub use controller::GateController;
pub use engine::VerificationEngine;
pub use session::Session;
pub use territory::TerritoryGraph;

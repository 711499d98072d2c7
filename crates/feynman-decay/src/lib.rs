//! # feynman-decay
//!
//! Fixed-step health decay for saved knowledge nodes, with elapsed-time
//! catch-up and explicit watering. All state lives in the knowledge store.

pub mod formula;
pub mod scheduler;

pub use scheduler::{DecayScheduler, TickReport};

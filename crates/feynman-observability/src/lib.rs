//! # feynman-observability
//!
//! Tracing subscriber setup and one helper per structured event, so every
//! crate emits the same field names.

pub mod tracing_setup;

pub use tracing_setup::events;
pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};

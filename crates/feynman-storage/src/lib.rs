//! # feynman-storage
//!
//! SQLite implementation of `IKnowledgeStore`. One serialized write
//! connection; schema managed by versioned migrations.

pub mod migrations;
pub mod pool;
pub mod queries;
mod store;

pub use store::SqliteKnowledgeStore;

use feynman_core::errors::{FeynmanError, StorageError};

/// Wrap a SQLite failure message.
pub(crate) fn to_storage_err(message: String) -> FeynmanError {
    StorageError::Sqlite { message }.into()
}

//! Test support for the Feynman workspace: golden fixture loading, a
//! scripted inference transport, and an in-memory knowledge store.

pub mod replies;
pub mod store;
pub mod transport;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use store::MemoryKnowledgeStore;
pub use transport::{ScriptedTransport, TransportCall};

/// Root directory of the golden fixture files.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("golden").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures/golden from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures").join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// One recorded service reply and what the parser should make of it.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GoldenReply {
    pub name: String,
    pub raw: String,
    /// `None` when the reply is expected to be unparsable.
    pub expect: Option<GoldenVerdict>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct GoldenVerdict {
    pub decision: String,
    pub response: String,
    #[serde(default)]
    pub known: Vec<String>,
    #[serde(default)]
    pub unknown: Vec<String>,
    #[serde(default)]
    pub score_delta: std::collections::BTreeMap<String, i32>,
}

/// Load `golden/replies.json`.
pub fn golden_replies() -> Vec<GoldenReply> {
    load_fixture("replies.json")
}

use chrono::{DateTime, Utc};

use crate::errors::FeynmanResult;
use crate::models::{KnowledgeNode, NewKnowledgeNode, NodeFilter, NodeStatus};

/// Persistence collaborator for knowledge nodes.
///
/// The engine embeds no storage logic of its own and relies on the
/// implementation for atomicity of individual record updates.
pub trait IKnowledgeStore: Send + Sync {
    /// Persist a new node at full health and return its id.
    fn save(&self, node: &NewKnowledgeNode) -> FeynmanResult<String>;
    fn get(&self, id: &str) -> FeynmanResult<Option<KnowledgeNode>>;
    fn list(&self, filter: &NodeFilter) -> FeynmanResult<Vec<KnowledgeNode>>;
    fn delete(&self, id: &str) -> FeynmanResult<()>;
    /// Set health, and `last_touched` when `touched_at` is given.
    /// Fails with `StorageError::NodeNotFound` for an unknown id.
    fn update_health(
        &self,
        id: &str,
        health: u8,
        touched_at: Option<DateTime<Utc>>,
    ) -> FeynmanResult<()>;

    /// Archived nodes stop decaying. Fails with `StorageError::NodeNotFound`
    /// for an unknown id.
    fn set_status(&self, id: &str, status: NodeStatus) -> FeynmanResult<()>;
}

//! In-memory knowledge store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use feynman_core::errors::{FeynmanResult, StorageError};
use feynman_core::models::{KnowledgeNode, NewKnowledgeNode, NodeFilter, NodeStatus};
use feynman_core::traits::IKnowledgeStore;

/// `IKnowledgeStore` over a mutex-guarded map. Listing is ordered by id.
#[derive(Debug, Default)]
pub struct MemoryKnowledgeStore {
    nodes: Mutex<BTreeMap<String, KnowledgeNode>>,
}

impl MemoryKnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully specified node (for arranging decay scenarios).
    pub fn insert(&self, node: KnowledgeNode) {
        self.nodes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(node.id.clone(), node);
    }

    pub fn len(&self) -> usize {
        self.nodes.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IKnowledgeStore for MemoryKnowledgeStore {
    fn save(&self, node: &NewKnowledgeNode) -> FeynmanResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        self.insert(KnowledgeNode::from_new(id.clone(), node, Utc::now()));
        Ok(id)
    }

    fn get(&self, id: &str) -> FeynmanResult<Option<KnowledgeNode>> {
        Ok(self
            .nodes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned())
    }

    fn list(&self, filter: &NodeFilter) -> FeynmanResult<Vec<KnowledgeNode>> {
        Ok(self
            .nodes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect())
    }

    fn delete(&self, id: &str) -> FeynmanResult<()> {
        self.nodes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id);
        Ok(())
    }

    fn update_health(
        &self,
        id: &str,
        health: u8,
        touched_at: Option<DateTime<Utc>>,
    ) -> FeynmanResult<()> {
        let mut nodes = self.nodes.lock().unwrap_or_else(|e| e.into_inner());
        let node = nodes.get_mut(id).ok_or_else(|| StorageError::NodeNotFound {
            id: id.to_string(),
        })?;
        node.health = health;
        if let Some(at) = touched_at {
            node.last_touched = at;
        }
        Ok(())
    }

    fn set_status(&self, id: &str, status: NodeStatus) -> FeynmanResult<()> {
        let mut nodes = self.nodes.lock().unwrap_or_else(|e| e.into_inner());
        let node = nodes.get_mut(id).ok_or_else(|| StorageError::NodeNotFound {
            id: id.to_string(),
        })?;
        node.status = status;
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_HEALTH;

/// Lifecycle status of a persisted node. Only active nodes decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    #[default]
    Active,
    Archived,
}

impl NodeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// How fresh a node looks to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Fresh,
    Wilting,
    /// Health reached zero; review is due. The node is kept.
    Faded,
}

impl HealthBand {
    pub fn from_health(health: u8, wilting_threshold: u8) -> Self {
        if health == 0 {
            Self::Faded
        } else if health <= wilting_threshold {
            Self::Wilting
        } else {
            Self::Fresh
        }
    }
}

/// A topic the learner saved durably, with its freshness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeNode {
    pub id: String,
    pub concept: String,
    pub explanation: String,
    pub counterexample: String,
    pub tags: Vec<String>,
    /// 0..=100.
    pub health: u8,
    pub status: NodeStatus,
    pub created_at: DateTime<Utc>,
    pub last_touched: DateTime<Utc>,
}

impl KnowledgeNode {
    /// Materialize a freshly saved node at full health.
    pub fn from_new(id: impl Into<String>, new: &NewKnowledgeNode, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            concept: new.concept.clone(),
            explanation: new.explanation.clone(),
            counterexample: new.counterexample.clone(),
            tags: new.tags.clone(),
            health: MAX_HEALTH,
            status: NodeStatus::Active,
            created_at: now,
            last_touched: now,
        }
    }

    pub fn is_faded(&self) -> bool {
        self.health == 0
    }
}

/// Fields supplied when saving a topic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewKnowledgeNode {
    pub concept: String,
    pub explanation: String,
    pub counterexample: String,
    pub tags: Vec<String>,
}

/// Filter for listing nodes. Empty filter matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeFilter {
    pub status: Option<NodeStatus>,
    pub tag: Option<String>,
    /// Only nodes at or below this health.
    pub max_health: Option<u8>,
}

impl NodeFilter {
    pub fn active() -> Self {
        Self {
            status: Some(NodeStatus::Active),
            ..Self::default()
        }
    }

    pub fn matches(&self, node: &KnowledgeNode) -> bool {
        self.status.map_or(true, |s| node.status == s)
            && self
                .tag
                .as_ref()
                .map_or(true, |t| node.tags.iter().any(|nt| nt == t))
            && self.max_health.map_or(true, |h| node.health <= h)
    }
}

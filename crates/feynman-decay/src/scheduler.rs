//! DecayScheduler: ages active nodes and waters them back to full health.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use feynman_core::config::DecayConfig;
use feynman_core::constants::MAX_HEALTH;
use feynman_core::errors::{FeynmanResult, StorageError};
use feynman_core::models::{HealthBand, KnowledgeNode, NodeFilter, NodeHealth};
use feynman_core::traits::{DecayObserver, IKnowledgeStore};
use feynman_observability::events;

use crate::formula;

/// Outcome of one decay pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Active nodes visited.
    pub nodes: usize,
    /// Decay steps applied to each node.
    pub steps: u32,
    /// Nodes at zero health after the pass.
    pub faded: usize,
    pub health: Vec<NodeHealth>,
}

/// Stateless between calls: every health value is read from and written
/// back to the store.
pub struct DecayScheduler {
    store: Arc<dyn IKnowledgeStore>,
    config: DecayConfig,
    observers: Vec<Arc<dyn DecayObserver>>,
}

impl DecayScheduler {
    pub fn new(store: Arc<dyn IKnowledgeStore>, config: DecayConfig) -> Self {
        Self {
            store,
            config,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn DecayObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    pub fn band(&self, health: u8) -> HealthBand {
        HealthBand::from_health(health, self.config.wilting_threshold)
    }

    /// Decrement every active node by one step.
    pub fn tick(&self) -> FeynmanResult<TickReport> {
        self.apply(1)
    }

    /// Elapsed intervals since `last_run`.
    pub fn ticks_due(&self, last_run: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
        formula::ticks_due(last_run, now, self.config.tick_interval_secs)
    }

    /// Catch up on every interval elapsed since `last_run`, one store write
    /// per node. Nothing happens when no full interval has passed.
    pub fn run_due(&self, last_run: DateTime<Utc>, now: DateTime<Utc>) -> FeynmanResult<TickReport> {
        let steps = self.ticks_due(last_run, now);
        if steps == 0 {
            tracing::debug!("decay: no interval elapsed since {last_run}");
            return Ok(TickReport::default());
        }
        self.apply(steps)
    }

    /// Reset a node to full health and touch it. Idempotent.
    pub fn water(&self, id: &str) -> FeynmanResult<NodeHealth> {
        if self.store.get(id)?.is_none() {
            return Err(StorageError::NodeNotFound { id: id.to_string() }.into());
        }
        let now = Utc::now();
        self.store.update_health(id, MAX_HEALTH, Some(now))?;
        events::node_watered(id);

        let health = NodeHealth {
            id: id.to_string(),
            health: MAX_HEALTH,
            last_touched: now,
            band: self.band(MAX_HEALTH),
        };
        self.notify(&health);
        Ok(health)
    }

    fn apply(&self, steps: u32) -> FeynmanResult<TickReport> {
        let nodes = self.store.list(&NodeFilter::active())?;
        let mut report = TickReport {
            nodes: nodes.len(),
            steps,
            ..TickReport::default()
        };

        for node in nodes {
            let health = self.decay_node(&node, steps)?;
            if health.band == HealthBand::Faded {
                report.faded += 1;
            }
            self.notify(&health);
            report.health.push(health);
        }

        events::decay_ticked(report.nodes, steps, report.faded);
        Ok(report)
    }

    fn decay_node(&self, node: &KnowledgeNode, steps: u32) -> FeynmanResult<NodeHealth> {
        let next = formula::decayed(node.health, self.config.step, steps);
        if next != node.health {
            self.store.update_health(&node.id, next, None)?;
        }
        Ok(NodeHealth {
            id: node.id.clone(),
            health: next,
            last_touched: node.last_touched,
            band: self.band(next),
        })
    }

    fn notify(&self, health: &NodeHealth) {
        for observer in &self.observers {
            observer.on_node_health(health);
        }
    }
}

impl std::fmt::Debug for DecayScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecayScheduler")
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}

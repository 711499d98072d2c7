use crate::models::{NodeHealth, TurnSnapshot};

/// Receives the session snapshot after every processed turn.
pub trait SessionObserver: Send + Sync {
    fn on_turn(&self, snapshot: &TurnSnapshot);
}

/// Receives node health after every decay tick or watering.
pub trait DecayObserver: Send + Sync {
    fn on_node_health(&self, health: &NodeHealth);
}

mod candidate;
mod gate;
mod knowledge;
mod persona;
mod prompt;
mod snapshot;
mod turn;
mod verdict;

pub use candidate::{ModelCandidate, ModelHandle};
pub use gate::{GateDefinition, GateKind, GateState, SessionMode, GATE_DEFINITIONS};
pub use knowledge::{HealthBand, KnowledgeNode, NewKnowledgeNode, NodeFilter, NodeStatus};
pub use persona::Persona;
pub use prompt::PromptRequest;
pub use snapshot::{NodeHealth, TerritorySnapshot, TurnSnapshot};
pub use turn::{Role, Turn};
pub use verdict::{Decision, Verdict};

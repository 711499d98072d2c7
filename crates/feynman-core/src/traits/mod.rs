mod knowledge_store;
mod observer;
mod transport;

pub use knowledge_store::IKnowledgeStore;
pub use observer::{DecayObserver, SessionObserver};
pub use transport::IInferenceTransport;

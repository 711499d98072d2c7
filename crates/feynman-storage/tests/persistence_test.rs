//! File-backed store: data and schema survive reopening; decay runs against it.

use std::sync::Arc;

use feynman_core::config::{DecayConfig, StorageConfig};
use feynman_core::models::NewKnowledgeNode;
use feynman_core::traits::IKnowledgeStore;
use feynman_decay::DecayScheduler;
use feynman_storage::migrations::LATEST_VERSION;
use feynman_storage::SqliteKnowledgeStore;

fn entropy() -> NewKnowledgeNode {
    NewKnowledgeNode {
        concept: "entropy".to_string(),
        tags: vec!["physics".to_string()],
        ..NewKnowledgeNode::default()
    }
}

#[test]
fn nodes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feynman.db");

    let id = {
        let store = SqliteKnowledgeStore::open(&path, 5_000).unwrap();
        let id = store.save(&entropy()).unwrap();
        store.update_health(&id, 65, None).unwrap();
        id
    };

    let reopened = SqliteKnowledgeStore::open(&path, 5_000).unwrap();
    assert!(reopened.wal_enabled().unwrap());
    let stored = reopened.get(&id).unwrap().unwrap();
    assert_eq!(stored.concept, "entropy");
    assert_eq!(stored.health, 65);
    assert_eq!(reopened.schema_version().unwrap(), LATEST_VERSION);
}

#[test]
fn from_config_uses_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        db_path: dir.path().join("nodes.db").to_string_lossy().into_owned(),
        ..StorageConfig::default()
    };
    let store = SqliteKnowledgeStore::from_config(&config).unwrap();
    assert!(store.db_path().unwrap().ends_with("nodes.db"));
    assert!(dir.path().join("nodes.db").exists());
}

#[test]
fn decay_and_water_round_trip_through_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteKnowledgeStore::open(&dir.path().join("d.db"), 5_000).unwrap());
    let scheduler = DecayScheduler::new(store.clone(), DecayConfig::default());
    let id = store.save(&entropy()).unwrap();

    for _ in 0..3 {
        scheduler.tick().unwrap();
    }
    assert_eq!(store.get(&id).unwrap().unwrap().health, 85);

    scheduler.water(&id).unwrap();
    assert_eq!(store.get(&id).unwrap().unwrap().health, 100);
}

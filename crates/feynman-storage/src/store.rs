use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use feynman_core::config::StorageConfig;
use feynman_core::errors::FeynmanResult;
use feynman_core::models::{KnowledgeNode, NewKnowledgeNode, NodeFilter, NodeStatus};
use feynman_core::traits::IKnowledgeStore;

use crate::migrations;
use crate::pool::{pragmas, WriteConnection};
use crate::queries::node_crud;

/// SQLite-backed knowledge store. Each call is one statement on the single
/// serialized connection, so individual record updates are atomic.
pub struct SqliteKnowledgeStore {
    writer: WriteConnection,
    db_path: Option<PathBuf>,
}

impl SqliteKnowledgeStore {
    /// Open (creating if needed) and migrate the database at `path`.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> FeynmanResult<Self> {
        let store = Self {
            writer: WriteConnection::open(path, busy_timeout_ms)?,
            db_path: Some(path.to_path_buf()),
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> FeynmanResult<Self> {
        let store = Self {
            writer: WriteConnection::open_in_memory()?,
            db_path: None,
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn from_config(config: &StorageConfig) -> FeynmanResult<Self> {
        Self::open(Path::new(&config.db_path), config.busy_timeout_ms)
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub fn schema_version(&self) -> FeynmanResult<u32> {
        self.writer.with_conn_sync(migrations::current_version)
    }

    /// Whether the connection runs in WAL mode. In-memory databases never do.
    pub fn wal_enabled(&self) -> FeynmanResult<bool> {
        self.writer.with_conn_sync(pragmas::verify_wal_mode)
    }

    fn migrate(&self) -> FeynmanResult<()> {
        let applied = self.writer.with_conn_sync(migrations::run_migrations)?;
        tracing::debug!(applied, path = ?self.db_path, "storage: schema ready");
        Ok(())
    }
}

impl IKnowledgeStore for SqliteKnowledgeStore {
    fn save(&self, node: &NewKnowledgeNode) -> FeynmanResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let node = KnowledgeNode::from_new(id.clone(), node, Utc::now());
        self.writer
            .with_conn_sync(|conn| node_crud::insert_node(conn, &node))?;
        Ok(id)
    }

    fn get(&self, id: &str) -> FeynmanResult<Option<KnowledgeNode>> {
        self.writer.with_conn_sync(|conn| node_crud::get_node(conn, id))
    }

    fn list(&self, filter: &NodeFilter) -> FeynmanResult<Vec<KnowledgeNode>> {
        self.writer
            .with_conn_sync(|conn| node_crud::list_nodes(conn, filter))
    }

    fn delete(&self, id: &str) -> FeynmanResult<()> {
        self.writer
            .with_conn_sync(|conn| node_crud::delete_node(conn, id))
    }

    fn update_health(
        &self,
        id: &str,
        health: u8,
        touched_at: Option<DateTime<Utc>>,
    ) -> FeynmanResult<()> {
        self.writer
            .with_conn_sync(|conn| node_crud::update_health(conn, id, health, touched_at))
    }

    fn set_status(&self, id: &str, status: NodeStatus) -> FeynmanResult<()> {
        self.writer
            .with_conn_sync(|conn| node_crud::update_status(conn, id, status))
    }
}

impl std::fmt::Debug for SqliteKnowledgeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteKnowledgeStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}

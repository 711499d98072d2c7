//! v001: knowledge_nodes.

use rusqlite::Connection;

use feynman_core::errors::FeynmanResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> FeynmanResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS knowledge_nodes (
            id              TEXT PRIMARY KEY,
            concept         TEXT NOT NULL,
            explanation     TEXT NOT NULL DEFAULT '',
            counterexample  TEXT NOT NULL DEFAULT '',
            tags            TEXT NOT NULL DEFAULT '[]',
            health          INTEGER NOT NULL DEFAULT 100 CHECK (health BETWEEN 0 AND 100),
            status          TEXT NOT NULL DEFAULT 'active',
            created_at      TEXT NOT NULL,
            last_touched    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_nodes_status ON knowledge_nodes(status);
        CREATE INDEX IF NOT EXISTS idx_nodes_health ON knowledge_nodes(health);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

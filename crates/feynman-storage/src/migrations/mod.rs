//! Versioned schema migrations, applied in order at open time.

mod v001_knowledge_nodes;

use rusqlite::{params, Connection};

use feynman_core::errors::{FeynmanResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> FeynmanResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[(1, v001_knowledge_nodes::migrate)];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 1;

/// Highest applied version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> FeynmanResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every pending migration, each in its own transaction.
pub fn run_migrations(conn: &Connection) -> FeynmanResult<u32> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(format!("migration {version} begin: {e}")))?;

        let result = migrate(&*tx).and_then(|()| {
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![version],
            )
            .map_err(|e| to_storage_err(e.to_string()))
            .map(|_| ())
        });

        match result {
            Ok(()) => {
                tx.commit().map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
                applied += 1;
                tracing::info!(version = *version, "storage: migration applied");
            }
            Err(e) => {
                let _ = tx.rollback();
                return Err(StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                }
                .into());
            }
        }
    }
    Ok(applied)
}

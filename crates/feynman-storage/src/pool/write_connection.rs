//! Single connection behind `tokio::sync::Mutex`. Every store operation is
//! serialized through it.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use feynman_core::errors::FeynmanResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, busy_timeout_ms: u32) -> FeynmanResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> FeynmanResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, 0)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Blocking access. Must not be called from inside an async runtime.
    pub fn with_conn_sync<F, T>(&self, f: F) -> FeynmanResult<T>
    where
        F: FnOnce(&Connection) -> FeynmanResult<T>,
    {
        let guard = self.conn.blocking_lock();
        f(&guard)
    }
}

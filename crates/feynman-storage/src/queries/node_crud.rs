//! Insert, get, list, delete, and health/status updates for knowledge nodes.

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use feynman_core::errors::{FeynmanResult, StorageError};
use feynman_core::models::{KnowledgeNode, NodeFilter, NodeStatus};

use crate::to_storage_err;

const COLUMNS: &str = "id, concept, explanation, counterexample, tags, health, status, \
                       created_at, last_touched";

pub fn insert_node(conn: &Connection, node: &KnowledgeNode) -> FeynmanResult<()> {
    let tags_json =
        serde_json::to_string(&node.tags).map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        &format!("INSERT INTO knowledge_nodes ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
        params![
            node.id,
            node.concept,
            node.explanation,
            node.counterexample,
            tags_json,
            node.health,
            node.status.as_str(),
            node.created_at.to_rfc3339(),
            node.last_touched.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_node(conn: &Connection, id: &str) -> FeynmanResult<Option<KnowledgeNode>> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM knowledge_nodes WHERE id = ?1"),
            params![id],
            |row| Ok(row_to_node(row)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.transpose()
}

/// Status and health bounds are filtered in SQL, tags in memory.
pub fn list_nodes(conn: &Connection, filter: &NodeFilter) -> FeynmanResult<Vec<KnowledgeNode>> {
    let mut clauses = Vec::new();
    let mut values: Vec<String> = Vec::new();
    if let Some(status) = filter.status {
        values.push(status.as_str().to_string());
        clauses.push(format!("status = ?{}", values.len()));
    }
    if let Some(max) = filter.max_health {
        values.push(max.to_string());
        clauses.push(format!("health <= CAST(?{} AS INTEGER)", values.len()));
    }
    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM knowledge_nodes{where_clause} ORDER BY created_at, id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(values.iter()), |row| Ok(row_to_node(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut nodes = Vec::new();
    for row in rows {
        let node = row.map_err(|e| to_storage_err(e.to_string()))??;
        if filter.matches(&node) {
            nodes.push(node);
        }
    }
    Ok(nodes)
}

pub fn delete_node(conn: &Connection, id: &str) -> FeynmanResult<()> {
    conn.execute("DELETE FROM knowledge_nodes WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn update_health(
    conn: &Connection,
    id: &str,
    health: u8,
    touched_at: Option<DateTime<Utc>>,
) -> FeynmanResult<()> {
    let changed = conn
        .execute(
            "UPDATE knowledge_nodes
             SET health = ?2, last_touched = COALESCE(?3, last_touched)
             WHERE id = ?1",
            params![id, health, touched_at.map(|t| t.to_rfc3339())],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    ensure_found(changed, id)
}

pub fn update_status(conn: &Connection, id: &str, status: NodeStatus) -> FeynmanResult<()> {
    let changed = conn
        .execute(
            "UPDATE knowledge_nodes SET status = ?2 WHERE id = ?1",
            params![id, status.as_str()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    ensure_found(changed, id)
}

fn ensure_found(changed: usize, id: &str) -> FeynmanResult<()> {
    if changed == 0 {
        return Err(StorageError::NodeNotFound { id: id.to_string() }.into());
    }
    Ok(())
}

fn row_to_node(row: &Row<'_>) -> FeynmanResult<KnowledgeNode> {
    let get_str = |idx: usize| -> FeynmanResult<String> {
        row.get(idx).map_err(|e| to_storage_err(e.to_string()))
    };
    let parse_dt = |s: &str| -> FeynmanResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
    };

    let tags_json = get_str(4)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| to_storage_err(format!("parse tags: {e}")))?;
    let status_str = get_str(6)?;
    let status = NodeStatus::parse(&status_str)
        .ok_or_else(|| to_storage_err(format!("unknown node status '{status_str}'")))?;
    let health: u8 = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(KnowledgeNode {
        id: get_str(0)?,
        concept: get_str(1)?,
        explanation: get_str(2)?,
        counterexample: get_str(3)?,
        tags,
        health,
        status,
        created_at: parse_dt(&get_str(7)?)?,
        last_touched: parse_dt(&get_str(8)?)?,
    })
}

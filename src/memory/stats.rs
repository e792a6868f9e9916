use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

use crate::db::schema;
use crate::error::Result;

/// Response from `stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_memories: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_dim: Option<usize>,
    pub db_size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_memory: Option<String>,
}

/// Compute memory store statistics.
///
/// `db_path` is used for file size calculation; pass None for in-memory databases.
pub fn memory_stats(conn: &Connection, db_path: Option<&Path>) -> Result<StatsResponse> {
    let (total, oldest, newest): (i64, Option<String>, Option<String>) = conn.query_row(
        "SELECT COUNT(*), MIN(created_at), MAX(created_at) FROM memories",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    let db_size_bytes = db_path
        .and_then(|p| std::fs::metadata(p).ok())
        .map(|m| m.len())
        .unwrap_or(0);

    Ok(StatsResponse {
        total_memories: total as u64,
        embedding_model: schema::get_embedding_model(conn)?,
        embedding_dim: schema::get_embedding_dim(conn)?,
        db_size_bytes,
        oldest_memory: oldest,
        newest_memory: newest,
    })
}

//! Write path: insert and delete.
//!
//! [`insert_memory`] writes the row inside a transaction; the `memories_ai` trigger
//! mirrors it into FTS5 in the same transaction, so a reader never observes one
//! without the other.

use rusqlite::{params, Connection};

use super::types::Metadata;
use super::vector::embedding_to_bytes;
use crate::error::Result;

/// Result returned from a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMemory {
    /// UUID of the new memory.
    pub id: String,
    /// RFC 3339 timestamp assigned at write time.
    pub created_at: String,
}

/// Insert a new memory row with its embedding. Generates the id and timestamp.
///
/// All writes run inside one transaction; on any failure nothing is persisted.
pub fn insert_memory(
    conn: &mut Connection,
    content: &str,
    metadata: &Metadata,
    embedding: &[f32],
) -> Result<StoredMemory> {
    let id = uuid::Uuid::now_v7().to_string();
    let created_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true);
    let metadata_json = serde_json::to_string(metadata)?;

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO memories (id, content, metadata, embedding, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            id,
            content,
            metadata_json,
            embedding_to_bytes(embedding),
            created_at
        ],
    )?;
    tx.commit()?;

    Ok(StoredMemory { id, created_at })
}

/// Permanently remove a memory. The `memories_ad` trigger drops the FTS row in the
/// same transaction. Returns `false` when no row had that id.
pub fn delete_memory(conn: &mut Connection, memory_id: &str) -> Result<bool> {
    let tx = conn.transaction()?;
    let rows = tx.execute("DELETE FROM memories WHERE id = ?1", params![memory_id])?;
    tx.commit()?;
    Ok(rows > 0)
}

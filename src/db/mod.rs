//! SQLite storage: open/create, schema, and the embedding-space bookkeeping in
//! `schema_meta`.

pub mod schema;

use rusqlite::Connection;
use std::path::Path;

use crate::error::{MemoryError, Result};

/// The embedding space a database is bound to: every stored vector has `dimensions`
/// elements produced by `model`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingSpace {
    pub model: String,
    pub dimensions: usize,
}

/// Open (or create) the database at the given path with schema initialized and the
/// embedding space checked.
pub fn open_database(path: impl AsRef<Path>, space: &EmbeddingSpace) -> Result<Connection> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(MemoryError::configuration("database path must not be empty"));
    }

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            MemoryError::configuration(format!(
                "failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let conn = Connection::open(path)?;

    // WAL lets readers proceed while a write transaction is open
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;

    prepare(&conn, space)?;
    tracing::info!(path = %path.display(), "database initialized");
    Ok(conn)
}

/// Open an in-memory database with schema initialized.
pub fn open_in_memory(space: &EmbeddingSpace) -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    prepare(&conn, space)?;
    Ok(conn)
}

fn prepare(conn: &Connection, space: &EmbeddingSpace) -> Result<()> {
    schema::init_schema(conn)?;
    bind_embedding_space(conn, space)
}

/// Record the embedding space on first open; on later opens refuse a different
/// dimension and warn about a different model.
fn bind_embedding_space(conn: &Connection, space: &EmbeddingSpace) -> Result<()> {
    match schema::get_embedding_dim(conn)? {
        Some(stored) if stored != space.dimensions => {
            return Err(MemoryError::configuration(format!(
                "database stores {stored}-dimensional embeddings but the provider produces {}",
                space.dimensions
            )));
        }
        Some(_) => {}
        None => schema::set_meta(conn, "embedding_dim", &space.dimensions.to_string())?,
    }

    match schema::get_embedding_model(conn)? {
        Some(stored) if stored != space.model => {
            tracing::warn!(
                stored = %stored,
                configured = %space.model,
                "embedding model changed; similarity against existing vectors is unreliable"
            );
        }
        Some(_) => {}
        None => schema::set_meta(conn, "embedding_model", &space.model)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(dimensions: usize) -> EmbeddingSpace {
        EmbeddingSpace {
            model: "test-model".into(),
            dimensions,
        }
    }

    #[test]
    fn open_creates_nested_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let db_path = tmp.path().join("nested").join("memory.db");
        let conn = open_database(&db_path, &space(8)).unwrap();
        assert!(db_path.exists());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM memories", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);

        let timeout: i64 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 5000);
    }

    #[test]
    fn reopen_with_other_dimension_is_configuration_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let db_path = tmp.path().join("memory.db");
        drop(open_database(&db_path, &space(8)).unwrap());

        let err = open_database(&db_path, &space(16)).unwrap_err();
        assert!(matches!(err, MemoryError::Configuration(_)));
        assert!(open_database(&db_path, &space(8)).is_ok());
    }

    #[test]
    fn empty_path_is_configuration_error() {
        let err = open_database("", &space(8)).unwrap_err();
        assert!(matches!(err, MemoryError::Configuration(_)));
    }

    #[test]
    fn in_memory_records_space() {
        let conn = open_in_memory(&space(4)).unwrap();
        assert_eq!(schema::get_embedding_dim(&conn).unwrap(), Some(4));
        assert_eq!(
            schema::get_embedding_model(&conn).unwrap().as_deref(),
            Some("test-model")
        );
    }
}

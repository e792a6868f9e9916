use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;

use super::fusion::rrf_merge;
use super::types::{MemoryEntry, Metadata};
use super::vector::{embedding_from_bytes, exhaustive_search};
use crate::error::Result;

/// Hybrid search knobs.
#[derive(Debug, Clone, Copy)]
pub struct HybridConfig {
    /// RRF constant `k`.
    pub rrf_k: usize,
    /// Depth of each input list before fusion.
    pub candidates: usize,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            rrf_k: super::fusion::DEFAULT_RRF_K,
            candidates: 30,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// FTS5 BM25 keyword search. `score` is the negated `bm25()` value, so larger is better.
pub fn lexical_search(conn: &Connection, query_text: &str, limit: usize) -> Result<Vec<MemoryEntry>> {
    let ranked = fts_search(conn, query_text, limit)?;
    hydrate_ranked(conn, &ranked)
}

/// Exhaustive cosine-similarity search over every stored embedding.
pub fn vector_search(
    conn: &Connection,
    query_embedding: &[f32],
    limit: usize,
) -> Result<Vec<MemoryEntry>> {
    let ranked = vector_rank(conn, query_embedding, limit)?;
    let ranked: Vec<(String, f64)> = ranked
        .into_iter()
        .map(|(id, sim)| (id, f64::from(sim)))
        .collect();
    hydrate_ranked(conn, &ranked)
}

/// Hybrid search: FTS5 BM25 + exhaustive vector → RRF merge → hydrate.
pub fn hybrid_search(
    conn: &Connection,
    query_text: &str,
    query_embedding: &[f32],
    config: &HybridConfig,
    limit: usize,
) -> Result<Vec<MemoryEntry>> {
    // 1. FTS5 BM25 search
    let fts_ids: Vec<String> = fts_search(conn, query_text, config.candidates)?
        .into_iter()
        .map(|(id, _)| id)
        .collect();

    // 2. Vector search
    let vec_ids: Vec<String> = vector_rank(conn, query_embedding, config.candidates)?
        .into_iter()
        .map(|(id, _)| id)
        .collect();

    tracing::debug!(
        lexical = fts_ids.len(),
        vector = vec_ids.len(),
        "hybrid candidates"
    );

    // 3. RRF merge
    let merged = rrf_merge(&[&fts_ids[..], &vec_ids[..]], config.rrf_k, limit);

    // 4. Hydrate
    hydrate_ranked(conn, &merged)
}

/// Top-1 vector neighbour as `(id, similarity)`, or `None` on an empty corpus.
pub fn nearest_neighbor(conn: &Connection, query_embedding: &[f32]) -> Result<Option<(String, f32)>> {
    Ok(vector_rank(conn, query_embedding, 1)?.into_iter().next())
}

/// Primary-key lookup.
pub fn get_memory(conn: &Connection, memory_id: &str) -> Result<Option<MemoryEntry>> {
    let entry = conn
        .query_row(
            "SELECT id, content, metadata, created_at FROM memories WHERE id = ?1",
            params![memory_id],
            memory_from_row,
        )
        .optional()?;
    Ok(entry)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// FTS5 BM25 keyword search.
///
/// Returns (id, score) pairs best first. FTS5 rank is negative (more negative =
/// better), so we negate it for consistent ordering.
fn fts_search(conn: &Connection, query_text: &str, limit: usize) -> Result<Vec<(String, f64)>> {
    // Escape the query for FTS5: wrap each word in double quotes to avoid syntax errors
    let escaped = escape_fts_query(query_text);
    if escaped.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(
        "SELECT id, rank FROM memories_fts \
         WHERE memories_fts MATCH ?1 ORDER BY rank LIMIT ?2",
    )?;
    let results = stmt
        .query_map(params![escaped, limit as i64], |row| {
            Ok((row.get::<_, String>(0)?, -row.get::<_, f64>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(results)
}

/// Score every stored embedding against the query, in insertion order.
fn vector_rank(conn: &Connection, query_embedding: &[f32], limit: usize) -> Result<Vec<(String, f32)>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare("SELECT id, embedding FROM memories ORDER BY rowid")?;
    let rows: Vec<(String, Option<Vec<f32>>)> = stmt
        .query_map([], |row| {
            let blob: Option<Vec<u8>> = row.get(1)?;
            Ok((
                row.get::<_, String>(0)?,
                blob.as_deref().and_then(embedding_from_bytes),
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let candidates = rows.iter().map(|(id, emb)| (id.as_str(), emb.as_deref()));
    Ok(exhaustive_search(query_embedding, candidates, limit))
}

/// Escape a user query for FTS5 MATCH syntax.
///
/// Splits into the same alphanumeric runs the FTS5 tokenizer indexes, quotes each,
/// and joins with spaces (implicit AND). An apostrophe ends its word, so
/// possessives and contractions match on their stem.
fn escape_fts_query(query: &str) -> String {
    query
        .split_whitespace()
        .filter_map(|word| word.split(['\'', '\u{2019}']).next())
        .flat_map(|stem| stem.split(|c: char| !c.is_alphanumeric()))
        .filter(|term| !term.is_empty())
        .map(|term| format!("\"{term}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fetch full records for ranked ids and attach scores, preserving rank order.
fn hydrate_ranked(conn: &Connection, ranked: &[(String, f64)]) -> Result<Vec<MemoryEntry>> {
    let ids: Vec<&str> = ranked.iter().map(|(id, _)| id.as_str()).collect();
    let mut memories = fetch_memories(conn, &ids)?;

    Ok(ranked
        .iter()
        .filter_map(|(id, score)| memories.remove(id.as_str()).map(|m| m.with_score(*score)))
        .collect())
}

/// Batch-fetch memory records by IDs.
fn fetch_memories(conn: &Connection, ids: &[&str]) -> Result<HashMap<String, MemoryEntry>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    // Build a parameterized IN clause
    let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "SELECT id, content, metadata, created_at FROM memories WHERE id IN ({})",
        placeholders.join(", ")
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(ids.iter()), memory_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows.into_iter().map(|m| (m.id.clone(), m)).collect())
}

/// Map `id, content, metadata, created_at` into a [`MemoryEntry`] without a score.
fn memory_from_row(row: &Row<'_>) -> rusqlite::Result<MemoryEntry> {
    let metadata_str: String = row.get(2)?;
    let metadata: Metadata = serde_json::from_str(&metadata_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(MemoryEntry {
        id: row.get(0)?,
        content: row.get(1)?,
        metadata,
        created_at: row.get(3)?,
        score: None,
    })
}

//! [`MemoryStore`], the async surface of the crate.
//!
//! Owns the SQLite connection and a shared embedding provider. Embedding inference
//! and database work run on the blocking pool (`spawn_blocking`), so callers on the
//! async runtime are never stalled by model inference or disk I/O.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

use crate::config::{FastMemoryConfig, RetrievalConfig};
use crate::db::{self, EmbeddingSpace};
use crate::embedding::{self, validate_embedding, EmbeddingProvider};
use crate::error::{MemoryError, Result};
use crate::gate::prototypes::PrototypeSet;
use crate::gate::{GateConfig, GateDecision, MemoryGate};
use crate::memory::search;
use crate::memory::stats::{self, StatsResponse};
use crate::memory::store;
use crate::memory::types::{MemoryEntry, Metadata, SearchMode};

/// Persistent agent memory: add, search, stats, and the memorability gate.
///
/// Cloning is cheap and every clone shares the same connection, provider, and
/// prototype set.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    /// `None` once the store is closed.
    db: Mutex<Option<Connection>>,
    embedding: Arc<dyn EmbeddingProvider>,
    db_path: Option<PathBuf>,
    retrieval: RetrievalConfig,
    prototypes: OnceCell<Arc<PrototypeSet>>,
}

impl MemoryStore {
    /// Open (or create) a store at `path` backed by `embedding`.
    pub fn open(
        path: impl AsRef<Path>,
        embedding: Arc<dyn EmbeddingProvider>,
        retrieval: RetrievalConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        let conn = db::open_database(path, &space_of(embedding.as_ref()))?;
        Ok(Self::from_parts(conn, embedding, Some(path.to_path_buf()), retrieval))
    }

    /// A store backed by an in-memory database, gone when the last clone drops.
    pub fn open_in_memory(
        embedding: Arc<dyn EmbeddingProvider>,
        retrieval: RetrievalConfig,
    ) -> Result<Self> {
        let conn = db::open_in_memory(&space_of(embedding.as_ref()))?;
        Ok(Self::from_parts(conn, embedding, None, retrieval))
    }

    /// Build the embedding provider from config, then open the configured database.
    pub async fn from_config(config: &FastMemoryConfig) -> Result<Self> {
        config.validate()?;
        let embedding_config = config.embedding.clone();
        let provider = tokio::task::spawn_blocking(move || embedding::create_provider(&embedding_config))
            .await
            .map_err(|e| MemoryError::embedding(format!("provider initialization failed: {e}")))??;
        let provider: Arc<dyn EmbeddingProvider> = Arc::from(provider);
        tracing::info!(model = provider.model_id(), "embedding provider ready");

        Self::open(config.resolved_db_path(), provider, config.retrieval.clone())
    }

    fn from_parts(
        conn: Connection,
        embedding: Arc<dyn EmbeddingProvider>,
        db_path: Option<PathBuf>,
        retrieval: RetrievalConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                db: Mutex::new(Some(conn)),
                embedding,
                db_path,
                retrieval,
                prototypes: OnceCell::new(),
            }),
        }
    }

    /// Embed `content` and persist it. Returns the new memory's id.
    pub async fn add(&self, content: &str, metadata: Metadata) -> Result<String> {
        self.ensure_open()?;
        let embedding = self.embed(content).await?;
        self.insert(content, metadata, embedding).await
    }

    /// Run `gate` on `content` and store it only if accepted.
    pub async fn add_if_memorable(
        &self,
        content: &str,
        metadata: Metadata,
        gate: &MemoryGate,
    ) -> Result<Option<String>> {
        let (_, id) = self.add_gated(content, metadata, gate).await?;
        Ok(id)
    }

    /// [`add_if_memorable`](Self::add_if_memorable) that also returns the gate's
    /// decision. Accepted content is stored with the embedding the gate computed.
    pub async fn add_gated(
        &self,
        content: &str,
        metadata: Metadata,
        gate: &MemoryGate,
    ) -> Result<(GateDecision, Option<String>)> {
        self.ensure_open()?;
        let assessment = gate.assess(content).await?;
        if !assessment.decision.is_accept() {
            tracing::info!(decision = assessment.decision.label(), "memory skipped by gate");
            return Ok((assessment.decision, None));
        }

        let embedding = match assessment.embedding {
            Some(embedding) => {
                validate_embedding(&embedding, self.dimensions())?;
                embedding
            }
            None => self.embed(content).await?,
        };
        let id = self.insert(content, metadata, embedding).await?;
        Ok((assessment.decision, Some(id)))
    }

    async fn insert(&self, content: &str, metadata: Metadata, embedding: Vec<f32>) -> Result<String> {
        let content_owned = content.to_string();
        let stored = self
            .with_conn(move |conn| store::insert_memory(conn, &content_owned, &metadata, &embedding))
            .await?;

        tracing::info!(id = %stored.id, content_len = content.len(), "memory stored");
        Ok(stored.id)
    }

    /// Primary-key lookup.
    pub async fn get(&self, id: &str) -> Result<Option<MemoryEntry>> {
        let id = id.to_string();
        self.with_conn(move |conn| search::get_memory(conn, &id)).await
    }

    /// Permanently remove a memory and its lexical index entry.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let id_owned = id.to_string();
        let removed = self
            .with_conn(move |conn| store::delete_memory(conn, &id_owned))
            .await?;
        tracing::info!(id = %id, removed, "memory delete");
        Ok(removed)
    }

    /// BM25 keyword search.
    pub async fn search_lexical(&self, query: &str, limit: usize) -> Result<Vec<MemoryEntry>> {
        let query = query.to_string();
        let results = self
            .with_conn(move |conn| search::lexical_search(conn, &query, limit))
            .await?;
        tracing::debug!(mode = "lexical", results = results.len(), "search complete");
        Ok(results)
    }

    /// Cosine-similarity search over every stored embedding.
    pub async fn search_vector(&self, query: &str, limit: usize) -> Result<Vec<MemoryEntry>> {
        self.ensure_open()?;
        let query_embedding = self.embed(query).await?;
        let results = self
            .with_conn(move |conn| search::vector_search(conn, &query_embedding, limit))
            .await?;
        tracing::debug!(mode = "vector", results = results.len(), "search complete");
        Ok(results)
    }

    /// Lexical and vector lists fused with Reciprocal Rank Fusion.
    pub async fn search_hybrid(&self, query: &str, limit: usize) -> Result<Vec<MemoryEntry>> {
        self.ensure_open()?;
        let query_embedding = self.embed(query).await?;
        let query = query.to_string();
        let config = self.inner.retrieval.hybrid();
        let results = self
            .with_conn(move |conn| search::hybrid_search(conn, &query, &query_embedding, &config, limit))
            .await?;
        tracing::debug!(mode = "hybrid", results = results.len(), "search complete");
        Ok(results)
    }

    /// Dispatch on `mode`.
    pub async fn search(&self, query: &str, mode: SearchMode, limit: usize) -> Result<Vec<MemoryEntry>> {
        match mode {
            SearchMode::Lexical => self.search_lexical(query, limit).await,
            SearchMode::Vector => self.search_vector(query, limit).await,
            SearchMode::Hybrid => self.search_hybrid(query, limit).await,
        }
    }

    pub async fn stats(&self) -> Result<StatsResponse> {
        let db_path = self.inner.db_path.clone();
        self.with_conn(move |conn| stats::memory_stats(conn, db_path.as_deref()))
            .await
    }

    /// Release the database. Later operations on any clone fail with
    /// [`MemoryError::Closed`]; closing twice is a no-op.
    pub async fn close(&self) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let conn = inner
                .db
                .lock()
                .map_err(|e| MemoryError::storage(format!("db lock poisoned: {e}")))?
                .take();
            match conn {
                Some(conn) => conn.close().map_err(|(_, e)| MemoryError::from(e)),
                None => Ok(()),
            }
        })
        .await
        .map_err(|e| MemoryError::storage(format!("close task failed: {e}")))??;
        tracing::info!("memory store closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.inner.db.lock().map(|db| db.is_none()).unwrap_or(true)
    }

    /// Build a memorability gate with the given thresholds.
    ///
    /// The first call embeds the prototype phrases; every later call (including
    /// concurrent ones) reuses that set. Gates with equal configs behave identically.
    pub async fn gate(&self, config: GateConfig) -> Result<MemoryGate> {
        config.validate()?;
        self.ensure_open()?;
        let prototypes = self
            .inner
            .prototypes
            .get_or_try_init(|| async {
                let provider = Arc::clone(&self.inner.embedding);
                let set = tokio::task::spawn_blocking(move || PrototypeSet::build(provider.as_ref()))
                    .await
                    .map_err(|e| MemoryError::embedding(format!("prototype build failed: {e}")))??;
                Ok::<_, MemoryError>(Arc::new(set))
            })
            .await?;
        Ok(MemoryGate::new(config, Arc::clone(prototypes), self.clone()))
    }

    /// Embedding dimension shared by every stored vector.
    pub fn dimensions(&self) -> usize {
        self.inner.embedding.dimensions()
    }

    /// Embed text on the blocking pool and validate the result.
    pub(crate) async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let provider = Arc::clone(&self.inner.embedding);
        let text = text.to_string();
        let embedding = tokio::task::spawn_blocking(move || provider.embed(&text))
            .await
            .map_err(|e| MemoryError::embedding(format!("embedding task failed: {e}")))??;
        validate_embedding(&embedding, self.dimensions())?;
        Ok(embedding)
    }

    /// Top-1 neighbour of an embedding in the current corpus.
    pub(crate) async fn nearest_neighbor(&self, embedding: Vec<f32>) -> Result<Option<(String, f32)>> {
        self.with_conn(move |conn| search::nearest_neighbor(conn, &embedding))
            .await
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(MemoryError::Closed)
        } else {
            Ok(())
        }
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut guard = inner
                .db
                .lock()
                .map_err(|e| MemoryError::storage(format!("db lock poisoned: {e}")))?;
            let conn = guard.as_mut().ok_or(MemoryError::Closed)?;
            f(conn)
        })
        .await
        .map_err(|e| MemoryError::storage(format!("storage task failed: {e}")))?
    }
}

fn space_of(provider: &dyn EmbeddingProvider) -> EmbeddingSpace {
    EmbeddingSpace {
        model: provider.model_id().to_string(),
        dimensions: provider.dimensions(),
    }
}

mod helpers;

use std::sync::Arc;

use fastmemory::config::RetrievalConfig;
use fastmemory::{GateConfig, MemoryError, MemoryStore, Metadata, SearchMode};
use helpers::{memory_store, metadata, FailingEmbedding, FakeEmbedding};

#[tokio::test]
async fn add_then_lexical_search_returns_content_and_metadata() {
    let (store, _) = memory_store(FakeEmbedding::new());
    let meta = metadata(&[("source", "chat"), ("topic", "sqlite")]);

    let id = store
        .add("Key lesson: use WAL mode on SQLite for this agent", meta.clone())
        .await
        .unwrap();

    let results = store.search_lexical("WAL", 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, id);
    assert_eq!(results[0].content, "Key lesson: use WAL mode on SQLite for this agent");
    assert_eq!(results[0].metadata, meta);
    assert!(results[0].score.unwrap() > 0.0);
}

#[tokio::test]
async fn ids_are_unique_and_created_at_is_rfc3339() {
    let (store, _) = memory_store(FakeEmbedding::new());
    let a = store.add("the same content twice", Metadata::new()).await.unwrap();
    let b = store.add("the same content twice", Metadata::new()).await.unwrap();
    assert_ne!(a, b);

    let entry = store.get(&a).await.unwrap().expect("stored entry");
    assert!(chrono::DateTime::parse_from_rfc3339(&entry.created_at).is_ok());
    assert!(entry.score.is_none());
}

#[tokio::test]
async fn get_and_delete() {
    let (store, _) = memory_store(FakeEmbedding::new());
    let id = store.add("User prefers tabs over spaces", Metadata::new()).await.unwrap();

    assert!(store.get(&id).await.unwrap().is_some());
    assert!(store.delete(&id).await.unwrap());
    assert!(store.get(&id).await.unwrap().is_none());
    assert!(!store.delete(&id).await.unwrap(), "second delete finds nothing");

    // Lexical index follows the delete
    assert!(store.search_lexical("tabs", 10).await.unwrap().is_empty());
    assert!(store.get("no-such-id").await.unwrap().is_none());
}

#[tokio::test]
async fn stats_track_corpus() {
    let (store, _) = memory_store(FakeEmbedding::new());

    let empty = store.stats().await.unwrap();
    assert_eq!(empty.total_memories, 0);
    assert_eq!(empty.embedding_model.as_deref(), Some("fake-embedding"));
    assert_eq!(empty.embedding_dim, Some(helpers::DIMS));
    assert!(empty.oldest_memory.is_none());

    store.add("first memory in the store", Metadata::new()).await.unwrap();
    store.add("second memory in the store", Metadata::new()).await.unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_memories, 2);
    assert!(stats.oldest_memory.is_some());
    assert!(stats.oldest_memory <= stats.newest_memory);
}

#[tokio::test]
async fn operations_after_close_fail_with_closed() {
    let (store, _) = memory_store(FakeEmbedding::new());
    store.add("something to remember later", Metadata::new()).await.unwrap();
    let clone = store.clone();

    store.close().await.unwrap();
    assert!(store.is_closed());
    assert!(clone.is_closed(), "clones share the connection");

    assert!(matches!(
        store.add("after close", Metadata::new()).await,
        Err(MemoryError::Closed)
    ));
    for mode in [SearchMode::Lexical, SearchMode::Vector, SearchMode::Hybrid] {
        assert!(matches!(
            clone.search("remember", mode, 5).await,
            Err(MemoryError::Closed)
        ));
    }
    assert!(matches!(store.stats().await, Err(MemoryError::Closed)));
    assert!(matches!(store.get("x").await, Err(MemoryError::Closed)));

    // Closing again is a no-op
    store.close().await.unwrap();
}

#[tokio::test]
async fn memories_persist_across_reopen() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db_path = tmp.path().join("memory.db");

    let id = {
        let store = MemoryStore::open(
            &db_path,
            Arc::new(FakeEmbedding::new()),
            RetrievalConfig::default(),
        )
        .unwrap();
        let id = store
            .add("User's birthday is June 15th, remind them", Metadata::new())
            .await
            .unwrap();
        store.close().await.unwrap();
        id
    };

    let store = MemoryStore::open(
        &db_path,
        Arc::new(FakeEmbedding::new()),
        RetrievalConfig::default(),
    )
    .unwrap();
    let results = store.search_lexical("birthday", 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, id);
    assert!(store.stats().await.unwrap().db_size_bytes > 0);
}

#[tokio::test]
async fn reopen_with_other_dimension_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db_path = tmp.path().join("memory.db");

    let store = MemoryStore::open(
        &db_path,
        Arc::new(FakeEmbedding::with_dims(16)),
        RetrievalConfig::default(),
    )
    .unwrap();
    store.close().await.unwrap();

    let result = MemoryStore::open(
        &db_path,
        Arc::new(FakeEmbedding::with_dims(24)),
        RetrievalConfig::default(),
    );
    assert!(matches!(result, Err(MemoryError::Configuration(_))));
}

#[tokio::test]
async fn concurrent_adds_all_land() {
    let (store, _) = memory_store(FakeEmbedding::new());

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .add(&format!("concurrent memory number {i}"), Metadata::new())
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.stats().await.unwrap().total_memories, 16);
    assert_eq!(store.search_lexical("concurrent", 50).await.unwrap().len(), 16);
}

#[tokio::test]
async fn embedding_failures_surface_as_errors_and_store_nothing() {
    let store = MemoryStore::open_in_memory(Arc::new(FailingEmbedding), RetrievalConfig::default()).unwrap();

    // Wrong-length vector
    assert!(matches!(
        store.add("a perfectly ordinary memory", Metadata::new()).await,
        Err(MemoryError::Embedding(_))
    ));
    // Provider error on the query
    assert!(matches!(
        store.search_hybrid("failing query", 5).await,
        Err(MemoryError::Embedding(_))
    ));
    assert!(matches!(
        store.search_vector("failing query", 5).await,
        Err(MemoryError::Embedding(_))
    ));
    // Prototype build hits the same malformed vectors
    assert!(matches!(
        store.gate(GateConfig::default()).await,
        Err(MemoryError::Embedding(_))
    ));

    assert_eq!(store.stats().await.unwrap().total_memories, 0);
    assert!(store.search_lexical("memory", 5).await.unwrap().is_empty());
}

//! Gate and search behavior against the real ONNX model.
//!
//! Requires model files: run `fastmemory model download`, then
//! `cargo test -- --ignored`.

use std::sync::Arc;

use fastmemory::config::{EmbeddingConfig, RetrievalConfig};
use fastmemory::embedding::{self, EmbeddingProvider};
use fastmemory::{GateConfig, GateDecision, MemoryStore, Metadata};

fn real_store() -> MemoryStore {
    let provider = embedding::create_provider(&EmbeddingConfig::default()).unwrap();
    let provider: Arc<dyn EmbeddingProvider> = Arc::from(provider);
    MemoryStore::open_in_memory(provider, RetrievalConfig::default()).unwrap()
}

#[tokio::test]
#[ignore]
async fn personal_fact_passes_and_chatter_fails() {
    let store = real_store();
    let gate = store.gate(GateConfig::default()).await.unwrap();

    assert!(gate
        .should_create("User is allergic to nuts, remember for all food orders")
        .await
        .unwrap());
    assert!(matches!(
        gate.evaluate("LOL that joke was hilarious").await.unwrap(),
        GateDecision::NotImportant { .. }
    ));
}

#[tokio::test]
#[ignore]
async fn popups_preference_near_duplicate() {
    let store = real_store();
    let gate = store.gate(GateConfig::default()).await.unwrap();

    let existing = store
        .add("User hates popups and modals forever", Metadata::new())
        .await
        .unwrap();

    let content = "User explicitly hates modal popups and prefers dark mode always";
    let nearest = store.search_vector(content, 1).await.unwrap();
    assert_eq!(nearest[0].id, existing);
    let similarity = nearest[0].score.unwrap() as f32;

    let decision = gate.evaluate(content).await.unwrap();
    if similarity >= GateConfig::default().novelty_threshold {
        match decision {
            GateDecision::Duplicate { id, similarity: reported } => {
                assert_eq!(id, existing);
                assert!((reported - similarity).abs() < 1e-5);
            }
            other => panic!("similarity {similarity} should be a duplicate, got {other:?}"),
        }
    } else {
        assert!(
            matches!(decision, GateDecision::Accept { .. }),
            "similarity {similarity} is novel, got {decision:?}"
        );
    }
}

#[tokio::test]
#[ignore]
async fn hybrid_finds_literal_and_semantic_security_matches() {
    let store = real_store();
    let literal = store
        .add("Rotate the security tokens monthly", Metadata::new())
        .await
        .unwrap();
    let semantic = store
        .add("Never share the API key sk-abc12345 with anyone", Metadata::new())
        .await
        .unwrap();
    store
        .add("Pizza sounds good for lunch", Metadata::new())
        .await
        .unwrap();

    let results = store.search_hybrid("security", 3).await.unwrap();
    let ids: Vec<&str> = results.iter().map(|e| e.id.as_str()).collect();
    assert!(ids.contains(&literal.as_str()));
    assert!(ids.contains(&semantic.as_str()));
}

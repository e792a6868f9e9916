#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fastmemory::config::RetrievalConfig;
use fastmemory::embedding::EmbeddingProvider;
use fastmemory::gate::prototypes::{NEGATIVE_PROTOTYPES, POSITIVE_PROTOTYPES};
use fastmemory::{MemoryError, MemoryStore, Metadata, Result};

pub const DIMS: usize = 32;

/// Axis every positive prototype phrase embeds onto.
pub const DURABLE_AXIS: usize = 0;
/// Axis every negative prototype phrase embeds onto.
pub const CHATTER_AXIS: usize = 1;

/// Deterministic embedding provider for tests.
///
/// Prototype phrases are pinned to two reserved axes so gate outcomes are easy to
/// steer. Other text is bag-of-words hashed onto the remaining axes, so texts that
/// share words are similar. Individual texts can be pinned with [`Self::with`].
pub struct FakeEmbedding {
    dims: usize,
    pinned: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl FakeEmbedding {
    pub fn new() -> Self {
        Self::with_dims(DIMS)
    }

    pub fn with_dims(dims: usize) -> Self {
        let mut pinned = HashMap::new();
        for phrase in POSITIVE_PROTOTYPES {
            pinned.insert(phrase.to_string(), axis(dims, DURABLE_AXIS));
        }
        for phrase in NEGATIVE_PROTOTYPES {
            pinned.insert(phrase.to_string(), axis(dims, CHATTER_AXIS));
        }
        Self {
            dims,
            pinned,
            calls: AtomicUsize::new(0),
        }
    }

    /// Pin `text` to an exact vector.
    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        assert_eq!(vector.len(), self.dims);
        self.pinned.insert(text.to_string(), vector);
        self
    }

    /// Number of texts embedded so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn bag_of_words(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dims];
        let buckets = self.dims - 2;
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            let hash = word
                .bytes()
                .fold(0xcbf2_9ce4_8422_2325u64, |h, b| (h ^ u64::from(b)).wrapping_mul(0x100_0000_01b3));
            v[2 + (hash % buckets as u64) as usize] += 1.0;
        }
        v
    }
}

impl EmbeddingProvider for FakeEmbedding {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .pinned
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.bag_of_words(text)))
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn model_id(&self) -> &str {
        "fake-embedding"
    }
}

/// Provider that misbehaves: it declares 4 dimensions but returns 3, and fails
/// outright on text starting with "fail".
pub struct FailingEmbedding;

impl EmbeddingProvider for FailingEmbedding {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.starts_with("fail") {
            return Err(MemoryError::embedding("inference failed"));
        }
        Ok(vec![1.0, 0.0, 0.0])
    }

    fn dimensions(&self) -> usize {
        4
    }

    fn model_id(&self) -> &str {
        "failing-embedding"
    }
}

/// Unit vector along `index`.
pub fn axis(dims: usize, index: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; dims];
    v[index] = 1.0;
    v
}

/// Vector with the given `(axis, weight)` components.
pub fn blend(dims: usize, parts: &[(usize, f32)]) -> Vec<f32> {
    let mut v = vec![0.0f32; dims];
    for &(i, w) in parts {
        v[i] += w;
    }
    v
}

/// In-memory store backed by `provider`.
pub fn memory_store(provider: FakeEmbedding) -> (MemoryStore, Arc<FakeEmbedding>) {
    let provider = Arc::new(provider);
    let store = MemoryStore::open_in_memory(provider.clone(), RetrievalConfig::default()).unwrap();
    (store, provider)
}

pub fn metadata(pairs: &[(&str, &str)]) -> Metadata {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect()
}

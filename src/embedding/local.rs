//! Local ONNX Runtime embedding provider.
//!
//! Implements [`EmbeddingProvider`] for sentence-transformers ONNX exports
//! (all-MiniLM-L6-v2 by default) via `ort`. Handles tokenization, inference, mean
//! pooling, and L2 normalization.

use std::fmt::Display;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;

use super::EmbeddingProvider;
use crate::config::EmbeddingConfig;
use crate::error::{MemoryError, Result};

/// Maximum sequence length fed to the model (all-MiniLM-L6-v2 was trained at 256).
const MAX_SEQ_LEN: usize = 256;

/// Local ONNX-based embedding provider.
pub struct LocalEmbeddingProvider {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    model: String,
    dimensions: usize,
}

// Safety: Tokenizer is Send+Sync. Session is behind a Mutex.
// The Mutex guarantees exclusive access during run().
unsafe impl Send for LocalEmbeddingProvider {}
unsafe impl Sync for LocalEmbeddingProvider {}

fn embed_err<E: Display>(context: &str) -> impl Fn(E) -> MemoryError + '_ {
    move |e| MemoryError::embedding(format!("{context}: {e}"))
}

fn tokenizer_err(context: &str, e: impl Display) -> MemoryError {
    MemoryError::embedding(format!("{context}: {e}"))
}

impl LocalEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let cache_dir = crate::config::expand_tilde(&config.cache_dir);
        let model_path = cache_dir.join("model.onnx");
        let tokenizer_path = cache_dir.join("tokenizer.json");

        if !model_path.exists() {
            return Err(MemoryError::configuration(format!(
                "ONNX model not found at {}. Run `fastmemory model download` first.",
                model_path.display()
            )));
        }
        if !tokenizer_path.exists() {
            return Err(MemoryError::configuration(format!(
                "Tokenizer not found at {}. Run `fastmemory model download` first.",
                tokenizer_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(embed_err("failed to create session builder"))?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)
            .map_err(embed_err("failed to set optimization level"))?
            .with_intra_threads(4)
            .map_err(embed_err("failed to set intra threads"))?
            .commit_from_file(&model_path)
            .map_err(embed_err("failed to load ONNX model"))?;

        tracing::info!(model = %model_path.display(), "ONNX model loaded");

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| tokenizer_err("failed to load tokenizer", e))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(|e| tokenizer_err("failed to set truncation", e))?;

        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            strategy: tokenizers::PaddingStrategy::BatchLongest,
            ..Default::default()
        }));

        tracing::info!(tokenizer = %tokenizer_path.display(), "tokenizer loaded");

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }
}

impl EmbeddingProvider for LocalEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| MemoryError::embedding("model returned an empty batch"))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        // Step 1: Tokenize
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| tokenizer_err("tokenization failed", e))?;

        let batch_size = encodings.len();
        let seq_len = encodings[0].get_ids().len();

        // Step 2: Build flat input tensors as i64
        let mut input_ids_flat = Vec::with_capacity(batch_size * seq_len);
        let mut attention_mask_flat = Vec::with_capacity(batch_size * seq_len);

        for encoding in &encodings {
            input_ids_flat.extend(encoding.get_ids().iter().map(|&id| id as i64));
            attention_mask_flat.extend(encoding.get_attention_mask().iter().map(|&m| m as i64));
        }

        let shape = vec![batch_size as i64, seq_len as i64];
        let input_ids_tensor = Tensor::from_array((shape.clone(), input_ids_flat.into_boxed_slice()))
            .map_err(embed_err("failed to build input_ids tensor"))?;
        let attention_mask_tensor =
            Tensor::from_array((shape.clone(), attention_mask_flat.clone().into_boxed_slice()))
                .map_err(embed_err("failed to build attention_mask tensor"))?;
        // token_type_ids: all zeros (single sentence, no segment B)
        let token_type_ids = vec![0i64; batch_size * seq_len];
        let token_type_ids_tensor = Tensor::from_array((shape, token_type_ids.into_boxed_slice()))
            .map_err(embed_err("failed to build token_type_ids tensor"))?;

        // Step 3: Run ONNX inference
        let mut session = self
            .session
            .lock()
            .map_err(|e| MemoryError::embedding(format!("session lock poisoned: {e}")))?;

        let outputs = session
            .run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor,
            })
            .map_err(embed_err("inference failed"))?;

        // Step 4: Extract token embeddings: shape [batch, seq_len, hidden]
        // The output name varies by ONNX export. Try common names, fall back to index 0.
        let token_emb_value = outputs
            .get("token_embeddings")
            .or_else(|| outputs.get("last_hidden_state"))
            .unwrap_or_else(|| &outputs[0]);

        let (shape, data) = token_emb_value
            .try_extract_tensor::<f32>()
            .map_err(embed_err("failed to extract token embeddings tensor"))?;

        let dims: &[i64] = &shape;
        if dims.len() != 3
            || dims[0] != batch_size as i64
            || dims[1] != seq_len as i64
            || dims[2] != self.dimensions as i64
        {
            return Err(MemoryError::embedding(format!(
                "unexpected token embeddings shape: {dims:?}, expected [batch, seq, {}]",
                self.dimensions
            )));
        }
        let pooled = mean_pool(
            data,
            &attention_mask_flat,
            batch_size,
            seq_len,
            self.dimensions,
        );
        Ok(pooled.iter().map(|v| l2_normalize(v)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Average each sequence's token vectors, counting only positions the attention
/// mask marks as real tokens. `token_data` is `[batch, seq_len, hidden]` row-major
/// and `mask` is `[batch, seq_len]`. A sequence with no unmasked tokens pools to zero.
fn mean_pool(token_data: &[f32], mask: &[i64], batch: usize, seq_len: usize, hidden: usize) -> Vec<Vec<f32>> {
    (0..batch)
        .map(|b| {
            let mut sum = vec![0.0f32; hidden];
            let mut count = 0usize;
            for s in (0..seq_len).filter(|&s| mask[b * seq_len + s] != 0) {
                let token = &token_data[(b * seq_len + s) * hidden..][..hidden];
                sum.iter_mut().zip(token).for_each(|(acc, x)| *acc += x);
                count += 1;
            }
            if count > 0 {
                sum.iter_mut().for_each(|x| *x /= count as f32);
            }
            sum
        })
        .collect()
}

/// L2-normalize a vector. Returns a zero vector if the input norm is zero.
fn l2_normalize(v: &[f32]) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}

//! Text-to-vector embedding pipeline.
//!
//! Provides the [`EmbeddingProvider`] trait and a local ONNX implementation. The
//! provider is created once via [`create_provider`] and shared behind an `Arc` by
//! every component that needs it.

pub mod local;

use crate::config::EmbeddingConfig;
use crate::error::{MemoryError, Result};

/// Trait for embedding text into vectors.
///
/// Implementations are deterministic: identical text yields an identical vector of
/// exactly [`dimensions`](Self::dimensions) elements. All methods are synchronous;
/// callers in async contexts should use `tokio::task::spawn_blocking`.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string into a vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of text strings. Implementations may override for batched inference.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Number of dimensions this provider produces. Fixed for the provider's lifetime.
    fn dimensions(&self) -> usize;

    /// Identifier of the underlying model, recorded alongside stored vectors.
    fn model_id(&self) -> &str;
}

/// Create an embedding provider from config.
///
/// Currently only `"local"` is supported (ONNX Runtime + a sentence-transformers
/// export). Fails if model files are not found; run `fastmemory model download` first.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "local" => {
            let provider = local::LocalEmbeddingProvider::new(config)?;
            Ok(Box::new(provider))
        }
        other => Err(MemoryError::configuration(format!(
            "unknown embedding provider: {other}. Supported: local"
        ))),
    }
}

/// Check a provider output against the declared dimension. NaN or infinite
/// components make a vector unusable for cosine scoring.
pub fn validate_embedding(embedding: &[f32], dimensions: usize) -> Result<()> {
    if embedding.len() != dimensions {
        return Err(MemoryError::embedding(format!(
            "provider returned {} dimensions, expected {dimensions}",
            embedding.len()
        )));
    }
    if embedding.iter().any(|x| !x.is_finite()) {
        return Err(MemoryError::embedding("provider returned a non-finite component"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_well_formed() {
        assert!(validate_embedding(&[0.0, 1.0, 0.5], 3).is_ok());
    }

    #[test]
    fn validate_rejects_wrong_length() {
        let err = validate_embedding(&[0.0, 1.0], 3).unwrap_err();
        assert!(matches!(err, MemoryError::Embedding(_)));
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn validate_rejects_nan() {
        let err = validate_embedding(&[0.0, f32::NAN, 1.0], 3).unwrap_err();
        assert!(matches!(err, MemoryError::Embedding(_)));
    }

    #[test]
    fn unknown_provider_is_configuration_error() {
        let config = EmbeddingConfig {
            provider: "cloud".into(),
            ..EmbeddingConfig::default()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(matches!(err, MemoryError::Configuration(_)));
    }
}

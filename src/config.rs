use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::MemoryError;
use crate::gate::GateConfig;
use crate::memory::search::HybridConfig;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct FastMemoryConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub gate: GateConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub cache_dir: String,
    pub dimensions: usize,
    pub model_url: String,
    pub tokenizer_url: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_limit: usize,
    pub rrf_k: usize,
    /// How many candidates each of the lexical and vector lists contributes to fusion.
    pub hybrid_candidates: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_fastmemory_dir()
            .join("memory.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        let cache_dir = default_fastmemory_dir()
            .join("models")
            .to_string_lossy()
            .into_owned();
        Self {
            provider: "local".into(),
            model: "all-MiniLM-L6-v2".into(),
            cache_dir,
            dimensions: 384,
            model_url: "https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main/onnx/model.onnx".into(),
            tokenizer_url: "https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main/tokenizer.json".into(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            rrf_k: 60,
            hybrid_candidates: 30,
        }
    }
}

impl RetrievalConfig {
    /// Fusion settings for hybrid search.
    pub fn hybrid(&self) -> HybridConfig {
        HybridConfig {
            rrf_k: self.rrf_k,
            candidates: self.hybrid_candidates,
        }
    }
}

/// Returns `~/.fastmemory/`, or `./.fastmemory/` when no home directory is known.
pub fn default_fastmemory_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".fastmemory")
}

/// Returns the default config file path: `~/.fastmemory/config.toml`
pub fn default_config_path() -> PathBuf {
    default_fastmemory_dir().join("config.toml")
}

impl FastMemoryConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            FastMemoryConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides (FASTMEMORY_DB, FASTMEMORY_LOG_LEVEL,
    /// FASTMEMORY_MODEL_DIR).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("FASTMEMORY_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("FASTMEMORY_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("FASTMEMORY_MODEL_DIR") {
            self.embedding.cache_dir = val;
        }
    }

    /// Reject configurations the store cannot run with.
    pub fn validate(&self) -> std::result::Result<(), MemoryError> {
        if self.storage.db_path.trim().is_empty() {
            return Err(MemoryError::configuration("storage.db_path must not be empty"));
        }
        if self.embedding.dimensions == 0 {
            return Err(MemoryError::configuration(
                "embedding.dimensions must be greater than zero",
            ));
        }
        if self.retrieval.rrf_k == 0 {
            return Err(MemoryError::configuration("retrieval.rrf_k must be greater than zero"));
        }
        self.gate.validate()
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FastMemoryConfig::default();
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.retrieval.rrf_k, 60);
        assert_eq!(config.retrieval.hybrid_candidates, 30);
        assert_eq!(config.gate.min_chars, 20);
        assert_eq!(config.gate.max_chars, 800);
        assert!((config.gate.gap_threshold - 0.009).abs() < 1e-9);
        assert!((config.gate.novelty_threshold - 0.87).abs() < 1e-6);
        assert!(config.storage.db_path.ends_with("memory.db"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
log_level = "debug"

[storage]
db_path = "/tmp/test.db"

[gate]
novelty_threshold = 0.9
"#;
        let config: FastMemoryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.storage.db_path, "/tmp/test.db");
        assert!((config.gate.novelty_threshold - 0.9).abs() < 1e-6);
        // defaults still apply for unset fields
        assert_eq!(config.gate.min_chars, 20);
        assert_eq!(config.retrieval.rrf_k, 60);
    }

    #[test]
    fn validate_rejects_inverted_length_bounds() {
        let mut config = FastMemoryConfig::default();
        config.gate.min_chars = 900;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MemoryError::Configuration(_)));
        assert!(err.to_string().contains("min_chars"));
    }

    #[test]
    fn validate_rejects_empty_db_path_and_zero_dims() {
        let mut config = FastMemoryConfig::default();
        config.storage.db_path = "  ".into();
        assert!(config.validate().is_err());

        let mut config = FastMemoryConfig::default();
        config.embedding.dimensions = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = FastMemoryConfig::default();
        std::env::set_var("FASTMEMORY_DB", "/tmp/override.db");
        std::env::set_var("FASTMEMORY_LOG_LEVEL", "trace");
        std::env::set_var("FASTMEMORY_MODEL_DIR", "/tmp/models");

        config.apply_env_overrides();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.server.log_level, "trace");
        assert_eq!(config.embedding.cache_dir, "/tmp/models");

        // Clean up
        std::env::remove_var("FASTMEMORY_DB");
        std::env::remove_var("FASTMEMORY_LOG_LEVEL");
        std::env::remove_var("FASTMEMORY_MODEL_DIR");
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/db/memory.db"), PathBuf::from("/var/db/memory.db"));
    }
}

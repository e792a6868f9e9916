//! CLI `add` command.

use anyhow::{bail, Result};

use fastmemory::config::FastMemoryConfig;
use fastmemory::Metadata;

/// Store content, optionally behind the memorability gate.
pub async fn add(config: &FastMemoryConfig, content: &str, meta: &[String], gated: bool) -> Result<()> {
    let metadata = parse_metadata(meta)?;
    let store = super::open_store(config).await?;

    let stored = if gated {
        let gate = store.gate(config.gate).await?;
        match store.add_gated(content, metadata, &gate).await? {
            (_, Some(id)) => Some(id),
            (decision, None) => {
                println!("Not stored: {decision}");
                None
            }
        }
    } else {
        Some(store.add(content, metadata).await?)
    };

    if let Some(id) = stored {
        println!("Stored memory {id}");
    }
    store.close().await?;
    Ok(())
}

/// Parse `key=value` pairs. Values that parse as JSON keep their type; anything
/// else is stored as a string.
pub fn parse_metadata(pairs: &[String]) -> Result<Metadata> {
    let mut metadata = Metadata::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("metadata must be KEY=VALUE, got '{pair}'");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("metadata key is empty in '{pair}'");
        }
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        metadata.insert(key.to_string(), value);
    }
    Ok(metadata)
}

//! CLI `forget` command: delete one memory by ID.

use anyhow::{bail, Result};

use fastmemory::config::FastMemoryConfig;

pub async fn forget(config: &FastMemoryConfig, id: &str) -> Result<()> {
    let store = super::open_store(config).await?;
    let removed = store.delete(id).await?;
    store.close().await?;

    if !removed {
        bail!("no memory with id {id}");
    }
    println!("Deleted memory {id}");
    Ok(())
}

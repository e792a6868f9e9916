use anyhow::Result;

use fastmemory::config::FastMemoryConfig;

/// Display memory statistics in the terminal.
pub async fn stats(config: &FastMemoryConfig) -> Result<()> {
    let store = super::open_store(config).await?;
    let response = store.stats().await?;
    store.close().await?;

    println!("Memory Statistics");
    println!("{}", "=".repeat(40));
    println!("  Total memories:      {}", response.total_memories);
    if let Some(ref model) = response.embedding_model {
        println!("  Embedding model:     {model}");
    }
    if let Some(dim) = response.embedding_dim {
        println!("  Embedding dims:      {dim}");
    }
    println!("  Database size:       {} bytes", response.db_size_bytes);

    if let Some(ref oldest) = response.oldest_memory {
        println!("  Oldest memory:       {oldest}");
    }
    if let Some(ref newest) = response.newest_memory {
        println!("  Newest memory:       {newest}");
    }

    Ok(())
}

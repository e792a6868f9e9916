use anyhow::Result;

use fastmemory::config::FastMemoryConfig;
use fastmemory::SearchMode;

/// Run a search from the terminal.
pub async fn search(config: &FastMemoryConfig, query: &str, mode: SearchMode, limit: usize) -> Result<()> {
    let store = super::open_store(config).await?;
    let results = store.search(query, mode, limit).await?;
    store.close().await?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s) ({mode})\n", results.len());

    for (i, entry) in results.iter().enumerate() {
        println!(
            "  {}. {} (score: {:.4}, created: {})",
            i + 1,
            entry.id,
            entry.score.unwrap_or_default(),
            entry.created_at,
        );
        println!("     {}", super::preview(&entry.content, 120));
        if !entry.metadata.is_empty() {
            println!("     metadata: {}", serde_json::Value::Object(entry.metadata.clone()));
        }
        println!();
    }

    Ok(())
}

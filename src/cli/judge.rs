//! CLI `judge` command: show the gate's decision without storing anything.

use anyhow::Result;

use fastmemory::config::FastMemoryConfig;

pub async fn judge(config: &FastMemoryConfig, content: &str) -> Result<()> {
    let store = super::open_store(config).await?;
    let gate = store.gate(config.gate).await?;

    let assessment = gate.assess(content).await?;
    println!("Decision: {}", assessment.decision);

    // Length rejections never embed, so there is no breakdown to show.
    if let Some(score) = assessment.importance {
        println!(
            "  positive: {:.4}  negative: {:.4}  gap: {:.4} (threshold {:.4})",
            score.positive,
            score.negative,
            score.gap,
            gate.config().gap_threshold
        );
    }

    store.close().await?;
    Ok(())
}

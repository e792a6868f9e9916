//! Memorability gate: decides whether content should become a memory.
//!
//! Three stages, each able to short-circuit:
//!
//! 1. **Length**: fewer than `min_chars` or more than `max_chars` characters is rejected
//!    without touching the embedding provider.
//! 2. **Importance gap**: see [`prototypes`]; a gap below `gap_threshold` is rejected.
//! 3. **Novelty**: the nearest existing memory must be less similar than
//!    `novelty_threshold`, otherwise the content is a near-duplicate.
//!
//! A gate is obtained from [`MemoryStore::gate`](crate::agent_memory::MemoryStore::gate),
//! which builds the prototype embeddings once per store.

pub mod prototypes;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::agent_memory::MemoryStore;
use crate::error::{MemoryError, Result};
use prototypes::{ImportanceScore, PrototypeSet};

/// Gate thresholds. Defaults were tuned against one embedding model; recalibrate
/// them when the model changes.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    pub min_chars: usize,
    pub max_chars: usize,
    pub gap_threshold: f32,
    pub novelty_threshold: f32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_chars: 20,
            max_chars: 800,
            gap_threshold: 0.009,
            novelty_threshold: 0.87,
        }
    }
}

impl GateConfig {
    /// Default length bounds with the two tunable thresholds.
    pub fn with_thresholds(gap_threshold: f32, novelty_threshold: f32) -> Self {
        Self {
            gap_threshold,
            novelty_threshold,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_chars > self.max_chars {
            return Err(MemoryError::configuration(format!(
                "gate min_chars ({}) exceeds max_chars ({})",
                self.min_chars, self.max_chars
            )));
        }
        if !self.gap_threshold.is_finite() || !self.novelty_threshold.is_finite() {
            return Err(MemoryError::configuration("gate thresholds must be finite"));
        }
        Ok(())
    }
}

/// Outcome of evaluating one piece of content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    /// Worth storing.
    Accept { gap: f32 },
    TooShort { chars: usize },
    TooLong { chars: usize },
    /// Resembles ephemeral chatter more than durable facts.
    NotImportant { gap: f32 },
    /// An existing memory is at least `novelty_threshold` similar.
    Duplicate { id: String, similarity: f32 },
}

impl GateDecision {
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept { .. })
    }

    /// Short label for logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accept { .. } => "accept",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::NotImportant { .. } => "not_important",
            Self::Duplicate { .. } => "duplicate",
        }
    }
}

impl std::fmt::Display for GateDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept { gap } => write!(f, "accept (gap {gap:.4})"),
            Self::TooShort { chars } => write!(f, "rejected: too short ({chars} chars)"),
            Self::TooLong { chars } => write!(f, "rejected: too long ({chars} chars)"),
            Self::NotImportant { gap } => write!(f, "rejected: not important (gap {gap:.4})"),
            Self::Duplicate { id, similarity } => {
                write!(f, "rejected: near-duplicate of {id} (similarity {similarity:.4})")
            }
        }
    }
}

/// Length stage on its own. `None` means the content is within bounds.
pub fn check_length(content: &str, config: &GateConfig) -> Option<GateDecision> {
    let chars = content.chars().count();
    if chars < config.min_chars {
        Some(GateDecision::TooShort { chars })
    } else if chars > config.max_chars {
        Some(GateDecision::TooLong { chars })
    } else {
        None
    }
}

/// A gate decision plus what was measured to reach it.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub decision: GateDecision,
    /// `None` when the length stage rejected before embedding.
    pub importance: Option<ImportanceScore>,
    pub(crate) embedding: Option<Vec<f32>>,
}

/// A configured gate bound to one store. Cheap to clone.
#[derive(Clone)]
pub struct MemoryGate {
    config: GateConfig,
    prototypes: Arc<PrototypeSet>,
    store: MemoryStore,
}

impl MemoryGate {
    pub(crate) fn new(config: GateConfig, prototypes: Arc<PrototypeSet>, store: MemoryStore) -> Self {
        Self {
            config,
            prototypes,
            store,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Run all three stages and report why content was accepted or rejected.
    ///
    /// Rejections are decisions, not errors; `Err` only carries embedding or storage
    /// failures.
    pub async fn evaluate(&self, content: &str) -> Result<GateDecision> {
        Ok(self.assess(content).await?.decision)
    }

    /// Like [`evaluate`](Self::evaluate), but also hands back the importance
    /// breakdown and the content's embedding so callers need not embed again.
    pub async fn assess(&self, content: &str) -> Result<Assessment> {
        if let Some(decision) = check_length(content, &self.config) {
            tracing::debug!(decision = decision.label(), "gate length filter");
            return Ok(Assessment {
                decision,
                importance: None,
                embedding: None,
            });
        }

        let embedding = self.store.embed(content).await?;
        let importance = self.prototypes.score(&embedding);
        tracing::debug!(
            positive = importance.positive,
            negative = importance.negative,
            gap = importance.gap,
            "gate importance"
        );
        if importance.gap < self.config.gap_threshold {
            return Ok(Assessment {
                decision: GateDecision::NotImportant {
                    gap: importance.gap,
                },
                importance: Some(importance),
                embedding: Some(embedding),
            });
        }

        let decision = match self.store.nearest_neighbor(embedding.clone()).await? {
            Some((id, similarity)) if similarity >= self.config.novelty_threshold => {
                tracing::debug!(id = %id, similarity, "gate rejected near-duplicate");
                GateDecision::Duplicate { id, similarity }
            }
            _ => GateDecision::Accept {
                gap: importance.gap,
            },
        };
        Ok(Assessment {
            decision,
            importance: Some(importance),
            embedding: Some(embedding),
        })
    }

    /// `true` when content should be stored.
    pub async fn should_create(&self, content: &str) -> Result<bool> {
        Ok(self.evaluate(content).await?.is_accept())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_bounds_are_inclusive() {
        let config = GateConfig::default();
        assert_eq!(check_length(&"a".repeat(20), &config), None);
        assert_eq!(check_length(&"a".repeat(800), &config), None);
        assert_eq!(
            check_length(&"a".repeat(19), &config),
            Some(GateDecision::TooShort { chars: 19 })
        );
        assert_eq!(
            check_length(&"a".repeat(801), &config),
            Some(GateDecision::TooLong { chars: 801 })
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let config = GateConfig::default();
        // 20 two-byte characters
        assert_eq!(check_length(&"é".repeat(20), &config), None);
        assert!(check_length(&"é".repeat(19), &config).is_some());
    }

    #[test]
    fn with_thresholds_keeps_length_defaults() {
        let config = GateConfig::with_thresholds(0.02, 0.9);
        assert_eq!(config.min_chars, 20);
        assert_eq!(config.max_chars, 800);
        assert!((config.gap_threshold - 0.02).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_bad_configs() {
        let inverted = GateConfig {
            min_chars: 50,
            max_chars: 10,
            ..GateConfig::default()
        };
        assert!(matches!(inverted.validate(), Err(MemoryError::Configuration(_))));
        assert!(GateConfig::with_thresholds(f32::NAN, 0.87).validate().is_err());
        assert!(GateConfig::default().validate().is_ok());
    }

    #[test]
    fn decision_labels_and_display() {
        let d = GateDecision::Duplicate {
            id: "m1".into(),
            similarity: 0.93,
        };
        assert!(!d.is_accept());
        assert_eq!(d.label(), "duplicate");
        assert!(d.to_string().contains("m1"));
        assert!(GateDecision::Accept { gap: 0.1 }.is_accept());

        let json = serde_json::to_value(GateDecision::TooShort { chars: 3 }).unwrap();
        assert_eq!(json["decision"], "too_short");
        assert_eq!(json["chars"], 3);
    }
}

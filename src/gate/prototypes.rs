//! Dual-prototype importance scoring.
//!
//! Two fixed phrase sets anchor the poles of the test: durable, memorable facts
//! (positive) and ephemeral chatter / general knowledge (negative). Content is
//! important when it resembles the best positive prototype more than the average of
//! the two best negative prototypes.

use serde::Serialize;

use crate::embedding::{validate_embedding, EmbeddingProvider};
use crate::error::Result;
use crate::memory::vector::cosine_similarity;

pub const POSITIVE_PROTOTYPES: &[&str] = &[
    "user permanently prefers specific tools languages frameworks themes and hates specific alternatives for all future work",
    "user personal identity: name birthday allergy disability pronouns timezone contact email credential",
    "permanent project rule: always do X and never do Y when building deploying testing or configuring",
    "lesson learned from real experience: this specific approach solved a problem that another approach caused",
    "persistent project config: branch names ports registries CI pipelines that must stay consistent",
    "user explicitly asked to remember this fact for all future sessions and interactions",
    "user's personal work schedule availability and accessibility needs that affect every interaction",
    "user casually mentioned a permanent personal fact: language fluency work hours disability diet",
];

pub const NEGATIVE_PROTOTYPES: &[&str] = &[
    "casual chat: greetings thanks acknowledgments reactions feelings okay sounds good",
    "ephemeral event happening right now: build failing deploying fixing pushing committing running tests",
    "general tech knowledge: what a framework library protocol or language is and how it generally works",
    "question asking for help: how do I, can you help, what does this mean, should I use X or Y",
    "status narration: working on feature, had a meeting, team is doing X, spent yesterday on, client wants",
    "opinion about external tech: looks nice, is overhyped, talk was great, article is interesting, ecosystem moves fast",
    "emotional reaction to current work: frustrated, excited, love it, hate it, finally done, best code ever",
    "React is a library, TypeScript adds types, Docker is portable, Node runs JS outside browser",
    "the build is failing, just pushed a fix, tests passing locally, linter complaining, deploying now",
    "how do I set up nginx, can you debug this, what does this error mean, should I use Map or Object",
    "working on payment feature, had sprint planning, code review took long, using Figma for designs",
];

/// How many of the closest negative prototypes are averaged.
const NEGATIVE_TOP_N: usize = 2;

/// Embedded prototype phrases. Built once per store, then shared read-only.
#[derive(Debug, Clone)]
pub struct PrototypeSet {
    positive: Vec<Vec<f32>>,
    negative: Vec<Vec<f32>>,
}

/// Breakdown of one importance measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImportanceScore {
    /// Highest similarity to any positive prototype.
    pub positive: f32,
    /// Mean similarity to the closest negative prototypes.
    pub negative: f32,
    /// `positive - negative`.
    pub gap: f32,
}

impl PrototypeSet {
    /// Embed the built-in phrase sets with `provider`.
    pub fn build(provider: &dyn EmbeddingProvider) -> Result<Self> {
        Self::build_from(provider, POSITIVE_PROTOTYPES, NEGATIVE_PROTOTYPES)
    }

    /// Embed custom phrase sets.
    pub fn build_from(
        provider: &dyn EmbeddingProvider,
        positive: &[&str],
        negative: &[&str],
    ) -> Result<Self> {
        let dims = provider.dimensions();
        let embed_all = |phrases: &[&str]| -> Result<Vec<Vec<f32>>> {
            let embeddings = provider.embed_batch(phrases)?;
            for e in &embeddings {
                validate_embedding(e, dims)?;
            }
            Ok(embeddings)
        };

        let set = Self::from_embeddings(embed_all(positive)?, embed_all(negative)?);
        tracing::info!(
            positive = set.positive.len(),
            negative = set.negative.len(),
            "prototype set built"
        );
        Ok(set)
    }

    /// Assemble a set from precomputed embeddings.
    pub fn from_embeddings(positive: Vec<Vec<f32>>, negative: Vec<Vec<f32>>) -> Self {
        Self { positive, negative }
    }

    /// Score an embedding against both poles.
    ///
    /// An empty pole contributes 0.0. With a single negative prototype its similarity
    /// is used as-is.
    pub fn score(&self, embedding: &[f32]) -> ImportanceScore {
        let positive = self
            .positive
            .iter()
            .map(|p| cosine_similarity(embedding, p))
            .fold(None, |best: Option<f32>, s| Some(best.map_or(s, |b| b.max(s))))
            .unwrap_or(0.0);

        let mut negatives: Vec<f32> = self
            .negative
            .iter()
            .map(|p| cosine_similarity(embedding, p))
            .collect();
        negatives.sort_by(|a, b| b.total_cmp(a));
        let top = &negatives[..negatives.len().min(NEGATIVE_TOP_N)];
        let negative = if top.is_empty() {
            0.0
        } else {
            top.iter().sum::<f32>() / top.len() as f32
        };

        ImportanceScore {
            positive,
            negative,
            gap: positive - negative,
        }
    }
}

//! Core memory type definitions.

use serde::{Deserialize, Serialize};

/// Open key → value mapping attached to a memory. Values are JSON kinds (null,
/// bool, number, string, array, object); ranking and gating never look inside.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A stored memory as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// UUID v7 (time-sortable) primary key. Never reused.
    pub id: String,
    /// The full text content of the memory.
    pub content: String,
    pub metadata: Metadata,
    /// RFC 3339 creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Ranking score; only present on entries returned from a search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl MemoryEntry {
    pub(crate) fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Which ranked list a search draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// FTS5 BM25 only.
    Lexical,
    /// Exhaustive cosine similarity only.
    Vector,
    /// Both lists merged with Reciprocal Rank Fusion.
    Hybrid,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Vector => "vector",
            Self::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexical" | "bm25" => Ok(Self::Lexical),
            "vector" => Ok(Self::Vector),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(format!("unknown search mode: {s}")),
        }
    }
}

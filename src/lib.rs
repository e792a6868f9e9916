//! Persistent memory for conversational agents.
//!
//! fastmemory stores short text records alongside vector embeddings in a single
//! SQLite file, retrieves them by keyword, by meaning, or by both fused together, and
//! decides on its own whether a piece of content is worth remembering.
//!
//! # Architecture
//!
//! - **Storage**: SQLite with an FTS5 index kept in sync by triggers; embeddings are
//!   stored as little-endian `f32` blobs and scored exhaustively in Rust
//! - **Embeddings**: Local ONNX Runtime with all-MiniLM-L6-v2 (384 dimensions)
//! - **Search**: BM25, cosine similarity, or both merged via Reciprocal Rank Fusion
//! - **Gate**: length filter, dual-prototype importance gap, and novelty check
//!
//! # Modules
//!
//! - [`agent_memory`]: [`MemoryStore`], the async entry point
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite connection setup and schema
//! - [`embedding`]: Text-to-vector embedding pipeline via ONNX Runtime
//! - [`gate`]: Memorability and novelty decisions
//! - [`memory`]: Synchronous write path, search, ranking, and stats

pub mod agent_memory;
pub mod config;
pub mod db;
pub mod embedding;
pub mod error;
pub mod gate;
pub mod memory;

pub use agent_memory::MemoryStore;
pub use error::{MemoryError, Result};
pub use gate::{GateConfig, GateDecision, MemoryGate};
pub use memory::types::{MemoryEntry, Metadata, SearchMode};

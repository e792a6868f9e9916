//! Core memory engine: write path, lexical / vector / hybrid search, and stats.
//!
//! Functions here are synchronous and take a borrowed [`rusqlite::Connection`];
//! [`crate::agent_memory::MemoryStore`] wraps them for async callers.

pub mod fusion;
pub mod search;
pub mod stats;
pub mod store;
pub mod types;
pub mod vector;

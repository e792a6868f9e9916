//! Reciprocal Rank Fusion.
//!
//! BM25 and cosine scores live on unrelated scales, so the hybrid ranker fuses by
//! rank position only: the item at 0-based rank `i` of a list contributes
//! `1 / (k + i)`, and an id's fused score is the sum over every list it appears in.

use std::collections::HashMap;

/// Fusion constant used unless configured otherwise.
pub const DEFAULT_RRF_K: usize = 60;

/// Merge ranked id lists into one list of `(id, fused_score)`, descending, truncated
/// to `limit`.
///
/// Ties are broken by first encounter (list order, then rank), so identical inputs
/// always produce identical output.
pub fn rrf_merge<S: AsRef<str>>(lists: &[&[S]], k: usize, limit: usize) -> Vec<(String, f64)> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut merged: Vec<(String, f64)> = Vec::new();

    for list in lists {
        for (rank, id) in list.iter().enumerate() {
            let id = id.as_ref();
            let contribution = 1.0 / (k as f64 + rank as f64);
            match position.get(id) {
                Some(&idx) => merged[idx].1 += contribution,
                None => {
                    position.insert(id, merged.len());
                    merged.push((id.to_string(), contribution));
                }
            }
        }
    }

    // Stable sort keeps encounter order for equal scores
    merged.sort_by(|a, b| b.1.total_cmp(&a.1));
    merged.truncate(limit);
    merged
}

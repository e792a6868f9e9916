//! Exhaustive cosine-similarity scoring.
//!
//! Every candidate is scored; there is no pruning or approximate structure. That is
//! fine for agent-sized corpora (tens of thousands of entries) and is the scaling
//! limit of the store. An ANN index can replace [`exhaustive_search`] without
//! changing callers as long as it keeps the same ordering contract.

/// Cosine similarity of two vectors.
///
/// Returns 0.0 when either norm is zero or the lengths differ, so callers never see NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    let sim = dot / denom;
    if sim.is_finite() {
        sim
    } else {
        0.0
    }
}

/// Score `query` against every candidate and return `(id, similarity)` sorted
/// descending, truncated to `limit`.
///
/// Candidates without an embedding score 0.0 and still participate. Ties keep the
/// candidates' input order.
pub fn exhaustive_search<'a, I>(query: &[f32], candidates: I, limit: usize) -> Vec<(String, f32)>
where
    I: IntoIterator<Item = (&'a str, Option<&'a [f32]>)>,
{
    let mut scored: Vec<(String, f32)> = candidates
        .into_iter()
        .map(|(id, embedding)| {
            let sim = embedding.map_or(0.0, |e| cosine_similarity(query, e));
            (id.to_string(), sim)
        })
        .collect();

    // sort_by is stable, so equal scores (including 0.0 vs -0.0) stay in insertion order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
}

/// Encode an embedding as little-endian f32 bytes for the `embedding` BLOB column.
pub fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|x| x.to_le_bytes()).collect()
}

/// Decode a BLOB written by [`embedding_to_bytes`]. Returns `None` for a length that
/// is not a multiple of four.
pub fn embedding_from_bytes(bytes: &[u8]) -> Option<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}

//! Exact Jaccard similarity over shingle sets.
//!
//! LSH retrieval is only a candidate filter; final ranking always re-scores
//! with the true Jaccard similarity of the full shingle sets.

use crate::similarity::shingles::ShingleSet;

/// Jaccard similarity `|A ∩ B| / |A ∪ B|`.
///
/// Defined as `0.0` when either set is empty: an empty field carries no
/// comparable content, and this also keeps the division well-defined.
pub fn jaccard_similarity(a: &ShingleSet, b: &ShingleSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|s| large.contains(*s)).count();
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64
}

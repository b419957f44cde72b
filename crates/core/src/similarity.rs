//! Normalized edit-distance similarity used to suggest a known item for an
//! unrecognized one.

use crate::normalize::normalize_key;

/// Suggestions must score strictly above this
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// A candidate that beat the threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarMatch<'a> {
    pub candidate: &'a str,
    pub score: f64,
}

/// `1 - levenshtein(a, b) / max(len(a), len(b))` over case-normalized input,
/// counting characters rather than bytes.
///
/// Two empty strings are an exact (trivial) match and score 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_key(a);
    let b = normalize_key(b);
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = strsim::levenshtein(&a, &b);
    1.0 - distance as f64 / max_len as f64
}

/// Best-scoring candidate above [`DEFAULT_SIMILARITY_THRESHOLD`]
pub fn find_best_match<'a, I>(target: &str, candidates: I) -> Option<SimilarMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    best_match_above(target, candidates, DEFAULT_SIMILARITY_THRESHOLD)
}

/// Best-scoring candidate strictly above `threshold`.
///
/// Ties keep the first candidate in iteration order.
pub fn best_match_above<'a, I>(target: &str, candidates: I, threshold: f64) -> Option<SimilarMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<SimilarMatch<'a>> = None;
    let mut best_score = threshold;
    for candidate in candidates {
        let score = similarity(target, candidate);
        if score > best_score {
            best_score = score;
            best = Some(SimilarMatch { candidate, score });
        }
    }
    best
}
